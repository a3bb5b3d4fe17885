mod common;

use chrono::{Duration, Utc};
use uuid::Uuid;

use ward::error::ApiError;
use ward::models::encounter::{CancelEncounter, MetricsFilter, UpdateEncounter};
use ward::models::{EncounterStatus, EncounterType, Role};
use ward::repository::ProviderRepository;

#[tokio::test]
async fn create_encounter_starts_scheduled() {
    let pool = common::setup_test_db().await;
    let service = common::encounter_service(&pool);

    let provider_account = common::seed_account(&pool, Role::Provider).await;
    let patient_account = common::seed_account(&pool, Role::Patient).await;
    let provider = common::seed_provider(&pool, provider_account.id).await;
    let patient = common::seed_patient(&pool, patient_account.id).await;

    let encounter = service
        .create(
            common::encounter_payload(patient.id, provider.id, Utc::now() + Duration::days(1)),
            &provider_account,
        )
        .await
        .expect("Failed to create encounter");

    assert_eq!(encounter.status, EncounterStatus::Scheduled);
    assert_eq!(encounter.encounter_type, EncounterType::Consultation);
    assert_eq!(encounter.symptoms, vec!["headache", "fever"]);
    assert!(encounter.actual_start_time.is_none());

    common::delete_account(&pool, provider_account.id).await;
    common::delete_account(&pool, patient_account.id).await;
}

#[tokio::test]
async fn create_rejects_disabled_provider() {
    let pool = common::setup_test_db().await;
    let service = common::encounter_service(&pool);

    let provider_account = common::seed_account(&pool, Role::Provider).await;
    let patient_account = common::seed_account(&pool, Role::Patient).await;
    let provider = common::seed_provider(&pool, provider_account.id).await;
    let patient = common::seed_patient(&pool, patient_account.id).await;

    ProviderRepository::new(pool.clone())
        .toggle_availability(provider_account.id)
        .await
        .expect("Failed to disable provider");

    let err = service
        .create(
            common::encounter_payload(patient.id, provider.id, Utc::now() + Duration::days(1)),
            &provider_account,
        )
        .await
        .unwrap_err();

    match err {
        ApiError::Validation(message) => assert_eq!(message, "Provider has been disabled"),
        other => panic!("expected validation error, got {other:?}"),
    }

    common::delete_account(&pool, provider_account.id).await;
    common::delete_account(&pool, patient_account.id).await;
}

#[tokio::test]
async fn create_rejects_missing_references() {
    let pool = common::setup_test_db().await;
    let service = common::encounter_service(&pool);

    let provider_account = common::seed_account(&pool, Role::Provider).await;
    let patient_account = common::seed_account(&pool, Role::Patient).await;
    let provider = common::seed_provider(&pool, provider_account.id).await;

    let err = service
        .create(
            common::encounter_payload(
                Uuid::new_v4(),
                provider.id,
                Utc::now() + Duration::days(1),
            ),
            &provider_account,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));

    common::delete_account(&pool, provider_account.id).await;
    common::delete_account(&pool, patient_account.id).await;
}

#[tokio::test]
async fn follow_up_reference_requires_follow_up_type() {
    let pool = common::setup_test_db().await;
    let service = common::encounter_service(&pool);

    let provider_account = common::seed_account(&pool, Role::Provider).await;
    let patient_account = common::seed_account(&pool, Role::Patient).await;
    let provider = common::seed_provider(&pool, provider_account.id).await;
    let patient = common::seed_patient(&pool, patient_account.id).await;

    let first = service
        .create(
            common::encounter_payload(patient.id, provider.id, Utc::now() + Duration::days(1)),
            &provider_account,
        )
        .await
        .expect("Failed to create initial encounter");

    let mut payload =
        common::encounter_payload(patient.id, provider.id, Utc::now() + Duration::days(2));
    payload.follow_up_encounter_id = Some(first.id);
    // encounter_type deliberately left as CONSULTATION

    let err = service.create(payload, &provider_account).await.unwrap_err();
    match err {
        ApiError::Validation(message) => {
            assert_eq!(
                message,
                "Encounter type must be follow up if there's a follow up id"
            )
        }
        other => panic!("expected validation error, got {other:?}"),
    }

    let mut payload =
        common::encounter_payload(patient.id, provider.id, Utc::now() + Duration::days(2));
    payload.follow_up_encounter_id = Some(first.id);
    payload.encounter_type = EncounterType::FollowUp;
    let follow_up = service
        .create(payload, &provider_account)
        .await
        .expect("Failed to create follow-up encounter");
    assert_eq!(follow_up.follow_up_encounter_id, Some(first.id));

    common::delete_account(&pool, provider_account.id).await;
    common::delete_account(&pool, patient_account.id).await;
}

#[tokio::test]
async fn lifecycle_happy_path() {
    let pool = common::setup_test_db().await;
    let service = common::encounter_service(&pool);

    let provider_account = common::seed_account(&pool, Role::Provider).await;
    let patient_account = common::seed_account(&pool, Role::Patient).await;
    let provider = common::seed_provider(&pool, provider_account.id).await;
    let patient = common::seed_patient(&pool, patient_account.id).await;

    let encounter = service
        .create(
            common::encounter_payload(patient.id, provider.id, Utc::now() - Duration::minutes(5)),
            &provider_account,
        )
        .await
        .expect("Failed to create encounter");

    let started = service
        .start(encounter.id, &provider_account)
        .await
        .expect("Failed to start encounter");
    assert_eq!(started.status, EncounterStatus::InProgress);
    assert!(started.actual_start_time.is_some());

    let completed = service
        .complete(encounter.id, &provider_account)
        .await
        .expect("Failed to complete encounter");
    assert_eq!(completed.status, EncounterStatus::Completed);
    assert!(completed.actual_end_time.is_some());

    common::delete_account(&pool, provider_account.id).await;
    common::delete_account(&pool, patient_account.id).await;
}

#[tokio::test]
async fn start_is_rejected_before_the_scheduled_time() {
    let pool = common::setup_test_db().await;
    let service = common::encounter_service(&pool);

    let provider_account = common::seed_account(&pool, Role::Provider).await;
    let patient_account = common::seed_account(&pool, Role::Patient).await;
    let provider = common::seed_provider(&pool, provider_account.id).await;
    let patient = common::seed_patient(&pool, patient_account.id).await;

    let encounter = service
        .create(
            common::encounter_payload(patient.id, provider.id, Utc::now() + Duration::hours(2)),
            &provider_account,
        )
        .await
        .expect("Failed to create encounter");

    let err = service
        .start(encounter.id, &provider_account)
        .await
        .unwrap_err();
    match err {
        ApiError::Validation(message) => {
            assert_eq!(message, "Cannot start encounter before scheduled date/time")
        }
        other => panic!("expected validation error, got {other:?}"),
    }

    common::delete_account(&pool, provider_account.id).await;
    common::delete_account(&pool, patient_account.id).await;
}

#[tokio::test]
async fn complete_requires_in_progress() {
    let pool = common::setup_test_db().await;
    let service = common::encounter_service(&pool);

    let provider_account = common::seed_account(&pool, Role::Provider).await;
    let patient_account = common::seed_account(&pool, Role::Patient).await;
    let provider = common::seed_provider(&pool, provider_account.id).await;
    let patient = common::seed_patient(&pool, patient_account.id).await;

    let encounter = service
        .create(
            common::encounter_payload(patient.id, provider.id, Utc::now() - Duration::minutes(5)),
            &provider_account,
        )
        .await
        .expect("Failed to create encounter");

    let err = service
        .complete(encounter.id, &provider_account)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Conflict(_)));

    common::delete_account(&pool, provider_account.id).await;
    common::delete_account(&pool, patient_account.id).await;
}

#[tokio::test]
async fn cancel_persists_the_reason_and_is_terminal() {
    let pool = common::setup_test_db().await;
    let service = common::encounter_service(&pool);

    let provider_account = common::seed_account(&pool, Role::Provider).await;
    let patient_account = common::seed_account(&pool, Role::Patient).await;
    let provider = common::seed_provider(&pool, provider_account.id).await;
    let patient = common::seed_patient(&pool, patient_account.id).await;

    let encounter = service
        .create(
            common::encounter_payload(patient.id, provider.id, Utc::now() + Duration::days(1)),
            &provider_account,
        )
        .await
        .expect("Failed to create encounter");

    let cancelled = service
        .cancel(
            encounter.id,
            CancelEncounter {
                reason: Some("patient travelled".to_string()),
            },
            &provider_account,
        )
        .await
        .expect("Failed to cancel encounter");
    assert_eq!(cancelled.status, EncounterStatus::Cancelled);
    assert_eq!(
        cancelled.cancellation_reason.as_deref(),
        Some("patient travelled")
    );

    let err = service
        .cancel(encounter.id, CancelEncounter::default(), &provider_account)
        .await
        .unwrap_err();
    match err {
        ApiError::Validation(message) => assert_eq!(message, "Encounter has been cancelled"),
        other => panic!("expected validation error, got {other:?}"),
    }

    common::delete_account(&pool, provider_account.id).await;
    common::delete_account(&pool, patient_account.id).await;
}

#[tokio::test]
async fn another_provider_cannot_touch_the_encounter() {
    let pool = common::setup_test_db().await;
    let service = common::encounter_service(&pool);

    let owner_account = common::seed_account(&pool, Role::Provider).await;
    let intruder_account = common::seed_account(&pool, Role::Provider).await;
    let patient_account = common::seed_account(&pool, Role::Patient).await;
    let owner = common::seed_provider(&pool, owner_account.id).await;
    common::seed_provider(&pool, intruder_account.id).await;
    let patient = common::seed_patient(&pool, patient_account.id).await;

    let encounter = service
        .create(
            common::encounter_payload(patient.id, owner.id, Utc::now() - Duration::minutes(5)),
            &owner_account,
        )
        .await
        .expect("Failed to create encounter");

    let err = service
        .update(
            encounter.id,
            UpdateEncounter {
                clinical_notes: Some("hijacked".to_string()),
                ..UpdateEncounter::default()
            },
            &intruder_account,
        )
        .await
        .unwrap_err();
    match err {
        ApiError::Forbidden(message) => assert_eq!(message, "You do not own this encounter"),
        other => panic!("expected forbidden error, got {other:?}"),
    }

    assert!(service.start(encounter.id, &intruder_account).await.is_err());
    assert!(service
        .cancel(encounter.id, CancelEncounter::default(), &intruder_account)
        .await
        .is_err());

    common::delete_account(&pool, owner_account.id).await;
    common::delete_account(&pool, intruder_account.id).await;
    common::delete_account(&pool, patient_account.id).await;
}

#[tokio::test]
async fn admins_bypass_ownership() {
    let pool = common::setup_test_db().await;
    let service = common::encounter_service(&pool);

    let provider_account = common::seed_account(&pool, Role::Provider).await;
    let patient_account = common::seed_account(&pool, Role::Patient).await;
    let admin_account = common::seed_account(&pool, Role::Admin).await;
    let provider = common::seed_provider(&pool, provider_account.id).await;
    let patient = common::seed_patient(&pool, patient_account.id).await;

    let encounter = service
        .create(
            common::encounter_payload(patient.id, provider.id, Utc::now() - Duration::minutes(5)),
            &provider_account,
        )
        .await
        .expect("Failed to create encounter");

    let started = service
        .start(encounter.id, &admin_account)
        .await
        .expect("Admin should bypass ownership");
    assert_eq!(started.status, EncounterStatus::InProgress);

    common::delete_account(&pool, provider_account.id).await;
    common::delete_account(&pool, patient_account.id).await;
    common::delete_account(&pool, admin_account.id).await;
}

#[tokio::test]
async fn metrics_count_by_status_and_type() {
    let pool = common::setup_test_db().await;
    let service = common::encounter_service(&pool);

    let provider_account = common::seed_account(&pool, Role::Provider).await;
    let patient_account = common::seed_account(&pool, Role::Patient).await;
    let provider = common::seed_provider(&pool, provider_account.id).await;
    let patient = common::seed_patient(&pool, patient_account.id).await;

    for _ in 0..3 {
        service
            .create(
                common::encounter_payload(
                    patient.id,
                    provider.id,
                    Utc::now() - Duration::minutes(5),
                ),
                &provider_account,
            )
            .await
            .expect("Failed to create encounter");
    }

    let one = service
        .create(
            common::encounter_payload(patient.id, provider.id, Utc::now() - Duration::minutes(5)),
            &provider_account,
        )
        .await
        .expect("Failed to create encounter");
    service
        .start(one.id, &provider_account)
        .await
        .expect("Failed to start encounter");

    let metrics = service
        .metrics(MetricsFilter {
            provider_id: Some(provider.id),
            ..MetricsFilter::default()
        })
        .await
        .expect("Failed to fetch metrics");

    assert_eq!(metrics.total, 4);
    assert_eq!(metrics.scheduled, 3);
    assert_eq!(metrics.in_progress, 1);
    assert_eq!(metrics.completed, 0);
    assert_eq!(metrics.cancelled, 0);
    assert_eq!(metrics.consultation, 4);
    assert_eq!(metrics.follow_ups, 0);

    common::delete_account(&pool, provider_account.id).await;
    common::delete_account(&pool, patient_account.id).await;
}
