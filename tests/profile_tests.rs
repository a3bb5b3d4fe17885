mod common;

use std::sync::Arc;

use ward::error::ApiError;
use ward::models::branch::{CreateBranch, UpdateBranch};
use ward::models::provider::UpdateProvider;
use ward::models::Role;
use ward::repository::{BranchRepository, PatientRepository, ProviderRepository};
use ward::services::{BranchService, OwnershipGuard};

fn branch_service(pool: &sqlx::PgPool) -> BranchService {
    let providers = Arc::new(ProviderRepository::new(pool.clone()));
    let patients = Arc::new(PatientRepository::new(pool.clone()));
    BranchService::new(
        Arc::new(BranchRepository::new(pool.clone())),
        providers.clone(),
        Arc::new(OwnershipGuard::new(providers, patients)),
    )
}

#[tokio::test]
async fn provider_profile_upserts_and_patches() {
    let pool = common::setup_test_db().await;
    let repo = ProviderRepository::new(pool.clone());

    let account = common::seed_account(&pool, Role::Provider).await;

    let created = repo
        .upsert_profile(
            account.id,
            &UpdateProvider {
                name: Some("Dr. First".to_string()),
                ..UpdateProvider::default()
            },
        )
        .await
        .expect("Failed to create profile");
    assert!(created.available);
    assert_eq!(created.name.as_deref(), Some("Dr. First"));

    // Second write patches without clearing untouched fields.
    let patched = repo
        .upsert_profile(
            account.id,
            &UpdateProvider {
                phone_number: Some("0700".to_string()),
                ..UpdateProvider::default()
            },
        )
        .await
        .expect("Failed to patch profile");
    assert_eq!(patched.id, created.id);
    assert_eq!(patched.name.as_deref(), Some("Dr. First"));
    assert_eq!(patched.phone_number.as_deref(), Some("0700"));

    let toggled = repo
        .toggle_availability(account.id)
        .await
        .expect("Failed to toggle availability");
    assert!(!toggled.available);

    common::delete_account(&pool, account.id).await;
}

#[tokio::test]
async fn branch_ownership_gates_mutation() {
    let pool = common::setup_test_db().await;
    let service = branch_service(&pool);

    let owner_account = common::seed_account(&pool, Role::Provider).await;
    let intruder_account = common::seed_account(&pool, Role::Provider).await;
    common::seed_provider(&pool, owner_account.id).await;
    common::seed_provider(&pool, intruder_account.id).await;

    let branch = service
        .create(
            &owner_account,
            CreateBranch {
                name: "Main Clinic".to_string(),
                address: Some("12 Hill Road".to_string()),
                phone_number: None,
                email: None,
                whatsapp: None,
                hotline: None,
            },
        )
        .await
        .expect("Failed to create branch");

    let err = service
        .update(
            branch.id,
            UpdateBranch {
                name: Some("Taken Over".to_string()),
                ..UpdateBranch::default()
            },
            &intruder_account,
        )
        .await
        .unwrap_err();
    match err {
        ApiError::Forbidden(message) => assert_eq!(message, "You do not own this branch"),
        other => panic!("expected forbidden error, got {other:?}"),
    }

    let updated = service
        .update(
            branch.id,
            UpdateBranch {
                name: Some("Main Clinic Annex".to_string()),
                ..UpdateBranch::default()
            },
            &owner_account,
        )
        .await
        .expect("Owner update should pass");
    assert_eq!(updated.name, "Main Clinic Annex");

    common::delete_account(&pool, owner_account.id).await;
    common::delete_account(&pool, intruder_account.id).await;
}

#[tokio::test]
async fn branch_metrics_count_availability_per_provider() {
    let pool = common::setup_test_db().await;
    let service = branch_service(&pool);
    let branches = BranchRepository::new(pool.clone());

    let account = common::seed_account(&pool, Role::Provider).await;
    let provider = common::seed_provider(&pool, account.id).await;

    for name in ["North", "South", "East"] {
        service
            .create(
                &account,
                CreateBranch {
                    name: name.to_string(),
                    address: None,
                    phone_number: None,
                    email: None,
                    whatsapp: None,
                    hotline: None,
                },
            )
            .await
            .expect("Failed to create branch");
    }

    let listing = branches
        .find_paginated(&{
            let mut params = std::collections::HashMap::new();
            params.insert(
                "filterBy[provider_id]".to_string(),
                provider.id.to_string(),
            );
            ward::query::PageQuery::from_params(&params)
        })
        .await
        .expect("Failed to list branches");
    let first = &listing.data[0];
    service
        .toggle_availability(first.id, &account)
        .await
        .expect("Failed to disable branch");

    let metrics = service
        .metrics(Some(provider.id))
        .await
        .expect("Failed to fetch metrics");
    assert_eq!(metrics.total, 3);
    assert_eq!(metrics.active, 2);
    assert_eq!(metrics.inactive, 1);

    common::delete_account(&pool, account.id).await;
}

#[tokio::test]
async fn patient_profile_round_trips() {
    let pool = common::setup_test_db().await;
    let repo = PatientRepository::new(pool.clone());

    let account = common::seed_account(&pool, Role::Patient).await;
    let patient = common::seed_patient(&pool, account.id).await;

    assert_eq!(patient.first_name.as_deref(), Some("Ada"));

    let by_account = repo
        .find_by_account(account.id)
        .await
        .unwrap()
        .expect("Profile should resolve by account");
    assert_eq!(by_account.id, patient.id);

    let by_either = repo
        .find_by_id_or_account(account.id)
        .await
        .unwrap()
        .expect("Profile should resolve by account id too");
    assert_eq!(by_either.id, patient.id);

    common::delete_account(&pool, account.id).await;
}
