mod common;

use std::collections::HashMap;

use uuid::Uuid;
use ward::models::medication::CreateMedication;
use ward::models::Role;
use ward::query::PageQuery;
use ward::repository::MedicationRepository;

fn params(pairs: &[(&str, String)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

async fn seed_medications(
    pool: &sqlx::PgPool,
    patient_id: Uuid,
    provider_id: Uuid,
    count: usize,
) {
    let repo = MedicationRepository::new(pool.clone());
    for i in 0..count {
        let data = CreateMedication {
            name: if i % 2 == 0 {
                format!("Amoxicillin {}", i)
            } else {
                format!("Ibuprofen {}", i)
            },
            dosage: "500mg".to_string(),
            frequency: "bid".to_string(),
            duration: "5 days".to_string(),
            instructions: None,
            drug_form: Some("tablet".to_string()),
            quantity: Some(10.0),
            patient_id,
            provider_id,
            encounter_id: None,
        };
        repo.create(&data, &format!("MEDTEST{}", i))
            .await
            .expect("Failed to seed medication");
    }
}

#[tokio::test]
async fn pages_are_bounded_and_totals_are_exact() {
    let pool = common::setup_test_db().await;

    let provider_account = common::seed_account(&pool, Role::Provider).await;
    let patient_account = common::seed_account(&pool, Role::Patient).await;
    let provider = common::seed_provider(&pool, provider_account.id).await;
    let patient = common::seed_patient(&pool, patient_account.id).await;

    seed_medications(&pool, patient.id, provider.id, 15).await;

    let repo = MedicationRepository::new(pool.clone());
    let scope = ("filterBy[provider_id]", provider.id.to_string());

    let page_one = repo
        .find_paginated(&PageQuery::from_params(&params(&[scope.clone()])))
        .await
        .expect("Failed to fetch page one");
    assert_eq!(page_one.total, 15);
    assert_eq!(page_one.page, 1);
    assert_eq!(page_one.page_size, 10);
    assert_eq!(page_one.total_pages, 2);
    assert_eq!(page_one.data.len(), 10);

    let page_two = repo
        .find_paginated(&PageQuery::from_params(&params(&[
            scope.clone(),
            ("page", "2".to_string()),
        ])))
        .await
        .expect("Failed to fetch page two");
    assert_eq!(page_two.total, 15);
    assert_eq!(page_two.data.len(), 5);

    // No row appears on both pages.
    for row in &page_two.data {
        assert!(page_one.data.iter().all(|m| m.id != row.id));
    }

    common::delete_account(&pool, provider_account.id).await;
    common::delete_account(&pool, patient_account.id).await;
}

#[tokio::test]
async fn search_matches_substrings_case_insensitively() {
    let pool = common::setup_test_db().await;

    let provider_account = common::seed_account(&pool, Role::Provider).await;
    let patient_account = common::seed_account(&pool, Role::Patient).await;
    let provider = common::seed_provider(&pool, provider_account.id).await;
    let patient = common::seed_patient(&pool, patient_account.id).await;

    seed_medications(&pool, patient.id, provider.id, 10).await;

    let repo = MedicationRepository::new(pool.clone());
    let found = repo
        .find_paginated(&PageQuery::from_params(&params(&[
            ("filterBy[provider_id]", provider.id.to_string()),
            ("search", "amoxi".to_string()),
            ("searchFields", "name".to_string()),
        ])))
        .await
        .expect("Failed to search");

    assert_eq!(found.total, 5);
    assert!(found
        .data
        .iter()
        .all(|m| m.name.to_lowercase().contains("amoxi")));

    common::delete_account(&pool, provider_account.id).await;
    common::delete_account(&pool, patient_account.id).await;
}

#[tokio::test]
async fn filters_coerce_scalar_values() {
    let pool = common::setup_test_db().await;

    let provider_account = common::seed_account(&pool, Role::Provider).await;
    let patient_account = common::seed_account(&pool, Role::Patient).await;
    let provider = common::seed_provider(&pool, provider_account.id).await;
    let patient = common::seed_patient(&pool, patient_account.id).await;

    seed_medications(&pool, patient.id, provider.id, 4).await;

    let repo = MedicationRepository::new(pool.clone());

    // Text filter on an exact column value.
    let tablets = repo
        .find_paginated(&PageQuery::from_params(&params(&[
            ("filterBy[provider_id]", provider.id.to_string()),
            ("filterBy[drug_form]", "tablet".to_string()),
        ])))
        .await
        .expect("Failed to filter");
    assert_eq!(tablets.total, 4);

    // Unknown filter fields are ignored rather than rejected.
    let permissive = repo
        .find_paginated(&PageQuery::from_params(&params(&[
            ("filterBy[provider_id]", provider.id.to_string()),
            ("filterBy[not_a_column]", "true".to_string()),
        ])))
        .await
        .expect("Unknown filter should be skipped");
    assert_eq!(permissive.total, 4);

    common::delete_account(&pool, provider_account.id).await;
    common::delete_account(&pool, patient_account.id).await;
}

#[tokio::test]
async fn explicit_descending_created_at_equals_the_default_order() {
    let pool = common::setup_test_db().await;

    let provider_account = common::seed_account(&pool, Role::Provider).await;
    let patient_account = common::seed_account(&pool, Role::Patient).await;
    let provider = common::seed_provider(&pool, provider_account.id).await;
    let patient = common::seed_patient(&pool, patient_account.id).await;

    seed_medications(&pool, patient.id, provider.id, 6).await;

    let repo = MedicationRepository::new(pool.clone());
    let scope = ("filterBy[provider_id]", provider.id.to_string());

    let implicit = repo
        .find_paginated(&PageQuery::from_params(&params(&[scope.clone()])))
        .await
        .expect("Failed to fetch with default order");
    let explicit = repo
        .find_paginated(&PageQuery::from_params(&params(&[
            scope.clone(),
            ("orderBy", "-created_at".to_string()),
        ])))
        .await
        .expect("Failed to fetch with explicit order");

    let implicit_ids: Vec<Uuid> = implicit.data.iter().map(|m| m.id).collect();
    let explicit_ids: Vec<Uuid> = explicit.data.iter().map(|m| m.id).collect();
    assert_eq!(implicit_ids, explicit_ids);

    let by_name = repo
        .find_paginated(&PageQuery::from_params(&params(&[
            scope,
            ("orderBy", "name".to_string()),
        ])))
        .await
        .expect("Failed to fetch ordered by name");
    let names: Vec<&String> = by_name.data.iter().map(|m| &m.name).collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);

    common::delete_account(&pool, provider_account.id).await;
    common::delete_account(&pool, patient_account.id).await;
}
