use std::sync::Arc;

use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::lab_test::{CreateLabTest, LabTestMetrics, UpdateLabTest};
use crate::models::{Account, LabTest};
use crate::query::{PageQuery, Paginated};
use crate::repository::LabTestRepository;
use crate::services::authz::OwnershipGuard;
use crate::util::generate_tracking_id;

pub struct LabTestService {
    lab_tests: Arc<LabTestRepository>,
    authz: Arc<OwnershipGuard>,
}

impl LabTestService {
    pub fn new(lab_tests: Arc<LabTestRepository>, authz: Arc<OwnershipGuard>) -> Self {
        Self { lab_tests, authz }
    }

    pub async fn create(&self, data: CreateLabTest) -> Result<LabTest> {
        let tracking_id = data
            .tracking_id
            .clone()
            .unwrap_or_else(|| generate_tracking_id("LAB"));
        self.lab_tests.create(&data, &tracking_id).await
    }

    pub async fn update(&self, id: Uuid, data: UpdateLabTest) -> Result<LabTest> {
        self.find_one(id).await?;
        self.lab_tests.update(id, &data).await
    }

    pub async fn find_all(&self, query: PageQuery) -> Result<Paginated<LabTest>> {
        let query = query.with_default_search_fields(&["name", "facility", "tracking_id"]);
        self.lab_tests.find_paginated(&query).await
    }

    pub async fn find_one(&self, id: Uuid) -> Result<LabTest> {
        self.lab_tests
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Test not found"))
    }

    pub async fn delete(&self, id: Uuid, account: &Account) -> Result<()> {
        let test = self.find_one(id).await?;
        self.authz
            .ensure_owns(
                account,
                "test",
                Some(test.provider_id),
                Some(test.patient_id),
            )
            .await?;

        self.lab_tests.delete(test.id).await
    }

    pub async fn metrics(&self, provider_id: Option<Uuid>) -> Result<LabTestMetrics> {
        self.lab_tests.metrics(provider_id).await
    }
}
