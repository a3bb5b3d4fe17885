use std::sync::Arc;

use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::medication::{CreateMedication, MedicationMetrics, UpdateMedication};
use crate::models::{Account, Medication};
use crate::query::{PageQuery, Paginated};
use crate::repository::MedicationRepository;
use crate::services::authz::OwnershipGuard;
use crate::util::generate_tracking_id;

pub struct MedicationService {
    medications: Arc<MedicationRepository>,
    authz: Arc<OwnershipGuard>,
}

impl MedicationService {
    pub fn new(medications: Arc<MedicationRepository>, authz: Arc<OwnershipGuard>) -> Self {
        Self { medications, authz }
    }

    pub async fn create(&self, data: CreateMedication) -> Result<Medication> {
        let tracking_id = generate_tracking_id("MED");
        self.medications.create(&data, &tracking_id).await
    }

    pub async fn update(&self, id: Uuid, data: UpdateMedication) -> Result<Medication> {
        self.find_one(id).await?;
        self.medications.update(id, &data).await
    }

    pub async fn find_all(&self, query: PageQuery) -> Result<Paginated<Medication>> {
        let query = query.with_default_search_fields(&["name", "drug_form", "tracking_id"]);
        self.medications.find_paginated(&query).await
    }

    pub async fn find_one(&self, id: Uuid) -> Result<Medication> {
        self.medications
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Medication not found"))
    }

    pub async fn delete(&self, id: Uuid, account: &Account) -> Result<()> {
        let medication = self.find_one(id).await?;
        self.authz
            .ensure_owns(
                account,
                "medication",
                Some(medication.provider_id),
                Some(medication.patient_id),
            )
            .await?;

        self.medications.delete(medication.id).await
    }

    pub async fn metrics(
        &self,
        patient_id: Option<Uuid>,
        provider_id: Option<Uuid>,
    ) -> Result<MedicationMetrics> {
        self.medications.metrics(patient_id, provider_id).await
    }
}
