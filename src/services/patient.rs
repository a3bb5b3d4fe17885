use std::sync::Arc;

use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::patient::UpdatePatient;
use crate::models::Patient;
use crate::query::{PageQuery, Paginated};
use crate::repository::PatientRepository;

const DEFAULT_SEARCH_FIELDS: &[&str] = &[
    "first_name",
    "last_name",
    "gender",
    "blood_group",
    "genotype",
    "address",
    "phone_number",
];

pub struct PatientService {
    patients: Arc<PatientRepository>,
}

impl PatientService {
    pub fn new(patients: Arc<PatientRepository>) -> Self {
        Self { patients }
    }

    pub async fn find_all(&self, query: PageQuery) -> Result<Paginated<Patient>> {
        let query = query.with_default_search_fields(DEFAULT_SEARCH_FIELDS);
        self.patients.find_paginated(&query).await
    }

    pub async fn find_one(&self, id: Uuid) -> Result<Patient> {
        self.patients
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Patient not found"))
    }

    pub async fn find_profile(&self, account_id: Uuid) -> Result<Patient> {
        self.patients
            .find_by_account(account_id)
            .await?
            .ok_or_else(|| ApiError::not_found("No patient profile found"))
    }

    pub async fn update_profile(&self, account_id: Uuid, data: UpdatePatient) -> Result<Patient> {
        self.patients.upsert_profile(account_id, &data).await
    }

    /// Deletes by profile id or owning account id.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let patient = self
            .patients
            .find_by_id_or_account(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Patient not found"))?;

        self.patients.delete(patient.id).await
    }
}
