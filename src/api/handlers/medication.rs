use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::CurrentAccount;
use crate::error::Result;
use crate::models::medication::{CreateMedication, MedicationMetrics, UpdateMedication};
use crate::models::Medication;
use crate::query::{PageQuery, Paginated};
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MedicationMetricsQuery {
    pub patient_id: Option<Uuid>,
    pub provider_id: Option<Uuid>,
}

pub async fn create_medication(
    State(state): State<AppState>,
    Json(payload): Json<CreateMedication>,
) -> Result<ApiResponse<Medication>> {
    let medication = state.medication_service.create(payload).await?;
    Ok(ApiResponse::created(
        "Medication created successfully",
        medication,
    ))
}

pub async fn update_medication(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateMedication>,
) -> Result<ApiResponse<Medication>> {
    let medication = state.medication_service.update(id, payload).await?;
    Ok(ApiResponse::ok(
        "Medication updated successfully",
        medication,
    ))
}

pub async fn list_medications(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<ApiResponse<Paginated<Medication>>> {
    let medications = state
        .medication_service
        .find_all(PageQuery::from_params(&params))
        .await?;
    Ok(ApiResponse::ok("Medications found", medications))
}

pub async fn get_medication(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<Medication>> {
    let medication = state.medication_service.find_one(id).await?;
    Ok(ApiResponse::ok("Medication found", medication))
}

pub async fn delete_medication(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<bool>> {
    state.medication_service.delete(id, &account).await?;
    Ok(ApiResponse::ok("Medication deleted successfully", true))
}

pub async fn medication_metrics(
    State(state): State<AppState>,
    Query(query): Query<MedicationMetricsQuery>,
) -> Result<ApiResponse<MedicationMetrics>> {
    let metrics = state
        .medication_service
        .metrics(query.patient_id, query.provider_id)
        .await?;
    Ok(ApiResponse::ok("Medication metrics fetched", metrics))
}
