use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::Json;
use uuid::Uuid;

use crate::auth::CurrentAccount;
use crate::error::Result;
use crate::models::patient::UpdatePatient;
use crate::models::Patient;
use crate::query::{PageQuery, Paginated};
use crate::response::ApiResponse;
use crate::state::AppState;

pub async fn get_profile(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
) -> Result<ApiResponse<Patient>> {
    let patient = state.patient_service.find_profile(account.id).await?;
    Ok(ApiResponse::ok("Patient found", patient))
}

pub async fn update_profile(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Json(payload): Json<UpdatePatient>,
) -> Result<ApiResponse<Patient>> {
    let patient = state
        .patient_service
        .update_profile(account.id, payload)
        .await?;
    Ok(ApiResponse::ok("Patient Updated", patient))
}

pub async fn list_patients(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<ApiResponse<Paginated<Patient>>> {
    let patients = state
        .patient_service
        .find_all(PageQuery::from_params(&params))
        .await?;
    Ok(ApiResponse::ok("Patients found", patients))
}

pub async fn get_patient(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<Patient>> {
    let patient = state.patient_service.find_one(id).await?;
    Ok(ApiResponse::ok("Patient found", patient))
}

pub async fn delete_my_profile(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
) -> Result<ApiResponse<bool>> {
    state.patient_service.delete(account.id).await?;
    Ok(ApiResponse::ok("Patient deleted successfully", true))
}

pub async fn delete_patient(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<bool>> {
    state.patient_service.delete(id).await?;
    Ok(ApiResponse::ok("Patient deleted successfully", true))
}
