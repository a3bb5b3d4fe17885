use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::Json;
use uuid::Uuid;

use crate::auth::CurrentAccount;
use crate::error::Result;
use crate::models::encounter::{
    CancelEncounter, CreateEncounter, EncounterMetrics, MetricsFilter, RescheduleEncounter,
    UpdateEncounter,
};
use crate::models::Encounter;
use crate::query::{PageQuery, Paginated};
use crate::response::ApiResponse;
use crate::state::AppState;

pub async fn create_encounter(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Json(payload): Json<CreateEncounter>,
) -> Result<ApiResponse<Encounter>> {
    let encounter = state.encounter_service.create(payload, &account).await?;
    Ok(ApiResponse::created(
        "Encounter created successfully",
        encounter,
    ))
}

pub async fn list_encounters(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<ApiResponse<Paginated<Encounter>>> {
    let encounters = state
        .encounter_service
        .find_all(PageQuery::from_params(&params))
        .await?;
    Ok(ApiResponse::ok("Encounters found", encounters))
}

pub async fn get_encounter(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<Encounter>> {
    let encounter = state.encounter_service.find_one(id).await?;
    Ok(ApiResponse::ok("Encounter found", encounter))
}

pub async fn update_encounter(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateEncounter>,
) -> Result<ApiResponse<Encounter>> {
    let encounter = state
        .encounter_service
        .update(id, payload, &account)
        .await?;
    Ok(ApiResponse::ok("Encounter updated successfully", encounter))
}

pub async fn start_encounter(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<Encounter>> {
    let encounter = state.encounter_service.start(id, &account).await?;
    Ok(ApiResponse::ok("Encounter started", encounter))
}

pub async fn complete_encounter(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<Encounter>> {
    let encounter = state.encounter_service.complete(id, &account).await?;
    Ok(ApiResponse::ok("Encounter completed", encounter))
}

pub async fn cancel_encounter(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Path(id): Path<Uuid>,
    Json(payload): Json<CancelEncounter>,
) -> Result<ApiResponse<Encounter>> {
    let encounter = state
        .encounter_service
        .cancel(id, payload, &account)
        .await?;
    Ok(ApiResponse::ok("Encounter cancelled", encounter))
}

pub async fn reschedule_encounter(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Path(id): Path<Uuid>,
    Json(payload): Json<RescheduleEncounter>,
) -> Result<ApiResponse<Encounter>> {
    let encounter = state
        .encounter_service
        .reschedule(id, payload, &account)
        .await?;
    Ok(ApiResponse::ok("Encounter rescheduled", encounter))
}

pub async fn delete_encounter(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<bool>> {
    state.encounter_service.delete(id, &account).await?;
    Ok(ApiResponse::ok("Encounter deleted successfully", true))
}

pub async fn encounter_metrics(
    State(state): State<AppState>,
    Query(filter): Query<MetricsFilter>,
) -> Result<ApiResponse<EncounterMetrics>> {
    let metrics = state.encounter_service.metrics(filter).await?;
    Ok(ApiResponse::ok("Metrics retrieved successfully", metrics))
}
