use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::Json;
use uuid::Uuid;

use crate::auth::CurrentAccount;
use crate::error::Result;
use crate::models::provider::{ProviderFleetMetrics, ProviderMetrics, UpdateProvider};
use crate::models::Provider;
use crate::query::{PageQuery, Paginated};
use crate::response::ApiResponse;
use crate::state::AppState;

pub async fn get_profile(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
) -> Result<ApiResponse<Provider>> {
    let provider = state.provider_service.find_profile(account.id).await?;
    Ok(ApiResponse::ok("Provider found", provider))
}

pub async fn update_profile(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Json(payload): Json<UpdateProvider>,
) -> Result<ApiResponse<Provider>> {
    let provider = state
        .provider_service
        .update_profile(account.id, payload)
        .await?;
    Ok(ApiResponse::ok("Provider Updated", provider))
}

pub async fn toggle_availability(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
) -> Result<ApiResponse<Provider>> {
    let provider = state
        .provider_service
        .toggle_availability(account.id)
        .await?;
    Ok(ApiResponse::ok("Provider Updated", provider))
}

pub async fn list_providers(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<ApiResponse<Paginated<Provider>>> {
    let providers = state
        .provider_service
        .find_all(PageQuery::from_params(&params))
        .await?;
    Ok(ApiResponse::ok("Providers found", providers))
}

pub async fn get_provider(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<Provider>> {
    let provider = state.provider_service.find_one(id).await?;
    Ok(ApiResponse::ok("Provider found", provider))
}

pub async fn delete_my_profile(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
) -> Result<ApiResponse<bool>> {
    state.provider_service.delete(account.id).await?;
    Ok(ApiResponse::ok("Provider deleted successfully", true))
}

pub async fn delete_provider(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<bool>> {
    state.provider_service.delete(id).await?;
    Ok(ApiResponse::ok("Provider deleted successfully", true))
}

pub async fn provider_metric(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<ProviderMetrics>> {
    let metrics = state.provider_service.metric(id).await?;
    Ok(ApiResponse::ok("Provider metrics retrieved", metrics))
}

pub async fn fleet_metrics(
    State(state): State<AppState>,
) -> Result<ApiResponse<ProviderFleetMetrics>> {
    let metrics = state.provider_service.fleet_metrics().await?;
    Ok(ApiResponse::ok(
        "Aggregated provider metrics retrieved",
        metrics,
    ))
}
