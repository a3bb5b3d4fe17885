use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::CurrentAccount;
use crate::error::Result;
use crate::models::referral::{CreateReferral, ReferralMetrics, UpdateReferral};
use crate::models::Referral;
use crate::query::{PageQuery, Paginated};
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ReferralMetricsQuery {
    pub provider_id: Option<Uuid>,
}

pub async fn create_referral(
    State(state): State<AppState>,
    Json(payload): Json<CreateReferral>,
) -> Result<ApiResponse<Referral>> {
    let referral = state.referral_service.create(payload).await?;
    Ok(ApiResponse::created("Referral created successfully", referral))
}

pub async fn update_referral(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateReferral>,
) -> Result<ApiResponse<Referral>> {
    let referral = state.referral_service.update(id, payload).await?;
    Ok(ApiResponse::ok("Referral updated successfully", referral))
}

pub async fn approve_referral(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<Referral>> {
    let referral = state.referral_service.approve(id).await?;
    Ok(ApiResponse::ok("Referral approved", referral))
}

pub async fn reject_referral(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<Referral>> {
    let referral = state.referral_service.reject(id).await?;
    Ok(ApiResponse::ok("Referral rejected", referral))
}

pub async fn list_referrals(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<ApiResponse<Paginated<Referral>>> {
    let referrals = state
        .referral_service
        .find_all(PageQuery::from_params(&params))
        .await?;
    Ok(ApiResponse::ok("Referrals found", referrals))
}

pub async fn get_referral(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<Referral>> {
    let referral = state.referral_service.find_one(id).await?;
    Ok(ApiResponse::ok("Referral found", referral))
}

pub async fn delete_referral(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<bool>> {
    state.referral_service.delete(id, &account).await?;
    Ok(ApiResponse::ok("Referral deleted successfully", true))
}

pub async fn referral_metrics(
    State(state): State<AppState>,
    Query(query): Query<ReferralMetricsQuery>,
) -> Result<ApiResponse<ReferralMetrics>> {
    let metrics = state.referral_service.metrics(query.provider_id).await?;
    Ok(ApiResponse::ok("Referral metrics fetched", metrics))
}
