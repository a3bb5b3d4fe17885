use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::auth::CurrentAccount;
use crate::error::Result;
use crate::models::branch::{BranchMetrics, CreateBranch, UpdateBranch};
use crate::models::Branch;
use crate::query::{PageQuery, Paginated};
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct BranchMetricsQuery {
    pub provider_id: Option<Uuid>,
}

pub async fn create_branch(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Json(payload): Json<CreateBranch>,
) -> Result<ApiResponse<Branch>> {
    payload.validate()?;
    let branch = state.branch_service.create(&account, payload).await?;
    Ok(ApiResponse::created("Branch Created", branch))
}

pub async fn update_branch(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBranch>,
) -> Result<ApiResponse<Branch>> {
    payload.validate()?;
    let branch = state.branch_service.update(id, payload, &account).await?;
    Ok(ApiResponse::ok("Branch updated successfully", branch))
}

pub async fn delete_branch(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<bool>> {
    state.branch_service.delete(id, &account).await?;
    Ok(ApiResponse::ok("Branch deleted successfully", true))
}

pub async fn list_branches(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<ApiResponse<Paginated<Branch>>> {
    let branches = state
        .branch_service
        .find_all(PageQuery::from_params(&params))
        .await?;
    Ok(ApiResponse::ok("Branches found", branches))
}

pub async fn get_branch(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<Branch>> {
    let branch = state.branch_service.find_one(id).await?;
    Ok(ApiResponse::ok("Branch found", branch))
}

pub async fn toggle_availability(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<Branch>> {
    let branch = state
        .branch_service
        .toggle_availability(id, &account)
        .await?;
    Ok(ApiResponse::ok("Branch Updated", branch))
}

pub async fn branch_metrics(
    State(state): State<AppState>,
    Query(query): Query<BranchMetricsQuery>,
) -> Result<ApiResponse<BranchMetrics>> {
    let metrics = state.branch_service.metrics(query.provider_id).await?;
    Ok(ApiResponse::ok("Branch metrics retrieved", metrics))
}

pub async fn provider_branch_metrics(
    State(state): State<AppState>,
    Path(provider_id): Path<Uuid>,
) -> Result<ApiResponse<BranchMetrics>> {
    let metrics = state.branch_service.metrics(Some(provider_id)).await?;
    Ok(ApiResponse::ok("Branch metrics retrieved", metrics))
}
