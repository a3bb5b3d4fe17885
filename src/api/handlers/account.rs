use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use uuid::Uuid;

use crate::auth::CurrentAccount;
use crate::error::Result;
use crate::models::Account;
use crate::query::{PageQuery, Paginated};
use crate::response::ApiResponse;
use crate::state::AppState;

pub async fn list_accounts(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<ApiResponse<Paginated<Account>>> {
    let accounts = state
        .account_service
        .find_all(PageQuery::from_params(&params))
        .await?;
    Ok(ApiResponse::ok("Accounts found", accounts))
}

pub async fn get_account(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<Account>> {
    let account = state.account_service.find_one(id).await?;
    Ok(ApiResponse::ok("Account found", account))
}

pub async fn get_me(CurrentAccount(account): CurrentAccount) -> Result<ApiResponse<Account>> {
    Ok(ApiResponse::ok("Account found", account))
}
