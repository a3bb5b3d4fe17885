use std::sync::Arc;

use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::Account;
use crate::query::{PageQuery, Paginated};
use crate::repository::AccountRepository;

pub struct AccountService {
    accounts: Arc<AccountRepository>,
}

impl AccountService {
    pub fn new(accounts: Arc<AccountRepository>) -> Self {
        Self { accounts }
    }

    pub async fn find_all(&self, query: PageQuery) -> Result<Paginated<Account>> {
        let query = query.with_default_search_fields(&["email"]);
        self.accounts.find_paginated(&query).await
    }

    pub async fn find_one(&self, id: Uuid) -> Result<Account> {
        self.accounts
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Account not found"))
    }
}
