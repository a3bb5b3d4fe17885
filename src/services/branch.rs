use std::sync::Arc;

use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::branch::{BranchMetrics, CreateBranch, UpdateBranch};
use crate::models::{Account, Branch};
use crate::query::{PageQuery, Paginated};
use crate::repository::{BranchRepository, ProviderRepository};
use crate::services::authz::OwnershipGuard;

pub struct BranchService {
    branches: Arc<BranchRepository>,
    providers: Arc<ProviderRepository>,
    authz: Arc<OwnershipGuard>,
}

impl BranchService {
    pub fn new(
        branches: Arc<BranchRepository>,
        providers: Arc<ProviderRepository>,
        authz: Arc<OwnershipGuard>,
    ) -> Self {
        Self {
            branches,
            providers,
            authz,
        }
    }

    pub async fn create(&self, account: &Account, data: CreateBranch) -> Result<Branch> {
        let provider = self
            .providers
            .find_by_account(account.id)
            .await?
            .ok_or_else(|| ApiError::not_found("Provider not found"))?;

        self.branches.create(provider.id, &data).await
    }

    pub async fn find_all(&self, query: PageQuery) -> Result<Paginated<Branch>> {
        let query = query.with_default_search_fields(&["name", "address", "phone_number"]);
        self.branches.find_paginated(&query).await
    }

    pub async fn find_one(&self, id: Uuid) -> Result<Branch> {
        self.branches
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Branch not found"))
    }

    pub async fn update(&self, id: Uuid, data: UpdateBranch, account: &Account) -> Result<Branch> {
        let branch = self.find_one(id).await?;
        self.authz
            .ensure_owns(account, "branch", Some(branch.provider_id), None)
            .await?;

        self.branches.update(branch.id, &data).await
    }

    pub async fn delete(&self, id: Uuid, account: &Account) -> Result<()> {
        let branch = self.find_one(id).await?;
        self.authz
            .ensure_owns(account, "branch", Some(branch.provider_id), None)
            .await?;

        self.branches.delete(branch.id).await
    }

    pub async fn toggle_availability(&self, id: Uuid, account: &Account) -> Result<Branch> {
        let branch = self.find_one(id).await?;
        self.authz
            .ensure_owns(account, "branch", Some(branch.provider_id), None)
            .await?;

        self.branches.toggle_availability(branch.id).await
    }

    pub async fn metrics(&self, provider_id: Option<Uuid>) -> Result<BranchMetrics> {
        self.branches.metrics(provider_id).await
    }
}
