use std::sync::Arc;

use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::referral::{CreateReferral, ReferralMetrics, UpdateReferral};
use crate::models::{Account, Referral, ReferralStatus};
use crate::query::{PageQuery, Paginated};
use crate::repository::ReferralRepository;
use crate::services::authz::OwnershipGuard;
use crate::util::generate_tracking_id;

pub struct ReferralService {
    referrals: Arc<ReferralRepository>,
    authz: Arc<OwnershipGuard>,
}

impl ReferralService {
    pub fn new(referrals: Arc<ReferralRepository>, authz: Arc<OwnershipGuard>) -> Self {
        Self { referrals, authz }
    }

    pub async fn create(&self, data: CreateReferral) -> Result<Referral> {
        let tracking_id = generate_tracking_id("REF");
        self.referrals.create(&data, &tracking_id).await
    }

    pub async fn update(&self, id: Uuid, data: UpdateReferral) -> Result<Referral> {
        self.find_one(id).await?;
        self.referrals.update(id, &data).await
    }

    pub async fn approve(&self, id: Uuid) -> Result<Referral> {
        self.find_one(id).await?;
        self.referrals.set_status(id, ReferralStatus::Approved).await
    }

    pub async fn reject(&self, id: Uuid) -> Result<Referral> {
        self.find_one(id).await?;
        self.referrals.set_status(id, ReferralStatus::Rejected).await
    }

    pub async fn find_all(&self, query: PageQuery) -> Result<Paginated<Referral>> {
        let query = query.with_default_search_fields(&["reason", "facility", "tracking_id"]);
        self.referrals.find_paginated(&query).await
    }

    pub async fn find_one(&self, id: Uuid) -> Result<Referral> {
        self.referrals
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Referral not found"))
    }

    pub async fn delete(&self, id: Uuid, account: &Account) -> Result<()> {
        let referral = self.find_one(id).await?;
        self.authz
            .ensure_owns(
                account,
                "referral",
                Some(referral.provider_id),
                Some(referral.patient_id),
            )
            .await?;

        self.referrals.delete(referral.id).await
    }

    pub async fn metrics(&self, provider_id: Option<Uuid>) -> Result<ReferralMetrics> {
        self.referrals.metrics(provider_id).await
    }
}
