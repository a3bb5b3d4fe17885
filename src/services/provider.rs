use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::provider::{ProviderFleetMetrics, ProviderMetrics, UpdateProvider};
use crate::models::Provider;
use crate::query::{PageQuery, Paginated};
use crate::repository::ProviderRepository;

const DEFAULT_SEARCH_FIELDS: &[&str] = &["name", "address", "phone_number", "whatsapp", "hotline"];

pub struct ProviderService {
    providers: Arc<ProviderRepository>,
}

impl ProviderService {
    pub fn new(providers: Arc<ProviderRepository>) -> Self {
        Self { providers }
    }

    pub async fn find_all(&self, query: PageQuery) -> Result<Paginated<Provider>> {
        let query = query.with_default_search_fields(DEFAULT_SEARCH_FIELDS);
        self.providers.find_paginated(&query).await
    }

    pub async fn find_one(&self, id: Uuid) -> Result<Provider> {
        self.providers
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Provider not found"))
    }

    pub async fn find_profile(&self, account_id: Uuid) -> Result<Provider> {
        self.providers
            .find_by_account(account_id)
            .await?
            .ok_or_else(|| ApiError::not_found("No provider profile found"))
    }

    pub async fn update_profile(
        &self,
        account_id: Uuid,
        data: UpdateProvider,
    ) -> Result<Provider> {
        self.providers.upsert_profile(account_id, &data).await
    }

    pub async fn toggle_availability(&self, account_id: Uuid) -> Result<Provider> {
        self.find_profile(account_id).await?;
        self.providers.toggle_availability(account_id).await
    }

    /// Deletes by profile id or owning account id.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let provider = self
            .providers
            .find_by_id_or_account(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Provider not found"))?;

        self.providers.delete(provider.id).await
    }

    pub async fn metric(&self, provider_id: Uuid) -> Result<ProviderMetrics> {
        let provider = self.find_one(provider_id).await?;
        Ok(calculate_metrics(&provider))
    }

    pub async fn fleet_metrics(&self) -> Result<ProviderFleetMetrics> {
        self.providers.fleet_metrics().await
    }
}

fn calculate_metrics(provider: &Provider) -> ProviderMetrics {
    let contact_fields = [
        &provider.phone_number,
        &provider.whatsapp,
        &provider.hotline,
    ];
    let profile_fields = [
        &provider.name,
        &provider.image,
        &provider.provider_type,
        &provider.phone_number,
        &provider.address,
        &provider.whatsapp,
        &provider.hotline,
    ];

    let contact_complete = contact_fields.iter().any(|field| field.is_some());
    let filled = profile_fields.iter().filter(|field| field.is_some()).count();
    let profile_complete_percent =
        (filled as f64 / profile_fields.len() as f64 * 100.0).round() as i64;

    let now = Utc::now();

    ProviderMetrics {
        provider_id: provider.id,
        available: provider.available,
        name_present: provider.name.is_some(),
        contact_complete,
        type_defined: provider.provider_type.is_some(),
        profile_complete_percent,
        days_active: (now - provider.created_at).num_days(),
        last_updated_days_ago: (now - provider.updated_at).num_days(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn provider() -> Provider {
        Provider {
            id: Uuid::new_v4(),
            account_id: Uuid::new_v4(),
            name: Some("Dr. Ames".to_string()),
            image: None,
            provider_type: Some("general".to_string()),
            phone_number: Some("0800".to_string()),
            address: None,
            whatsapp: None,
            hotline: None,
            available: true,
            created_at: Utc::now() - Duration::days(10),
            updated_at: Utc::now() - Duration::days(2),
        }
    }

    #[test]
    fn profile_metrics_reflect_filled_fields() {
        let metrics = calculate_metrics(&provider());

        assert!(metrics.name_present);
        assert!(metrics.contact_complete);
        assert!(metrics.type_defined);
        // 3 of 7 profile fields filled.
        assert_eq!(metrics.profile_complete_percent, 43);
        assert_eq!(metrics.days_active, 10);
        assert_eq!(metrics.last_updated_days_ago, 2);
    }

    #[test]
    fn empty_profile_scores_zero() {
        let mut bare = provider();
        bare.name = None;
        bare.provider_type = None;
        bare.phone_number = None;

        let metrics = calculate_metrics(&bare);
        assert!(!metrics.contact_complete);
        assert_eq!(metrics.profile_complete_percent, 0);
    }
}
