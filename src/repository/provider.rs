use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::provider::{ProviderFleetMetrics, UpdateProvider};
use crate::models::Provider;
use crate::query::{PageQuery, Paginated};

pub struct ProviderRepository {
    pool: PgPool,
}

impl ProviderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the profile on first write, then patches only the supplied
    /// fields on subsequent writes.
    pub async fn upsert_profile(&self, account_id: Uuid, data: &UpdateProvider) -> Result<Provider> {
        let provider = sqlx::query_as::<_, Provider>(
            r#"
            INSERT INTO provider
                (id, account_id, name, image, provider_type, phone_number, address, whatsapp, hotline)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (account_id) DO UPDATE SET
                name = COALESCE(EXCLUDED.name, provider.name),
                image = COALESCE(EXCLUDED.image, provider.image),
                provider_type = COALESCE(EXCLUDED.provider_type, provider.provider_type),
                phone_number = COALESCE(EXCLUDED.phone_number, provider.phone_number),
                address = COALESCE(EXCLUDED.address, provider.address),
                whatsapp = COALESCE(EXCLUDED.whatsapp, provider.whatsapp),
                hotline = COALESCE(EXCLUDED.hotline, provider.hotline),
                updated_at = now()
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(account_id)
        .bind(&data.name)
        .bind(&data.image)
        .bind(&data.provider_type)
        .bind(&data.phone_number)
        .bind(&data.address)
        .bind(&data.whatsapp)
        .bind(&data.hotline)
        .fetch_one(&self.pool)
        .await?;

        Ok(provider)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Provider>> {
        let provider = sqlx::query_as::<_, Provider>("SELECT * FROM provider WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(provider)
    }

    pub async fn find_by_account(&self, account_id: Uuid) -> Result<Option<Provider>> {
        let provider =
            sqlx::query_as::<_, Provider>("SELECT * FROM provider WHERE account_id = $1")
                .bind(account_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(provider)
    }

    /// Matches either the profile id or the owning account id, so both
    /// forms of identifier delete the same profile.
    pub async fn find_by_id_or_account(&self, id: Uuid) -> Result<Option<Provider>> {
        let provider = sqlx::query_as::<_, Provider>(
            "SELECT * FROM provider WHERE id = $1 OR account_id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(provider)
    }

    pub async fn toggle_availability(&self, account_id: Uuid) -> Result<Provider> {
        let provider = sqlx::query_as::<_, Provider>(
            r#"
            UPDATE provider
            SET available = NOT available, updated_at = now()
            WHERE account_id = $1
            RETURNING *
            "#,
        )
        .bind(account_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(provider)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM provider WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn find_paginated(&self, query: &PageQuery) -> Result<Paginated<Provider>> {
        super::fetch_paginated(&self.pool, query).await
    }

    pub async fn fleet_metrics(&self) -> Result<ProviderFleetMetrics> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM provider");
        let available =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM provider WHERE available");
        let with_name =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM provider WHERE name IS NOT NULL");
        let with_contact = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM provider
            WHERE phone_number IS NOT NULL OR whatsapp IS NOT NULL OR hotline IS NOT NULL
            "#,
        );

        let (total_providers, available_providers, providers_with_name, providers_with_contact) = tokio::try_join!(
            total.fetch_one(&self.pool),
            available.fetch_one(&self.pool),
            with_name.fetch_one(&self.pool),
            with_contact.fetch_one(&self.pool),
        )?;

        let available_percent = if total_providers > 0 {
            available_providers as f64 / total_providers as f64 * 100.0
        } else {
            0.0
        };
        let profile_complete_percent = if total_providers > 0 {
            (providers_with_name + providers_with_contact) as f64
                / (total_providers * 2) as f64
                * 100.0
        } else {
            0.0
        };

        Ok(ProviderFleetMetrics {
            total_providers,
            available_providers,
            providers_with_name,
            providers_with_contact,
            available_percent,
            profile_complete_percent,
        })
    }
}
