use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::referral::{CreateReferral, ReferralMetrics, UpdateReferral};
use crate::models::{Referral, ReferralStatus};
use crate::query::{PageQuery, Paginated};

pub struct ReferralRepository {
    pool: PgPool,
}

impl ReferralRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, data: &CreateReferral, tracking_id: &str) -> Result<Referral> {
        let referral = sqlx::query_as::<_, Referral>(
            r#"
            INSERT INTO referral
                (id, reason, note, urgency, tracking_id, facility,
                 patient_id, provider_id, encounter_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&data.reason)
        .bind(&data.note)
        .bind(&data.urgency)
        .bind(tracking_id)
        .bind(&data.facility)
        .bind(data.patient_id)
        .bind(data.provider_id)
        .bind(data.encounter_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(referral)
    }

    pub async fn update(&self, id: Uuid, data: &UpdateReferral) -> Result<Referral> {
        let referral = sqlx::query_as::<_, Referral>(
            r#"
            UPDATE referral
            SET reason = COALESCE($2, reason),
                note = COALESCE($3, note),
                urgency = COALESCE($4, urgency),
                facility = COALESCE($5, facility),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.reason)
        .bind(&data.note)
        .bind(&data.urgency)
        .bind(&data.facility)
        .fetch_one(&self.pool)
        .await?;

        Ok(referral)
    }

    pub async fn set_status(&self, id: Uuid, status: ReferralStatus) -> Result<Referral> {
        let referral = sqlx::query_as::<_, Referral>(
            "UPDATE referral SET status = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(referral)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Referral>> {
        let referral = sqlx::query_as::<_, Referral>("SELECT * FROM referral WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(referral)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM referral WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn find_paginated(&self, query: &PageQuery) -> Result<Paginated<Referral>> {
        super::fetch_paginated(&self.pool, query).await
    }

    async fn count(
        &self,
        provider_id: Option<Uuid>,
        status: Option<ReferralStatus>,
    ) -> std::result::Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM referral
            WHERE ($1 IS NULL OR provider_id = $1)
              AND ($2 IS NULL OR status = $2)
            "#,
        )
        .bind(provider_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn metrics(&self, provider_id: Option<Uuid>) -> Result<ReferralMetrics> {
        let (total, pending, approved, ongoing, rejected, completed) = tokio::try_join!(
            self.count(provider_id, None),
            self.count(provider_id, Some(ReferralStatus::Pending)),
            self.count(provider_id, Some(ReferralStatus::Approved)),
            self.count(provider_id, Some(ReferralStatus::Ongoing)),
            self.count(provider_id, Some(ReferralStatus::Rejected)),
            self.count(provider_id, Some(ReferralStatus::Completed)),
        )?;

        Ok(ReferralMetrics {
            total,
            pending,
            approved,
            ongoing,
            rejected,
            completed,
        })
    }
}
