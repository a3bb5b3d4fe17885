use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::encounter::{
    CreateEncounter, EncounterMetrics, MetricsFilter, UpdateEncounter,
};
use crate::models::{Encounter, EncounterStatus, EncounterType};
use crate::query::{PageQuery, Paginated};

pub struct EncounterRepository {
    pool: PgPool,
}

impl EncounterRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, data: &CreateEncounter) -> Result<Encounter> {
        let encounter = sqlx::query_as::<_, Encounter>(
            r#"
            INSERT INTO encounter
                (id, patient_id, provider_id, branch_id, encounter_type, scheduled_date,
                 symptoms, subjective, objective, assessment, clinical_notes,
                 custom_fields, follow_up_encounter_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(data.patient_id)
        .bind(data.provider_id)
        .bind(data.branch_id)
        .bind(data.encounter_type)
        .bind(data.scheduled_date)
        .bind(&data.symptoms)
        .bind(data.subjective.clone().map(Json))
        .bind(data.objective.clone().map(Json))
        .bind(data.assessment.clone().map(Json))
        .bind(&data.clinical_notes)
        .bind(&data.custom_fields)
        .bind(data.follow_up_encounter_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(encounter)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Encounter>> {
        let encounter = sqlx::query_as::<_, Encounter>("SELECT * FROM encounter WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(encounter)
    }

    pub async fn update(&self, id: Uuid, data: &UpdateEncounter) -> Result<Encounter> {
        let encounter = sqlx::query_as::<_, Encounter>(
            r#"
            UPDATE encounter
            SET scheduled_date = COALESCE($2, scheduled_date),
                symptoms = COALESCE($3, symptoms),
                subjective = COALESCE($4, subjective),
                objective = COALESCE($5, objective),
                assessment = COALESCE($6, assessment),
                clinical_notes = COALESCE($7, clinical_notes),
                custom_fields = COALESCE($8, custom_fields),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(data.scheduled_date)
        .bind(&data.symptoms)
        .bind(data.subjective.clone().map(Json))
        .bind(data.objective.clone().map(Json))
        .bind(data.assessment.clone().map(Json))
        .bind(&data.clinical_notes)
        .bind(&data.custom_fields)
        .fetch_one(&self.pool)
        .await?;

        Ok(encounter)
    }

    pub async fn mark_started(&self, id: Uuid) -> Result<Encounter> {
        let encounter = sqlx::query_as::<_, Encounter>(
            r#"
            UPDATE encounter
            SET status = $2, actual_start_time = now(), updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(EncounterStatus::InProgress)
        .fetch_one(&self.pool)
        .await?;

        Ok(encounter)
    }

    pub async fn mark_completed(&self, id: Uuid) -> Result<Encounter> {
        let encounter = sqlx::query_as::<_, Encounter>(
            r#"
            UPDATE encounter
            SET status = $2, actual_end_time = now(), updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(EncounterStatus::Completed)
        .fetch_one(&self.pool)
        .await?;

        Ok(encounter)
    }

    pub async fn mark_cancelled(&self, id: Uuid, reason: Option<&str>) -> Result<Encounter> {
        let encounter = sqlx::query_as::<_, Encounter>(
            r#"
            UPDATE encounter
            SET status = $2, cancellation_reason = $3, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(EncounterStatus::Cancelled)
        .bind(reason)
        .fetch_one(&self.pool)
        .await?;

        Ok(encounter)
    }

    pub async fn reschedule(
        &self,
        id: Uuid,
        date: chrono::DateTime<chrono::Utc>,
    ) -> Result<Encounter> {
        let encounter = sqlx::query_as::<_, Encounter>(
            "UPDATE encounter SET scheduled_date = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(date)
        .fetch_one(&self.pool)
        .await?;

        Ok(encounter)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM encounter WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn find_paginated(&self, query: &PageQuery) -> Result<Paginated<Encounter>> {
        super::fetch_paginated(&self.pool, query).await
    }

    async fn count(
        &self,
        filter: &MetricsFilter,
        status: Option<EncounterStatus>,
        encounter_type: Option<EncounterType>,
    ) -> std::result::Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM encounter
            WHERE ($1 IS NULL OR patient_id = $1)
              AND ($2 IS NULL OR provider_id = $2)
              AND ($3 IS NULL OR branch_id = $3)
              AND ($4 IS NULL OR status = $4)
              AND ($5 IS NULL OR encounter_type = $5)
            "#,
        )
        .bind(filter.patient_id)
        .bind(filter.provider_id)
        .bind(filter.branch_id)
        .bind(status)
        .bind(encounter_type)
        .fetch_one(&self.pool)
        .await
    }

    /// Per-status and per-type counts, optionally narrowed to a patient,
    /// provider or branch. Runs as concurrent counted queries.
    pub async fn metrics(&self, filter: &MetricsFilter) -> Result<EncounterMetrics> {
        let (total, scheduled, in_progress, completed, cancelled, consultation, follow_ups) = tokio::try_join!(
            self.count(filter, None, None),
            self.count(filter, Some(EncounterStatus::Scheduled), None),
            self.count(filter, Some(EncounterStatus::InProgress), None),
            self.count(filter, Some(EncounterStatus::Completed), None),
            self.count(filter, Some(EncounterStatus::Cancelled), None),
            self.count(filter, None, Some(EncounterType::Consultation)),
            self.count(filter, None, Some(EncounterType::FollowUp)),
        )?;

        Ok(EncounterMetrics {
            total,
            scheduled,
            in_progress,
            completed,
            cancelled,
            consultation,
            follow_ups,
        })
    }
}
