use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::medication::{CreateMedication, MedicationMetrics, UpdateMedication};
use crate::models::Medication;
use crate::query::{PageQuery, Paginated};

pub struct MedicationRepository {
    pool: PgPool,
}

impl MedicationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, data: &CreateMedication, tracking_id: &str) -> Result<Medication> {
        let medication = sqlx::query_as::<_, Medication>(
            r#"
            INSERT INTO medication
                (id, name, dosage, frequency, duration, instructions, drug_form,
                 quantity, tracking_id, patient_id, provider_id, encounter_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&data.name)
        .bind(&data.dosage)
        .bind(&data.frequency)
        .bind(&data.duration)
        .bind(&data.instructions)
        .bind(&data.drug_form)
        .bind(data.quantity)
        .bind(tracking_id)
        .bind(data.patient_id)
        .bind(data.provider_id)
        .bind(data.encounter_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(medication)
    }

    pub async fn update(&self, id: Uuid, data: &UpdateMedication) -> Result<Medication> {
        let medication = sqlx::query_as::<_, Medication>(
            r#"
            UPDATE medication
            SET name = COALESCE($2, name),
                dosage = COALESCE($3, dosage),
                frequency = COALESCE($4, frequency),
                duration = COALESCE($5, duration),
                instructions = COALESCE($6, instructions),
                drug_form = COALESCE($7, drug_form),
                quantity = COALESCE($8, quantity),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.dosage)
        .bind(&data.frequency)
        .bind(&data.duration)
        .bind(&data.instructions)
        .bind(&data.drug_form)
        .bind(data.quantity)
        .fetch_one(&self.pool)
        .await?;

        Ok(medication)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Medication>> {
        let medication = sqlx::query_as::<_, Medication>("SELECT * FROM medication WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(medication)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM medication WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn find_paginated(&self, query: &PageQuery) -> Result<Paginated<Medication>> {
        super::fetch_paginated(&self.pool, query).await
    }

    pub async fn metrics(
        &self,
        patient_id: Option<Uuid>,
        provider_id: Option<Uuid>,
    ) -> Result<MedicationMetrics> {
        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM medication
            WHERE ($1 IS NULL OR patient_id = $1)
              AND ($2 IS NULL OR provider_id = $2)
            "#,
        )
        .bind(patient_id)
        .bind(provider_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(MedicationMetrics { total })
    }
}
