use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::patient::UpdatePatient;
use crate::models::Patient;
use crate::query::{PageQuery, Paginated};

pub struct PatientRepository {
    pool: PgPool,
}

impl PatientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn upsert_profile(&self, account_id: Uuid, data: &UpdatePatient) -> Result<Patient> {
        let patient = sqlx::query_as::<_, Patient>(
            r#"
            INSERT INTO patient
                (id, account_id, first_name, last_name, dob, gender, blood_group,
                 genotype, address, image, phone_number, height, weight, bmi)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            ON CONFLICT (account_id) DO UPDATE SET
                first_name = COALESCE(EXCLUDED.first_name, patient.first_name),
                last_name = COALESCE(EXCLUDED.last_name, patient.last_name),
                dob = COALESCE(EXCLUDED.dob, patient.dob),
                gender = COALESCE(EXCLUDED.gender, patient.gender),
                blood_group = COALESCE(EXCLUDED.blood_group, patient.blood_group),
                genotype = COALESCE(EXCLUDED.genotype, patient.genotype),
                address = COALESCE(EXCLUDED.address, patient.address),
                image = COALESCE(EXCLUDED.image, patient.image),
                phone_number = COALESCE(EXCLUDED.phone_number, patient.phone_number),
                height = COALESCE(EXCLUDED.height, patient.height),
                weight = COALESCE(EXCLUDED.weight, patient.weight),
                bmi = COALESCE(EXCLUDED.bmi, patient.bmi),
                updated_at = now()
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(account_id)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(data.dob)
        .bind(&data.gender)
        .bind(&data.blood_group)
        .bind(&data.genotype)
        .bind(&data.address)
        .bind(&data.image)
        .bind(&data.phone_number)
        .bind(data.height)
        .bind(data.weight)
        .bind(data.bmi)
        .fetch_one(&self.pool)
        .await?;

        Ok(patient)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Patient>> {
        let patient = sqlx::query_as::<_, Patient>("SELECT * FROM patient WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(patient)
    }

    pub async fn find_by_account(&self, account_id: Uuid) -> Result<Option<Patient>> {
        let patient = sqlx::query_as::<_, Patient>("SELECT * FROM patient WHERE account_id = $1")
            .bind(account_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(patient)
    }

    pub async fn find_by_id_or_account(&self, id: Uuid) -> Result<Option<Patient>> {
        let patient =
            sqlx::query_as::<_, Patient>("SELECT * FROM patient WHERE id = $1 OR account_id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(patient)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM patient WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn find_paginated(&self, query: &PageQuery) -> Result<Paginated<Patient>> {
        super::fetch_paginated(&self.pool, query).await
    }
}
