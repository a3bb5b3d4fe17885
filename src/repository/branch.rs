use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::branch::{BranchMetrics, CreateBranch, UpdateBranch};
use crate::models::Branch;
use crate::query::{PageQuery, Paginated};

pub struct BranchRepository {
    pool: PgPool,
}

impl BranchRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, provider_id: Uuid, data: &CreateBranch) -> Result<Branch> {
        let branch = sqlx::query_as::<_, Branch>(
            r#"
            INSERT INTO branch
                (id, provider_id, name, address, phone_number, email, whatsapp, hotline)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(provider_id)
        .bind(&data.name)
        .bind(&data.address)
        .bind(&data.phone_number)
        .bind(&data.email)
        .bind(&data.whatsapp)
        .bind(&data.hotline)
        .fetch_one(&self.pool)
        .await?;

        Ok(branch)
    }

    pub async fn update(&self, id: Uuid, data: &UpdateBranch) -> Result<Branch> {
        let branch = sqlx::query_as::<_, Branch>(
            r#"
            UPDATE branch
            SET name = COALESCE($2, name),
                address = COALESCE($3, address),
                phone_number = COALESCE($4, phone_number),
                email = COALESCE($5, email),
                whatsapp = COALESCE($6, whatsapp),
                hotline = COALESCE($7, hotline),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.address)
        .bind(&data.phone_number)
        .bind(&data.email)
        .bind(&data.whatsapp)
        .bind(&data.hotline)
        .fetch_one(&self.pool)
        .await?;

        Ok(branch)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Branch>> {
        let branch = sqlx::query_as::<_, Branch>("SELECT * FROM branch WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(branch)
    }

    pub async fn toggle_availability(&self, id: Uuid) -> Result<Branch> {
        let branch = sqlx::query_as::<_, Branch>(
            "UPDATE branch SET available = NOT available, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(branch)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM branch WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn find_paginated(&self, query: &PageQuery) -> Result<Paginated<Branch>> {
        super::fetch_paginated(&self.pool, query).await
    }

    pub async fn metrics(&self, provider_id: Option<Uuid>) -> Result<BranchMetrics> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM branch WHERE ($1 IS NULL OR provider_id = $1)",
        )
        .bind(provider_id);
        let active = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM branch WHERE ($1 IS NULL OR provider_id = $1) AND available",
        )
        .bind(provider_id);
        let inactive = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM branch WHERE ($1 IS NULL OR provider_id = $1) AND NOT available",
        )
        .bind(provider_id);

        let (total, active, inactive) = tokio::try_join!(
            total.fetch_one(&self.pool),
            active.fetch_one(&self.pool),
            inactive.fetch_one(&self.pool),
        )?;

        Ok(BranchMetrics {
            total,
            active,
            inactive,
        })
    }
}
