use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Account, Role};
use crate::query::{PageQuery, Paginated};

pub struct AccountRepository {
    pool: PgPool,
}

impl AccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        email: &str,
        password_hash: &str,
        role: Role,
        otp: &str,
        otp_expires_at: DateTime<Utc>,
    ) -> Result<Account> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO account (id, email, password, role, otp, otp_expires_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .bind(otp)
        .bind(otp_expires_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(account)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>> {
        let account = sqlx::query_as::<_, Account>("SELECT * FROM account WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(account)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Account>> {
        let account = sqlx::query_as::<_, Account>("SELECT * FROM account WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(account)
    }

    pub async fn find_by_otp(&self, otp: &str) -> Result<Option<Account>> {
        let account = sqlx::query_as::<_, Account>("SELECT * FROM account WHERE otp = $1")
            .bind(otp)
            .fetch_optional(&self.pool)
            .await?;
        Ok(account)
    }

    pub async fn set_otp(
        &self,
        email: &str,
        otp: &str,
        otp_expires_at: DateTime<Utc>,
    ) -> Result<Account> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            UPDATE account
            SET otp = $2, otp_expires_at = $3, updated_at = now()
            WHERE email = $1
            RETURNING *
            "#,
        )
        .bind(email)
        .bind(otp)
        .bind(otp_expires_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(account)
    }

    pub async fn mark_email_verified(&self, email: &str) -> Result<Account> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            UPDATE account
            SET is_email_verified = TRUE, otp = NULL, otp_expires_at = NULL, updated_at = now()
            WHERE email = $1
            RETURNING *
            "#,
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(account)
    }

    pub async fn set_password(&self, email: &str, password_hash: &str) -> Result<Account> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            UPDATE account
            SET password = $2, otp = NULL, otp_expires_at = NULL, updated_at = now()
            WHERE email = $1
            RETURNING *
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(account)
    }

    pub async fn touch_last_login(&self, id: Uuid) -> Result<Account> {
        let account = sqlx::query_as::<_, Account>(
            "UPDATE account SET last_login = now(), updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(account)
    }

    pub async fn find_paginated(&self, query: &PageQuery) -> Result<Paginated<Account>> {
        super::fetch_paginated(&self.pool, query).await
    }
}
