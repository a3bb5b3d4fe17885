use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::traits::Table;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Branch {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub name: String,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub whatsapp: Option<String>,
    pub hotline: Option<String>,
    pub available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Table for Branch {
    const TABLE: &'static str = "branch";
    const COLUMNS: &'static [&'static str] = &[
        "provider_id",
        "name",
        "address",
        "phone_number",
        "email",
        "whatsapp",
        "hotline",
        "available",
        "created_at",
        "updated_at",
    ];
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBranch {
    pub name: String,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub whatsapp: Option<String>,
    pub hotline: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateBranch {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub whatsapp: Option<String>,
    pub hotline: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BranchMetrics {
    pub total: i64,
    pub active: i64,
    pub inactive: i64,
}
