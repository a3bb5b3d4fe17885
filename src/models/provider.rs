use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::traits::Table;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Provider {
    pub id: Uuid,
    pub account_id: Uuid,
    pub name: Option<String>,
    pub image: Option<String>,
    #[serde(rename = "type")]
    pub provider_type: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub whatsapp: Option<String>,
    pub hotline: Option<String>,
    pub available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Table for Provider {
    const TABLE: &'static str = "provider";
    const COLUMNS: &'static [&'static str] = &[
        "account_id",
        "name",
        "provider_type",
        "phone_number",
        "address",
        "whatsapp",
        "hotline",
        "available",
        "created_at",
        "updated_at",
    ];
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProvider {
    pub name: Option<String>,
    pub image: Option<String>,
    #[serde(rename = "type")]
    pub provider_type: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub whatsapp: Option<String>,
    pub hotline: Option<String>,
}

/// Profile-quality numbers for a single provider.
#[derive(Debug, Serialize)]
pub struct ProviderMetrics {
    pub provider_id: Uuid,
    pub available: bool,
    pub name_present: bool,
    pub contact_complete: bool,
    pub type_defined: bool,
    pub profile_complete_percent: i64,
    pub days_active: i64,
    pub last_updated_days_ago: i64,
}

/// Fleet-wide provider counts.
#[derive(Debug, Serialize)]
pub struct ProviderFleetMetrics {
    pub total_providers: i64,
    pub available_providers: i64,
    pub providers_with_name: i64,
    pub providers_with_contact: i64,
    pub available_percent: f64,
    pub profile_complete_percent: f64,
}
