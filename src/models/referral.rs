use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::traits::Table;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "referral_status")]
pub enum ReferralStatus {
    Pending,
    Approved,
    Ongoing,
    Rejected,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Referral {
    pub id: Uuid,
    pub reason: String,
    pub note: Option<String>,
    pub urgency: Option<String>,
    pub tracking_id: String,
    pub facility: Option<String>,
    pub status: ReferralStatus,
    pub patient_id: Uuid,
    pub provider_id: Uuid,
    pub encounter_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Table for Referral {
    const TABLE: &'static str = "referral";
    const COLUMNS: &'static [&'static str] = &[
        "reason",
        "urgency",
        "tracking_id",
        "facility",
        "status",
        "patient_id",
        "provider_id",
        "encounter_id",
        "created_at",
        "updated_at",
    ];
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateReferral {
    pub reason: String,
    pub note: Option<String>,
    pub urgency: Option<String>,
    pub facility: Option<String>,
    pub patient_id: Uuid,
    pub provider_id: Uuid,
    pub encounter_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateReferral {
    pub reason: Option<String>,
    pub note: Option<String>,
    pub urgency: Option<String>,
    pub facility: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReferralMetrics {
    pub total: i64,
    pub pending: i64,
    pub approved: i64,
    pub ongoing: i64,
    pub rejected: i64,
    pub completed: i64,
}
