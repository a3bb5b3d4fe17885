use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::traits::Table;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "lab_test_status")]
pub enum LabTestStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LabTest {
    pub id: Uuid,
    pub name: String,
    pub note: Option<String>,
    pub urgency: Option<String>,
    pub tat: Option<String>,
    pub tracking_id: String,
    pub facility: Option<String>,
    pub status: LabTestStatus,
    pub patient_id: Uuid,
    pub provider_id: Uuid,
    pub encounter_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Table for LabTest {
    const TABLE: &'static str = "lab_test";
    const COLUMNS: &'static [&'static str] = &[
        "name",
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
pub struct CreateLabTest {
    pub name: String,
    pub note: Option<String>,
    pub urgency: Option<String>,
    pub tat: Option<String>,
    pub tracking_id: Option<String>,
    pub facility: Option<String>,
    pub patient_id: Uuid,
    pub provider_id: Uuid,
    pub encounter_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateLabTest {
    pub name: Option<String>,
    pub note: Option<String>,
    pub urgency: Option<String>,
    pub tat: Option<String>,
    pub facility: Option<String>,
    pub status: Option<LabTestStatus>,
}

#[derive(Debug, Serialize)]
pub struct LabTestMetrics {
    pub total: i64,
    pub pending: i64,
    pub approved: i64,
    pub rejected: i64,
}
