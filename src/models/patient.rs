use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::traits::Table;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Patient {
    pub id: Uuid,
    pub account_id: Uuid,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub dob: Option<NaiveDate>,
    pub gender: Option<String>,
    pub blood_group: Option<String>,
    pub genotype: Option<String>,
    pub address: Option<String>,
    pub image: Option<String>,
    pub phone_number: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub bmi: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Table for Patient {
    const TABLE: &'static str = "patient";
    const COLUMNS: &'static [&'static str] = &[
        "account_id",
        "first_name",
        "last_name",
        "dob",
        "gender",
        "blood_group",
        "genotype",
        "address",
        "phone_number",
        "created_at",
        "updated_at",
    ];
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePatient {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub dob: Option<NaiveDate>,
    pub gender: Option<String>,
    pub blood_group: Option<String>,
    pub genotype: Option<String>,
    pub address: Option<String>,
    pub image: Option<String>,
    pub phone_number: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub bmi: Option<f64>,
}
