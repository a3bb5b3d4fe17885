use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::traits::Table;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Medication {
    pub id: Uuid,
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub duration: String,
    pub instructions: Option<String>,
    pub drug_form: Option<String>,
    pub quantity: Option<f64>,
    pub tracking_id: String,
    pub patient_id: Uuid,
    pub provider_id: Uuid,
    pub encounter_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Table for Medication {
    const TABLE: &'static str = "medication";
    const COLUMNS: &'static [&'static str] = &[
        "name",
        "dosage",
        "frequency",
        "duration",
        "drug_form",
        "tracking_id",
        "patient_id",
        "provider_id",
        "encounter_id",
        "created_at",
        "updated_at",
    ];
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateMedication {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub duration: String,
    pub instructions: Option<String>,
    pub drug_form: Option<String>,
    pub quantity: Option<f64>,
    pub patient_id: Uuid,
    pub provider_id: Uuid,
    pub encounter_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMedication {
    pub name: Option<String>,
    pub dosage: Option<String>,
    pub frequency: Option<String>,
    pub duration: Option<String>,
    pub instructions: Option<String>,
    pub drug_form: Option<String>,
    pub quantity: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct MedicationMetrics {
    pub total: i64,
}
