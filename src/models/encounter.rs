use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use super::traits::Table;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "encounter_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EncounterType {
    Consultation,
    FollowUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "encounter_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EncounterStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl fmt::Display for EncounterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EncounterType::Consultation => "CONSULTATION",
            EncounterType::FollowUp => "FOLLOW_UP",
        };
        f.write_str(label)
    }
}

impl fmt::Display for EncounterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EncounterStatus::Scheduled => "SCHEDULED",
            EncounterStatus::InProgress => "IN_PROGRESS",
            EncounterStatus::Completed => "COMPLETED",
            EncounterStatus::Cancelled => "CANCELLED",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VitalSigns {
    pub blood_pressure: Option<String>,
    pub heart_rate: Option<f64>,
    pub temperature: Option<f64>,
    pub respiratory_rate: Option<f64>,
    pub oxygen_saturation: Option<f64>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub bmi: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Subjective {
    pub chief_complaint: Option<String>,
    pub history_of_present_illness: Option<String>,
    pub review_of_systems: Option<String>,
    pub social_history: Option<String>,
    pub family_history: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Objective {
    pub vital_signs: Option<VitalSigns>,
    pub physical_examination: Option<String>,
    pub laboratory_results: Option<String>,
    pub diagnostic_tests: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Assessment {
    pub primary_diagnosis: Option<String>,
    #[serde(default)]
    pub secondary_diagnosis: Vec<String>,
    #[serde(default)]
    pub differential_diagnosis: Vec<String>,
    pub clinical_impression: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Encounter {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub provider_id: Uuid,
    pub branch_id: Option<Uuid>,
    pub encounter_type: EncounterType,
    pub status: EncounterStatus,
    pub scheduled_date: DateTime<Utc>,
    pub actual_start_time: Option<DateTime<Utc>>,
    pub actual_end_time: Option<DateTime<Utc>>,
    pub symptoms: Vec<String>,
    pub subjective: Option<Json<Subjective>>,
    pub objective: Option<Json<Objective>>,
    pub assessment: Option<Json<Assessment>>,
    pub clinical_notes: Option<String>,
    pub custom_fields: Option<Value>,
    pub follow_up_encounter_id: Option<Uuid>,
    pub cancellation_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Table for Encounter {
    const TABLE: &'static str = "encounter";
    const COLUMNS: &'static [&'static str] = &[
        "patient_id",
        "provider_id",
        "branch_id",
        "encounter_type",
        "status",
        "scheduled_date",
        "clinical_notes",
        "follow_up_encounter_id",
        "created_at",
        "updated_at",
    ];
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateEncounter {
    pub patient_id: Uuid,
    pub provider_id: Uuid,
    pub branch_id: Option<Uuid>,
    pub encounter_type: EncounterType,
    pub scheduled_date: DateTime<Utc>,
    #[serde(default)]
    pub symptoms: Vec<String>,
    pub subjective: Option<Subjective>,
    pub objective: Option<Objective>,
    pub assessment: Option<Assessment>,
    pub clinical_notes: Option<String>,
    pub custom_fields: Option<Value>,
    pub follow_up_encounter_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEncounter {
    pub scheduled_date: Option<DateTime<Utc>>,
    pub symptoms: Option<Vec<String>>,
    pub subjective: Option<Subjective>,
    pub objective: Option<Objective>,
    pub assessment: Option<Assessment>,
    pub clinical_notes: Option<String>,
    pub custom_fields: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CancelEncounter {
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RescheduleEncounter {
    pub date: DateTime<Utc>,
    pub reason: Option<String>,
}

/// Optional narrowing for the metrics endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetricsFilter {
    pub patient_id: Option<Uuid>,
    pub provider_id: Option<Uuid>,
    pub branch_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct EncounterMetrics {
    pub total: i64,
    pub scheduled: i64,
    pub in_progress: i64,
    pub completed: i64,
    pub cancelled: i64,
    pub consultation: i64,
    pub follow_ups: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enums_serialize_in_wire_format() {
        assert_eq!(
            serde_json::to_value(EncounterStatus::InProgress).unwrap(),
            "IN_PROGRESS"
        );
        assert_eq!(
            serde_json::to_value(EncounterType::FollowUp).unwrap(),
            "FOLLOW_UP"
        );
    }

    #[test]
    fn status_display_matches_wire_format() {
        assert_eq!(EncounterStatus::Scheduled.to_string(), "SCHEDULED");
        assert_eq!(EncounterStatus::InProgress.to_string(), "IN_PROGRESS");
    }
}
