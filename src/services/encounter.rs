use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::mail::{MailMessage, Mailer};
use crate::models::encounter::{
    CancelEncounter, CreateEncounter, EncounterMetrics, MetricsFilter, RescheduleEncounter,
    UpdateEncounter,
};
use crate::models::{Account, Encounter, EncounterStatus, EncounterType};
use crate::query::{PageQuery, Paginated};
use crate::repository::{
    BranchRepository, EncounterRepository, PatientRepository, ProviderRepository,
};
use crate::services::authz::OwnershipGuard;

/// Gate for SCHEDULED -> IN_PROGRESS: the appointment time must have
/// arrived and the encounter must not already be underway or closed.
fn ensure_startable(
    status: EncounterStatus,
    scheduled: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<()> {
    if scheduled > now {
        return Err(ApiError::validation(
            "Cannot start encounter before scheduled date/time",
        ));
    }

    if status != EncounterStatus::Scheduled {
        return Err(ApiError::conflict(format!(
            "Cannot start encounter with status '{}'",
            status.to_string().to_lowercase()
        )));
    }

    Ok(())
}

fn ensure_completable(status: EncounterStatus) -> Result<()> {
    if status != EncounterStatus::InProgress {
        return Err(ApiError::conflict(format!(
            "Cannot complete encounter with status '{}', only encounters in progress can be \
             completed",
            status.to_string().to_lowercase()
        )));
    }
    Ok(())
}

fn ensure_cancellable(status: EncounterStatus) -> Result<()> {
    if status == EncounterStatus::Cancelled {
        return Err(ApiError::validation("Encounter has been cancelled"));
    }
    Ok(())
}

fn ensure_reschedulable(status: EncounterStatus) -> Result<()> {
    if status != EncounterStatus::Scheduled {
        return Err(ApiError::conflict(format!(
            "Cannot reschedule encounter with status '{}'",
            status.to_string().to_lowercase()
        )));
    }
    Ok(())
}

pub struct EncounterService {
    encounters: Arc<EncounterRepository>,
    providers: Arc<ProviderRepository>,
    patients: Arc<PatientRepository>,
    branches: Arc<BranchRepository>,
    authz: Arc<OwnershipGuard>,
    mailer: Arc<Mailer>,
}

impl EncounterService {
    pub fn new(
        encounters: Arc<EncounterRepository>,
        providers: Arc<ProviderRepository>,
        patients: Arc<PatientRepository>,
        branches: Arc<BranchRepository>,
        authz: Arc<OwnershipGuard>,
        mailer: Arc<Mailer>,
    ) -> Self {
        Self {
            encounters,
            providers,
            patients,
            branches,
            authz,
            mailer,
        }
    }

    /// Validates every referenced record before the single insert. The
    /// lookups race with concurrent deletes; that window is accepted.
    pub async fn create(&self, data: CreateEncounter, account: &Account) -> Result<Encounter> {
        let (provider, patient) = tokio::try_join!(
            self.providers.find_by_id(data.provider_id),
            self.patients.find_by_id(data.patient_id),
        )?;

        let provider = provider.ok_or_else(|| ApiError::not_found("Provider not found"))?;
        if !provider.available {
            return Err(ApiError::validation("Provider has been disabled"));
        }

        let patient = patient.ok_or_else(|| ApiError::not_found("Patient Profile not found"))?;

        let branch = match data.branch_id {
            Some(branch_id) => {
                let branch = self
                    .branches
                    .find_by_id(branch_id)
                    .await?
                    .ok_or_else(|| ApiError::not_found("Branch not found"))?;
                if !branch.available {
                    return Err(ApiError::validation("Branch has been disabled"));
                }
                Some(branch)
            }
            None => None,
        };

        if let Some(follow_up_id) = data.follow_up_encounter_id {
            self.encounters
                .find_by_id(follow_up_id)
                .await?
                .ok_or_else(|| ApiError::not_found("Follow-up encounter not found"))?;

            if data.encounter_type != EncounterType::FollowUp {
                return Err(ApiError::validation(
                    "Encounter type must be follow up if there's a follow up id",
                ));
            }
        }

        let encounter = self.encounters.create(&data).await?;
        tracing::info!(encounter_id = %encounter.id, "encounter scheduled");

        let greeting = patient.first_name.unwrap_or_else(|| "patient".to_string());
        let location = branch
            .as_ref()
            .map(|b| format!("<p>Location: <strong>{}</strong></p>", b.name))
            .unwrap_or_default();
        self.mailer.send_detached(MailMessage {
            to: account.email.clone(),
            subject: format!("Encounter Scheduled - {}", encounter.encounter_type),
            cc: branch.and_then(|b| b.email),
            text: None,
            html: Some(format!(
                "<h2>Encounter Scheduled</h2>\
                 <p>Dear {},</p>\
                 <p>Your encounter has been scheduled for <strong>{}</strong>.</p>\
                 {}\
                 <p>Please arrive on time.</p>",
                greeting,
                encounter.scheduled_date.format("%a %b %e %Y"),
                location,
            )),
        });

        Ok(encounter)
    }

    pub async fn find_all(&self, query: PageQuery) -> Result<Paginated<Encounter>> {
        let query = query.with_default_search_fields(&["clinical_notes"]);
        self.encounters.find_paginated(&query).await
    }

    pub async fn find_one(&self, id: Uuid) -> Result<Encounter> {
        self.encounters
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Encounter not found"))
    }

    pub async fn update(
        &self,
        id: Uuid,
        data: UpdateEncounter,
        account: &Account,
    ) -> Result<Encounter> {
        let encounter = self.find_one(id).await?;
        self.ensure_owner(account, &encounter).await?;

        self.encounters.update(encounter.id, &data).await
    }

    pub async fn start(&self, id: Uuid, account: &Account) -> Result<Encounter> {
        let encounter = self.find_one(id).await?;
        ensure_startable(encounter.status, encounter.scheduled_date, Utc::now())?;
        self.ensure_owner(account, &encounter).await?;

        self.encounters.mark_started(encounter.id).await
    }

    pub async fn complete(&self, id: Uuid, account: &Account) -> Result<Encounter> {
        let encounter = self.find_one(id).await?;
        ensure_completable(encounter.status)?;
        self.ensure_owner(account, &encounter).await?;

        self.encounters.mark_completed(encounter.id).await
    }

    pub async fn cancel(
        &self,
        id: Uuid,
        data: CancelEncounter,
        account: &Account,
    ) -> Result<Encounter> {
        let encounter = self.find_one(id).await?;
        ensure_cancellable(encounter.status)?;
        self.ensure_owner(account, &encounter).await?;

        self.encounters
            .mark_cancelled(encounter.id, data.reason.as_deref())
            .await
    }

    pub async fn reschedule(
        &self,
        id: Uuid,
        data: RescheduleEncounter,
        account: &Account,
    ) -> Result<Encounter> {
        let encounter = self.find_one(id).await?;
        ensure_reschedulable(encounter.status)?;
        self.ensure_owner(account, &encounter).await?;

        if let Some(reason) = &data.reason {
            tracing::info!(encounter_id = %encounter.id, reason = %reason, "encounter rescheduled");
        }

        self.encounters.reschedule(encounter.id, data.date).await
    }

    pub async fn delete(&self, id: Uuid, account: &Account) -> Result<()> {
        let encounter = self.find_one(id).await?;
        self.ensure_owner(account, &encounter).await?;

        self.encounters.delete(encounter.id).await
    }

    pub async fn metrics(&self, filter: MetricsFilter) -> Result<EncounterMetrics> {
        self.encounters.metrics(&filter).await
    }

    async fn ensure_owner(&self, account: &Account, encounter: &Encounter) -> Result<()> {
        self.authz
            .ensure_owns(
                account,
                "encounter",
                Some(encounter.provider_id),
                Some(encounter.patient_id),
            )
            .await
    }
}
