use std::sync::Arc;

use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::{Account, Role};
use crate::repository::{PatientRepository, ProviderRepository};

/// Shared ownership check used by every resource service.
///
/// A Provider caller must own the resource through their provider profile,
/// a Patient caller through their patient profile; Admin and SuperAdmin
/// bypass the check entirely.
pub struct OwnershipGuard {
    providers: Arc<ProviderRepository>,
    patients: Arc<PatientRepository>,
}

impl OwnershipGuard {
    pub fn new(providers: Arc<ProviderRepository>, patients: Arc<PatientRepository>) -> Self {
        Self {
            providers,
            patients,
        }
    }

    /// `resource` is the noun used in the rejection message, e.g.
    /// "encounter" -> "You do not own this encounter".
    pub async fn ensure_owns(
        &self,
        account: &Account,
        resource: &str,
        owner_provider_id: Option<Uuid>,
        owner_patient_id: Option<Uuid>,
    ) -> Result<()> {
        match account.role {
            Role::Admin | Role::SuperAdmin => Ok(()),
            Role::Provider => {
                let provider = self
                    .providers
                    .find_by_account(account.id)
                    .await?
                    .ok_or_else(|| ApiError::not_found("Provider not found"))?;

                if owner_provider_id == Some(provider.id) {
                    Ok(())
                } else {
                    Err(ApiError::forbidden(format!(
                        "You do not own this {}",
                        resource
                    )))
                }
            }
            Role::Patient => {
                let patient = self
                    .patients
                    .find_by_account(account.id)
                    .await?
                    .ok_or_else(|| ApiError::not_found("Patient Profile not found"))?;

                if owner_patient_id == Some(patient.id) {
                    Ok(())
                } else {
                    Err(ApiError::forbidden(format!(
                        "You do not own this {}",
                        resource
                    )))
                }
            }
        }
    }
}
