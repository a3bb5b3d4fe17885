use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::Jwt;
use crate::config::Config;
use crate::mail::Mailer;
use crate::repository::{
    AccountRepository, BranchRepository, EncounterRepository, LabTestRepository,
    MedicationRepository, PatientRepository, ProviderRepository, ReferralRepository,
};
use crate::services::{
    AccountService, AuthService, BranchService, EncounterService, LabTestService,
    MedicationService, OwnershipGuard, PatientService, ProviderService, ReferralService,
};

/// Everything request handlers need, built once at startup and shared
/// through axum state.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub jwt: Arc<Jwt>,
    pub accounts: Arc<AccountRepository>,
    pub auth_service: Arc<AuthService>,
    pub account_service: Arc<AccountService>,
    pub provider_service: Arc<ProviderService>,
    pub branch_service: Arc<BranchService>,
    pub patient_service: Arc<PatientService>,
    pub encounter_service: Arc<EncounterService>,
    pub medication_service: Arc<MedicationService>,
    pub lab_test_service: Arc<LabTestService>,
    pub referral_service: Arc<ReferralService>,
}

impl AppState {
    pub fn build(pool: PgPool, config: &Config, mailer: Arc<Mailer>) -> Self {
        let jwt = Arc::new(Jwt::new(
            &config.access_token_secret,
            &config.refresh_token_secret,
        ));

        let accounts = Arc::new(AccountRepository::new(pool.clone()));
        let providers = Arc::new(ProviderRepository::new(pool.clone()));
        let branches = Arc::new(BranchRepository::new(pool.clone()));
        let patients = Arc::new(PatientRepository::new(pool.clone()));
        let encounters = Arc::new(EncounterRepository::new(pool.clone()));
        let medications = Arc::new(MedicationRepository::new(pool.clone()));
        let lab_tests = Arc::new(LabTestRepository::new(pool.clone()));
        let referrals = Arc::new(ReferralRepository::new(pool.clone()));

        let authz = Arc::new(OwnershipGuard::new(providers.clone(), patients.clone()));

        Self {
            pool,
            jwt: jwt.clone(),
            accounts: accounts.clone(),
            auth_service: Arc::new(AuthService::new(accounts.clone(), jwt, mailer.clone())),
            account_service: Arc::new(AccountService::new(accounts)),
            provider_service: Arc::new(ProviderService::new(providers.clone())),
            branch_service: Arc::new(BranchService::new(
                branches.clone(),
                providers.clone(),
                authz.clone(),
            )),
            patient_service: Arc::new(PatientService::new(patients.clone())),
            encounter_service: Arc::new(EncounterService::new(
                encounters,
                providers,
                patients,
                branches,
                authz.clone(),
                mailer,
            )),
            medication_service: Arc::new(MedicationService::new(medications, authz.clone())),
            lab_test_service: Arc::new(LabTestService::new(lab_tests, authz.clone())),
            referral_service: Arc::new(ReferralService::new(referrals, authz)),
        }
    }
}
