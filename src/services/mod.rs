pub mod account;
pub mod auth;
pub mod authz;
pub mod branch;
pub mod encounter;
pub mod lab_test;
pub mod medication;
pub mod patient;
pub mod provider;
pub mod referral;

pub use account::AccountService;
pub use auth::AuthService;
pub use authz::OwnershipGuard;
pub use branch::BranchService;
pub use encounter::EncounterService;
pub use lab_test::LabTestService;
pub use medication::MedicationService;
pub use patient::PatientService;
pub use provider::ProviderService;
pub use referral::ReferralService;
