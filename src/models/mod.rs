pub mod account;
pub mod branch;
pub mod encounter;
pub mod lab_test;
pub mod medication;
pub mod patient;
pub mod provider;
pub mod referral;
pub mod traits;

pub use account::{Account, Role};
pub use branch::Branch;
pub use encounter::{Encounter, EncounterStatus, EncounterType};
pub use lab_test::{LabTest, LabTestStatus};
pub use medication::Medication;
pub use patient::Patient;
pub use provider::Provider;
pub use referral::{Referral, ReferralStatus};
pub use traits::Table;
