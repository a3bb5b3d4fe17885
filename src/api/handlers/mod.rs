pub mod account;
pub mod auth;
pub mod branch;
pub mod encounter;
pub mod health;
pub mod medication;
pub mod patient;
pub mod provider;
pub mod referral;
