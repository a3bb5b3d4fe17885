pub mod tracking;

pub use tracking::{generate_otp, generate_tracking_id};
