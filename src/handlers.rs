pub mod admin;
pub mod auth;
pub mod beneficiaries;
pub mod dashboard;
pub mod distributions;
pub mod funds;
pub mod reports;
pub mod settings;
