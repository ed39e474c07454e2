pub mod auth;
pub mod beneficiary;
pub mod distribution;
pub mod finance;
pub mod report;
