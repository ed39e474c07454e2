pub mod auth;
pub mod beneficiary_service;
pub mod distribution_service;
pub mod finance_service;
pub mod report_service;
pub mod user_service;
