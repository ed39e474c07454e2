pub mod stores;
pub use stores::{BeneficiaryStore, DistributionStore, FinanceStore, ReportStore, UserStore};
pub mod user_repo;
pub use user_repo::UserRepository;
pub mod beneficiary_repo;
pub use beneficiary_repo::BeneficiaryRepository;
pub mod finance_repo;
pub use finance_repo::FinanceRepository;
pub mod distribution_repo;
pub use distribution_repo::DistributionRepository;
pub mod report_repo;
pub use report_repo::ReportRepository;

#[cfg(test)]
pub mod memory;
