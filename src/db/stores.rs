// src/db/stores.rs
//
// Contratos de persistência usados pelos serviços. Os repositórios Postgres
// implementam estes traits; os testes usam o `MemoryStore`.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    models::{
        auth::{NewUser, ProfileForm, User},
        beneficiary::{BeneficiaryListing, NewBeneficiary},
        distribution::{
            DistributionListing, MonthlyDistributionStats, NewDistribution, RecordedDistribution,
        },
        finance::{ExpenseListing, FundListing, NewFund},
        report::{CategoryTotal, LocationCount, MonthlyAmount, MonthlyCount, RecentDistribution},
    },
};

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_active_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, AppError>;

    async fn exists_by_username_or_email(&self, username: &str, email: &str) -> Result<bool, AppError>;

    async fn count(&self) -> Result<i64, AppError>;

    /// Com papel admin, só grava se a tabela ainda estiver vazia
    /// (senão `AdminRoleNotAllowed`), de forma atômica.
    async fn create(&self, new_user: &NewUser) -> Result<User, AppError>;

    /// Retorna `false` quando o usuário não existe.
    async fn update_profile(&self, id: i32, profile: &ProfileForm) -> Result<bool, AppError>;

    async fn list_all(&self) -> Result<Vec<User>, AppError>;

    async fn update_account(&self, id: i32, role: &str, is_active: bool) -> Result<bool, AppError>;
}

#[async_trait]
pub trait BeneficiaryStore: Send + Sync {
    async fn list(&self) -> Result<Vec<BeneficiaryListing>, AppError>;

    async fn create(&self, beneficiary: &NewBeneficiary) -> Result<i32, AppError>;
}

#[async_trait]
pub trait FinanceStore: Send + Sync {
    async fn list_funds(&self) -> Result<Vec<FundListing>, AppError>;

    async fn list_expenses(&self) -> Result<Vec<ExpenseListing>, AppError>;

    async fn total_funds(&self) -> Result<Decimal, AppError>;

    async fn total_expenses(&self) -> Result<Decimal, AppError>;

    /// Get-or-create do doador + INSERT do fundo, na mesma transação.
    async fn record_fund(&self, fund: &NewFund) -> Result<i32, AppError>;
}

#[async_trait]
pub trait DistributionStore: Send + Sync {
    async fn list(&self) -> Result<Vec<DistributionListing>, AppError>;

    async fn stats_since(&self, since: NaiveDate) -> Result<MonthlyDistributionStats, AppError>;

    async fn record(&self, distribution: &NewDistribution) -> Result<RecordedDistribution, AppError>;
}

#[async_trait]
pub trait ReportStore: Send + Sync {
    async fn active_beneficiary_count(&self) -> Result<i64, AppError>;

    async fn recent_distributions(&self, limit: i64) -> Result<Vec<RecentDistribution>, AppError>;

    async fn monthly_funds(&self, since: NaiveDate) -> Result<Vec<MonthlyAmount>, AppError>;

    async fn monthly_expenses(&self, since: NaiveDate) -> Result<Vec<MonthlyAmount>, AppError>;

    async fn beneficiaries_by_location(&self) -> Result<Vec<LocationCount>, AppError>;

    async fn expense_totals_by_category(&self) -> Result<Vec<CategoryTotal>, AppError>;

    async fn monthly_beneficiaries_served(&self, since: NaiveDate) -> Result<Vec<MonthlyCount>, AppError>;
}
