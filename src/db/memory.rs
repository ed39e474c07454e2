// src/db/memory.rs
//
// Implementação em memória dos stores, usada só nos testes.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::{
    common::error::{AppError, PersistenceError},
    db::stores::{BeneficiaryStore, DistributionStore, FinanceStore, ReportStore, UserStore},
    models::{
        auth::{NewUser, ProfileForm, User, ADMIN_ROLE},
        beneficiary::{BeneficiaryListing, NewBeneficiary},
        distribution::{
            DistributionListing, MonthlyDistributionStats, NewDistribution, RecordedDistribution,
        },
        finance::{ExpenseListing, FundListing, NewFund},
        report::{CategoryTotal, LocationCount, MonthlyAmount, MonthlyCount, RecentDistribution},
    },
};

#[derive(Debug, Clone)]
struct DonorRow {
    id: i32,
    name: String,
}

#[derive(Debug, Clone)]
struct FundRow {
    id: i32,
    fund: NewFund,
    donor_id: i32,
}

#[derive(Debug, Clone)]
struct CategoryRow {
    id: i32,
    name: String,
}

#[derive(Debug, Clone)]
struct ExpenseRow {
    id: i32,
    category_id: i32,
    amount: Decimal,
    expense_date: NaiveDate,
    recorded_by: i32,
}

#[derive(Debug, Clone)]
struct FoodItemRow {
    id: i32,
    name: String,
    unit: String,
}

#[derive(Debug, Clone)]
struct DistributionRow {
    id: i32,
    distribution: NewDistribution,
}

#[derive(Debug, Clone)]
struct DistributionItemRow {
    distribution_id: i32,
    food_item_id: i32,
    quantity: Decimal,
}

#[derive(Debug, Clone)]
struct BeneficiaryRow {
    id: i32,
    beneficiary: NewBeneficiary,
    status: String,
}

#[derive(Debug, Default)]
struct MemoryState {
    next_id: i32,
    fail_writes: bool,
    users: Vec<User>,
    beneficiaries: Vec<BeneficiaryRow>,
    donors: Vec<DonorRow>,
    funds: Vec<FundRow>,
    categories: Vec<CategoryRow>,
    expenses: Vec<ExpenseRow>,
    food_items: Vec<FoodItemRow>,
    distributions: Vec<DistributionRow>,
    distribution_items: Vec<DistributionItemRow>,
}

impl MemoryState {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn check_writable(&self) -> Result<(), AppError> {
        if self.fail_writes {
            return Err(PersistenceError::Connection.into());
        }
        Ok(())
    }

    fn user_names(&self, id: i32) -> (String, String) {
        self.users
            .iter()
            .find(|u| u.id == id)
            .map(|u| (u.first_name.clone(), u.last_name.clone()))
            .unwrap_or_default()
    }
}

/// Quantidade de linhas por tabela, para asserções de "nada foi gravado".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowCounts {
    pub users: usize,
    pub beneficiaries: usize,
    pub donors: usize,
    pub funds: usize,
    pub expenses: usize,
    pub distributions: usize,
    pub distribution_items: usize,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().expect("memory store lock poisoned")
    }

    /// Toda escrita passa a falhar como se o banco estivesse fora do ar.
    pub fn fail_writes(&self) {
        self.lock().fail_writes = true;
    }

    pub fn seed_user(&self, username: &str, password_hash: &str, role: &str, is_active: bool) -> User {
        let id = self.lock().next_id();
        self.seed_user_with_id(id, username, password_hash, role, is_active)
    }

    /// Como `seed_user`, mas com o id escolhido pelo teste.
    pub fn seed_user_with_id(&self, id: i32, username: &str, password_hash: &str, role: &str, is_active: bool) -> User {
        let mut state = self.lock();
        state.next_id = state.next_id.max(id);
        let user = User {
            id,
            first_name: format!("{username}-first"),
            last_name: format!("{username}-last"),
            email: format!("{username}@example.org"),
            phone: String::new(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            security_question: String::new(),
            security_answer: String::new(),
            role: role.to_string(),
            organization: String::new(),
            is_active,
            created_at: Utc::now(),
        };
        state.users.push(user.clone());
        user
    }

    pub fn seed_category(&self, name: &str) -> i32 {
        let mut state = self.lock();
        let id = state.next_id();
        state.categories.push(CategoryRow { id, name: name.to_string() });
        id
    }

    pub fn seed_expense(&self, category_id: i32, amount: Decimal, expense_date: NaiveDate, recorded_by: i32) {
        let mut state = self.lock();
        let id = state.next_id();
        state.expenses.push(ExpenseRow { id, category_id, amount, expense_date, recorded_by });
    }

    pub fn seed_food_item(&self, name: &str, unit: &str) -> i32 {
        let mut state = self.lock();
        let id = state.next_id();
        state.food_items.push(FoodItemRow { id, name: name.to_string(), unit: unit.to_string() });
        id
    }

    pub fn seed_beneficiary_status(&self, beneficiary_id: &str, status: &str) {
        let mut state = self.lock();
        if let Some(row) = state
            .beneficiaries
            .iter_mut()
            .find(|b| b.beneficiary.beneficiary_id == beneficiary_id)
        {
            row.status = status.to_string();
        }
    }

    pub fn counts(&self) -> RowCounts {
        let state = self.lock();
        RowCounts {
            users: state.users.len(),
            beneficiaries: state.beneficiaries.len(),
            donors: state.donors.len(),
            funds: state.funds.len(),
            expenses: state.expenses.len(),
            distributions: state.distributions.len(),
            distribution_items: state.distribution_items.len(),
        }
    }

    pub fn user(&self, id: i32) -> Option<User> {
        self.lock().users.iter().find(|u| u.id == id).cloned()
    }

    pub fn donor_names(&self) -> Vec<String> {
        self.lock().donors.iter().map(|d| d.name.clone()).collect()
    }

    pub fn fund_recorders(&self) -> Vec<i32> {
        self.lock().funds.iter().map(|f| f.fund.recorded_by).collect()
    }

    pub fn beneficiary_records(&self) -> Vec<NewBeneficiary> {
        self.lock().beneficiaries.iter().map(|b| b.beneficiary.clone()).collect()
    }
}

fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_active_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self.lock().users.iter().find(|u| u.username == username && u.is_active).cloned())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, AppError> {
        Ok(self.user(id))
    }

    async fn exists_by_username_or_email(&self, username: &str, email: &str) -> Result<bool, AppError> {
        Ok(self.lock().users.iter().any(|u| u.username == username || u.email == email))
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.lock().users.len() as i64)
    }

    async fn create(&self, new_user: &NewUser) -> Result<User, AppError> {
        let mut state = self.lock();
        state.check_writable()?;
        if state.users.iter().any(|u| u.username == new_user.username || u.email == new_user.email) {
            return Err(AppError::UserAlreadyExists);
        }
        if new_user.role == ADMIN_ROLE && !state.users.is_empty() {
            return Err(AppError::AdminRoleNotAllowed);
        }
        let id = state.next_id();
        let user = User {
            id,
            first_name: new_user.first_name.clone(),
            last_name: new_user.last_name.clone(),
            email: new_user.email.clone(),
            phone: new_user.phone.clone(),
            username: new_user.username.clone(),
            password_hash: new_user.password_hash.clone(),
            security_question: new_user.security_question.clone(),
            security_answer: new_user.security_answer_hash.clone(),
            role: new_user.role.clone(),
            organization: new_user.organization.clone(),
            is_active: true,
            created_at: Utc::now(),
        };
        state.users.push(user.clone());
        Ok(user)
    }

    async fn update_profile(&self, id: i32, profile: &ProfileForm) -> Result<bool, AppError> {
        let mut state = self.lock();
        state.check_writable()?;
        match state.users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                user.first_name = profile.first_name.clone();
                user.last_name = profile.last_name.clone();
                user.email = profile.email.clone();
                user.phone = profile.phone.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_all(&self) -> Result<Vec<User>, AppError> {
        Ok(self.lock().users.clone())
    }

    async fn update_account(&self, id: i32, role: &str, is_active: bool) -> Result<bool, AppError> {
        let mut state = self.lock();
        state.check_writable()?;
        match state.users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                user.role = role.to_string();
                user.is_active = is_active;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl BeneficiaryStore for MemoryStore {
    async fn list(&self) -> Result<Vec<BeneficiaryListing>, AppError> {
        let state = self.lock();
        let mut listings: Vec<BeneficiaryListing> = state
            .beneficiaries
            .iter()
            .map(|row| {
                let b = &row.beneficiary;
                let (first, last) = state.user_names(b.registered_by);
                BeneficiaryListing {
                    id: row.id,
                    beneficiary_id: b.beneficiary_id.clone(),
                    first_name: b.first_name.clone(),
                    last_name: b.last_name.clone(),
                    full_name: format!("{} {}", b.first_name, b.last_name),
                    national_id: b.national_id.clone(),
                    date_of_birth: b.date_of_birth,
                    gender: b.gender.clone(),
                    household_size: b.household_size,
                    vulnerability_level: b.vulnerability_level.clone(),
                    location: b.location.clone(),
                    status: row.status.clone(),
                    registered_by: Some(b.registered_by),
                    registered_by_first: Some(first),
                    registered_by_last: Some(last),
                    created_at: Utc::now(),
                }
            })
            .collect();
        // Mais recentes primeiro
        listings.reverse();
        Ok(listings)
    }

    async fn create(&self, beneficiary: &NewBeneficiary) -> Result<i32, AppError> {
        let mut state = self.lock();
        state.check_writable()?;
        if state
            .beneficiaries
            .iter()
            .any(|b| b.beneficiary.beneficiary_id == beneficiary.beneficiary_id)
        {
            return Err(PersistenceError::ConstraintViolation.into());
        }
        let id = state.next_id();
        state.beneficiaries.push(BeneficiaryRow {
            id,
            beneficiary: beneficiary.clone(),
            status: "active".to_string(),
        });
        Ok(id)
    }
}

#[async_trait]
impl FinanceStore for MemoryStore {
    async fn list_funds(&self) -> Result<Vec<FundListing>, AppError> {
        let state = self.lock();
        let mut funds: Vec<FundListing> = state
            .funds
            .iter()
            .map(|row| {
                let (first, last) = state.user_names(row.fund.recorded_by);
                FundListing {
                    id: row.id,
                    reference_number: row.fund.reference_number.clone(),
                    donor_id: row.donor_id,
                    donor_name: row.fund.donor_name.clone(),
                    amount: row.fund.amount,
                    received_date: row.fund.received_date,
                    purpose: row.fund.purpose.clone(),
                    notes: row.fund.notes.clone(),
                    recorded_by: row.fund.recorded_by,
                    recorded_by_first: first,
                    recorded_by_last: last,
                    created_at: Utc::now(),
                }
            })
            .collect();
        funds.sort_by(|a, b| b.received_date.cmp(&a.received_date));
        Ok(funds)
    }

    async fn list_expenses(&self) -> Result<Vec<ExpenseListing>, AppError> {
        let state = self.lock();
        let mut expenses: Vec<ExpenseListing> = state
            .expenses
            .iter()
            .map(|row| {
                let (first, last) = state.user_names(row.recorded_by);
                let category_name = state
                    .categories
                    .iter()
                    .find(|c| c.id == row.category_id)
                    .map(|c| c.name.clone())
                    .unwrap_or_default();
                ExpenseListing {
                    id: row.id,
                    category_id: row.category_id,
                    category_name,
                    amount: row.amount,
                    expense_date: row.expense_date,
                    description: String::new(),
                    location: String::new(),
                    notes: String::new(),
                    recorded_by: row.recorded_by,
                    recorded_by_first: first,
                    recorded_by_last: last,
                    created_at: Utc::now(),
                }
            })
            .collect();
        expenses.sort_by(|a, b| b.expense_date.cmp(&a.expense_date));
        Ok(expenses)
    }

    async fn total_funds(&self) -> Result<Decimal, AppError> {
        Ok(self.lock().funds.iter().map(|f| f.fund.amount).sum())
    }

    async fn total_expenses(&self) -> Result<Decimal, AppError> {
        Ok(self.lock().expenses.iter().map(|e| e.amount).sum())
    }

    async fn record_fund(&self, fund: &NewFund) -> Result<i32, AppError> {
        let mut state = self.lock();
        state.check_writable()?;

        let existing = state.donors.iter().find(|d| d.name == fund.donor_name).map(|d| d.id);
        let donor_id = match existing {
            Some(id) => id,
            None => {
                let id = state.next_id();
                state.donors.push(DonorRow { id, name: fund.donor_name.clone() });
                id
            }
        };

        let id = state.next_id();
        state.funds.push(FundRow { id, fund: fund.clone(), donor_id });
        Ok(id)
    }
}

#[async_trait]
impl DistributionStore for MemoryStore {
    async fn list(&self) -> Result<Vec<DistributionListing>, AppError> {
        let state = self.lock();
        let mut listings: Vec<DistributionListing> = state
            .distributions
            .iter()
            .map(|row| {
                let items: Vec<&DistributionItemRow> = state
                    .distribution_items
                    .iter()
                    .filter(|i| i.distribution_id == row.id)
                    .collect();
                let (first, last) = state.user_names(row.distribution.conducted_by);
                DistributionListing {
                    id: row.id,
                    distribution_date: row.distribution.distribution_date,
                    location: row.distribution.location.clone(),
                    beneficiary_count: row.distribution.beneficiary_count,
                    notes: row.distribution.notes.clone(),
                    conducted_by: row.distribution.conducted_by,
                    conducted_by_name: format!("{first} {last}"),
                    item_count: items.len() as i64,
                    total_quantity: if items.is_empty() {
                        None
                    } else {
                        Some(items.iter().map(|i| i.quantity).sum())
                    },
                    created_at: Utc::now(),
                }
            })
            .collect();
        listings.sort_by(|a, b| b.distribution_date.cmp(&a.distribution_date));
        Ok(listings)
    }

    async fn stats_since(&self, since: NaiveDate) -> Result<MonthlyDistributionStats, AppError> {
        let state = self.lock();
        let recent: Vec<&DistributionRow> = state
            .distributions
            .iter()
            .filter(|d| d.distribution.distribution_date >= since)
            .collect();
        let monthly_food = state
            .distribution_items
            .iter()
            .filter(|i| recent.iter().any(|d| d.id == i.distribution_id))
            .map(|i| i.quantity)
            .sum();

        Ok(MonthlyDistributionStats {
            monthly_distributions: recent.len() as i64,
            monthly_beneficiaries: recent.iter().map(|d| i64::from(d.distribution.beneficiary_count)).sum(),
            monthly_food,
        })
    }

    async fn record(&self, distribution: &NewDistribution) -> Result<RecordedDistribution, AppError> {
        let mut state = self.lock();
        state.check_writable()?;

        let distribution_id = state.next_id();
        state.distributions.push(DistributionRow {
            id: distribution_id,
            distribution: distribution.clone(),
        });

        let food_item_id = state
            .food_items
            .iter()
            .find(|f| f.unit == distribution.unit)
            .map(|f| f.id);
        if let Some(food_item_id) = food_item_id {
            state.distribution_items.push(DistributionItemRow {
                distribution_id,
                food_item_id,
                quantity: distribution.quantity,
            });
        }

        Ok(RecordedDistribution {
            distribution_id,
            item_recorded: food_item_id.is_some(),
        })
    }
}

#[async_trait]
impl ReportStore for MemoryStore {
    async fn active_beneficiary_count(&self) -> Result<i64, AppError> {
        Ok(self.lock().beneficiaries.iter().filter(|b| b.status == "active").count() as i64)
    }

    async fn recent_distributions(&self, limit: i64) -> Result<Vec<RecentDistribution>, AppError> {
        let state = self.lock();
        let mut rows: Vec<&DistributionRow> = state.distributions.iter().collect();
        rows.sort_by(|a, b| b.distribution.distribution_date.cmp(&a.distribution.distribution_date));

        Ok(rows
            .into_iter()
            .take(usize::try_from(limit).unwrap_or(0))
            .map(|row| {
                let parts: Vec<String> = state
                    .distribution_items
                    .iter()
                    .filter(|i| i.distribution_id == row.id)
                    .filter_map(|i| {
                        state
                            .food_items
                            .iter()
                            .find(|f| f.id == i.food_item_id)
                            .map(|f| format!("{} ({:.2} {})", f.name, i.quantity, f.unit))
                    })
                    .collect();
                RecentDistribution {
                    distribution_date: row.distribution.distribution_date,
                    location: row.distribution.location.clone(),
                    beneficiary_count: row.distribution.beneficiary_count,
                    food_items: if parts.is_empty() { None } else { Some(parts.join(", ")) },
                }
            })
            .collect())
    }

    async fn monthly_funds(&self, since: NaiveDate) -> Result<Vec<MonthlyAmount>, AppError> {
        let state = self.lock();
        let mut months: Vec<MonthlyAmount> = Vec::new();
        for row in state.funds.iter().filter(|f| f.fund.received_date >= since) {
            let month = month_key(row.fund.received_date);
            match months.iter_mut().find(|m| m.month == month) {
                Some(entry) => entry.total += row.fund.amount,
                None => months.push(MonthlyAmount { month, total: row.fund.amount }),
            }
        }
        months.sort_by(|a, b| a.month.cmp(&b.month));
        Ok(months)
    }

    async fn monthly_expenses(&self, since: NaiveDate) -> Result<Vec<MonthlyAmount>, AppError> {
        let state = self.lock();
        let mut months: Vec<MonthlyAmount> = Vec::new();
        for row in state.expenses.iter().filter(|e| e.expense_date >= since) {
            let month = month_key(row.expense_date);
            match months.iter_mut().find(|m| m.month == month) {
                Some(entry) => entry.total += row.amount,
                None => months.push(MonthlyAmount { month, total: row.amount }),
            }
        }
        months.sort_by(|a, b| a.month.cmp(&b.month));
        Ok(months)
    }

    async fn beneficiaries_by_location(&self) -> Result<Vec<LocationCount>, AppError> {
        let state = self.lock();
        let mut locations: Vec<LocationCount> = Vec::new();
        for row in state.beneficiaries.iter().filter(|b| b.status == "active") {
            match locations.iter_mut().find(|l| l.location == row.beneficiary.location) {
                Some(entry) => entry.count += 1,
                None => locations.push(LocationCount {
                    location: row.beneficiary.location.clone(),
                    count: 1,
                }),
            }
        }
        locations.sort_by(|a, b| a.location.cmp(&b.location));
        Ok(locations)
    }

    async fn expense_totals_by_category(&self) -> Result<Vec<CategoryTotal>, AppError> {
        let state = self.lock();
        let mut totals: Vec<CategoryTotal> = state
            .categories
            .iter()
            .map(|c| CategoryTotal {
                name: c.name.clone(),
                total: state
                    .expenses
                    .iter()
                    .filter(|e| e.category_id == c.id)
                    .map(|e| e.amount)
                    .sum(),
            })
            .collect();
        totals.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(totals)
    }

    async fn monthly_beneficiaries_served(&self, since: NaiveDate) -> Result<Vec<MonthlyCount>, AppError> {
        let state = self.lock();
        let mut months: Vec<MonthlyCount> = Vec::new();
        for row in state.distributions.iter().filter(|d| d.distribution.distribution_date >= since) {
            let month = month_key(row.distribution.distribution_date);
            let served = i64::from(row.distribution.beneficiary_count);
            match months.iter_mut().find(|m| m.month == month) {
                Some(entry) => entry.total += served,
                None => months.push(MonthlyCount { month, total: served }),
            }
        }
        months.sort_by(|a, b| a.month.cmp(&b.month));
        Ok(months)
    }
}
