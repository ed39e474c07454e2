// src/services/report_service.rs

use std::sync::Arc;

use chrono::{Local, Months, NaiveDate};

use crate::{
    common::error::AppError,
    db::{FinanceStore, ReportStore},
    models::report::{DashboardSummary, ReportsOverview},
};

const RECENT_DISTRIBUTIONS: i64 = 5;
const TREND_MONTHS: u32 = 6;

#[derive(Clone)]
pub struct ReportService {
    finance: Arc<dyn FinanceStore>,
    reports: Arc<dyn ReportStore>,
}

impl ReportService {
    pub fn new(finance: Arc<dyn FinanceStore>, reports: Arc<dyn ReportStore>) -> Self {
        Self { finance, reports }
    }

    pub async fn dashboard(&self) -> Result<DashboardSummary, AppError> {
        Ok(DashboardSummary {
            beneficiaries: self.reports.active_beneficiary_count().await?,
            total_funds: self.finance.total_funds().await?,
            total_expenditures: self.finance.total_expenses().await?,
            recent_distributions: self.reports.recent_distributions(RECENT_DISTRIBUTIONS).await?,
        })
    }

    pub async fn reports(&self) -> Result<ReportsOverview, AppError> {
        self.reports_at(Local::now().date_naive()).await
    }

    // Cada agregação é independente; escritas concorrentes podem deixar os
    // totais inconsistentes entre si.
    pub async fn reports_at(&self, today: NaiveDate) -> Result<ReportsOverview, AppError> {
        let since = today.checked_sub_months(Months::new(TREND_MONTHS)).unwrap_or(today);

        Ok(ReportsOverview {
            total_funds: self.finance.total_funds().await?,
            funds_data: self.reports.monthly_funds(since).await?,
            expenses_data: self.reports.monthly_expenses(since).await?,
            location_data: self.reports.beneficiaries_by_location().await?,
            expense_categories: self.reports.expense_totals_by_category().await?,
            distribution_trends: self.reports.monthly_beneficiaries_served(since).await?,
        })
    }
}
