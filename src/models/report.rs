// src/models/report.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

// 1. Cards do topo do dashboard
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub beneficiaries: i64,
    pub total_funds: Decimal,
    pub total_expenditures: Decimal,
    pub recent_distributions: Vec<RecentDistribution>,
}

// 2. Últimas distribuições com o resumo "Arroz (10 kg), Óleo (5 liters)"
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RecentDistribution {
    pub distribution_date: NaiveDate,
    pub location: String,
    pub beneficiary_count: i32,
    pub food_items: Option<String>,
}

// --- Relatórios ---

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyAmount {
    pub month: String, // YYYY-MM
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyCount {
    pub month: String,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LocationCount {
    pub location: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub name: String,
    pub total: Decimal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportsOverview {
    pub total_funds: Decimal,
    pub funds_data: Vec<MonthlyAmount>,
    pub expenses_data: Vec<MonthlyAmount>,
    pub location_data: Vec<LocationCount>,
    pub expense_categories: Vec<CategoryTotal>,
    pub distribution_trends: Vec<MonthlyCount>,
}
