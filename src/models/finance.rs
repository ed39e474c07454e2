// src/models/finance.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// --- Listagens ---

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FundListing {
    pub id: i32,
    pub reference_number: String,
    pub donor_id: i32,
    pub donor_name: String,
    pub amount: Decimal,
    pub received_date: NaiveDate,
    pub purpose: String,
    pub notes: String,
    pub recorded_by: i32,
    pub recorded_by_first: String,
    pub recorded_by_last: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseListing {
    pub id: i32,
    pub category_id: i32,
    pub category_name: String,
    pub amount: Decimal,
    pub expense_date: NaiveDate,
    pub description: String,
    pub location: String,
    pub notes: String,
    pub recorded_by: i32,
    pub recorded_by_first: String,
    pub recorded_by_last: String,
    pub created_at: DateTime<Utc>,
}

// --- Página /funds ---

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundsOverview {
    pub funds: Vec<FundListing>,
    pub expenses: Vec<ExpenseListing>,
    pub total_funds: Decimal,
    pub total_expenses: Decimal,
    pub remaining_balance: Decimal,
}

// --- Formulários ---

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundForm {
    pub donor: String,
    pub amount: Decimal,
    pub received_date: NaiveDate,
    pub purpose: String,
    pub reference: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone)]
pub struct NewFund {
    pub donor_name: String,
    pub reference_number: String,
    pub amount: Decimal,
    pub received_date: NaiveDate,
    pub purpose: String,
    pub notes: String,
    pub recorded_by: i32,
}

// Os campos chegam como texto e não são interpretados: /add_expense não persiste nada.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseForm {
    pub category: String,
    pub expense_amount: String,
    pub expense_date: String,
    pub description: String,
    pub location: String,
    #[serde(default)]
    pub expense_notes: Option<String>,
}
