// src/models/distribution.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DistributionListing {
    pub id: i32,
    pub distribution_date: NaiveDate,
    pub location: String,
    pub beneficiary_count: i32,
    pub notes: String,
    pub conducted_by: i32,
    pub conducted_by_name: String,
    pub item_count: i64,
    pub total_quantity: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

// Estatísticas da janela móvel (agora - 1 mês)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyDistributionStats {
    pub monthly_distributions: i64,
    pub monthly_beneficiaries: i64,
    pub monthly_food: Decimal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionsOverview {
    pub distributions: Vec<DistributionListing>,
    #[serde(flatten)]
    pub stats: MonthlyDistributionStats,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionForm {
    pub distribution_date: NaiveDate,
    pub location: String,
    pub beneficiary_count: i32,
    // Texto livre do formulário; não é desmembrado em itens
    pub food_items: String,
    pub quantity: Decimal,
    pub unit: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone)]
pub struct NewDistribution {
    pub distribution_date: NaiveDate,
    pub location: String,
    pub beneficiary_count: i32,
    pub notes: String,
    pub conducted_by: i32,
    pub quantity: Decimal,
    pub unit: String,
}

// Resultado da gravação: o item só existe se algum food_item tiver a unidade informada
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordedDistribution {
    pub distribution_id: i32,
    pub item_recorded: bool,
}
