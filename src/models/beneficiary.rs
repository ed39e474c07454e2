// src/models/beneficiary.rs

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// Linha da listagem: beneficiário + quem o cadastrou (LEFT JOIN em users)
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BeneficiaryListing {
    pub id: i32,
    pub beneficiary_id: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub national_id: String,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    pub household_size: i32,
    pub vulnerability_level: String,
    pub location: String,
    pub status: String,
    pub registered_by: Option<i32>,
    pub registered_by_first: Option<String>,
    pub registered_by_last: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeneficiaryForm {
    pub first_name: String,
    pub last_name: String,
    pub national_id: String,
    pub dob: NaiveDate,
    pub gender: String,
    pub household_size: i32,
    pub vulnerability: String,
    pub location: String,
}

#[derive(Debug, Clone)]
pub struct NewBeneficiary {
    pub beneficiary_id: String,
    pub first_name: String,
    pub last_name: String,
    pub national_id: String,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    pub household_size: i32,
    pub vulnerability_level: String,
    pub location: String,
    pub registered_by: i32,
}

/// Identificador legível: "B" + YYYYMMDDHHMMSS do momento do cadastro.
pub fn generate_beneficiary_id(now: NaiveDateTime) -> String {
    format!("B{}", now.format("%Y%m%d%H%M%S"))
}
