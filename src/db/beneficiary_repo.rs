// src/db/beneficiary_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::stores::BeneficiaryStore,
    models::beneficiary::{BeneficiaryListing, NewBeneficiary},
};

#[derive(Clone)]
pub struct BeneficiaryRepository {
    pool: PgPool,
}

impl BeneficiaryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BeneficiaryStore for BeneficiaryRepository {
    async fn list(&self) -> Result<Vec<BeneficiaryListing>, AppError> {
        let beneficiaries = sqlx::query_as::<_, BeneficiaryListing>(
            r#"
            SELECT
                b.id, b.beneficiary_id, b.first_name, b.last_name,
                b.first_name || ' ' || b.last_name AS full_name,
                b.national_id, b.date_of_birth, b.gender, b.household_size,
                b.vulnerability_level, b.location, b.status, b.registered_by,
                u.first_name AS registered_by_first,
                u.last_name AS registered_by_last,
                b.created_at
            FROM beneficiaries b
            LEFT JOIN users u ON b.registered_by = u.id
            ORDER BY b.created_at DESC
            "#,
        )
            .fetch_all(&self.pool)
            .await?;

        Ok(beneficiaries)
    }

    async fn create(&self, beneficiary: &NewBeneficiary) -> Result<i32, AppError> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO beneficiaries (
                beneficiary_id, first_name, last_name, national_id, date_of_birth,
                gender, household_size, vulnerability_level, location, registered_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id
            "#,
        )
            .bind(&beneficiary.beneficiary_id)
            .bind(&beneficiary.first_name)
            .bind(&beneficiary.last_name)
            .bind(&beneficiary.national_id)
            .bind(beneficiary.date_of_birth)
            .bind(&beneficiary.gender)
            .bind(beneficiary.household_size)
            .bind(&beneficiary.vulnerability_level)
            .bind(&beneficiary.location)
            .bind(beneficiary.registered_by)
            .fetch_one(&self.pool)
            .await?;

        Ok(id)
    }
}
