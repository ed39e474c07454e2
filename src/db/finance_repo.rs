// src/db/finance_repo.rs

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::stores::FinanceStore,
    models::finance::{ExpenseListing, FundListing, NewFund},
};

#[derive(Clone)]
pub struct FinanceRepository {
    pool: PgPool,
}

impl FinanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FinanceStore for FinanceRepository {
    // =========================================================================
    //  LISTAGENS
    // =========================================================================

    async fn list_funds(&self) -> Result<Vec<FundListing>, AppError> {
        let funds = sqlx::query_as::<_, FundListing>(
            r#"
            SELECT
                f.id, f.reference_number, f.donor_id, d.name AS donor_name,
                f.amount, f.received_date, f.purpose, f.notes, f.recorded_by,
                u.first_name AS recorded_by_first, u.last_name AS recorded_by_last,
                f.created_at
            FROM funds f
            JOIN donors d ON f.donor_id = d.id
            JOIN users u ON f.recorded_by = u.id
            ORDER BY f.received_date DESC
            "#,
        )
            .fetch_all(&self.pool)
            .await?;

        Ok(funds)
    }

    async fn list_expenses(&self) -> Result<Vec<ExpenseListing>, AppError> {
        let expenses = sqlx::query_as::<_, ExpenseListing>(
            r#"
            SELECT
                e.id, e.category_id, ec.name AS category_name, e.amount,
                e.expense_date, e.description, e.location, e.notes, e.recorded_by,
                u.first_name AS recorded_by_first, u.last_name AS recorded_by_last,
                e.created_at
            FROM expenses e
            JOIN expense_categories ec ON e.category_id = ec.id
            JOIN users u ON e.recorded_by = u.id
            ORDER BY e.expense_date DESC
            "#,
        )
            .fetch_all(&self.pool)
            .await?;

        Ok(expenses)
    }

    // =========================================================================
    //  TOTAIS
    // =========================================================================

    async fn total_funds(&self) -> Result<Decimal, AppError> {
        let total = sqlx::query_scalar::<_, Decimal>("SELECT COALESCE(SUM(amount), 0) FROM funds")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    async fn total_expenses(&self) -> Result<Decimal, AppError> {
        let total = sqlx::query_scalar::<_, Decimal>("SELECT COALESCE(SUM(amount), 0) FROM expenses")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    // =========================================================================
    //  ENTRADA DE FUNDOS
    // =========================================================================

    async fn record_fund(&self, fund: &NewFund) -> Result<i32, AppError> {
        // Se qualquer passo falhar, o tx sofre rollback ao sair do escopo (drop)
        let mut tx = self.pool.begin().await?;

        // Upsert: dois cadastros simultâneos do mesmo doador resultam numa única linha
        let donor_id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO donors (name) VALUES ($1)
            ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
            RETURNING id
            "#,
        )
            .bind(&fund.donor_name)
            .fetch_one(&mut *tx)
            .await?;

        let fund_id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO funds (reference_number, donor_id, amount, received_date, purpose, notes, recorded_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
            .bind(&fund.reference_number)
            .bind(donor_id)
            .bind(fund.amount)
            .bind(fund.received_date)
            .bind(&fund.purpose)
            .bind(&fund.notes)
            .bind(fund.recorded_by)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(fund_id)
    }
}
