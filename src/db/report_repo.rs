// src/db/report_repo.rs

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::stores::ReportStore,
    models::report::{CategoryTotal, LocationCount, MonthlyAmount, MonthlyCount, RecentDistribution},
};

// Consultas somente leitura do dashboard e da página de relatórios.
// Cada uma roda isolada; não há commit/rollback aqui.
#[derive(Clone)]
pub struct ReportRepository {
    pool: PgPool,
}

impl ReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportStore for ReportRepository {
    async fn active_beneficiary_count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM beneficiaries WHERE status = 'active'",
        )
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn recent_distributions(&self, limit: i64) -> Result<Vec<RecentDistribution>, AppError> {
        let data = sqlx::query_as::<_, RecentDistribution>(
            r#"
            SELECT
                d.distribution_date, d.location, d.beneficiary_count,
                STRING_AGG(fi.name || ' (' || di.quantity::text || ' ' || fi.unit || ')', ', ') AS food_items
            FROM distributions d
            LEFT JOIN distribution_items di ON d.id = di.distribution_id
            LEFT JOIN food_items fi ON di.food_item_id = fi.id
            GROUP BY d.id
            ORDER BY d.distribution_date DESC
            LIMIT $1
            "#,
        )
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(data)
    }

    async fn monthly_funds(&self, since: NaiveDate) -> Result<Vec<MonthlyAmount>, AppError> {
        let data = sqlx::query_as::<_, MonthlyAmount>(
            r#"
            SELECT to_char(received_date, 'YYYY-MM') AS month, SUM(amount) AS total
            FROM funds
            WHERE received_date >= $1
            GROUP BY 1
            ORDER BY 1 ASC
            "#,
        )
            .bind(since)
            .fetch_all(&self.pool)
            .await?;

        Ok(data)
    }

    async fn monthly_expenses(&self, since: NaiveDate) -> Result<Vec<MonthlyAmount>, AppError> {
        let data = sqlx::query_as::<_, MonthlyAmount>(
            r#"
            SELECT to_char(expense_date, 'YYYY-MM') AS month, SUM(amount) AS total
            FROM expenses
            WHERE expense_date >= $1
            GROUP BY 1
            ORDER BY 1 ASC
            "#,
        )
            .bind(since)
            .fetch_all(&self.pool)
            .await?;

        Ok(data)
    }

    async fn beneficiaries_by_location(&self) -> Result<Vec<LocationCount>, AppError> {
        let data = sqlx::query_as::<_, LocationCount>(
            r#"
            SELECT location, COUNT(*) AS count
            FROM beneficiaries
            WHERE status = 'active'
            GROUP BY location
            ORDER BY location ASC
            "#,
        )
            .fetch_all(&self.pool)
            .await?;

        Ok(data)
    }

    // LEFT JOIN: categorias sem despesas aparecem com total 0
    async fn expense_totals_by_category(&self) -> Result<Vec<CategoryTotal>, AppError> {
        let data = sqlx::query_as::<_, CategoryTotal>(
            r#"
            SELECT ec.name, COALESCE(SUM(e.amount), 0) AS total
            FROM expense_categories ec
            LEFT JOIN expenses e ON ec.id = e.category_id
            GROUP BY ec.id, ec.name
            ORDER BY ec.name ASC
            "#,
        )
            .fetch_all(&self.pool)
            .await?;

        Ok(data)
    }

    async fn monthly_beneficiaries_served(&self, since: NaiveDate) -> Result<Vec<MonthlyCount>, AppError> {
        let data = sqlx::query_as::<_, MonthlyCount>(
            r#"
            SELECT to_char(distribution_date, 'YYYY-MM') AS month, SUM(beneficiary_count) AS total
            FROM distributions
            WHERE distribution_date >= $1
            GROUP BY 1
            ORDER BY 1 ASC
            "#,
        )
            .bind(since)
            .fetch_all(&self.pool)
            .await?;

        Ok(data)
    }
}
