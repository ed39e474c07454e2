// src/db/distribution_repo.rs

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::stores::DistributionStore,
    models::distribution::{
        DistributionListing, MonthlyDistributionStats, NewDistribution, RecordedDistribution,
    },
};

#[derive(Clone)]
pub struct DistributionRepository {
    pool: PgPool,
}

impl DistributionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DistributionStore for DistributionRepository {
    async fn list(&self) -> Result<Vec<DistributionListing>, AppError> {
        let distributions = sqlx::query_as::<_, DistributionListing>(
            r#"
            SELECT
                d.id, d.distribution_date, d.location, d.beneficiary_count, d.notes,
                d.conducted_by,
                u.first_name || ' ' || u.last_name AS conducted_by_name,
                COUNT(di.id) AS item_count,
                SUM(di.quantity) AS total_quantity,
                d.created_at
            FROM distributions d
            JOIN users u ON d.conducted_by = u.id
            LEFT JOIN distribution_items di ON d.id = di.distribution_id
            GROUP BY d.id, u.id
            ORDER BY d.distribution_date DESC
            "#,
        )
            .fetch_all(&self.pool)
            .await?;

        Ok(distributions)
    }

    // Três agregados independentes, como no painel: não há snapshot comum
    async fn stats_since(&self, since: NaiveDate) -> Result<MonthlyDistributionStats, AppError> {
        let monthly_distributions = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM distributions WHERE distribution_date >= $1",
        )
            .bind(since)
            .fetch_one(&self.pool)
            .await?;

        let monthly_beneficiaries = sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(SUM(beneficiary_count), 0) FROM distributions WHERE distribution_date >= $1",
        )
            .bind(since)
            .fetch_one(&self.pool)
            .await?;

        let monthly_food = sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT COALESCE(SUM(di.quantity), 0)
            FROM distribution_items di
            JOIN distributions d ON di.distribution_id = d.id
            WHERE d.distribution_date >= $1
            "#,
        )
            .bind(since)
            .fetch_one(&self.pool)
            .await?;

        Ok(MonthlyDistributionStats {
            monthly_distributions,
            monthly_beneficiaries,
            monthly_food,
        })
    }

    async fn record(&self, distribution: &NewDistribution) -> Result<RecordedDistribution, AppError> {
        let mut tx = self.pool.begin().await?;

        let distribution_id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO distributions (distribution_date, location, beneficiary_count, notes, conducted_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
            .bind(distribution.distribution_date)
            .bind(&distribution.location)
            .bind(distribution.beneficiary_count)
            .bind(&distribution.notes)
            .bind(distribution.conducted_by)
            .fetch_one(&mut *tx)
            .await?;

        // Apenas um item por distribuição: o primeiro alimento com a unidade informada
        let food_item_id = sqlx::query_scalar::<_, i32>(
            "SELECT id FROM food_items WHERE unit = $1 ORDER BY id LIMIT 1",
        )
            .bind(&distribution.unit)
            .fetch_optional(&mut *tx)
            .await?;

        if let Some(food_item_id) = food_item_id {
            sqlx::query(
                r#"
                INSERT INTO distribution_items (distribution_id, food_item_id, quantity)
                VALUES ($1, $2, $3)
                "#,
            )
                .bind(distribution_id)
                .bind(food_item_id)
                .bind(distribution.quantity)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(RecordedDistribution {
            distribution_id,
            item_recorded: food_item_id.is_some(),
        })
    }
}
