// src/services/distribution_service.rs

use std::sync::Arc;

use chrono::{Local, Months, NaiveDate};

use crate::{
    common::error::AppError,
    db::DistributionStore,
    models::distribution::{DistributionForm, DistributionsOverview, NewDistribution, RecordedDistribution},
};

#[derive(Clone)]
pub struct DistributionService {
    store: Arc<dyn DistributionStore>,
}

impl DistributionService {
    pub fn new(store: Arc<dyn DistributionStore>) -> Self {
        Self { store }
    }

    pub async fn overview(&self) -> Result<DistributionsOverview, AppError> {
        self.overview_at(Local::now().date_naive()).await
    }

    // Janela móvel de um mês terminando em `today`
    pub async fn overview_at(&self, today: NaiveDate) -> Result<DistributionsOverview, AppError> {
        let since = today.checked_sub_months(Months::new(1)).unwrap_or(today);

        let distributions = self.store.list().await?;
        let stats = self.store.stats_since(since).await?;

        Ok(DistributionsOverview { distributions, stats })
    }

    pub async fn record(&self, conducted_by: i32, form: &DistributionForm) -> Result<RecordedDistribution, AppError> {
        // O campo foodItems não é desmembrado: só a unidade/quantidade viram item
        tracing::debug!("Itens informados (não detalhados): {}", form.food_items);

        let distribution = NewDistribution {
            distribution_date: form.distribution_date,
            location: form.location.clone(),
            beneficiary_count: form.beneficiary_count,
            notes: form.notes.clone(),
            conducted_by,
            quantity: form.quantity,
            unit: form.unit.clone(),
        };

        let recorded = self.store.record(&distribution).await?;

        if recorded.item_recorded {
            tracing::info!("Distribuição {} registrada pelo usuário {}", recorded.distribution_id, conducted_by);
        } else {
            tracing::warn!(
                "Distribuição {} registrada sem itens: nenhum alimento com a unidade '{}'",
                recorded.distribution_id, form.unit
            );
        }

        Ok(recorded)
    }
}
