// src/services/finance_service.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    db::FinanceStore,
    models::finance::{ExpenseForm, FundForm, FundsOverview, NewFund},
};

#[derive(Clone)]
pub struct FinanceService {
    store: Arc<dyn FinanceStore>,
}

impl FinanceService {
    pub fn new(store: Arc<dyn FinanceStore>) -> Self {
        Self { store }
    }

    /// Dados da página /funds. Os totais vêm de duas agregações separadas.
    pub async fn overview(&self) -> Result<FundsOverview, AppError> {
        let funds = self.store.list_funds().await?;
        let expenses = self.store.list_expenses().await?;
        let total_funds = self.store.total_funds().await?;
        let total_expenses = self.store.total_expenses().await?;

        Ok(FundsOverview {
            funds,
            expenses,
            total_funds,
            total_expenses,
            remaining_balance: total_funds - total_expenses,
        })
    }

    pub async fn record_fund(&self, recorded_by: i32, form: &FundForm) -> Result<i32, AppError> {
        let fund = NewFund {
            donor_name: form.donor.clone(),
            reference_number: form.reference.clone(),
            amount: form.amount,
            received_date: form.received_date,
            purpose: form.purpose.clone(),
            notes: form.notes.clone(),
            recorded_by,
        };

        let fund_id = self.store.record_fund(&fund).await?;
        tracing::info!("Fundo {} de '{}' registrado pelo usuário {}", fund_id, fund.donor_name, recorded_by);

        Ok(fund_id)
    }

    // Ainda não há gravação de despesas: o envio é aceito e descartado.
    // TODO: persistir em `expenses` quando o formulário enviar o id da categoria.
    pub fn submit_expense(&self, form: &ExpenseForm) {
        tracing::warn!(
            category = %form.category,
            amount = %form.expense_amount,
            date = %form.expense_date,
            "Despesa recebida e não persistida"
        );
    }
}
