// src/services/beneficiary_service.rs

use std::sync::Arc;

use chrono::{Local, NaiveDateTime};

use crate::{
    common::error::AppError,
    db::BeneficiaryStore,
    models::beneficiary::{generate_beneficiary_id, BeneficiaryForm, BeneficiaryListing, NewBeneficiary},
};

#[derive(Clone)]
pub struct BeneficiaryService {
    store: Arc<dyn BeneficiaryStore>,
}

impl BeneficiaryService {
    pub fn new(store: Arc<dyn BeneficiaryStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<BeneficiaryListing>, AppError> {
        self.store.list().await
    }

    /// Cadastra o beneficiário em nome do usuário da sessão e devolve o
    /// identificador gerado.
    pub async fn register(&self, registered_by: i32, form: &BeneficiaryForm) -> Result<String, AppError> {
        self.register_at(registered_by, form, Local::now().naive_local()).await
    }

    // Dois cadastros no mesmo segundo colidem na UNIQUE de beneficiary_id
    pub async fn register_at(
        &self,
        registered_by: i32,
        form: &BeneficiaryForm,
        now: NaiveDateTime,
    ) -> Result<String, AppError> {
        let beneficiary = NewBeneficiary {
            beneficiary_id: generate_beneficiary_id(now),
            first_name: form.first_name.clone(),
            last_name: form.last_name.clone(),
            national_id: form.national_id.clone(),
            date_of_birth: form.dob,
            gender: form.gender.clone(),
            household_size: form.household_size,
            vulnerability_level: form.vulnerability.clone(),
            location: form.location.clone(),
            registered_by,
        };

        self.store.create(&beneficiary).await?;
        tracing::info!("Beneficiário {} cadastrado pelo usuário {}", beneficiary.beneficiary_id, registered_by);

        Ok(beneficiary.beneficiary_id)
    }
}
