// src/config.rs

use std::{env, sync::Arc, time::Duration};

use anyhow::Context;
use axum::extract::FromRef;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

use crate::{
    db::{
        BeneficiaryRepository, BeneficiaryStore, DistributionRepository, DistributionStore,
        FinanceRepository, FinanceStore, ReportRepository, ReportStore, UserRepository, UserStore,
    },
    middleware::session::SessionKeys,
    services::{
        auth::AuthService, beneficiary_service::BeneficiaryService,
        distribution_service::DistributionService, finance_service::FinanceService,
        report_service::ReportService, user_service::UserService,
    },
};

// Configuração lida do ambiente (.env via dotenvy)
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub secret_key: String,
    pub db_host: String,
    pub db_port: u16,
    pub db_user: String,
    pub db_password: String,
    pub db_name: String,
    pub db_max_connections: u32,
    pub bind_addr: String,
    pub session_ttl_hours: i64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key).with_context(|| format!("{} deve ser definida", key))
        };

        Ok(Self {
            secret_key: required("SECRET_KEY")?,
            db_host: required("DB_HOST")?,
            db_user: required("DB_USER")?,
            db_password: required("DB_PASSWORD")?,
            db_name: required("DB_NAME")?,
            db_port: parse_or(&lookup, "DB_PORT", 5432)?,
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 5)?,
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string()),
            session_ttl_hours: parse_or(&lookup, "SESSION_TTL_HOURS", 12)?,
        })
    }

    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.db_host)
            .port(self.db_port)
            .username(&self.db_user)
            .password(&self.db_password)
            .database(&self.db_name)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("{} tem um valor inválido: {}", key, raw)),
        None => Ok(default),
    }
}

// Os stores por trás dos serviços
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub beneficiaries: Arc<dyn BeneficiaryStore>,
    pub finance: Arc<dyn FinanceStore>,
    pub distributions: Arc<dyn DistributionStore>,
    pub reports: Arc<dyn ReportStore>,
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub session_keys: SessionKeys,
    pub auth_service: AuthService,
    pub user_service: UserService,
    pub beneficiary_service: BeneficiaryService,
    pub finance_service: FinanceService,
    pub distribution_service: DistributionService,
    pub report_service: ReportService,
}

impl AppState {
    // Conecta ao Postgres, roda as migrações e monta o gráfico de dependências
    pub async fn connect(config: &Config) -> anyhow::Result<Self> {
        let db_pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect_with(config.connect_options())
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        sqlx::migrate!()
            .run(&db_pool)
            .await
            .context("Falha ao rodar as migrações do banco de dados")?;

        tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

        let stores = Stores {
            users: Arc::new(UserRepository::new(db_pool.clone())),
            beneficiaries: Arc::new(BeneficiaryRepository::new(db_pool.clone())),
            finance: Arc::new(FinanceRepository::new(db_pool.clone())),
            distributions: Arc::new(DistributionRepository::new(db_pool.clone())),
            reports: Arc::new(ReportRepository::new(db_pool)),
        };

        let session_keys = SessionKeys::new(
            &config.secret_key,
            chrono::Duration::hours(config.session_ttl_hours),
        );

        Ok(Self::from_parts(session_keys, AuthService::new(stores.users.clone()), stores))
    }

    pub fn from_parts(session_keys: SessionKeys, auth_service: AuthService, stores: Stores) -> Self {
        Self {
            session_keys,
            auth_service,
            user_service: UserService::new(stores.users),
            beneficiary_service: BeneficiaryService::new(stores.beneficiaries),
            finance_service: FinanceService::new(stores.finance.clone()),
            distribution_service: DistributionService::new(stores.distributions),
            report_service: ReportService::new(stores.finance, stores.reports),
        }
    }
}

impl FromRef<AppState> for SessionKeys {
    fn from_ref(state: &AppState) -> Self {
        state.session_keys.clone()
    }
}
