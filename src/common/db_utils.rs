// src/common/db_utils.rs

use sqlx::error::ErrorKind;

use crate::common::error::{AppError, PersistenceError};

// Classifica o erro do sqlx no nosso conjunto fechado de falhas.
pub(crate) fn classify(err: &sqlx::Error) -> PersistenceError {
    match err {
        sqlx::Error::Database(db_err) => match db_err.kind() {
            ErrorKind::UniqueViolation
            | ErrorKind::ForeignKeyViolation
            | ErrorKind::NotNullViolation
            | ErrorKind::CheckViolation => PersistenceError::ConstraintViolation,
            // 57014 = query_canceled (statement_timeout no Postgres)
            _ if db_err.code().as_deref() == Some("57014") => PersistenceError::Timeout,
            _ => PersistenceError::Unexpected,
        },
        sqlx::Error::PoolTimedOut => PersistenceError::Timeout,
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => PersistenceError::Connection,
        _ => PersistenceError::Unexpected,
    }
}

// O texto cru do driver só vai para o log; o usuário recebe a categoria.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        let kind = classify(&err);
        tracing::error!(error = %err, kind = ?kind, "Falha de persistência");
        AppError::Persistence(kind)
    }
}
