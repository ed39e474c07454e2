// src/common/error.rs

use axum::{
    extract::rejection::FormRejection,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Conjunto fechado de falhas de persistência.
// A mensagem de cada variante é o que o usuário vê: nunca o texto cru do driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PersistenceError {
    #[error("a record with the same details already exists or a referenced record is missing")]
    ConstraintViolation,

    #[error("the database is unavailable")]
    Connection,

    #[error("the database did not respond in time")]
    Timeout,

    #[error("an unexpected database error occurred")]
    Unexpected,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid form data")]
    ValidationError(#[from] validator::ValidationErrors),

    // Campo ausente ou que não converte (valor, data, número)
    #[error("invalid form data")]
    InvalidForm(#[from] FormRejection),

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Username or email already exists")]
    UserAlreadyExists,

    #[error("Administrator accounts must be granted by an existing administrator.")]
    AdminRoleNotAllowed,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Please log in to access this page.")]
    Unauthenticated,

    #[error("User not found")]
    UserNotFound,

    #[error("You cannot change your own account from this page.")]
    SelfModification,

    #[error("{0}")]
    Persistence(#[from] PersistenceError),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    /// Texto seguro para exibir numa mensagem flash.
    pub fn public_message(&self) -> String {
        match self {
            AppError::ValidationError(errors) => {
                let mut messages: Vec<String> = errors
                    .field_errors()
                    .into_iter()
                    .flat_map(|(field, field_errors)| {
                        field_errors.iter().map(move |e| match &e.message {
                            Some(m) => m.to_string(),
                            None => format!("{} is invalid", field),
                        })
                    })
                    .collect();
                messages.sort();
                messages.join("; ")
            }
            AppError::BcryptError(_) | AppError::JwtError(_) | AppError::InternalServerError(_) => {
                "an unexpected server error occurred".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::ValidationError(ref errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors.iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "One or more fields are invalid.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            // Sessão ausente nunca vira página de erro: volta para o login
            AppError::Unauthenticated => return Redirect::to("/login").into_response(),
            AppError::InvalidForm(ref rejection) => {
                tracing::warn!("Formulário rejeitado: {}", rejection);
                (StatusCode::UNPROCESSABLE_ENTITY, self.to_string())
            }
            AppError::PasswordMismatch => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::UserAlreadyExists => (StatusCode::CONFLICT, self.to_string()),
            AppError::AdminRoleNotAllowed | AppError::SelfModification => {
                (StatusCode::FORBIDDEN, self.to_string())
            }
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, self.to_string()),
            AppError::UserNotFound => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::Persistence(PersistenceError::Connection | PersistenceError::Timeout) => {
                tracing::error!("Banco de dados indisponível: {}", self);
                (StatusCode::SERVICE_UNAVAILABLE, self.to_string())
            }

            // Todos os outros erros viram 500; o detalhe fica só no log.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "An unexpected error occurred.".to_string())
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
