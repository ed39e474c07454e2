// src/services/auth.rs

use std::sync::Arc;

use bcrypt::{hash, verify};
use validator::Validate;

use crate::{
    common::error::AppError,
    db::UserStore,
    middleware::session::SessionUser,
    models::auth::{NewUser, RegisterForm, User, ADMIN_ROLE},
};

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    hash_cost: u32,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self::with_hash_cost(users, bcrypt::DEFAULT_COST)
    }

    pub fn with_hash_cost(users: Arc<dyn UserStore>, hash_cost: u32) -> Self {
        Self { users, hash_cost }
    }

    /// Autentica e devolve as claims que vão para a sessão.
    /// Usuário inexistente, inativo ou senha errada resultam no mesmo erro.
    pub async fn login(&self, username: &str, password: &str) -> Result<SessionUser, AppError> {
        let user = self.users
            .find_active_by_username(username)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid = tokio::task::spawn_blocking(move || {
            verify(&password_clone, &password_hash_clone)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))?
        .unwrap_or_else(|e| {
            tracing::warn!("Hash de senha ilegível para o usuário {}: {}", user.id, e);
            false
        });

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        Ok(SessionUser {
            user_id: user.id,
            username: user.username.clone(),
            full_name: user.full_name(),
            role: user.role,
        })
    }

    pub async fn register(&self, form: &RegisterForm) -> Result<User, AppError> {
        if form.password != form.confirm_password {
            return Err(AppError::PasswordMismatch);
        }

        form.validate()?;

        if self.users.exists_by_username_or_email(&form.username, &form.email).await? {
            return Err(AppError::UserAlreadyExists);
        }

        // Só o primeiro cadastro do sistema pode se declarar administrador
        if form.user_role == ADMIN_ROLE && self.users.count().await? > 0 {
            tracing::warn!("Cadastro de '{}' pediu o papel admin e foi recusado", form.username);
            return Err(AppError::AdminRoleNotAllowed);
        }

        let password_hash = self.hash_secret(&form.password).await?;
        let security_answer_hash = self.hash_secret(&form.security_answer).await?;

        let new_user = NewUser {
            first_name: form.first_name.clone(),
            last_name: form.last_name.clone(),
            email: form.email.clone(),
            phone: form.phone.clone(),
            username: form.username.clone(),
            password_hash,
            security_question: form.security_question.clone(),
            security_answer_hash,
            role: form.user_role.clone(),
            organization: form.organization.clone(),
        };

        let user = self.users.create(&new_user).await?;
        tracing::info!("Novo usuário cadastrado: {} ({})", user.username, user.role);

        Ok(user)
    }

    async fn hash_secret(&self, secret: &str) -> Result<String, AppError> {
        let secret_clone = secret.to_owned();
        let cost = self.hash_cost;

        let hashed = tokio::task::spawn_blocking(move || hash(&secret_clone, cost))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        Ok(hashed)
    }
}
