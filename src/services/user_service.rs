// src/services/user_service.rs

use std::sync::Arc;

use validator::Validate;

use crate::{
    common::error::AppError,
    db::UserStore,
    models::auth::{AccountUpdateForm, ProfileForm, User},
};

// Perfil próprio (/settings) e administração de contas (/admin/users)
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    pub async fn profile(&self, user_id: i32) -> Result<User, AppError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    /// A conta por trás de uma sessão, se ainda existir e estiver ativa.
    pub async fn active_account(&self, user_id: i32) -> Result<Option<User>, AppError> {
        Ok(self.users.find_by_id(user_id).await?.filter(|u| u.is_active))
    }

    pub async fn update_profile(&self, user_id: i32, form: &ProfileForm) -> Result<(), AppError> {
        form.validate()?;

        if !self.users.update_profile(user_id, form).await? {
            return Err(AppError::UserNotFound);
        }

        tracing::info!("Perfil do usuário {} atualizado", user_id);
        Ok(())
    }

    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.users.list_all().await
    }

    pub async fn update_account(
        &self,
        acting_user_id: i32,
        target_user_id: i32,
        form: &AccountUpdateForm,
    ) -> Result<(), AppError> {
        // Um admin não pode rebaixar nem desativar a si mesmo por aqui
        if acting_user_id == target_user_id {
            return Err(AppError::SelfModification);
        }

        form.validate()?;

        if !self.users.update_account(target_user_id, &form.role, form.active()).await? {
            return Err(AppError::UserNotFound);
        }

        tracing::info!(
            "Usuário {} alterou a conta {}: papel={}, ativo={}",
            acting_user_id, target_user_id, form.role, form.active()
        );
        Ok(())
    }
}
