// src/db/user_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::stores::UserStore,
    models::auth::{NewUser, ProfileForm, User, ADMIN_ROLE},
};

// Chave do advisory lock que serializa cadastros com papel admin
const ADMIN_BOOTSTRAP_LOCK: i64 = 0x6169_645f_6164_6d6e;

// O repositório de usuários, responsável por todas as interações com a tabela 'users'
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    // Usuários desativados (is_active = FALSE) não conseguem logar
    async fn find_active_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE username = $1 AND is_active = TRUE",
        )
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe_user)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe_user)
    }

    async fn exists_by_username_or_email(&self, username: &str, email: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username = $1 OR email = $2)",
        )
            .bind(username)
            .bind(email)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    // A checagem prévia de duplicidade não é atômica; a UNIQUE do banco fecha a corrida.
    // Para o papel admin, contagem e INSERT acontecem sob o mesmo lock.
    async fn create(&self, new_user: &NewUser) -> Result<User, AppError> {
        let mut tx = self.pool.begin().await?;

        if new_user.role == ADMIN_ROLE {
            sqlx::query("SELECT pg_advisory_xact_lock($1)")
                .bind(ADMIN_BOOTSTRAP_LOCK)
                .execute(&mut *tx)
                .await?;

            let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
                .fetch_one(&mut *tx)
                .await?;
            if existing > 0 {
                return Err(AppError::AdminRoleNotAllowed);
            }
        }

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (
                first_name, last_name, email, phone, username, password_hash,
                security_question, security_answer, role, organization
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
            .bind(&new_user.first_name)
            .bind(&new_user.last_name)
            .bind(&new_user.email)
            .bind(&new_user.phone)
            .bind(&new_user.username)
            .bind(&new_user.password_hash)
            .bind(&new_user.security_question)
            .bind(&new_user.security_answer_hash)
            .bind(&new_user.role)
            .bind(&new_user.organization)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_unique_violation() {
                        return AppError::UserAlreadyExists;
                    }
                }
                e.into()
            })?;

        tx.commit().await?;

        Ok(user)
    }

    async fn update_profile(&self, id: i32, profile: &ProfileForm) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET first_name = $1, last_name = $2, email = $3, phone = $4
            WHERE id = $5
            "#,
        )
            .bind(&profile.first_name)
            .bind(&profile.last_name)
            .bind(&profile.email)
            .bind(&profile.phone)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_all(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    async fn update_account(&self, id: i32, role: &str, is_active: bool) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE users SET role = $1, is_active = $2 WHERE id = $3")
            .bind(role)
            .bind(is_active)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
