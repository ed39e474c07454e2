// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

pub const ADMIN_ROLE: &str = "admin";

// Representa um usuário vindo do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub username: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    pub password_hash: String,

    pub security_question: String,
    #[serde(skip_serializing)]
    pub security_answer: String,

    pub role: String,
    pub organization: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

// Formulário de login
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

// Formulário de cadastro (os nomes dos campos seguem o HTML: firstName, confirmPassword...)
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    #[validate(length(min = 1, max = 100, message = "First name is required."))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "Last name is required."))]
    pub last_name: String,
    #[validate(email(message = "Email address is invalid."))]
    pub email: String,
    #[validate(length(max = 50, message = "Phone number is too long."))]
    pub phone: String,
    #[validate(length(min = 1, max = 100, message = "Username is required."))]
    pub username: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters."))]
    pub password: String,
    pub confirm_password: String,
    pub security_question: String,
    pub security_answer: String,
    #[validate(length(min = 1, max = 50, message = "A role must be selected."))]
    pub user_role: String,
    #[serde(default)]
    pub organization: String,
}

// Dados prontos para o INSERT (senha e resposta já com hash)
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub username: String,
    pub password_hash: String,
    pub security_question: String,
    pub security_answer_hash: String,
    pub role: String,
    pub organization: String,
}

// Formulário de /update_profile: só nome, e-mail e telefone são editáveis
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProfileForm {
    #[validate(length(min = 1, max = 100, message = "First name is required."))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "Last name is required."))]
    pub last_name: String,
    #[validate(email(message = "Email address is invalid."))]
    pub email: String,
    #[validate(length(max = 50, message = "Phone number is too long."))]
    pub phone: String,
}

impl ProfileForm {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

// Formulário da administração de contas
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AccountUpdateForm {
    #[validate(length(min = 1, max = 50, message = "A role must be selected."))]
    pub role: String,
    // Checkbox HTML: ausente = desmarcado
    #[serde(default)]
    pub is_active: Option<String>,
}

impl AccountUpdateForm {
    pub fn active(&self) -> bool {
        matches!(self.is_active.as_deref(), Some("on" | "true" | "1"))
    }
}
