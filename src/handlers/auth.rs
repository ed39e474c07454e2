// src/handlers/auth.rs

use axum::{
    extract::{rejection::FormRejection, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde_json::json;

use crate::{
    common::{error::AppError, view::View},
    config::AppState,
    middleware::session::{FlashLevel, Session},
    models::auth::{LoginForm, RegisterForm},
};

// GET /
pub async fn index(session: Session) -> Redirect {
    if session.user().is_some() {
        Redirect::to("/dashboard")
    } else {
        Redirect::to("/login")
    }
}

// GET /login
pub async fn login_form(mut session: Session) -> impl IntoResponse {
    let view = View::render("login.html", &mut session, json!({}));
    (session, view)
}

// POST /login
pub async fn login(
    State(app_state): State<AppState>,
    mut session: Session,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Result<Response, AppError> {
    let result = match &form {
        Ok(Form(form)) => app_state.auth_service.login(&form.username, &form.password).await,
        Err(_) => Err(AppError::InvalidCredentials),
    };

    match result {
        Ok(user) => {
            tracing::info!("Login de '{}'", user.username);
            session.login(user);
            session.flash(FlashLevel::Success, "Login successful!");
            Ok((session, Redirect::to("/dashboard")).into_response())
        }
        Err(AppError::InvalidCredentials) => {
            let username = form.as_ref().map(|Form(f)| f.username.as_str()).unwrap_or_default();
            tracing::warn!("Tentativa de login inválida para '{}'", username);
            session.flash(FlashLevel::Danger, AppError::InvalidCredentials.to_string());
            Ok((session, Redirect::to("/login")).into_response())
        }
        Err(e) => Err(e),
    }
}

// GET /register
pub async fn register_form(mut session: Session) -> impl IntoResponse {
    let view = View::render("register.html", &mut session, json!({}));
    (session, view)
}

// POST /register
pub async fn register(
    State(app_state): State<AppState>,
    mut session: Session,
    form: Result<Form<RegisterForm>, FormRejection>,
) -> Response {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            let e = AppError::from(rejection);
            session.flash(FlashLevel::Danger, e.public_message());
            let view = View::render("register.html", &mut session, json!({}));
            return (session, view).into_response();
        }
    };

    match app_state.auth_service.register(&form).await {
        Ok(_) => {
            session.flash(FlashLevel::Success, "Registration successful! Please log in.");
            return (session, Redirect::to("/login")).into_response();
        }
        Err(
            e @ (AppError::PasswordMismatch
            | AppError::UserAlreadyExists
            | AppError::AdminRoleNotAllowed
            | AppError::ValidationError(_)),
        ) => {
            session.flash(FlashLevel::Danger, e.public_message());
        }
        Err(e) => {
            tracing::error!("Falha ao cadastrar '{}': {}", form.username, e);
            session.flash(FlashLevel::Danger, "Registration failed. Please try again.");
        }
    }

    // O formulário volta preenchido, sem os segredos
    let context = json!({
        "form": {
            "firstName": form.first_name,
            "lastName": form.last_name,
            "email": form.email,
            "phone": form.phone,
            "username": form.username,
            "userRole": form.user_role,
            "organization": form.organization,
        }
    });
    let view = View::render("register.html", &mut session, context);
    (session, view).into_response()
}

// GET /logout
pub async fn logout(mut session: Session) -> impl IntoResponse {
    if let Some(user) = session.user() {
        tracing::info!("Logout de '{}'", user.username);
    }
    session.clear();
    session.flash(FlashLevel::Info, "You have been logged out.");
    (session, Redirect::to("/login"))
}
