// src/handlers/funds.rs

use axum::{
    extract::{rejection::FormRejection, State},
    response::{IntoResponse, Redirect},
    Form,
};
use serde_json::json;

use crate::{
    common::{error::AppError, view::View},
    config::AppState,
    middleware::{
        auth::CurrentUser,
        session::{FlashLevel, Session},
    },
    models::finance::{ExpenseForm, FundForm},
};

// GET /funds
pub async fn list(
    State(app_state): State<AppState>,
    CurrentUser(user): CurrentUser,
    mut session: Session,
) -> Result<impl IntoResponse, AppError> {
    let overview = app_state.finance_service.overview().await?;

    let view = View::render(
        "funds.html",
        &mut session,
        json!({ "user": user, "overview": overview }),
    );
    Ok((session, view))
}

// POST /add_fund
pub async fn add_fund(
    State(app_state): State<AppState>,
    CurrentUser(user): CurrentUser,
    mut session: Session,
    form: Result<Form<FundForm>, FormRejection>,
) -> impl IntoResponse {
    let result = match form {
        Ok(Form(form)) => app_state.finance_service.record_fund(user.user_id, &form).await,
        Err(rejection) => Err(AppError::from(rejection)),
    };

    match result {
        Ok(_) => session.flash(FlashLevel::Success, "Fund entry added successfully!"),
        Err(e) => {
            tracing::error!("Falha ao registrar fundo: {}", e);
            session.flash(
                FlashLevel::Danger,
                format!("Error adding fund entry: {}", e.public_message()),
            );
        }
    }

    (session, Redirect::to("/funds"))
}

// POST /add_expense (público, nada é gravado)
pub async fn add_expense(
    State(app_state): State<AppState>,
    mut session: Session,
    form: Result<Form<ExpenseForm>, FormRejection>,
) -> impl IntoResponse {
    // O stub sempre responde com sucesso, mesmo com formulário incompleto
    match form {
        Ok(Form(form)) => app_state.finance_service.submit_expense(&form),
        Err(rejection) => tracing::warn!("Despesa com formulário inválido: {}", rejection),
    }
    session.flash(FlashLevel::Success, "Expense added successfully!");

    (session, Redirect::to("/funds"))
}
