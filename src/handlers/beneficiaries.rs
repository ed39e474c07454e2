// src/handlers/beneficiaries.rs

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
    models::beneficiary::BeneficiaryForm,
};

// GET /beneficiaries
pub async fn list(
    State(app_state): State<AppState>,
    CurrentUser(user): CurrentUser,
    mut session: Session,
) -> Result<impl IntoResponse, AppError> {
    let beneficiaries = app_state.beneficiary_service.list().await?;

    let view = View::render(
        "beneficiaries.html",
        &mut session,
        json!({ "user": user, "beneficiaries": beneficiaries }),
    );
    Ok((session, view))
}

// POST /add_beneficiary
pub async fn add(
    State(app_state): State<AppState>,
    CurrentUser(user): CurrentUser,
    mut session: Session,
    form: Result<Form<BeneficiaryForm>, FormRejection>,
) -> impl IntoResponse {
    let result = match form {
        Ok(Form(form)) => app_state.beneficiary_service.register(user.user_id, &form).await,
        Err(rejection) => Err(AppError::from(rejection)),
    };

    match result {
        Ok(_) => session.flash(FlashLevel::Success, "Beneficiary added successfully!"),
        Err(e) => {
            tracing::error!("Falha ao cadastrar beneficiário: {}", e);
            session.flash(
                FlashLevel::Danger,
                format!("Error adding beneficiary: {}", e.public_message()),
            );
        }
    }

    (session, Redirect::to("/beneficiaries"))
}
