// src/handlers/distributions.rs

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
    models::distribution::DistributionForm,
};

// GET /distributions
pub async fn list(
    State(app_state): State<AppState>,
    CurrentUser(user): CurrentUser,
    mut session: Session,
) -> Result<impl IntoResponse, AppError> {
    let overview = app_state.distribution_service.overview().await?;

    let view = View::render(
        "distributions.html",
        &mut session,
        json!({ "user": user, "overview": overview }),
    );
    Ok((session, view))
}

// POST /add_distribution
pub async fn add(
    State(app_state): State<AppState>,
    CurrentUser(user): CurrentUser,
    mut session: Session,
    form: Result<Form<DistributionForm>, FormRejection>,
) -> impl IntoResponse {
    let result = match form {
        Ok(Form(form)) => app_state.distribution_service.record(user.user_id, &form).await,
        Err(rejection) => Err(AppError::from(rejection)),
    };

    match result {
        Ok(recorded) => {
            if !recorded.item_recorded {
                tracing::warn!(
                    "Distribuição {} sem item: nenhum alimento com a unidade informada",
                    recorded.distribution_id
                );
            }
            session.flash(FlashLevel::Success, "Distribution recorded successfully!");
        }
        Err(e) => {
            tracing::error!("Falha ao registrar distribuição: {}", e);
            session.flash(
                FlashLevel::Danger,
                format!("Error recording distribution: {}", e.public_message()),
            );
        }
    }

    (session, Redirect::to("/distributions"))
}
