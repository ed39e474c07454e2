// src/handlers/settings.rs

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
    models::auth::ProfileForm,
};

// GET /settings
pub async fn show(
    State(app_state): State<AppState>,
    CurrentUser(user): CurrentUser,
    mut session: Session,
) -> Result<impl IntoResponse, AppError> {
    // `User` não serializa o hash da senha nem a resposta de segurança
    let profile = app_state.user_service.profile(user.user_id).await?;

    let view = View::render(
        "settings.html",
        &mut session,
        json!({ "user": user, "profile": profile }),
    );
    Ok((session, view))
}

// POST /update_profile
pub async fn update_profile(
    State(app_state): State<AppState>,
    CurrentUser(user): CurrentUser,
    mut session: Session,
    form: Result<Form<ProfileForm>, FormRejection>,
) -> impl IntoResponse {
    let result = match form {
        Ok(Form(form)) => app_state
            .user_service
            .update_profile(user.user_id, &form)
            .await
            .map(|()| form.full_name()),
        Err(rejection) => Err(AppError::from(rejection)),
    };

    match result {
        Ok(full_name) => {
            session.set_full_name(full_name);
            session.flash(FlashLevel::Success, "Profile updated successfully!");
        }
        Err(e) => {
            tracing::error!("Falha ao atualizar perfil {}: {}", user.user_id, e);
            session.flash(
                FlashLevel::Danger,
                format!("Error updating profile: {}", e.public_message()),
            );
        }
    }

    (session, Redirect::to("/settings"))
}
