// src/handlers/admin.rs

use axum::{
    extract::{rejection::FormRejection, Path, State},
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
    models::auth::AccountUpdateForm,
};

// GET /admin/users
pub async fn list_users(
    State(app_state): State<AppState>,
    CurrentUser(user): CurrentUser,
    mut session: Session,
) -> Result<impl IntoResponse, AppError> {
    let users = app_state.user_service.list_users().await?;

    let view = View::render(
        "admin_users.html",
        &mut session,
        json!({ "user": user, "users": users }),
    );
    Ok((session, view))
}

// POST /admin/users/{id}
pub async fn update_account(
    State(app_state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(target_id): Path<i32>,
    mut session: Session,
    form: Result<Form<AccountUpdateForm>, FormRejection>,
) -> impl IntoResponse {
    let result = match form {
        Ok(Form(form)) => {
            app_state
                .user_service
                .update_account(user.user_id, target_id, &form)
                .await
        }
        Err(rejection) => Err(AppError::from(rejection)),
    };

    match result {
        Ok(()) => session.flash(FlashLevel::Success, "User account updated successfully!"),
        Err(e) => {
            tracing::warn!("Falha ao atualizar a conta {}: {}", target_id, e);
            session.flash(
                FlashLevel::Danger,
                format!("Error updating user account: {}", e.public_message()),
            );
        }
    }

    (session, Redirect::to("/admin/users"))
}
