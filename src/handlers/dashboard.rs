// src/handlers/dashboard.rs

use axum::{extract::State, response::IntoResponse};
use serde_json::json;

use crate::{
    common::{error::AppError, view::View},
    config::AppState,
    middleware::{auth::CurrentUser, session::Session},
};

// GET /dashboard
pub async fn show(
    State(app_state): State<AppState>,
    CurrentUser(user): CurrentUser,
    mut session: Session,
) -> Result<impl IntoResponse, AppError> {
    let summary = app_state.report_service.dashboard().await?;

    let view = View::render(
        "dashboard.html",
        &mut session,
        json!({ "user": user, "summary": summary }),
    );
    Ok((session, view))
}
