// src/handlers/reports.rs

use axum::{extract::State, response::IntoResponse};
use serde_json::json;

use crate::{
    common::{error::AppError, view::View},
    config::AppState,
    middleware::{auth::CurrentUser, session::Session},
};

// GET /reports
pub async fn show(
    State(app_state): State<AppState>,
    CurrentUser(user): CurrentUser,
    mut session: Session,
) -> Result<impl IntoResponse, AppError> {
    let reports = app_state.report_service.reports().await?;

    let view = View::render(
        "reports.html",
        &mut session,
        json!({ "user": user, "reports": reports }),
    );
    Ok((session, view))
}
