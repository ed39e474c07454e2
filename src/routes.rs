// src/routes.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};

use crate::{
    config::AppState,
    handlers,
    middleware::auth::{require_admin, require_authenticated},
};

pub fn build_router(app_state: AppState) -> Router {
    // Rotas públicas
    let public_routes = Router::new()
        .route("/", get(handlers::auth::index))
        .route(
            "/login",
            get(handlers::auth::login_form).post(handlers::auth::login),
        )
        .route(
            "/register",
            get(handlers::auth::register_form).post(handlers::auth::register),
        )
        .route("/logout", get(handlers::auth::logout))
        .route("/add_expense", post(handlers::funds::add_expense))
        .route("/health", get(|| async { "OK" }));

    // Rotas que exigem sessão
    let session_routes = Router::new()
        .route("/dashboard", get(handlers::dashboard::show))
        .route("/beneficiaries", get(handlers::beneficiaries::list))
        .route("/add_beneficiary", post(handlers::beneficiaries::add))
        .route("/funds", get(handlers::funds::list))
        .route("/add_fund", post(handlers::funds::add_fund))
        .route("/distributions", get(handlers::distributions::list))
        .route("/add_distribution", post(handlers::distributions::add))
        .route("/reports", get(handlers::reports::show))
        .route("/settings", get(handlers::settings::show))
        .route("/update_profile", post(handlers::settings::update_profile))
        .route_layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            require_authenticated,
        ));

    // Administração de contas
    let admin_routes = Router::new()
        .route("/admin/users", get(handlers::admin::list_users))
        .route("/admin/users/{id}", post(handlers::admin::update_account))
        .route_layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            require_admin,
        ));

    Router::new()
        .merge(public_routes)
        .merge(session_routes)
        .merge(admin_routes)
        .with_state(app_state)
}
