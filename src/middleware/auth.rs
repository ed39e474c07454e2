// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::session::{FlashLevel, Session, SessionUser},
};

const LOGIN_REQUIRED: &str = "Please log in to access this page.";

// Recarrega a conta a cada requisição: papel e status vêm do banco, não do cookie
async fn current_account(
    app_state: &AppState,
    claims: &SessionUser,
) -> Result<Option<SessionUser>, AppError> {
    let account = app_state.user_service.active_account(claims.user_id).await?;

    Ok(account.map(|user| SessionUser {
        user_id: user.id,
        username: user.username.clone(),
        full_name: user.full_name(),
        role: user.role,
    }))
}

// Conta removida ou desativada: a sessão é descartada
fn end_session(mut session: Session, claims: &SessionUser) -> Response {
    tracing::warn!(
        "Sessão de '{}' encerrada: conta inexistente ou desativada",
        claims.username
    );
    session.clear();
    session.flash(FlashLevel::Danger, LOGIN_REQUIRED);
    (session, Redirect::to("/login")).into_response()
}

// Guarda "precisa estar logado": sem identidade na sessão, volta para o login
pub async fn require_authenticated(
    State(app_state): State<AppState>,
    mut session: Session,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(claims) = session.user().cloned() else {
        tracing::warn!("Acesso sem sessão a {}", request.uri().path());
        session.flash(FlashLevel::Danger, LOGIN_REQUIRED);
        return (session, Redirect::to("/login")).into_response();
    };

    match current_account(&app_state, &claims).await {
        Ok(Some(user)) => {
            // Insere o usuário nos "extensions" da requisição
            request.extensions_mut().insert(CurrentUser(user));
            next.run(request).await
        }
        Ok(None) => end_session(session, &claims),
        Err(e) => e.into_response(),
    }
}

// Guarda "precisa ser admin": o papel checado é o que está gravado hoje
pub async fn require_admin(
    State(app_state): State<AppState>,
    mut session: Session,
    mut request: Request,
    next: Next,
) -> Response {
    let account = match session.user().cloned() {
        Some(claims) => match current_account(&app_state, &claims).await {
            Ok(Some(user)) => Some(user),
            Ok(None) => return end_session(session, &claims),
            Err(e) => return e.into_response(),
        },
        None => None,
    };

    match account {
        Some(user) if user.is_admin() => {
            request.extensions_mut().insert(CurrentUser(user));
            next.run(request).await
        }
        other => {
            tracing::warn!(
                "Acesso administrativo negado a {} (usuário: {:?})",
                request.uri().path(),
                other.map(|u| u.username)
            );
            session.flash(FlashLevel::Danger, "Admin access required.");
            (session, Redirect::to("/dashboard")).into_response()
        }
    }
}

// Extrator para obter o usuário autenticado diretamente nos handlers
#[derive(Debug, Clone)]
pub struct CurrentUser(pub SessionUser);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(AppError::Unauthenticated)
    }
}
