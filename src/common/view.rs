// src/common/view.rs

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::middleware::session::{Flash, Session};

// View-model entregue ao renderizador externo de templates.
#[derive(Debug, Serialize)]
pub struct View<T: Serialize> {
    pub template: &'static str,
    pub flashes: Vec<Flash>,
    pub context: T,
}

impl<T: Serialize> View<T> {
    // Renderizar consome as mensagens flash pendentes da sessão
    pub fn render(template: &'static str, session: &mut Session, context: T) -> Self {
        Self {
            template,
            flashes: session.take_flashes(),
            context,
        }
    }
}

impl<T: Serialize> IntoResponse for View<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
