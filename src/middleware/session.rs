// src/middleware/session.rs

use std::convert::Infallible;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
    response::{IntoResponseParts, ResponseParts},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{common::error::AppError, models::auth::ADMIN_ROLE};

pub const SESSION_COOKIE: &str = "session";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Info,
    Warning,
    Danger,
}

// Mensagem de uso único, exibida pela próxima view renderizada
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub category: FlashLevel,
    pub message: String,
}

// As "claims" de identidade gravadas no login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub user_id: i32,
    pub username: String,
    pub full_name: String,
    pub role: String,
}

impl SessionUser {
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    #[serde(default)]
    pub user: Option<SessionUser>,
    #[serde(default)]
    pub flashes: Vec<Flash>,
}

impl SessionData {
    fn is_empty(&self) -> bool {
        self.user.is_none() && self.flashes.is_empty()
    }
}

// Estrutura de dados dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    #[serde(flatten)]
    data: SessionData,
    iat: i64,
    exp: i64,
}

/// Chaves HS256 que assinam o cookie de sessão.
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl SessionKeys {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    pub fn encode(&self, data: &SessionData) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = SessionClaims {
            data: data.clone(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        Ok(encode(&Header::default(), &claims, &self.encoding)?)
    }

    // Token inválido, adulterado ou expirado vale como sessão vazia
    pub fn decode(&self, token: &str) -> Option<SessionData> {
        match decode::<SessionClaims>(token, &self.decoding, &Validation::default()) {
            Ok(token_data) => Some(token_data.claims.data),
            Err(e) => {
                tracing::debug!("Cookie de sessão descartado: {}", e);
                None
            }
        }
    }
}

/// Sessão da requisição atual. Alterações voltam ao cliente quando a
/// `Session` faz parte da resposta.
pub struct Session {
    data: SessionData,
    keys: SessionKeys,
    changed: bool,
}

impl Session {
    pub fn user(&self) -> Option<&SessionUser> {
        self.data.user.as_ref()
    }

    pub fn login(&mut self, user: SessionUser) {
        self.data.user = Some(user);
        self.changed = true;
    }

    pub fn set_full_name(&mut self, full_name: String) {
        if let Some(user) = self.data.user.as_mut() {
            user.full_name = full_name;
            self.changed = true;
        }
    }

    pub fn clear(&mut self) {
        self.data = SessionData::default();
        self.changed = true;
    }

    pub fn flash(&mut self, category: FlashLevel, message: impl Into<String>) {
        self.data.flashes.push(Flash {
            category,
            message: message.into(),
        });
        self.changed = true;
    }

    pub fn take_flashes(&mut self) -> Vec<Flash> {
        if !self.data.flashes.is_empty() {
            self.changed = true;
        }
        std::mem::take(&mut self.data.flashes)
    }
}

impl<S> FromRequestParts<S> for Session
where
    SessionKeys: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = SessionKeys::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);

        let data = jar
            .get(SESSION_COOKIE)
            .and_then(|cookie| keys.decode(cookie.value()))
            .unwrap_or_default();

        Ok(Session {
            data,
            keys,
            changed: false,
        })
    }
}

impl IntoResponseParts for Session {
    type Error = AppError;

    fn into_response_parts(self, res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        if !self.changed {
            return Ok(res);
        }

        let jar = if self.data.is_empty() {
            CookieJar::new().remove(Cookie::build(SESSION_COOKIE).path("/"))
        } else {
            let token = self.keys.encode(&self.data)?;
            CookieJar::new().add(
                Cookie::build((SESSION_COOKIE, token))
                    .path("/")
                    .http_only(true)
                    .same_site(SameSite::Lax),
            )
        };

        match jar.into_response_parts(res) {
            Ok(res) => Ok(res),
            Err(never) => match never {},
        }
    }
}
