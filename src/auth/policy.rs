use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use std::sync::Arc;

use super::error::AuthError;
use super::service::AuthService;
use crate::shared::state::AppState;

/// Authenticated request identity, resolved from the `Authorization` header.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i32,
    pub email: String,
}

/// Identity for endpoints that also accept anonymous guest sessions.
#[derive(Debug, Clone)]
pub enum Caller {
    User(AuthUser),
    Guest(String),
}

/// Extracts the key from an `Authorization: Token <key>` header value.
pub(crate) fn token_from_header(header: Option<&str>) -> Option<&str> {
    let value = header?.trim();
    let key = value.strip_prefix("Token ")?.trim();
    if key.is_empty() {
        None
    } else {
        Some(key)
    }
}

/// Extracts a non-empty `guest_id` from a raw query string.
pub(crate) fn guest_id_from_query(query: Option<&str>) -> Option<String> {
    for pair in query?.split('&') {
        if let Some((name, value)) = pair.split_once('=') {
            if name == "guest_id" && !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }
    None
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok());
        let key = token_from_header(header).ok_or(AuthError::Unauthorized)?;

        let service = AuthService::new(state.conn.clone());
        let user = service.user_for_token(key)?;
        Ok(AuthUser {
            id: user.id,
            email: user.email,
        })
    }
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for Caller {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        // A present Authorization header is never downgraded to a guest
        // session: a bad or unknown token is rejected even when the
        // request also carries a guest_id.
        if parts.headers.contains_key(axum::http::header::AUTHORIZATION) {
            return AuthUser::from_request_parts(parts, state)
                .await
                .map(Caller::User);
        }
        guest_id_from_query(parts.uri.query())
            .map(Caller::Guest)
            .ok_or(AuthError::Unauthorized)
    }
}
