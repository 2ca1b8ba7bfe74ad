use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::warn;

use crate::config::{ConfigError, SecurityConfig};
use crate::error::ApiError;

const BEARER_PREFIX: &str = "Bearer ";

/// Why a request was turned away by the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthRejection {
    #[error("Unauthorized. Token is missing.")]
    Missing,

    #[error("Unauthorized. Invalid token.")]
    Invalid,
}

/// Shared-secret gate state. Immutable once built and cheap to clone.
#[derive(Debug, Clone)]
pub struct AuthGate {
    secret: Arc<str>,
    exempt_prefixes: Arc<[String]>,
}

impl AuthGate {
    pub fn new(
        secret: impl Into<String>,
        exempt_prefixes: impl IntoIterator<Item = String>,
    ) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            return Err(ConfigError::MissingApiToken);
        }
        Ok(Self {
            secret: secret.into(),
            exempt_prefixes: exempt_prefixes.into_iter().collect(),
        })
    }

    pub fn from_config(security: &SecurityConfig) -> Result<Self, ConfigError> {
        Self::new(
            security.api_token.clone(),
            security.auth_exempt_prefixes.iter().cloned(),
        )
    }

    /// Case-sensitive prefix match against the allow-list.
    pub fn is_exempt(&self, path: &str) -> bool {
        self.exempt_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
    }

    /// Decide whether a request with this path and `Authorization` value may
    /// proceed. Performs no I/O.
    pub fn check(&self, path: &str, authorization: Option<&str>) -> Result<(), AuthRejection> {
        if self.is_exempt(path) {
            return Ok(());
        }

        let raw = authorization.ok_or(AuthRejection::Missing)?;
        if extract_token(raw) == &*self.secret {
            Ok(())
        } else {
            Err(AuthRejection::Invalid)
        }
    }
}

/// Strip an optional `Bearer ` prefix (case-insensitive) and trim.
fn extract_token(raw: &str) -> &str {
    let token = match raw.get(..BEARER_PREFIX.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(BEARER_PREFIX) => &raw[BEARER_PREFIX.len()..],
        _ => raw,
    };
    token.trim()
}

/// Header value as text. A value that is not visible ASCII can never equal
/// the secret, so it is reported as invalid rather than missing.
fn authorization_header(headers: &HeaderMap) -> Result<Option<&str>, AuthRejection> {
    match headers.get(header::AUTHORIZATION) {
        None => Ok(None),
        Some(value) => value.to_str().map(Some).map_err(|_| AuthRejection::Invalid),
    }
}

/// Middleware applied in front of every route. Requests are forwarded
/// unchanged when admitted.
pub async fn auth_gate_middleware(
    State(gate): State<AuthGate>,
    request: Request,
    next: Next,
) -> Response {
    if gate.is_exempt(request.uri().path()) {
        return next.run(request).await;
    }

    let verdict = authorization_header(request.headers())
        .and_then(|authorization| gate.check(request.uri().path(), authorization));

    match verdict {
        Ok(()) => next.run(request).await,
        Err(rejection) => {
            warn!(path = %request.uri().path(), reason = ?rejection, "Rejected unauthenticated request");
            ApiError::from(rejection).into_response()
        }
    }
}
