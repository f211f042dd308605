use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Method, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::main_lib::AppState;

/// Paths served to `GET` and `HEAD` requests without a bearer token.
pub const PUBLIC_PATHS: &[&str] = &["/api/health"];

/// Checks the static bearer token shared with callers of the proxy.
pub struct AuthManager {
    token: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum AuthError {
    Unauthorized,
    NotConfigured,
}

#[derive(Serialize)]
struct AuthErrorBody {
    ok: bool,
    error: &'static str,
}

impl AuthManager {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.is_empty()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.token.is_some()
    }

    /// Verify a raw `Authorization` header value.
    ///
    /// A missing server token is reported before anything about the header,
    /// so a misconfigured deployment answers every gated request the same way.
    pub fn verify_bearer(&self, header: Option<&str>) -> Result<(), AuthError> {
        let expected = self.token.as_deref().ok_or(AuthError::NotConfigured)?;
        let presented = header
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .ok_or(AuthError::Unauthorized)?;
        if presented != expected {
            return Err(AuthError::Unauthorized);
        }
        Ok(())
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AuthError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized"),
            AuthError::NotConfigured => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "PROXY_BEARER_TOKEN is not configured",
            ),
        };
        let body = Json(AuthErrorBody { ok: false, error });
        (status, body).into_response()
    }
}

pub async fn require_bearer(
    State(state): State<Arc<AppState>>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let read_only = matches!(*request.method(), Method::GET | Method::HEAD);
    if read_only && PUBLIC_PATHS.contains(&request.uri().path()) {
        return Ok(next.run(request).await);
    }

    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    if let Err(err) = state.auth.verify_bearer(header) {
        match err {
            AuthError::NotConfigured => tracing::error!("PROXY_BEARER_TOKEN is not configured"),
            AuthError::Unauthorized => {
                tracing::debug!("Rejected request to {}", request.uri().path())
            }
        }
        return Err(err);
    }
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> AuthManager {
        AuthManager::new(Some("s3cret".to_string()))
    }

    #[test]
    fn accepts_matching_token() {
        assert_eq!(manager().verify_bearer(Some("Bearer s3cret")), Ok(()));
        assert_eq!(manager().verify_bearer(Some("Bearer  s3cret ")), Ok(()));
    }

    #[test]
    fn rejects_missing_or_malformed_header() {
        let auth = manager();
        assert_eq!(auth.verify_bearer(None), Err(AuthError::Unauthorized));
        assert_eq!(auth.verify_bearer(Some("s3cret")), Err(AuthError::Unauthorized));
        assert_eq!(auth.verify_bearer(Some("Basic s3cret")), Err(AuthError::Unauthorized));
        assert_eq!(auth.verify_bearer(Some("bearer s3cret")), Err(AuthError::Unauthorized));
        assert_eq!(auth.verify_bearer(Some("Bearer ")), Err(AuthError::Unauthorized));
    }

    #[test]
    fn rejects_wrong_token() {
        assert_eq!(
            manager().verify_bearer(Some("Bearer nope")),
            Err(AuthError::Unauthorized)
        );
    }

    #[test]
    fn unconfigured_token_wins_over_header_checks() {
        let auth = AuthManager::new(None);
        assert!(!auth.is_configured());
        assert_eq!(auth.verify_bearer(None), Err(AuthError::NotConfigured));
        assert_eq!(
            auth.verify_bearer(Some("Bearer anything")),
            Err(AuthError::NotConfigured)
        );

        let empty = AuthManager::new(Some(String::new()));
        assert_eq!(empty.verify_bearer(Some("Bearer ")), Err(AuthError::NotConfigured));
    }
}
