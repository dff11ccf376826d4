use std::{collections::HashSet, sync::Arc};

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, Request},
    middleware::Next,
    response::Response,
};

use crate::error::AppError;

/// Bearer-token gate in front of protected module routes.
///
/// Token issuance is someone else's job; the gate only checks presented tokens
/// against the configured set. With no tokens configured every request is refused.
#[derive(Clone, Debug, Default)]
pub struct AuthGate {
    tokens: Arc<HashSet<String>>,
}

impl AuthGate {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: Arc::new(tokens.into_iter().map(Into::into).collect()),
        }
    }

    pub fn has_tokens(&self) -> bool {
        !self.tokens.is_empty()
    }

    pub fn authorize(&self, headers: &HeaderMap) -> Result<(), AppError> {
        let token = headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AppError::Unauthorized("Access denied. No token provided.".into()))?;

        if self.tokens.contains(token) {
            Ok(())
        } else {
            Err(AppError::Unauthorized("Invalid token.".into()))
        }
    }
}

pub async fn require_auth<B>(
    State(gate): State<AuthGate>,
    request: Request<B>,
    next: Next<B>,
) -> Result<Response, AppError> {
    gate.authorize(request.headers())?;
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );
        headers
    }

    #[test]
    fn accepts_configured_token() {
        let gate = AuthGate::new(["secret"]);
        assert!(gate.authorize(&bearer("secret")).is_ok());
    }

    #[test]
    fn rejects_missing_and_unknown_tokens() {
        let gate = AuthGate::new(["secret"]);
        assert!(matches!(
            gate.authorize(&HeaderMap::new()),
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(
            gate.authorize(&bearer("guess")),
            Err(AppError::Unauthorized(msg)) if msg == "Invalid token."
        ));
    }

    #[test]
    fn empty_gate_refuses_everything() {
        let gate = AuthGate::default();
        assert!(!gate.has_tokens());
        assert!(gate.authorize(&bearer("anything")).is_err());
    }
}
