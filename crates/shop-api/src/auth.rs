//! # Token Issuer/Verifier
//!
//! JWT issue and verify for token-gated routes. A token is issued on user
//! upsert and carries the account email with a fixed 1-day expiry. Gated
//! handlers take [`Claims`] as an extractor argument: a missing
//! `Authorization` header rejects with 401 before the handler runs, a bad
//! or expired token with 403.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{header, StatusCode};
use axum::Json;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use shop_core::{ShopError, ShopResult};

use crate::handlers::{error_response, ErrorResponse};
use crate::state::AppState;

/// Decoded token claims, exposed to gated handlers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Account email the token was issued for
    pub email: String,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

/// Issues and verifies signed tokens (HS256)
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    /// Create an issuer with the fixed 1-day token lifetime
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::days(1),
        }
    }

    /// Load the signing secret from `ACCESS_TOKEN_SECRET`
    pub fn from_env() -> ShopResult<Self> {
        dotenvy::dotenv().ok();
        let secret = std::env::var("ACCESS_TOKEN_SECRET")
            .map_err(|_| ShopError::Configuration("ACCESS_TOKEN_SECRET not set".to_string()))?;
        Ok(Self::new(&secret))
    }

    /// Builder: override the token lifetime (for testing expiry)
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Issue a signed token embedding the email
    pub fn issue(&self, email: &str) -> ShopResult<String> {
        let now = Utc::now();
        let claims = Claims {
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| ShopError::Internal(e.to_string()))
    }

    /// Verify signature and expiry, returning the decoded claims
    pub fn verify(&self, token: &str) -> ShopResult<Claims> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| ShopError::AuthInvalid)
    }
}

impl FromRequestParts<AppState> for Claims {
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or_else(|| error_response(ShopError::AuthMissing))?;

        let token = header
            .to_str()
            .ok()
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| error_response(ShopError::AuthInvalid))?;

        state.tokens.verify(token).map_err(error_response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_verify_roundtrip() {
        let issuer = TokenIssuer::new("test-secret");
        let token = issuer.issue("pat@example.com").unwrap();

        let claims = issuer.verify(&token).unwrap();
        assert_eq!(claims.email, "pat@example.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let issuer = TokenIssuer::new("test-secret");
        let token = issuer.issue("pat@example.com").unwrap();
        let tampered = format!("{}x", token);

        let err = issuer.verify(&tampered).unwrap_err();
        assert!(matches!(err, ShopError::AuthInvalid));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = TokenIssuer::new("secret-a").issue("pat@example.com").unwrap();
        let err = TokenIssuer::new("secret-b").verify(&token).unwrap_err();
        assert!(matches!(err, ShopError::AuthInvalid));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // Expiry far enough in the past to clear the default leeway.
        let issuer = TokenIssuer::new("test-secret").with_ttl(Duration::seconds(-7200));
        let token = issuer.issue("pat@example.com").unwrap();

        let err = issuer.verify(&token).unwrap_err();
        assert!(matches!(err, ShopError::AuthInvalid));
    }

    #[test]
    fn test_token_lifetime_is_one_day() {
        let issuer = TokenIssuer::new("test-secret");
        let token = issuer.issue("pat@example.com").unwrap();
        let claims = issuer.verify(&token).unwrap();
        assert_eq!(claims.exp - claims.iat, 86_400);
    }
}
