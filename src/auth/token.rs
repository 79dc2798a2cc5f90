//! Bearer token payload
//!
//! Tokens are JWTs minted by the council backend. The portal reads the
//! payload for the user id, display name and expiry. Signatures are the
//! server's business and are never checked here.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::portal::lenient;
use crate::portal::RecordId;

/// Errors raised while reading a token
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TokenError {
    #[error("Token is not a JWT (expected three dot-separated parts)")]
    NotAJwt,

    #[error("Token payload is not valid base64: {0}")]
    Encoding(String),

    #[error("Token payload is not valid JSON: {0}")]
    Payload(String),
}

pub type TokenResult<T> = Result<T, TokenError>;

/// Decoded JWT claims
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TokenClaims {
    #[serde(default)]
    pub sub: Option<RecordId>,
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub exp: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub iat: Option<i64>,
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

impl TokenClaims {
    /// Read the payload segment of `token`
    pub fn decode(token: &str) -> TokenResult<Self> {
        let mut parts = token.trim().split('.');
        let payload = match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(_), Some(payload), Some(_), None) if !payload.is_empty() => payload,
            _ => return Err(TokenError::NotAJwt),
        };

        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|e| TokenError::Encoding(e.to_string()))?;

        serde_json::from_slice(&bytes).map_err(|e| TokenError::Payload(e.to_string()))
    }

    /// The `id` claim, falling back to `sub`
    pub fn user_id(&self) -> Option<String> {
        self.id
            .as_ref()
            .or(self.sub.as_ref())
            .map(|id| id.to_string())
    }

    /// Tokens without `exp` never expire
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.exp.is_some_and(|exp| exp <= now.timestamp())
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| Utc.timestamp_opt(exp, 0).single())
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        self.iat.and_then(|iat| Utc.timestamp_opt(iat, 0).single())
    }
}

/// What a stored token is good for
#[derive(Debug, Clone, PartialEq)]
pub enum TokenStatus {
    Missing,
    Malformed(TokenError),
    Expired(TokenClaims),
    Valid(TokenClaims),
}

impl TokenStatus {
    pub fn of(token: Option<&str>, now: DateTime<Utc>) -> Self {
        let token = match token.map(str::trim) {
            Some(t) if !t.is_empty() => t,
            _ => return TokenStatus::Missing,
        };

        match TokenClaims::decode(token) {
            Ok(claims) if claims.is_expired(now) => TokenStatus::Expired(claims),
            Ok(claims) => TokenStatus::Valid(claims),
            Err(e) => TokenStatus::Malformed(e),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, TokenStatus::Valid(_))
    }
}

/// Build an unsigned token around `claims`
#[cfg(test)]
pub(crate) fn test_token(claims: serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{}.{}.signature", header, payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn at(ts: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(ts, 0).unwrap()
    }

    #[test]
    fn test_decode_claims() {
        let token = test_token(json!({
            "sub": 42,
            "name": "Jo Citizen",
            "iat": 1_700_000_000,
            "exp": 1_700_003_600,
            "role": "resident"
        }));

        let claims = TokenClaims::decode(&token).unwrap();
        assert_eq!(claims.sub, Some(RecordId::Number(42)));
        assert_eq!(claims.name.as_deref(), Some("Jo Citizen"));
        assert_eq!(claims.user_id().as_deref(), Some("42"));
        assert_eq!(claims.other.get("role"), Some(&json!("resident")));
        assert_eq!(claims.issued_at(), Some(at(1_700_000_000)));
    }

    #[test]
    fn test_id_claim_wins_over_sub() {
        let token = test_token(json!({"sub": "abc", "id": "user-7"}));
        let claims = TokenClaims::decode(&token).unwrap();
        assert_eq!(claims.user_id().as_deref(), Some("user-7"));
    }

    #[test]
    fn test_padded_payload_is_accepted() {
        let payload = base64::engine::general_purpose::URL_SAFE.encode(br#"{"sub":12}"#);
        assert!(payload.ends_with('='));
        let claims = TokenClaims::decode(&format!("h.{}.s", payload)).unwrap();
        assert_eq!(claims.user_id().as_deref(), Some("12"));
    }

    #[test]
    fn test_malformed_tokens() {
        assert_eq!(TokenClaims::decode("nodots"), Err(TokenError::NotAJwt));
        assert_eq!(TokenClaims::decode("a..c"), Err(TokenError::NotAJwt));
        assert_eq!(TokenClaims::decode("a.b.c.d"), Err(TokenError::NotAJwt));
        assert!(matches!(
            TokenClaims::decode("a.!!!.c"),
            Err(TokenError::Encoding(_))
        ));
        let not_json = URL_SAFE_NO_PAD.encode("hello");
        assert!(matches!(
            TokenClaims::decode(&format!("a.{}.c", not_json)),
            Err(TokenError::Payload(_))
        ));
    }

    #[test]
    fn test_expiry() {
        let token = test_token(json!({"sub": 1, "exp": 1000}));
        let claims = TokenClaims::decode(&token).unwrap();
        assert!(!claims.is_expired(at(999)));
        assert!(claims.is_expired(at(1000)));

        let forever = TokenClaims::default();
        assert!(!forever.is_expired(at(i64::from(i32::MAX))));
    }

    #[test]
    fn test_status() {
        let now = at(2000);
        assert_eq!(TokenStatus::of(None, now), TokenStatus::Missing);
        assert_eq!(TokenStatus::of(Some("  "), now), TokenStatus::Missing);
        let malformed = TokenStatus::of(Some("garbage"), now);
        assert_eq!(malformed.clone(), TokenStatus::Malformed(TokenError::NotAJwt));

        let expired = test_token(json!({"exp": 1000}));
        assert!(matches!(
            TokenStatus::of(Some(&expired), now),
            TokenStatus::Expired(_)
        ));

        let valid = test_token(json!({"exp": 3000}));
        assert!(TokenStatus::of(Some(&valid), now).is_valid());
    }
}
