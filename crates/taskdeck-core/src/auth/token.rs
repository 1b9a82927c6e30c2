//! Bearer credential and claims decoding.
//!
//! A credential is a JWT-shaped string: `header.claims.signature`. Only the
//! claims segment is inspected, and only to read the expiry. The signature is
//! never verified here; the API does that.

use std::fmt;

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer};
use thiserror::Error;

/// base64url with optional padding. Issuers disagree on whether to pad.
const CLAIMS_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token has no claims segment")]
    MissingClaims,

    #[error("Claims segment is not valid base64url: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("Claims segment is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Claims read from the token. `exp` is mandatory; a token without it is
/// treated as undecodable. `iat` and `sub` are informational and never fail
/// decoding: an unexpected shape reads as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Claims {
    #[serde(deserialize_with = "numeric_timestamp")]
    pub exp: i64,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub iat: Option<i64>,
    #[serde(default, deserialize_with = "lenient_subject")]
    pub sub: Option<String>,
}

impl Claims {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// Valid only while the expiry is strictly in the future.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.exp <= now.timestamp()
    }
}

/// An opaque bearer token.
///
/// The value never appears in `Debug` output or logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token, for the `Authorization` header and the persistence slot.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn claims(&self) -> Result<Claims, TokenError> {
        decode_claims(&self.0)
    }

    /// Any decoding failure counts as expired.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.claims() {
            Ok(claims) => claims.is_expired_at(now),
            Err(e) => {
                tracing::debug!(error = %e, "Credential claims could not be decoded");
                true
            }
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.claims().ok().and_then(|c| c.expires_at())
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&"[REDACTED]").finish()
    }
}

/// Decode the claims (second) segment of a token.
pub fn decode_claims(token: &str) -> Result<Claims, TokenError> {
    let segment = token
        .split('.')
        .nth(1)
        .filter(|s| !s.is_empty())
        .ok_or(TokenError::MissingClaims)?;

    let bytes = CLAIMS_ENGINE.decode(segment)?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn number_to_timestamp(n: &serde_json::Number) -> Option<i64> {
    n.as_i64().or_else(|| {
        n.as_f64()
            .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
            .map(|f| f.floor() as i64)
    })
}

fn numeric_timestamp<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let n = serde_json::Number::deserialize(deserializer)?;
    number_to_timestamp(&n).ok_or_else(|| de::Error::custom("timestamp out of range"))
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(n) => number_to_timestamp(&n),
        _ => None,
    })
}

fn lenient_subject<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}


#[cfg(test)]
mod tests {
    use super::test_tokens::*;
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_decode_claims() {
        let token = with_claims(&serde_json::json!({ "sub": "ana", "iat": 100, "exp": 200 }));
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.exp, 200);
        assert_eq!(claims.iat, Some(100));
        assert_eq!(claims.sub.as_deref(), Some("ana"));
    }

    #[test]
    fn test_future_token_not_expired() {
        assert!(!Credential::new(valid()).is_expired());
        assert!(Credential::new(expired()).is_expired());
    }

    #[test]
    fn test_expiry_boundary_is_expired() {
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let at_now = Credential::new(with_claims(&serde_json::json!({ "exp": 1_700_000_000 })));
        let after = Credential::new(with_claims(&serde_json::json!({ "exp": 1_700_000_001 })));
        assert!(at_now.is_expired_at(now));
        assert!(!after.is_expired_at(now));
        assert!(after.is_expired_at(now + Duration::seconds(1)));
    }

    #[test]
    fn test_malformed_tokens_are_expired() {
        let cases = [
            String::new(),
            "no-dots-at-all".to_string(),
            "header..signature".to_string(),
            "header.***.signature".to_string(),
            format!("h.{}.s", CLAIMS_ENGINE.encode(b"not json")),
            with_claims(&serde_json::json!({ "sub": "ana" })),
            with_claims(&serde_json::json!({ "exp": "tomorrow" })),
        ];
        for token in cases {
            assert!(Credential::new(token.clone()).is_expired(), "{token:?}");
        }
    }

    #[test]
    fn test_unusual_optional_claims_do_not_expire_token() {
        let exp = (Utc::now() + Duration::hours(1)).timestamp();
        let numeric_sub = with_claims(&serde_json::json!({ "sub": 42, "exp": exp }));
        let string_iat = with_claims(&serde_json::json!({ "sub": "ana", "iat": "yesterday", "exp": exp }));
        let object_sub = with_claims(&serde_json::json!({ "sub": {"id": 1}, "iat": null, "exp": exp }));

        assert!(!Credential::new(numeric_sub.clone()).is_expired());
        assert!(!Credential::new(string_iat.clone()).is_expired());
        assert!(!Credential::new(object_sub).is_expired());

        let claims = decode_claims(&numeric_sub).unwrap();
        assert_eq!(claims.sub.as_deref(), Some("42"));
        assert_eq!(decode_claims(&string_iat).unwrap().iat, None);
    }

    #[test]
    fn test_padded_and_fractional_claims() {
        let padded = base64::engine::general_purpose::URL_SAFE.encode(br#"{"exp":4102444800.5}"#);
        let claims = decode_claims(&format!("h.{}.s", padded)).unwrap();
        assert_eq!(claims.exp, 4_102_444_800);
    }

    #[test]
    fn test_credential_hides_value_in_debug() {
        let credential = Credential::new(valid());
        let debug = format!("{:?}", credential);
        assert!(!debug.contains("eyJ"));
        assert!(debug.contains("[REDACTED]"));
    }
}
