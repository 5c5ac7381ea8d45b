use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Lifetime of a single access token.
    pub expiration: Duration,
    /// How long after the original sign-in a token may still be refreshed.
    pub refresh_expiration: Duration,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, expiration_minutes: i64, refresh_days: i64) -> Self {
        Self {
            secret: secret.into(),
            expiration: Duration::minutes(expiration_minutes),
            refresh_expiration: Duration::days(refresh_days),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub username: String,
    pub exp: i64,
    #[serde(rename = "origIat")]
    pub orig_iat: i64,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Signature has expired")]
    Expired,
    #[error("Refresh has expired")]
    RefreshExpired,
    #[error("Error decoding signature")]
    Invalid,
    #[error("token encoding failed: {0}")]
    Encoding(String),
}

#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("expiration", &self.config.expiration)
            .field("refresh_expiration", &self.config.refresh_expiration)
            .finish_non_exhaustive()
    }
}

impl JwtService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    pub fn config(&self) -> &JwtConfig {
        &self.config
    }

    /// Sign a fresh session for `username`.
    pub fn issue(&self, subject: &str, username: &str) -> Result<(String, Claims), TokenError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: subject.to_string(),
            username: username.to_string(),
            exp: now + self.config.expiration.num_seconds(),
            orig_iat: now,
        };
        Ok((self.encode(&claims)?, claims))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::default();
        validation.leeway = 0;
        jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }

    /// Re-sign a still-valid token, keeping its original issue time.
    pub fn refresh(&self, token: &str) -> Result<(String, Claims), TokenError> {
        let claims = self.verify(token)?;
        let now = Utc::now().timestamp();
        if now > self.refresh_expires_at(&claims) {
            return Err(TokenError::RefreshExpired);
        }
        let refreshed = Claims {
            exp: now + self.config.expiration.num_seconds(),
            ..claims
        };
        Ok((self.encode(&refreshed)?, refreshed))
    }

    /// Unix timestamp after which `claims` can no longer be refreshed.
    pub fn refresh_expires_at(&self, claims: &Claims) -> i64 {
        claims.orig_iat + self.config.refresh_expiration.num_seconds()
    }

    fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        jsonwebtoken::encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|err| TokenError::Encoding(err.to_string()))
    }
}

/// Token from an `Authorization` header value using the `JWT` or `Bearer` scheme.
pub fn extract_token(authorization: &str) -> Option<&str> {
    let (scheme, token) = authorization.trim().split_once(' ')?;
    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    if scheme.eq_ignore_ascii_case("jwt") || scheme.eq_ignore_ascii_case("bearer") {
        Some(token)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new(JwtConfig::new("test-secret-key-at-least-32-bytes", 5, 7))
    }

    #[test]
    fn issued_tokens_verify() {
        let svc = service();
        let (token, claims) = svc.issue("u-1", "asha").unwrap();
        let decoded = svc.verify(&token).unwrap();
        assert_eq!(decoded, claims);
        assert_eq!(decoded.exp - decoded.orig_iat, 300);
    }

    #[test]
    fn tampered_tokens_are_invalid() {
        let svc = service();
        let (token, _) = svc.issue("u-1", "asha").unwrap();
        let other = JwtService::new(JwtConfig::new("another-secret-entirely-0000000000", 5, 7));
        assert_eq!(other.verify(&token), Err(TokenError::Invalid));
        assert_eq!(svc.verify("not.a.jwt"), Err(TokenError::Invalid));
    }

    #[test]
    fn expired_tokens_are_rejected() {
        let svc = service();
        let now = Utc::now().timestamp();
        let stale = Claims {
            sub: "u-1".into(),
            username: "asha".into(),
            exp: now - 10,
            orig_iat: now - 310,
        };
        let token = svc.encode(&stale).unwrap();
        assert_eq!(svc.verify(&token), Err(TokenError::Expired));
        assert_eq!(svc.refresh(&token), Err(TokenError::Expired));
    }

    #[test]
    fn refresh_keeps_original_issue_time() {
        let svc = service();
        let now = Utc::now().timestamp();
        let earlier = Claims {
            sub: "u-1".into(),
            username: "asha".into(),
            exp: now + 60,
            orig_iat: now - 3_600,
        };
        let token = svc.encode(&earlier).unwrap();
        let (_, refreshed) = svc.refresh(&token).unwrap();
        assert_eq!(refreshed.orig_iat, earlier.orig_iat);
        assert!(refreshed.exp >= now + 300);
    }

    #[test]
    fn refresh_window_is_enforced() {
        let svc = service();
        let now = Utc::now().timestamp();
        let ancient = Claims {
            sub: "u-1".into(),
            username: "asha".into(),
            exp: now + 60,
            orig_iat: now - Duration::days(8).num_seconds(),
        };
        let token = svc.encode(&ancient).unwrap();
        assert_eq!(svc.refresh(&token), Err(TokenError::RefreshExpired));
    }

    #[test]
    fn header_schemes() {
        assert_eq!(extract_token("JWT abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(extract_token("Bearer abc"), Some("abc"));
        assert_eq!(extract_token("bearer   abc "), Some("abc"));
        assert_eq!(extract_token("Basic dXNlcg=="), None);
        assert_eq!(extract_token("Bearer"), None);
    }
}
