//! Bearer-token verification for the `/generate` route.
//!
//! Tokens are HS256 JWTs signed with a secret shared with whatever issues
//! them. Only the signature and the `exp` claim are checked.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::config::AuthConfig;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("missing Authorization header")]
    MissingToken,

    #[error("Authorization header is not a bearer token")]
    MalformedHeader,

    #[error("invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("authentication is enabled but no jwt_secret is configured")]
    MissingSecret,
}

/// Claims carried by accepted tokens
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

pub struct Authenticator {
    key: DecodingKey,
    validation: Validation,
}

impl fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Authenticator")
            .field("validation", &self.validation)
            .finish_non_exhaustive()
    }
}

impl Authenticator {
    pub fn new(secret: &str) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Build an authenticator when auth is enabled, `None` when it is off
    pub fn from_config(config: &AuthConfig) -> Result<Option<Self>, AuthError> {
        if !config.enabled {
            return Ok(None);
        }
        let secret = config
            .jwt_secret
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(AuthError::MissingSecret)?;
        Ok(Some(Self::new(secret)))
    }

    /// Verify the raw value of an `Authorization` header
    pub fn verify_header(&self, header: Option<&str>) -> Result<Claims, AuthError> {
        let header = header.ok_or(AuthError::MissingToken)?;
        // Scheme names are case-insensitive
        let token = header
            .trim()
            .split_once(' ')
            .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
            .map(|(_, token)| token.trim())
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MalformedHeader)?;

        let data = decode::<Claims>(token, &self.key, &self.validation)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, EncodingKey, Header};

    pub(crate) fn token_for(secret: &str, expires_in: Duration) -> String {
        let claims = Claims {
            sub: "user-1".to_string(),
            exp: (Utc::now() + expires_in).timestamp() as usize,
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_valid_token() {
        let auth = Authenticator::new("secret");
        let header = format!("Bearer {}", token_for("secret", Duration::minutes(5)));
        let claims = auth.verify_header(Some(&header)).unwrap();
        assert_eq!(claims.sub, "user-1");
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        let auth = Authenticator::new("secret");
        let token = token_for("secret", Duration::minutes(5));
        for scheme in ["bearer", "BEARER", "BeArEr"] {
            let header = format!("{} {}", scheme, token);
            assert!(auth.verify_header(Some(&header)).is_ok(), "{}", scheme);
        }
        assert!(matches!(
            auth.verify_header(Some(&format!("Bearer{}", token))),
            Err(AuthError::MalformedHeader)
        ));
    }

    #[test]
    fn test_rejections() {
        let auth = Authenticator::new("secret");

        assert!(matches!(auth.verify_header(None), Err(AuthError::MissingToken)));
        assert!(matches!(
            auth.verify_header(Some("Basic dXNlcjpwYXNz")),
            Err(AuthError::MalformedHeader)
        ));
        assert!(matches!(
            auth.verify_header(Some("Bearer ")),
            Err(AuthError::MalformedHeader)
        ));

        let wrong_secret = format!("Bearer {}", token_for("other", Duration::minutes(5)));
        assert!(matches!(
            auth.verify_header(Some(&wrong_secret)),
            Err(AuthError::InvalidToken(_))
        ));

        let expired = format!("Bearer {}", token_for("secret", Duration::hours(-2)));
        assert!(matches!(
            auth.verify_header(Some(&expired)),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_from_config() {
        let disabled = AuthConfig::default();
        assert!(Authenticator::from_config(&disabled).unwrap().is_none());

        let no_secret = AuthConfig {
            enabled: true,
            jwt_secret: None,
        };
        assert!(matches!(
            Authenticator::from_config(&no_secret),
            Err(AuthError::MissingSecret)
        ));

        let enabled = AuthConfig {
            enabled: true,
            jwt_secret: Some("secret".to_string()),
        };
        assert!(Authenticator::from_config(&enabled).unwrap().is_some());
    }
}
