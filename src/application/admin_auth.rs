use chrono::{Duration, Utc};

use crate::domain::errors::DomainError;

use super::credentials;
use super::token::{self, Claims};

/// Tokens expire this long after issuance.
pub const TOKEN_VALIDITY_HOURS: i64 = 1;

/// The single administrator credential record, injected from configuration
/// at startup.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    pub username: String,
    /// Pre-computed Argon2 digest of the administrator password.
    pub password_hash: String,
}

#[derive(Clone)]
pub struct AdminAuthService {
    credentials: AdminCredentials,
    secret: Vec<u8>,
}

impl AdminAuthService {
    pub fn new(credentials: AdminCredentials, secret: Vec<u8>) -> Self {
        Self {
            credentials,
            secret,
        }
    }

    /// Issue a signed, time-boxed token whose one claim is the administrator
    /// username. Any credential failure is `Unauthorized` with no detail
    /// about which part failed.
    pub fn login(&self, username: &str, password: &str) -> Result<String, DomainError> {
        if username.trim().is_empty() || password.trim().is_empty() {
            return Err(DomainError::Validation(
                "username and password are required".to_string(),
            ));
        }

        if username != self.credentials.username
            || !credentials::verify(password, &self.credentials.password_hash)
        {
            return Err(DomainError::Unauthorized);
        }

        let claims = Claims {
            sub: self.credentials.username.clone(),
            exp: (Utc::now() + Duration::hours(TOKEN_VALIDITY_HOURS)).timestamp(),
        };
        token::sign(&claims, &self.secret)
    }

    /// Malformed, tampered or expired tokens are `Unauthorized`; a valid
    /// token for any other subject is `Forbidden`.
    pub fn verify_token(&self, raw: &str) -> Result<Claims, DomainError> {
        let claims = token::verify(raw, &self.secret, Utc::now())?;
        if claims.sub != self.credentials.username {
            return Err(DomainError::Forbidden);
        }
        Ok(claims)
    }
}
