//! Compact HMAC-SHA256 signed claims tokens.
//!
//! Wire format: `base64url(json claims) "." base64url(signature)`, signed
//! over the encoded payload.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::domain::errors::DomainError;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject: the authenticated principal.
    pub sub: String,
    /// Expiry as a unix timestamp, exclusive.
    pub exp: i64,
}

pub fn sign(claims: &Claims, secret: &[u8]) -> Result<String, DomainError> {
    let payload = serde_json::to_vec(claims)
        .map_err(|e| DomainError::Internal(format!("claims serialization failed: {e}")))?;
    let encoded = URL_SAFE_NO_PAD.encode(payload);

    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|e| DomainError::Internal(format!("signing key rejected: {e}")))?;
    mac.update(encoded.as_bytes());
    let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    Ok(format!("{encoded}.{signature}"))
}

/// Decode and check signature and expiry. Every failure mode collapses to
/// `Unauthorized`; callers learn nothing about which check failed.
pub fn verify(token: &str, secret: &[u8], now: DateTime<Utc>) -> Result<Claims, DomainError> {
    let Some((payload, signature)) = token.split_once('.') else {
        return Err(DomainError::Unauthorized);
    };

    let signature = URL_SAFE_NO_PAD
        .decode(signature)
        .map_err(|_| DomainError::Unauthorized)?;
    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|e| DomainError::Internal(format!("signing key rejected: {e}")))?;
    mac.update(payload.as_bytes());
    mac.verify_slice(&signature)
        .map_err(|_| DomainError::Unauthorized)?;

    let payload = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| DomainError::Unauthorized)?;
    let claims: Claims =
        serde_json::from_slice(&payload).map_err(|_| DomainError::Unauthorized)?;

    if claims.exp <= now.timestamp() {
        return Err(DomainError::Unauthorized);
    }

    Ok(claims)
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    const SECRET: &[u8] = b"test-secret-key";

    fn claims_expiring_in(minutes: i64) -> Claims {
        Claims {
            sub: "admin".to_string(),
            exp: (Utc::now() + Duration::minutes(minutes)).timestamp(),
        }
    }

    #[test]
    fn sign_then_verify_roundtrip() {
        let claims = claims_expiring_in(60);
        let token = sign(&claims, SECRET).expect("sign failed");
        let decoded = verify(&token, SECRET, Utc::now()).expect("verify failed");
        assert_eq!(decoded, claims);
    }

    #[test]
    fn rejects_wrong_secret() {
        let token = sign(&claims_expiring_in(60), SECRET).expect("sign failed");
        let err = verify(&token, b"other-secret", Utc::now()).unwrap_err();
        assert_eq!(err, DomainError::Unauthorized);
    }

    #[test]
    fn rejects_tampered_payload() {
        let token = sign(&claims_expiring_in(60), SECRET).expect("sign failed");
        let signature = token.split_once('.').expect("two parts").1;
        let forged = Claims {
            sub: "intruder".to_string(),
            exp: i64::MAX,
        };
        let forged_payload =
            URL_SAFE_NO_PAD.encode(serde_json::to_vec(&forged).expect("serialize"));
        let tampered = format!("{forged_payload}.{signature}");
        assert_eq!(
            verify(&tampered, SECRET, Utc::now()).unwrap_err(),
            DomainError::Unauthorized
        );
    }

    #[test]
    fn rejects_expired_token() {
        let token = sign(&claims_expiring_in(-1), SECRET).expect("sign failed");
        assert_eq!(
            verify(&token, SECRET, Utc::now()).unwrap_err(),
            DomainError::Unauthorized
        );
    }

    #[test]
    fn expiry_boundary_is_exclusive() {
        let claims = claims_expiring_in(60);
        let token = sign(&claims, SECRET).expect("sign failed");
        let at_expiry = DateTime::from_timestamp(claims.exp, 0).expect("valid timestamp");
        assert!(verify(&token, SECRET, at_expiry).is_err());
    }

    #[test]
    fn rejects_garbage() {
        assert!(verify("", SECRET, Utc::now()).is_err());
        assert!(verify("no-dot-here", SECRET, Utc::now()).is_err());
        assert!(verify("a.b.c", SECRET, Utc::now()).is_err());
        assert!(verify("!!!.???", SECRET, Utc::now()).is_err());
    }
}
