//! Stateless CSRF tokens for the web form.
//!
//! A token is `base64url(timestamp) "." base64url(HMAC-SHA256(secret, timestamp))`
//! where `timestamp` is the issue time in Unix seconds. Nothing is stored
//! server side; a token is valid while its signature checks out and it is
//! younger than the configured maximum age.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::Utc;
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;
use std::time::Duration;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

#[derive(Error, Debug)]
pub enum CsrfError {
    #[error("invalid CSRF signing key")]
    InvalidKey,
}

/// Issues and validates CSRF tokens
#[derive(Clone)]
pub struct CsrfTokens {
    mac: HmacSha256,
    max_age: Duration,
}

impl CsrfTokens {
    pub fn new(secret: &[u8], max_age: Duration) -> Result<Self, CsrfError> {
        let mac = HmacSha256::new_from_slice(secret).map_err(|_| CsrfError::InvalidKey)?;
        Ok(Self { mac, max_age })
    }

    /// Tokens signed with 32 random bytes; they do not survive a restart
    pub fn with_random_secret(max_age: Duration) -> Result<Self, CsrfError> {
        let mut secret = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut secret);
        Self::new(&secret, max_age)
    }

    /// Issue a token stamped with the current time
    pub fn issue(&self) -> String {
        self.issue_at(Utc::now().timestamp())
    }

    pub fn issue_at(&self, timestamp: i64) -> String {
        let payload = timestamp.to_string();
        format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(payload.as_bytes()),
            URL_SAFE_NO_PAD.encode(self.sign(payload.as_bytes()))
        )
    }

    /// Check signature and age against the current time
    pub fn validate(&self, token: &str) -> bool {
        self.validate_at(token, Utc::now().timestamp())
    }

    pub fn validate_at(&self, token: &str, now: i64) -> bool {
        let Some((payload_b64, signature_b64)) = token.trim().split_once('.') else {
            return false;
        };
        let (Ok(payload), Ok(signature)) = (
            URL_SAFE_NO_PAD.decode(payload_b64),
            URL_SAFE_NO_PAD.decode(signature_b64),
        ) else {
            return false;
        };

        let mut mac = self.mac.clone();
        mac.update(&payload);
        if mac.verify_slice(&signature).is_err() {
            return false;
        }

        let Some(issued) = std::str::from_utf8(&payload)
            .ok()
            .and_then(|s| s.parse::<i64>().ok())
        else {
            return false;
        };

        let age = now - issued;
        age >= 0 && (age as u64) <= self.max_age.as_secs()
    }

    fn sign(&self, payload: &[u8]) -> Vec<u8> {
        let mut mac = self.mac.clone();
        mac.update(payload);
        mac.finalize().into_bytes().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR: Duration = Duration::from_secs(3600);

    fn tokens() -> CsrfTokens {
        CsrfTokens::new(b"test-secret", HOUR).unwrap()
    }

    #[test]
    fn test_fresh_token_is_valid() {
        let tokens = tokens();
        let token = tokens.issue();
        assert!(tokens.validate(&token));
        assert_eq!(token.matches('.').count(), 1);
    }

    #[test]
    fn test_token_expires_after_max_age() {
        let tokens = tokens();
        let token = tokens.issue_at(1_000);
        assert!(tokens.validate_at(&token, 1_000 + 3600));
        assert!(!tokens.validate_at(&token, 1_000 + 3601));
        // Issued in the future
        assert!(!tokens.validate_at(&token, 999));
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let tokens = tokens();
        let token = tokens.issue_at(1_000);
        let (_, signature) = token.split_once('.').unwrap();
        let forged = format!("{}.{}", URL_SAFE_NO_PAD.encode(b"2000"), signature);
        assert!(!tokens.validate_at(&forged, 2_000));

        assert!(!tokens.validate_at("", 1_000));
        assert!(!tokens.validate_at("no-dot", 1_000));
        assert!(!tokens.validate_at("!!.??", 1_000));
    }

    #[test]
    fn test_other_secret_is_rejected() {
        let token = tokens().issue_at(1_000);
        let other = CsrfTokens::new(b"other-secret", HOUR).unwrap();
        assert!(!other.validate_at(&token, 1_000));
    }

    #[test]
    fn test_random_secret_tokens_validate() {
        let tokens = CsrfTokens::with_random_secret(HOUR).unwrap();
        assert!(tokens.validate(&tokens.issue()));
    }
}
