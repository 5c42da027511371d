//! Credential primitives: bcrypt password hashes and HMAC-signed bearer tokens.
//!
//! Tokens have the shape `<user_id>.<issued_at>.<signature>` where the signature is the
//! hex HMAC-SHA256 of `<user_id>.<issued_at>` under the server secret.

use chrono::Utc;
use hmac::{Hmac, Mac};
use log::debug;
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Authorization token required")]
    MissingToken,
    #[error("Invalid token: {0}")]
    InvalidToken(String),
    #[error("Token has expired")]
    ExpiredToken,
    #[error("Token secret must not be empty")]
    EmptySecret,
    #[error("password hashing failed: {0}")]
    Hashing(String),
}

/// bcrypt work factor for new hashes. Existing hashes carry their own cost.
pub const DEFAULT_HASH_COST: u32 = bcrypt::DEFAULT_COST;
/// Mirrors bcrypt's private `MIN_COST` (4), the lowest cost it accepts.
pub const MIN_HASH_COST: u32 = 4;

pub fn hash_password(password: &str) -> Result<String, AuthError> {
    hash_password_with_cost(password, DEFAULT_HASH_COST)
}

pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, AuthError> {
    bcrypt::hash(password, cost).map_err(|e| AuthError::Hashing(e.to_string()))
}

/// A stored value that is not a bcrypt hash never matches.
pub fn verify_password(password: &str, stored: &str) -> bool {
    bcrypt::verify(password, stored).unwrap_or(false)
}

/// Issues and verifies bearer tokens. A `ttl_secs` of 0 means tokens never expire.
#[derive(Clone)]
pub struct TokenSigner {
    mac: HmacSha256,
    ttl_secs: u64,
}

impl TokenSigner {
    pub fn new(secret: &str, ttl_secs: u64) -> Result<Self, AuthError> {
        if secret.is_empty() {
            return Err(AuthError::EmptySecret);
        }
        let mac = HmacSha256::new_from_slice(secret.as_bytes())
            .map_err(|_| AuthError::EmptySecret)?;
        Ok(Self { mac, ttl_secs })
    }

    pub fn issue(&self, user_id: i32) -> String {
        self.issue_at(user_id, Utc::now().timestamp())
    }

    pub fn issue_at(&self, user_id: i32, issued_at: i64) -> String {
        let payload = format!("{}.{}", user_id, issued_at);
        let mut mac = self.mac.clone();
        mac.update(payload.as_bytes());
        format!("{}.{}", payload, hex::encode(mac.finalize().into_bytes()))
    }

    pub fn verify(&self, token: &str) -> Result<i32, AuthError> {
        self.verify_at(token, Utc::now().timestamp())
    }

    pub fn verify_at(&self, token: &str, now: i64) -> Result<i32, AuthError> {
        let mut parts = token.trim().split('.');
        let (Some(user), Some(issued), Some(signature), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(AuthError::InvalidToken("malformed token".into()));
        };
        let user_id = user
            .parse::<i32>()
            .map_err(|_| AuthError::InvalidToken("malformed subject".into()))?;
        let issued_at = issued
            .parse::<i64>()
            .map_err(|_| AuthError::InvalidToken("malformed timestamp".into()))?;
        let signature = hex::decode(signature)
            .map_err(|_| AuthError::InvalidToken("malformed signature".into()))?;

        let mut mac = self.mac.clone();
        mac.update(format!("{}.{}", user, issued).as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| AuthError::InvalidToken("signature mismatch".into()))?;

        let ttl = i64::try_from(self.ttl_secs).unwrap_or(i64::MAX);
        if ttl > 0 && now.saturating_sub(issued_at) > ttl {
            debug!("Rejecting expired token for user {}", user_id);
            return Err(AuthError::ExpiredToken);
        }
        Ok(user_id)
    }
}
