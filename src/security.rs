use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

use crate::constants::SESSION_TOKEN_PREFIX;
use crate::error::{LedgerError, Result};

type HmacSha256 = Hmac<Sha256>;

// =============================================================================
// Credential Schemes
// =============================================================================

/// How passwords are stored and compared
///
/// # Security Note
/// `Plaintext` is the default and stores passwords as typed, comparing them
/// by exact match. This is a known weakness kept for compatibility with data
/// written by earlier versions; it is not a protection. `Peppered` stores
/// `hex(HMAC-SHA256(pepper, password))` instead and compares in constant time.
/// Switching schemes invalidates every stored password.
#[derive(Debug, Clone, Default)]
pub enum CredentialScheme {
    #[default]
    Plaintext,
    Peppered(String),
}

impl CredentialScheme {
    /// Pick the scheme from an optional pepper
    pub fn from_pepper(pepper: Option<&str>) -> Self {
        match pepper {
            Some(p) if !p.is_empty() => CredentialScheme::Peppered(p.to_string()),
            _ => CredentialScheme::Plaintext,
        }
    }

    /// Value to store for a new password
    pub fn protect(&self, password: &str) -> Result<String> {
        match self {
            CredentialScheme::Plaintext => Ok(password.to_string()),
            CredentialScheme::Peppered(pepper) => {
                let mut mac = new_mac(pepper)?;
                mac.update(password.as_bytes());
                Ok(hex::encode(mac.finalize().into_bytes()))
            }
        }
    }

    /// Check a login attempt against the stored value
    pub fn verify(&self, stored: &str, candidate: &str) -> Result<bool> {
        match self {
            CredentialScheme::Plaintext => Ok(stored == candidate),
            CredentialScheme::Peppered(pepper) => {
                let stored_bytes = match hex::decode(stored) {
                    Ok(bytes) => bytes,
                    Err(_) => {
                        tracing::warn!("Stored credential is not a valid digest");
                        return Ok(false);
                    }
                };
                let mut mac = new_mac(pepper)?;
                mac.update(candidate.as_bytes());
                Ok(mac.verify_slice(&stored_bytes).is_ok())
            }
        }
    }
}

fn new_mac(pepper: &str) -> Result<HmacSha256> {
    HmacSha256::new_from_slice(pepper.as_bytes())
        .map_err(|e| LedgerError::Credential(e.to_string()))
}

// =============================================================================
// Tokens
// =============================================================================

/// Fresh opaque session token
///
/// Unique for the lifetime of a session; not meant to be unguessable.
pub fn generate_session_token() -> String {
    format!(
        "{}-{}-{}",
        SESSION_TOKEN_PREFIX,
        Utc::now().timestamp_millis(),
        Uuid::new_v4().simple()
    )
}
