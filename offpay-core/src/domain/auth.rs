//! Auth domain model
//!
//! One `AuthAccount` per device. The raw PIN is never stored: only a
//! salted SHA-256 digest. The session is bound to the device the account
//! was enrolled on, so a copied store cannot extend access elsewhere.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::domain::result::{Error, Result};

/// The enrolled identity, credential digest, and session state
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthAccount {
    /// The enrolled identity (a mobile number in the reference app)
    pub principal_id: String,
    pub credential_hash: String,
    pub credential_salt: String,
    /// Device the account was created on; sessions are valid only there
    pub device_binding: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub last_authenticated_at: DateTime<Utc>,
    pub session_token: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub session_expiry: DateTime<Utc>,
    pub failed_attempts: u32,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_milliseconds_option"
    )]
    pub lockout_until: Option<DateTime<Utc>>,
}

impl AuthAccount {
    /// Principal masked for display: all but the last four characters hidden
    pub fn masked_principal(&self) -> String {
        if self.principal_id.len() < 4 {
            return self.principal_id.clone();
        }
        let last4 = &self.principal_id[self.principal_id.len() - 4..];
        format!("******{}", last4)
    }
}

/// Salted PIN digest: SHA-256 over the PIN concatenated with the hex salt
pub fn hash_pin(pin: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(pin.as_bytes());
    hasher.update(salt.as_bytes());
    hex::encode(hasher.finalize())
}

/// Fresh random 16-byte salt, hex-encoded
pub fn generate_salt() -> String {
    use rand::RngCore;
    let mut bytes = [0u8; 16];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Generate a device identifier, e.g. `DEV_9F2A81BC6D01E4F7`
pub fn generate_device_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("DEV_{}", hex[..16].to_uppercase())
}

/// Fresh opaque session token
pub fn generate_session_token() -> String {
    Uuid::new_v4().to_string()
}

/// Validate a principal (mobile number) for enrollment: exactly ten digits,
/// leading digit 6-9
pub fn validate_principal(principal: &str) -> Result<()> {
    let cleaned: String = principal.chars().filter(|c| c.is_ascii_digit()).collect();
    if cleaned.len() != 10 {
        return Err(Error::validation("Mobile number must be 10 digits"));
    }
    if !matches!(cleaned.as_bytes()[0], b'6'..=b'9') {
        return Err(Error::validation("Mobile number must start with 6-9"));
    }
    Ok(())
}

/// Sequences rejected as too guessable
const SEQUENTIAL_PINS: &[&str] = &[
    "0123", "1234", "2345", "3456", "4567", "5678", "6789", "9876", "8765", "7654", "6543", "5432",
    "4321", "3210",
];

/// Validate a PIN for enrollment: four digits, not sequential, not repeated
pub fn validate_pin(pin: &str) -> Result<()> {
    if pin.len() != 4 || !pin.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::validation("PIN must be 4 digits"));
    }
    if SEQUENTIAL_PINS.contains(&pin) {
        return Err(Error::validation(
            "PIN is too simple. Avoid sequential numbers",
        ));
    }
    if pin.chars().all(|c| c == pin.chars().next().unwrap()) {
        return Err(Error::validation(
            "PIN is too simple. Avoid repeated digits",
        ));
    }
    Ok(())
}

/// Demo OTP check: the enrollment flow has no network, so a fixed code stands
/// in for real delivery
pub fn verify_otp(otp: &str) -> bool {
    otp == "123456"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_pin_is_salted_and_stable() {
        let salt = generate_salt();
        assert_eq!(salt.len(), 32);
        let h1 = hash_pin("4826", &salt);
        let h2 = hash_pin("4826", &salt);
        assert_eq!(h1, h2);
        assert_eq!(h1.len(), 64);

        let other_salt = generate_salt();
        assert_ne!(h1, hash_pin("4826", &other_salt));
        assert_ne!(h1, hash_pin("4827", &salt));
    }

    #[test]
    fn test_device_id_format() {
        let id = generate_device_id();
        assert!(id.starts_with("DEV_"));
        assert_eq!(id.len(), 20);
    }

    #[test]
    fn test_validate_principal() {
        assert!(validate_principal("9876543210").is_ok());
        assert!(validate_principal("98765-43210").is_ok()); // non-digits stripped
        assert!(validate_principal("1234567890").is_err()); // leading 1
        assert!(validate_principal("98765").is_err());
    }

    #[test]
    fn test_validate_pin() {
        assert!(validate_pin("4826").is_ok());
        assert!(validate_pin("12a4").is_err());
        assert!(validate_pin("123").is_err());
        assert!(validate_pin("1234").is_err()); // sequential
        assert!(validate_pin("3210").is_err()); // descending
        assert!(validate_pin("7777").is_err()); // repeated
    }

    #[test]
    fn test_masked_principal() {
        let account = AuthAccount {
            principal_id: "9876543210".to_string(),
            credential_hash: String::new(),
            credential_salt: String::new(),
            device_binding: String::new(),
            created_at: Utc::now(),
            last_authenticated_at: Utc::now(),
            session_token: String::new(),
            session_expiry: Utc::now(),
            failed_attempts: 0,
            lockout_until: None,
        };
        assert_eq!(account.masked_principal(), "******3210");
    }

    #[test]
    fn test_auth_round_trip_with_lockout() {
        let account = AuthAccount {
            principal_id: "9876543210".to_string(),
            credential_hash: "abc".to_string(),
            credential_salt: "def".to_string(),
            device_binding: "DEV_0123456789ABCDEF".to_string(),
            created_at: Utc::now(),
            last_authenticated_at: Utc::now(),
            session_token: generate_session_token(),
            session_expiry: Utc::now(),
            failed_attempts: 2,
            lockout_until: Some(Utc::now()),
        };
        let json = serde_json::to_string(&account).unwrap();
        assert!(json.contains("lockoutUntil"));
        let restored: AuthAccount = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.failed_attempts, 2);
        assert!(restored.lockout_until.is_some());

        // lockoutUntil is optional on read
        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value.as_object_mut().unwrap().remove("lockoutUntil");
        let restored: AuthAccount = serde_json::from_value(value).unwrap();
        assert!(restored.lockout_until.is_none());
    }
}
