//! Configuration management
//!
//! Reads `settings.json` from the data directory:
//! ```json
//! {
//!   "startingBalance": 500,
//!   "sessionDurationMs": 604800000,
//!   "lockoutDurationMs": 300000,
//!   "maxFailedAttempts": 3
//! }
//! ```
//! Missing file, missing fields, or a malformed file all fall back to the
//! defaults; configuration problems never block the wallet.

use std::path::Path;

use anyhow::Result;
use chrono::Duration;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Demo starting balance for a freshly created wallet
const DEFAULT_STARTING_BALANCE: i64 = 500;
/// Sessions live for 7 days unless extended
const DEFAULT_SESSION_DURATION_MS: i64 = 7 * 24 * 60 * 60 * 1000;
/// Lockout lasts 5 minutes
const DEFAULT_LOCKOUT_DURATION_MS: i64 = 5 * 60 * 1000;
/// Failed PIN attempts before lockout
const DEFAULT_MAX_FAILED_ATTEMPTS: u32 = 3;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_starting_balance")]
    pub starting_balance: Decimal,
    #[serde(default = "default_session_duration_ms")]
    pub session_duration_ms: i64,
    #[serde(default = "default_lockout_duration_ms")]
    pub lockout_duration_ms: i64,
    #[serde(default = "default_max_failed_attempts")]
    pub max_failed_attempts: u32,
}

fn default_starting_balance() -> Decimal {
    Decimal::new(DEFAULT_STARTING_BALANCE, 0)
}

fn default_session_duration_ms() -> i64 {
    DEFAULT_SESSION_DURATION_MS
}

fn default_lockout_duration_ms() -> i64 {
    DEFAULT_LOCKOUT_DURATION_MS
}

fn default_max_failed_attempts() -> u32 {
    DEFAULT_MAX_FAILED_ATTEMPTS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            starting_balance: default_starting_balance(),
            session_duration_ms: default_session_duration_ms(),
            lockout_duration_ms: default_lockout_duration_ms(),
            max_failed_attempts: default_max_failed_attempts(),
        }
    }
}

impl Config {
    /// Load config from the data directory
    pub fn load(data_dir: &Path) -> Result<Self> {
        let settings_path = data_dir.join("settings.json");
        if !settings_path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&settings_path)?;
        Ok(serde_json::from_str(&content).unwrap_or_default())
    }

    pub fn session_duration(&self) -> Duration {
        Duration::milliseconds(self.session_duration_ms)
    }

    pub fn lockout_duration(&self) -> Duration {
        Duration::milliseconds(self.lockout_duration_ms)
    }
}
