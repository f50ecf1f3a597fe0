//! Auth service - enrollment, PIN verification, lockout, and sessions
//!
//! State machine per device: no account → enrolled (unauthenticated) →
//! enrolled (authenticated), with a timed locked-out state after repeated
//! PIN failures that drains back to unauthenticated on its own.

use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::domain::auth::{
    generate_salt, generate_session_token, hash_pin, validate_pin, validate_principal, AuthAccount,
};
use crate::domain::result::{Error, Result};
use crate::ports::{Clock, DeviceIdentity, Store};

pub struct AuthService {
    store: Arc<dyn Store>,
    clock: Arc<dyn Clock>,
    device: Arc<dyn DeviceIdentity>,
    config: Config,
}

impl AuthService {
    pub fn new(
        store: Arc<dyn Store>,
        clock: Arc<dyn Clock>,
        device: Arc<dyn DeviceIdentity>,
        config: Config,
    ) -> Self {
        Self {
            store,
            clock,
            device,
            config,
        }
    }

    /// The stored auth account, if the device is enrolled
    pub fn account(&self) -> Result<Option<AuthAccount>> {
        self.store.load_auth()
    }

    /// True if an account exists, authenticated or not
    ///
    /// Drives the "welcome back" flow: a returning device goes straight to
    /// the PIN screen instead of enrollment.
    pub fn is_returning(&self) -> Result<bool> {
        Ok(self.store.load_auth()?.is_some())
    }

    /// Create the device's account and open the first session
    ///
    /// Only valid while no account exists; reset enrollment first to
    /// re-enroll.
    pub fn enroll(&self, principal_id: &str, raw_pin: &str) -> Result<AuthAccount> {
        if self.store.load_auth()?.is_some() {
            return Err(Error::validation(
                "an account is already enrolled on this device",
            ));
        }
        validate_principal(principal_id)?;
        validate_pin(raw_pin)?;

        let salt = generate_salt();
        let now = self.clock.now();
        let account = AuthAccount {
            principal_id: principal_id.to_string(),
            credential_hash: hash_pin(raw_pin, &salt),
            credential_salt: salt,
            device_binding: self.device.device_id()?,
            created_at: now,
            last_authenticated_at: now,
            session_token: generate_session_token(),
            session_expiry: now + self.config.session_duration(),
            failed_attempts: 0,
            lockout_until: None,
        };
        self.store.save_auth(&account)?;
        info!("account enrolled");
        Ok(account)
    }

    /// Remaining lockout, if the account is currently locked
    ///
    /// Observing an elapsed lockout clears it and resets the failure
    /// counter, persisting the change.
    pub fn lockout_remaining(&self) -> Result<Option<Duration>> {
        let Some(mut account) = self.store.load_auth()? else {
            return Ok(None);
        };
        let Some(until) = account.lockout_until else {
            return Ok(None);
        };
        let now = self.clock.now();
        if now < until {
            return Ok(Some(until - now));
        }
        account.failed_attempts = 0;
        account.lockout_until = None;
        self.store.save_auth(&account)?;
        debug!("lockout elapsed, counters reset");
        Ok(None)
    }

    /// Check the PIN and open a fresh session on success
    pub fn authenticate(&self, raw_pin: &str) -> Result<AuthAccount> {
        if let Some(remaining) = self.lockout_remaining()? {
            // No counter increment while locked out.
            return Err(Error::LockedOut { remaining });
        }
        let mut account = self.store.load_auth()?.ok_or(Error::NoAccount)?;

        if hash_pin(raw_pin, &account.credential_salt) == account.credential_hash {
            let now = self.clock.now();
            account.failed_attempts = 0;
            account.lockout_until = None;
            account.last_authenticated_at = now;
            account.session_token = generate_session_token();
            account.session_expiry = now + self.config.session_duration();
            self.store.save_auth(&account)?;
            info!("authentication succeeded");
            return Ok(account);
        }

        account.failed_attempts += 1;
        if account.failed_attempts >= self.config.max_failed_attempts {
            let lockout = self.config.lockout_duration();
            account.lockout_until = Some(self.clock.now() + lockout);
            self.store.save_auth(&account)?;
            warn!("too many failed attempts, account locked");
            return Err(Error::LockedOut { remaining: lockout });
        }
        let attempts_remaining = self.config.max_failed_attempts - account.failed_attempts;
        self.store.save_auth(&account)?;
        Err(Error::InvalidCredential { attempts_remaining })
    }

    /// True iff a session exists, is unexpired, and was issued on this device
    ///
    /// A device-binding mismatch invalidates the session even before expiry:
    /// a store copied to another machine must not carry its session along.
    pub fn validate_session(&self) -> Result<bool> {
        let Some(account) = self.store.load_auth()? else {
            return Ok(false);
        };
        if account.session_token.is_empty() {
            return Ok(false);
        }
        if self.clock.now() >= account.session_expiry {
            return Ok(false);
        }
        if account.device_binding != self.device.device_id()? {
            return Ok(false);
        }
        Ok(true)
    }

    /// Error-typed session gate for balance-changing call sites
    pub fn require_session(&self) -> Result<()> {
        if self.validate_session()? {
            Ok(())
        } else {
            Err(Error::SessionInvalid)
        }
    }

    /// Slide the session expiry forward; no-op unless currently valid
    ///
    /// Intended to run on every observed user interaction.
    pub fn extend_session(&self) -> Result<()> {
        if !self.validate_session()? {
            return Ok(());
        }
        let Some(mut account) = self.store.load_auth()? else {
            return Ok(());
        };
        account.session_expiry = self.clock.now() + self.config.session_duration();
        self.store.save_auth(&account)?;
        Ok(())
    }

    /// Close the session but keep the enrollment
    ///
    /// The device stays recognizable as "returning" on next launch.
    pub fn end_session(&self) -> Result<()> {
        let Some(mut account) = self.store.load_auth()? else {
            return Ok(());
        };
        account.session_token = String::new();
        account.session_expiry = self.clock.now();
        self.store.save_auth(&account)?;
        info!("session ended");
        Ok(())
    }

    /// Irreversibly discard the whole auth account (forgot-PIN recovery)
    pub fn reset_enrollment(&self) -> Result<()> {
        self.store.delete_auth()?;
        info!("enrollment reset");
        Ok(())
    }
}
