//! In-memory adapters for tests and embedding hosts without a filesystem

use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};

use crate::domain::result::{Error, Result};
use crate::domain::{AuthAccount, WalletAccount};
use crate::ports::{Clock, DeviceIdentity, Store};

/// Volatile store holding the two documents in memory
#[derive(Default)]
pub struct MemoryStore {
    wallet: Mutex<Option<WalletAccount>>,
    auth: Mutex<Option<AuthAccount>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn load_wallet(&self) -> Result<Option<WalletAccount>> {
        let guard = self.wallet.lock().map_err(|_| Error::store("wallet lock poisoned"))?;
        Ok(guard.clone())
    }

    fn save_wallet(&self, wallet: &WalletAccount) -> Result<()> {
        let mut guard = self.wallet.lock().map_err(|_| Error::store("wallet lock poisoned"))?;
        *guard = Some(wallet.clone());
        Ok(())
    }

    fn load_auth(&self) -> Result<Option<AuthAccount>> {
        let guard = self.auth.lock().map_err(|_| Error::store("auth lock poisoned"))?;
        Ok(guard.clone())
    }

    fn save_auth(&self, auth: &AuthAccount) -> Result<()> {
        let mut guard = self.auth.lock().map_err(|_| Error::store("auth lock poisoned"))?;
        *guard = Some(auth.clone());
        Ok(())
    }

    fn delete_auth(&self) -> Result<()> {
        let mut guard = self.auth.lock().map_err(|_| Error::store("auth lock poisoned"))?;
        *guard = None;
        Ok(())
    }
}

/// Manually advanced clock for deterministic lockout/session tests
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut guard = self.now.lock().expect("clock lock poisoned");
        *guard += by;
    }

    pub fn set(&self, to: DateTime<Utc>) {
        let mut guard = self.now.lock().expect("clock lock poisoned");
        *guard = to;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock lock poisoned")
    }
}

/// Fixed device identifier for tests
pub struct FixedDeviceIdentity(pub String);

impl DeviceIdentity for FixedDeviceIdentity {
    fn device_id(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}
