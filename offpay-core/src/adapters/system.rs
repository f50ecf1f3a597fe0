//! System adapters: real wall clock and file-persisted device identity

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::domain::auth::generate_device_id;
use crate::domain::result::Result;
use crate::ports::{Clock, DeviceIdentity};

/// Wall clock
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

const DEVICE_ID_FILE: &str = "device_id";

/// Device identifier generated once and persisted beside the store
///
/// Deleting the file produces a new identity, which invalidates any session
/// bound to the old one. That matches the account-restore threat model: a
/// copied store on a fresh device must not keep a live session.
pub struct FileDeviceIdentity {
    path: PathBuf,
}

impl FileDeviceIdentity {
    pub fn new(dir: &Path) -> Self {
        Self {
            path: dir.join(DEVICE_ID_FILE),
        }
    }
}

impl DeviceIdentity for FileDeviceIdentity {
    fn device_id(&self) -> Result<String> {
        if self.path.exists() {
            let id = fs::read_to_string(&self.path)?;
            let id = id.trim();
            if !id.is_empty() {
                return Ok(id.to_string());
            }
        }
        let id = generate_device_id();
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, &id)?;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_device_id_is_stable_across_reads() {
        let dir = TempDir::new().unwrap();
        let identity = FileDeviceIdentity::new(dir.path());
        let first = identity.device_id().unwrap();
        let second = identity.device_id().unwrap();
        assert_eq!(first, second);
        assert!(first.starts_with("DEV_"));
    }
}
