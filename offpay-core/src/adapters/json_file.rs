//! JSON file store adapter
//!
//! The two documents live as `wallet.json` and `auth.json` under the data
//! directory. Writes go to a temp file first and are renamed into place, so
//! a crash mid-write leaves the previous document intact. An `fs2` advisory
//! lock on `store.lock` keeps a second process from opening the same store;
//! multi-process access is unsupported.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::domain::result::{Error, Result};
use crate::domain::{AuthAccount, WalletAccount};
use crate::ports::Store;

const WALLET_FILE: &str = "wallet.json";
const AUTH_FILE: &str = "auth.json";
const LOCK_FILE: &str = "store.lock";

/// File-backed store for the wallet and auth documents
pub struct JsonFileStore {
    dir: PathBuf,
    // Serializes read-modify-write within this process; the fs2 lock below
    // only guards against a second process.
    write_lock: Mutex<()>,
    _lock_file: File,
}

impl JsonFileStore {
    /// Open (or create) the store in `dir`, taking the process lock
    pub fn open(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)?;
        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .open(dir.join(LOCK_FILE))?;
        lock_file.try_lock_exclusive().map_err(|_| {
            Error::store(format!(
                "store at {} is in use by another process",
                dir.display()
            ))
        })?;
        debug!(dir = %dir.display(), "opened json file store");
        Ok(Self {
            dir: dir.to_path_buf(),
            write_lock: Mutex::new(()),
            _lock_file: lock_file,
        })
    }

    fn read_document<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        let path = self.dir.join(name);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        let doc = serde_json::from_str(&content)?;
        Ok(Some(doc))
    }

    fn write_document<T: Serialize>(&self, name: &str, doc: &T) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| Error::store("store lock poisoned"))?;
        let path = self.dir.join(name);
        let tmp = self.dir.join(format!("{}.tmp", name));
        fs::write(&tmp, serde_json::to_string_pretty(doc)?)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

impl Store for JsonFileStore {
    fn load_wallet(&self) -> Result<Option<WalletAccount>> {
        self.read_document(WALLET_FILE)
    }

    fn save_wallet(&self, wallet: &WalletAccount) -> Result<()> {
        self.write_document(WALLET_FILE, wallet)
    }

    fn load_auth(&self) -> Result<Option<AuthAccount>> {
        self.read_document(AUTH_FILE)
    }

    fn save_auth(&self, auth: &AuthAccount) -> Result<()> {
        self.write_document(AUTH_FILE, auth)
    }

    fn delete_auth(&self) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| Error::store("store lock poisoned"))?;
        let path = self.dir.join(AUTH_FILE);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}
