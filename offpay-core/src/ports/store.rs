//! Store port - persistence abstraction
//!
//! The device owns exactly two documents: the wallet and the auth account.
//! Implementations provide simple read-modify-write semantics with no
//! transactional isolation; callers must not run two mutating operations
//! against the same document concurrently.

use crate::domain::result::Result;
use crate::domain::{AuthAccount, WalletAccount};

/// Durable key-value storage scoped to the device
pub trait Store: Send + Sync {
    /// Read the wallet document, if one has been created
    fn load_wallet(&self) -> Result<Option<WalletAccount>>;

    /// Durably write the wallet document
    fn save_wallet(&self, wallet: &WalletAccount) -> Result<()>;

    /// Read the auth document, if one has been created
    fn load_auth(&self) -> Result<Option<AuthAccount>>;

    /// Durably write the auth document
    fn save_auth(&self, auth: &AuthAccount) -> Result<()>;

    /// Irreversibly discard the auth document (enrollment reset)
    fn delete_auth(&self) -> Result<()>;
}
