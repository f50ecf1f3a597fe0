//! Domain models - core business entities

pub mod auth;
pub mod payload;
pub mod result;
pub mod wallet;

pub use auth::AuthAccount;
pub use payload::{IdentityPayload, PayloadKind, TransferPayload};
pub use result::{Error, OperationResult, Result};
pub use wallet::{TransactionKind, TransactionRecord, WalletAccount};
