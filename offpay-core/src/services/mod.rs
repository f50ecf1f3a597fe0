//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. Each one treats
//! a whole operation as a critical section over its document; callers must
//! not run two mutating operations concurrently against the same store.

mod auth;
mod ledger;
mod transfer;

pub use auth::AuthService;
pub use ledger::LedgerService;
pub use transfer::{InitiatedTransfer, TransferService};
