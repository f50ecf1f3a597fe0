//! OffPay Core - business logic for the offline wallet
//!
//! This crate implements the core domain logic following hexagonal architecture:
//!
//! - **domain**: Core business entities (WalletAccount, AuthAccount, payloads)
//! - **ports**: Trait definitions for external dependencies (Store, Clock, DeviceIdentity)
//! - **services**: Business logic orchestration (ledger, transfer protocol, auth)
//! - **adapters**: Concrete implementations (JSON file store, system clock, test doubles)
//!
//! The presentation layer, the QR transport, and real-money settlement are
//! all external: this crate only ever sees already-decoded payload text and
//! a durable store.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use adapters::{FileDeviceIdentity, JsonFileStore, SystemClock};
use config::Config;
use ports::{Clock, DeviceIdentity, Store};
use services::{AuthService, LedgerService, TransferService};

// Re-export commonly used types at crate root
pub use domain::{
    AuthAccount, Error, IdentityPayload, OperationResult, TransactionKind, TransactionRecord,
    TransferPayload, WalletAccount,
};
pub use services::InitiatedTransfer;

/// Main context for OffPay operations
///
/// This is the primary entry point for all business logic. It holds the
/// store, configuration, and the three services.
pub struct OffPayContext {
    pub config: Config,
    pub ledger_service: Arc<LedgerService>,
    pub transfer_service: TransferService,
    pub auth_service: AuthService,
}

impl OffPayContext {
    /// Create a context over the file store in `data_dir`
    pub fn new(data_dir: &Path) -> Result<Self> {
        let config = Config::load(data_dir)?;
        let store: Arc<dyn Store> = Arc::new(JsonFileStore::open(data_dir)?);
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let device: Arc<dyn DeviceIdentity> = Arc::new(FileDeviceIdentity::new(data_dir));
        Ok(Self::with_parts(store, clock, device, config))
    }

    /// Create a context from explicit ports (in-memory stores, manual clocks)
    pub fn with_parts(
        store: Arc<dyn Store>,
        clock: Arc<dyn Clock>,
        device: Arc<dyn DeviceIdentity>,
        config: Config,
    ) -> Self {
        let ledger_service = Arc::new(LedgerService::new(
            Arc::clone(&store),
            Arc::clone(&clock),
            config.clone(),
        ));
        let transfer_service = TransferService::new(
            Arc::clone(&store),
            Arc::clone(&clock),
            Arc::clone(&ledger_service),
        );
        let auth_service = AuthService::new(store, clock, device, config.clone());

        Self {
            config,
            ledger_service,
            transfer_service,
            auth_service,
        }
    }
}
