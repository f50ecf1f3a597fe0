//! Transfer service - the two-phase offline payment protocol
//!
//! Phase 1 runs on the sender's device, phase 2 on the receiver's, with no
//! live link between them: the payload travels out of band inside a
//! scannable code. There is no third phase: the sender never learns
//! whether the payload was applied, and the protocol does not verify that a
//! payload really originated from the device named in `from` (no signature;
//! the payload's origin field is trusted as-is).

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::domain::payload::{IdentityPayload, PayloadKind, TransferPayload};
use crate::domain::result::{Error, Result};
use crate::domain::wallet::{generate_transfer_id, TransactionKind, WalletAccount};
use crate::ports::{Clock, Store};
use crate::services::ledger::LedgerService;

pub struct TransferService {
    store: Arc<dyn Store>,
    clock: Arc<dyn Clock>,
    ledger: Arc<LedgerService>,
}

/// Outcome of phase 1, returned to the caller for out-of-band delivery
#[derive(Debug, Clone)]
pub struct InitiatedTransfer {
    pub payload: TransferPayload,
    pub wallet: WalletAccount,
}

impl TransferService {
    pub fn new(store: Arc<dyn Store>, clock: Arc<dyn Clock>, ledger: Arc<LedgerService>) -> Self {
        Self {
            store,
            clock,
            ledger,
        }
    }

    /// Phase 1 (sender): debit the balance and produce the transfer payload
    ///
    /// The debit is committed before this returns and is NOT reversible: if
    /// the payload is never delivered or never scanned there is no
    /// compensating credit. That optimistic debit is a deliberate protocol
    /// trade-off, not an oversight.
    pub fn initiate_transfer(&self, to_user_id: &str, amount: Decimal) -> Result<InitiatedTransfer> {
        if amount <= Decimal::ZERO {
            return Err(Error::InvalidAmount);
        }
        let mut wallet = self.ledger.load()?;
        if to_user_id == wallet.user_id {
            return Err(Error::SelfTransferRejected);
        }

        let transfer_id = generate_transfer_id();
        let created_at = self.clock.now();

        LedgerService::debit_in_place(
            &mut wallet,
            amount,
            to_user_id,
            TransactionKind::Sent,
            created_at,
        )?;
        // Point of no return: once this write lands the debit is final.
        self.store.save_wallet(&wallet)?;
        debug!(transfer_id = %transfer_id, "transfer initiated");

        let payload = TransferPayload {
            kind: PayloadKind::Payment,
            transfer_id,
            from_user_id: wallet.user_id.clone(),
            to_user_id: to_user_id.to_string(),
            amount,
            created_at,
        };
        Ok(InitiatedTransfer { payload, wallet })
    }

    /// Phase 2 (receiver): validate a scanned payload and credit the wallet
    ///
    /// Idempotent: a transfer ID already in the processed set is rejected
    /// with `AlreadyProcessed` and nothing changes. The `Received` record
    /// keeps the payload's original timestamp, not the scan time, so causal
    /// ordering survives in the receiver's history.
    pub fn apply_transfer(&self, payload: &TransferPayload) -> Result<WalletAccount> {
        let mut wallet = self.ledger.load()?;

        if payload.to_user_id != wallet.user_id {
            return Err(Error::NotAddressedToMe);
        }
        if wallet.processed_transfers.contains(&payload.transfer_id) {
            warn!(transfer_id = %payload.transfer_id, "replayed transfer payload rejected");
            return Err(Error::AlreadyProcessed(payload.transfer_id.clone()));
        }
        if payload.kind != PayloadKind::Payment || payload.amount <= Decimal::ZERO {
            return Err(Error::invalid_payload("not a valid payment payload"));
        }

        LedgerService::credit_in_place(
            &mut wallet,
            payload.amount,
            &payload.from_user_id,
            TransactionKind::Received,
            payload.created_at,
            None,
        )?;
        wallet
            .processed_transfers
            .insert(payload.transfer_id.clone());
        // Credit, record, and double-spend guard land in one durable write.
        self.store.save_wallet(&wallet)?;
        debug!(transfer_id = %payload.transfer_id, "transfer applied");
        Ok(wallet)
    }

    /// Parse scanned payload text, failing closed on anything malformed
    pub fn parse_payload(&self, text: &str) -> Result<TransferPayload> {
        TransferPayload::parse(text)
    }

    /// This wallet's identity payload, for display to a sender
    pub fn identity(&self) -> Result<IdentityPayload> {
        let wallet = self.ledger.load()?;
        Ok(IdentityPayload {
            user_id: wallet.user_id,
        })
    }

    /// Legacy single-phase transfer: debits the sender and drops the payload
    ///
    /// Kept only for compatibility with older persisted flows. The receiver
    /// is never credited.
    #[deprecated(note = "use initiate_transfer and deliver the payload to the receiver")]
    pub fn transfer(&self, to_user_id: &str, amount: Decimal) -> Result<WalletAccount> {
        let initiated = self.initiate_transfer(to_user_id, amount)?;
        Ok(initiated.wallet)
    }
}
