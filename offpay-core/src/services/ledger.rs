//! Ledger service - balance mutation and transaction history
//!
//! Every operation reads, mutates, and persists the single wallet document
//! as one unit. `credit` and `debit` do no duplicate checking; idempotency
//! is the caller's responsibility (the transfer protocol keys it off the
//! processed-transfer set).

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::debug;

use crate::config::Config;
use crate::domain::result::{Error, Result};
use crate::domain::wallet::{TransactionKind, TransactionRecord, WalletAccount};
use crate::ports::{Clock, Store};

/// Counterparty recorded on withdrawal entries
const PAYOUT_COUNTERPARTY: &str = "PAYOUT";

pub struct LedgerService {
    store: Arc<dyn Store>,
    clock: Arc<dyn Clock>,
    config: Config,
}

impl LedgerService {
    pub fn new(store: Arc<dyn Store>, clock: Arc<dyn Clock>, config: Config) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }

    /// Return the wallet, creating and persisting a fresh one on first use
    ///
    /// Idempotent after the first call.
    pub fn load(&self) -> Result<WalletAccount> {
        if let Some(wallet) = self.store.load_wallet()? {
            return Ok(wallet);
        }
        let wallet = WalletAccount::new(self.config.starting_balance);
        self.store.save_wallet(&wallet)?;
        debug!(user_id = %wallet.user_id, "created new wallet");
        Ok(wallet)
    }

    /// Add `amount` to the balance and prepend the matching record
    pub fn credit(
        &self,
        amount: Decimal,
        counterparty_id: &str,
        kind: TransactionKind,
        timestamp: DateTime<Utc>,
        payout_destination: Option<&str>,
    ) -> Result<WalletAccount> {
        let mut wallet = self.load()?;
        Self::credit_in_place(
            &mut wallet,
            amount,
            counterparty_id,
            kind,
            timestamp,
            payout_destination,
        )?;
        self.store.save_wallet(&wallet)?;
        Ok(wallet)
    }

    /// Subtract `amount` from the balance and prepend the matching record
    pub fn debit(
        &self,
        amount: Decimal,
        counterparty_id: &str,
        kind: TransactionKind,
        timestamp: DateTime<Utc>,
    ) -> Result<WalletAccount> {
        let mut wallet = self.load()?;
        Self::debit_in_place(&mut wallet, amount, counterparty_id, kind, timestamp)?;
        self.store.save_wallet(&wallet)?;
        Ok(wallet)
    }

    /// Simulated payout to an external network
    ///
    /// Only the ledger side effect is real: the balance drops, the payout
    /// destination is remembered, and a `Withdrawn` record is appended. The
    /// destination must look like an external payout handle (contain `@`).
    pub fn withdraw(&self, amount: Decimal, destination: &str) -> Result<WalletAccount> {
        if !destination.contains('@') {
            return Err(Error::invalid_payload("invalid payout destination"));
        }
        let mut wallet = self.load()?;
        let timestamp = self.clock.now();
        Self::debit_in_place(
            &mut wallet,
            amount,
            PAYOUT_COUNTERPARTY,
            TransactionKind::Withdrawn,
            timestamp,
        )?;
        wallet.payout_destination = destination.to_string();
        if let Some(record) = wallet.transactions.first_mut() {
            record.payout_destination = Some(destination.to_string());
        }
        self.store.save_wallet(&wallet)?;
        debug!("withdrawal recorded");
        Ok(wallet)
    }

    /// Validate and apply a credit without persisting
    ///
    /// Used by the transfer protocol so the credit, the record, and the
    /// processed-transfer entry land in one durable write.
    pub(crate) fn credit_in_place(
        wallet: &mut WalletAccount,
        amount: Decimal,
        counterparty_id: &str,
        kind: TransactionKind,
        timestamp: DateTime<Utc>,
        payout_destination: Option<&str>,
    ) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(Error::InvalidAmount);
        }
        wallet.balance += amount;
        let mut record = TransactionRecord::new(kind, amount, counterparty_id, timestamp);
        record.payout_destination = payout_destination.map(str::to_string);
        wallet.push_record(record);
        Ok(())
    }

    /// Validate and apply a debit without persisting
    pub(crate) fn debit_in_place(
        wallet: &mut WalletAccount,
        amount: Decimal,
        counterparty_id: &str,
        kind: TransactionKind,
        timestamp: DateTime<Utc>,
    ) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(Error::InvalidAmount);
        }
        if amount > wallet.balance {
            return Err(Error::InsufficientBalance {
                available: wallet.balance,
                requested: amount,
            });
        }
        wallet.balance -= amount;
        wallet.push_record(TransactionRecord::new(kind, amount, counterparty_id, timestamp));
        Ok(())
    }
}
