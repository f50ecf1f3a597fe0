//! Wallet domain model
//!
//! One `WalletAccount` per device, persisted as a single JSON document.
//! Field names are fixed for compatibility with records written by earlier
//! app versions, including documents that predate `processedTransfers`.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Direction of a ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Sent,
    Received,
    Withdrawn,
}

/// A single immutable ledger entry
///
/// Records are created only as a side effect of a ledger mutation and are
/// never reordered or deleted once written.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub id: String,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub counterparty_id: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    /// Only set for `Withdrawn` entries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payout_destination: Option<String>,
}

impl TransactionRecord {
    pub(crate) fn new(
        kind: TransactionKind,
        amount: Decimal,
        counterparty_id: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            amount,
            counterparty_id: counterparty_id.into(),
            timestamp,
            payout_destination: None,
        }
    }
}

/// The device's wallet: balance, history, and the double-spend guard
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletAccount {
    pub user_id: String,
    pub balance: Decimal,
    /// Last-used external payout identifier (free-form)
    #[serde(default)]
    pub payout_destination: String,
    /// Newest first; entries are only ever inserted at the head
    #[serde(default)]
    pub transactions: Vec<TransactionRecord>,
    /// Transfer IDs already credited to this wallet. Grows monotonically;
    /// legacy documents without this field default to empty.
    #[serde(default)]
    pub processed_transfers: HashSet<String>,
}

impl WalletAccount {
    /// Create a fresh wallet with the configured starting balance
    pub fn new(starting_balance: Decimal) -> Self {
        Self {
            user_id: generate_user_id(),
            balance: starting_balance,
            payout_destination: String::new(),
            transactions: Vec::new(),
            processed_transfers: HashSet::new(),
        }
    }

    /// Prepend a record so the history stays newest-first
    pub(crate) fn push_record(&mut self, record: TransactionRecord) {
        self.transactions.insert(0, record);
    }
}

/// Short uppercase fragment of a fresh UUID (first hyphen group)
fn short_uuid() -> String {
    let id = Uuid::new_v4().to_string();
    id.split('-').next().unwrap_or_default().to_uppercase()
}

/// Generate a wallet user ID, e.g. `USR_3F2A91BC`
pub fn generate_user_id() -> String {
    format!("USR_{}", short_uuid())
}

/// Generate a transfer ID, e.g. `TX_5D0E77A1`
pub fn generate_transfer_id() -> String {
    format!("TX_{}", short_uuid())
}
