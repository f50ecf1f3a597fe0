//! QR payload wire types
//!
//! Two artifacts cross between devices, both as JSON text inside a scannable
//! code: the transfer payload carrying a proposed money movement, and the
//! identity payload a receiver shows so a sender can capture their wallet ID.
//! Field names and types are fixed for compatibility.
//!
//! Parsing fails closed: a wrong `type` tag, a missing field, or a
//! non-positive amount is `InvalidPayload`, never silently ignored.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::result::{Error, Result};

/// Discriminator tag on the transfer payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayloadKind {
    #[serde(rename = "PAYMENT")]
    Payment,
}

/// The out-of-band transfer artifact
///
/// Created by the sender's `initiate_transfer`, consumed exactly once by a
/// receiver's `apply_transfer`. Not persisted by the sender beyond creation;
/// after consumption it survives only as an entry in the receiver's
/// processed-transfer set and a `TransactionRecord` on both sides.
///
/// Wire format:
/// `{ "type": "PAYMENT", "tx_id", "from", "to", "amount": number>0,
///    "timestamp": ms-epoch }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferPayload {
    #[serde(rename = "type")]
    pub kind: PayloadKind,
    #[serde(rename = "tx_id")]
    pub transfer_id: String,
    #[serde(rename = "from")]
    pub from_user_id: String,
    #[serde(rename = "to")]
    pub to_user_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(rename = "timestamp", with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl TransferPayload {
    /// Parse a scanned payload, validating the tag and amount
    pub fn parse(text: &str) -> Result<Self> {
        let payload: TransferPayload =
            serde_json::from_str(text).map_err(|e| Error::invalid_payload(e.to_string()))?;
        if payload.amount <= Decimal::ZERO {
            return Err(Error::invalid_payload("amount must be positive"));
        }
        Ok(payload)
    }

    /// Serialize for embedding in a scannable code
    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// The receiver's own identifier, shown for a sender to capture
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityPayload {
    pub user_id: String,
}

impl IdentityPayload {
    pub fn parse(text: &str) -> Result<Self> {
        let payload: IdentityPayload =
            serde_json::from_str(text).map_err(|e| Error::invalid_payload(e.to_string()))?;
        if payload.user_id.is_empty() {
            return Err(Error::invalid_payload("empty user_id"));
        }
        Ok(payload)
    }

    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
