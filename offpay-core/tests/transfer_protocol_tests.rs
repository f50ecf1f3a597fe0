//! Integration tests for the two-phase offline transfer protocol
//!
//! Each device gets its own context over its own in-memory store; the only
//! thing that ever travels between them is the encoded payload text, exactly
//! like the QR channel in production.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;

use offpay_core::adapters::{FixedDeviceIdentity, ManualClock, MemoryStore};
use offpay_core::config::Config;
use offpay_core::domain::{Error, TransactionKind};
use offpay_core::ports::{Clock, DeviceIdentity, Store};
use offpay_core::OffPayContext;

fn device_context(device_id: &str) -> OffPayContext {
    let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
    let clock: Arc<dyn Clock> = Arc::new(ManualClock::new(Utc::now()));
    let device: Arc<dyn DeviceIdentity> = Arc::new(FixedDeviceIdentity(device_id.to_string()));
    OffPayContext::with_parts(store, clock, device, Config::default())
}

fn amount(n: i64) -> Decimal {
    Decimal::new(n, 0)
}

#[test]
fn test_end_to_end_transfer() {
    let sender = device_context("DEV_SENDER");
    let receiver = device_context("DEV_RECEIVER");
    let receiver_id = receiver.transfer_service.identity().unwrap().user_id;

    // Phase 1 on the sender's device
    let initiated = sender
        .transfer_service
        .initiate_transfer(&receiver_id, amount(200))
        .unwrap();
    assert_eq!(initiated.wallet.balance, amount(300));
    assert_eq!(initiated.wallet.transactions.len(), 1);
    assert_eq!(initiated.wallet.transactions[0].kind, TransactionKind::Sent);
    assert_eq!(initiated.wallet.transactions[0].counterparty_id, receiver_id);

    // The payload crosses out of band as text
    let encoded = initiated.payload.encode().unwrap();

    // Phase 2 on the receiver's device
    let payload = receiver.transfer_service.parse_payload(&encoded).unwrap();
    let wallet = receiver.transfer_service.apply_transfer(&payload).unwrap();
    assert_eq!(wallet.balance, amount(700));
    assert_eq!(wallet.transactions.len(), 1);
    let record = &wallet.transactions[0];
    assert_eq!(record.kind, TransactionKind::Received);
    assert_eq!(record.counterparty_id, initiated.payload.from_user_id);
    // The receiver keeps the payload's original timestamp, not the scan time
    assert_eq!(record.timestamp, initiated.payload.created_at);
    assert!(wallet.processed_transfers.contains(&payload.transfer_id));
}

#[test]
fn test_apply_is_idempotent() {
    let sender = device_context("DEV_SENDER");
    let receiver = device_context("DEV_RECEIVER");
    let receiver_id = receiver.transfer_service.identity().unwrap().user_id;

    let payload = sender
        .transfer_service
        .initiate_transfer(&receiver_id, amount(200))
        .unwrap()
        .payload;

    let after_first = receiver.transfer_service.apply_transfer(&payload).unwrap();
    assert_eq!(after_first.balance, amount(700));

    // Scanning the same payload again must not double-credit
    let err = receiver
        .transfer_service
        .apply_transfer(&payload)
        .unwrap_err();
    assert!(matches!(err, Error::AlreadyProcessed(ref id) if *id == payload.transfer_id));

    let wallet = receiver.ledger_service.load().unwrap();
    assert_eq!(wallet.balance, amount(700));
    assert_eq!(wallet.transactions.len(), 1);
}

#[test]
fn test_concrete_scenario_from_demo() {
    // Sender at 500 sends 200; receiver at 500 + prior spend of 400 sits at 100
    let sender = device_context("DEV_A");
    let receiver = device_context("DEV_B");
    let receiver_id = receiver.transfer_service.identity().unwrap().user_id;

    receiver
        .transfer_service
        .initiate_transfer("USR_ELSEWHERE", amount(400))
        .unwrap();
    assert_eq!(receiver.ledger_service.load().unwrap().balance, amount(100));

    let initiated = sender
        .transfer_service
        .initiate_transfer(&receiver_id, amount(200))
        .unwrap();
    assert_eq!(initiated.wallet.balance, amount(300));
    assert_eq!(initiated.payload.amount, amount(200));
    assert_eq!(initiated.payload.to_user_id, receiver_id);

    let wallet = receiver
        .transfer_service
        .apply_transfer(&initiated.payload)
        .unwrap();
    assert_eq!(wallet.balance, amount(300));

    // Re-applying is rejected and the balance stays put
    assert!(receiver
        .transfer_service
        .apply_transfer(&initiated.payload)
        .is_err());
    assert_eq!(receiver.ledger_service.load().unwrap().balance, amount(300));
}

#[test]
fn test_misaddressed_payload_never_mutates() {
    let sender = device_context("DEV_A");
    let bystander = device_context("DEV_C");

    let payload = sender
        .transfer_service
        .initiate_transfer("USR_INTENDED", amount(50))
        .unwrap()
        .payload;

    let err = bystander
        .transfer_service
        .apply_transfer(&payload)
        .unwrap_err();
    assert!(matches!(err, Error::NotAddressedToMe));

    let wallet = bystander.ledger_service.load().unwrap();
    assert_eq!(wallet.balance, amount(500));
    assert!(wallet.transactions.is_empty());
    assert!(wallet.processed_transfers.is_empty());
}

#[test]
fn test_balance_equals_initial_plus_signed_history() {
    let ctx = device_context("DEV_A");
    let peer = device_context("DEV_B");
    let my_id = ctx.transfer_service.identity().unwrap().user_id;

    ctx.transfer_service
        .initiate_transfer("USR_X", amount(120))
        .unwrap();
    let incoming = peer
        .transfer_service
        .initiate_transfer(&my_id, amount(75))
        .unwrap()
        .payload;
    ctx.transfer_service.apply_transfer(&incoming).unwrap();
    ctx.ledger_service
        .withdraw(amount(30), "me@bank")
        .unwrap();

    let wallet = ctx.ledger_service.load().unwrap();
    let signed_sum: Decimal = wallet
        .transactions
        .iter()
        .map(|t| match t.kind {
            TransactionKind::Received => t.amount,
            TransactionKind::Sent | TransactionKind::Withdrawn => -t.amount,
        })
        .sum();
    assert_eq!(wallet.balance, amount(500) + signed_sum);
    assert!(wallet.balance >= Decimal::ZERO);
}

#[test]
fn test_legacy_single_phase_transfer_only_debits() {
    let ctx = device_context("DEV_A");
    #[allow(deprecated)]
    let wallet = ctx.transfer_service.transfer("USR_B", amount(100)).unwrap();
    assert_eq!(wallet.balance, amount(400));
    assert_eq!(wallet.transactions[0].kind, TransactionKind::Sent);
}

#[test]
fn test_tampered_payload_text_fails_closed() {
    let ctx = device_context("DEV_A");
    for text in [
        "",
        "not json",
        r#"{"type":"PAYMENT"}"#,
        r#"{"type":"IDENTITY","tx_id":"TX_1","from":"a","to":"b","amount":5,"timestamp":0}"#,
        r#"{"type":"PAYMENT","tx_id":"TX_1","from":"a","to":"b","amount":-5,"timestamp":0}"#,
    ] {
        assert!(
            matches!(
                ctx.transfer_service.parse_payload(text),
                Err(Error::InvalidPayload(_))
            ),
            "expected InvalidPayload for {:?}",
            text
        );
    }
}
