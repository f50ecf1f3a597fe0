//! Integration tests for the JSON file store
//!
//! These run against a real temp directory: documents must survive a
//! close-and-reopen, and documents written by earlier app versions must
//! still load.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;

use offpay_core::adapters::{FileDeviceIdentity, JsonFileStore, SystemClock};
use offpay_core::config::Config;
use offpay_core::ports::{Clock, DeviceIdentity, Store};
use offpay_core::OffPayContext;
use tempfile::TempDir;

fn file_context(dir: &TempDir) -> OffPayContext {
    let store: Arc<dyn Store> = Arc::new(JsonFileStore::open(dir.path()).unwrap());
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let device: Arc<dyn DeviceIdentity> = Arc::new(FileDeviceIdentity::new(dir.path()));
    OffPayContext::with_parts(store, clock, device, Config::default())
}

#[test]
fn test_wallet_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let user_id;
    {
        let ctx = file_context(&dir);
        let initiated = ctx
            .transfer_service
            .initiate_transfer("USR_B", Decimal::new(200, 0))
            .unwrap();
        user_id = initiated.wallet.user_id.clone();
    }

    let ctx = file_context(&dir);
    let wallet = ctx.ledger_service.load().unwrap();
    assert_eq!(wallet.user_id, user_id);
    assert_eq!(wallet.balance, Decimal::new(300, 0));
    assert_eq!(wallet.transactions.len(), 1);
}

#[test]
fn test_auth_survives_reopen_with_session() {
    let dir = TempDir::new().unwrap();
    {
        let ctx = file_context(&dir);
        ctx.auth_service.enroll("9876543210", "4826").unwrap();
    }

    // Same directory, same device id file: the session is still valid
    let ctx = file_context(&dir);
    assert!(ctx.auth_service.validate_session().unwrap());
    let account = ctx.auth_service.account().unwrap().unwrap();
    assert_eq!(account.masked_principal(), "******3210");
}

#[test]
fn test_legacy_wallet_document_loads() {
    let dir = TempDir::new().unwrap();
    // A document from before processedTransfers existed
    std::fs::write(
        dir.path().join("wallet.json"),
        r#"{
            "userId": "USR_LEGACY01",
            "balance": "250",
            "payoutDestination": "old@bank",
            "transactions": []
        }"#,
    )
    .unwrap();

    let ctx = file_context(&dir);
    let wallet = ctx.ledger_service.load().unwrap();
    assert_eq!(wallet.user_id, "USR_LEGACY01");
    assert_eq!(wallet.balance, Decimal::new(250, 0));
    assert!(wallet.processed_transfers.is_empty());

    // And the guard starts working for it immediately
    let payload_text = format!(
        r#"{{"type":"PAYMENT","tx_id":"TX_NEW00001","from":"USR_A","to":"USR_LEGACY01","amount":10,"timestamp":{}}}"#,
        Utc::now().timestamp_millis()
    );
    let payload = ctx.transfer_service.parse_payload(&payload_text).unwrap();
    ctx.transfer_service.apply_transfer(&payload).unwrap();
    assert!(ctx.transfer_service.apply_transfer(&payload).is_err());
}

#[test]
fn test_second_open_of_same_store_is_rejected() {
    let dir = TempDir::new().unwrap();
    let _first = JsonFileStore::open(dir.path()).unwrap();
    assert!(JsonFileStore::open(dir.path()).is_err());
}
