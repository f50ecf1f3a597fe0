//! History command - transaction list

use anyhow::Result;
use offpay_core::TransactionKind;

use super::get_context;
use crate::output;

pub fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let wallet = ctx.ledger_service.load()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&wallet.transactions)?);
        return Ok(());
    }

    if wallet.transactions.is_empty() {
        output::info("No transactions yet.");
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["When", "Kind", "Amount", "Counterparty", "Destination"]);
    for record in &wallet.transactions {
        let signed = match record.kind {
            TransactionKind::Received => format!("+{}", record.amount),
            TransactionKind::Sent | TransactionKind::Withdrawn => format!("-{}", record.amount),
        };
        table.add_row(vec![
            record.timestamp.format("%Y-%m-%d %H:%M").to_string(),
            format!("{:?}", record.kind),
            signed,
            record.counterparty_id.clone(),
            record.payout_destination.clone().unwrap_or_default(),
        ]);
    }
    println!("{}", table);
    println!();
    println!("Balance: {}", wallet.balance);
    Ok(())
}
