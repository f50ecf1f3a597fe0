//! Withdraw command - simulated payout to an external destination

use anyhow::Result;
use rust_decimal::Decimal;

use super::{get_context, require_session};
use crate::output;

pub fn run(amount: Decimal, to: &str) -> Result<()> {
    let ctx = get_context()?;
    require_session(&ctx)?;

    let wallet = ctx.ledger_service.withdraw(amount, to)?;

    output::success(&format!("{} sent to {} (demo)", amount, to));
    println!("New balance: {}", wallet.balance);
    Ok(())
}
