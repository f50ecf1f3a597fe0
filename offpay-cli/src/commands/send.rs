//! Send command - phase 1 of the offline transfer

use anyhow::Result;
use colored::Colorize;
use rust_decimal::Decimal;

use super::{get_context, require_session};
use crate::output;

pub fn run(to: &str, amount: Decimal) -> Result<()> {
    let ctx = get_context()?;
    require_session(&ctx)?;

    let initiated = ctx.transfer_service.initiate_transfer(to, amount)?;

    output::success(&format!("Payment initiated. New balance: {}", initiated.wallet.balance));
    output::warning(
        "Your balance is already debited. If the receiver never scans this payload, the money is gone.",
    );
    println!();
    println!("{}", "Deliver this payload to the receiver (QR contents):".bold());
    println!("{}", initiated.payload.encode()?);
    Ok(())
}
