//! Setup command - enroll this device

use anyhow::Result;
use colored::Colorize;
use dialoguer::{Input, Password};

use offpay_core::domain::auth::verify_otp;

use super::get_context;
use crate::output;

pub fn run() -> Result<()> {
    let ctx = get_context()?;

    if ctx.auth_service.is_returning()? {
        anyhow::bail!("An account is already enrolled. Use 'offpay login', or 'offpay reset' to start over.");
    }

    let mobile: String = Input::new()
        .with_prompt("Mobile number")
        .interact_text()?;

    // Demo OTP step: no network, the code is fixed
    let otp: String = Input::new()
        .with_prompt("OTP (demo: 123456)")
        .interact_text()?;
    if !verify_otp(&otp) {
        anyhow::bail!("Incorrect OTP");
    }

    let pin = Password::new()
        .with_prompt("Choose a 4-digit PIN")
        .with_confirmation("Confirm PIN", "PINs do not match")
        .interact()?;

    let account = ctx.auth_service.enroll(&mobile, &pin)?;
    let wallet = ctx.ledger_service.load()?;

    output::success(&format!("{} Account created", "Success!".green()));
    println!("Wallet ID: {}", wallet.user_id.bold());
    println!("Mobile:    {}", account.masked_principal());
    println!("Balance:   {}", wallet.balance);
    Ok(())
}
