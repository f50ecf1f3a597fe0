//! Login and logout commands

use anyhow::Result;
use dialoguer::Password;

use super::get_context;
use crate::output;

pub fn login() -> Result<()> {
    let ctx = get_context()?;

    if !ctx.auth_service.is_returning()? {
        anyhow::bail!("No account on this device. Run 'offpay setup' first.");
    }
    if let Some(remaining) = ctx.auth_service.lockout_remaining()? {
        anyhow::bail!(
            "Account locked. Try again in {} second(s).",
            remaining.num_seconds().max(1)
        );
    }

    let pin = Password::new().with_prompt("PIN").interact()?;
    let account = ctx.auth_service.authenticate(&pin)?;

    output::success("Login successful");
    println!("Welcome back, {}", account.masked_principal());
    Ok(())
}

pub fn logout() -> Result<()> {
    let ctx = get_context()?;
    ctx.auth_service.end_session()?;
    output::info("Logged out. Your account and balance are still on this device.");
    Ok(())
}
