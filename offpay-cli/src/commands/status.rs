//! Status command - wallet balance and session state

use anyhow::Result;
use colored::Colorize;
use rust_decimal::Decimal;
use serde::Serialize;

use super::get_context;

#[derive(Serialize)]
struct StatusSummary {
    wallet_id: String,
    balance: Decimal,
    transactions: usize,
    enrolled: bool,
    principal: Option<String>,
    session_valid: bool,
    locked_out_secs: Option<i64>,
}

pub fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;

    let wallet = ctx.ledger_service.load()?;
    let account = ctx.auth_service.account()?;
    let session_valid = ctx.auth_service.validate_session()?;
    let locked_out_secs = ctx
        .auth_service
        .lockout_remaining()?
        .map(|d| d.num_seconds().max(1));

    let summary = StatusSummary {
        wallet_id: wallet.user_id.clone(),
        balance: wallet.balance,
        transactions: wallet.transactions.len(),
        enrolled: account.is_some(),
        principal: account.as_ref().map(|a| a.masked_principal()),
        session_valid,
        locked_out_secs,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{}", "OffPay Wallet".bold());
    println!();
    println!("Wallet ID:    {}", summary.wallet_id);
    println!("Balance:      {}", summary.balance.to_string().bold());
    println!("Transactions: {}", summary.transactions);
    println!();
    match (&summary.principal, summary.enrolled) {
        (Some(principal), _) => {
            println!("Account:      {}", principal);
            if let Some(secs) = summary.locked_out_secs {
                println!("Session:      {} (locked for {}s)", "locked out".red(), secs);
            } else if summary.session_valid {
                println!("Session:      {}", "active".green());
            } else {
                println!("Session:      {} (run 'offpay login')", "expired".yellow());
            }
        }
        (None, _) => println!("Account:      not enrolled (run 'offpay setup')"),
    }
    Ok(())
}
