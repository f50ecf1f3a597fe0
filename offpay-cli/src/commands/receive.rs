//! Receive command - phase 2 of the offline transfer

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use super::{get_context, require_session};
use crate::output;

pub fn run(payload: Option<&str>, file: Option<&Path>) -> Result<()> {
    // Payload from: argument, file, or stdin
    let text = if let Some(payload) = payload {
        payload.to_string()
    } else if let Some(path) = file {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read payload file: {:?}", path))?
    } else {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read payload from stdin")?;
        buffer
    };
    let text = text.trim();
    if text.is_empty() {
        anyhow::bail!("No payload provided. Pass it as an argument, via --file, or pipe it in.");
    }

    let ctx = get_context()?;
    require_session(&ctx)?;

    let parsed = ctx.transfer_service.parse_payload(text)?;
    let wallet = ctx.transfer_service.apply_transfer(&parsed)?;

    output::success(&format!(
        "Received {} from {}",
        parsed.amount, parsed.from_user_id
    ));
    println!("New balance: {}", wallet.balance);
    Ok(())
}
