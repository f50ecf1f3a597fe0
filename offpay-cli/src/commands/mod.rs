//! CLI command implementations

pub mod history;
pub mod id;
pub mod receive;
pub mod reset;
pub mod send;
pub mod session;
pub mod setup;
pub mod status;
pub mod withdraw;

use std::path::PathBuf;

use anyhow::{Context, Result};
use offpay_core::OffPayContext;

/// Get the offpay directory from environment or default
pub fn get_offpay_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("OFFPAY_DIR") {
        PathBuf::from(dir)
    } else {
        dirs::home_dir()
            .expect("Could not find home directory")
            .join(".offpay")
    }
}

/// Get or create the offpay context
pub fn get_context() -> Result<OffPayContext> {
    let offpay_dir = get_offpay_dir();
    std::fs::create_dir_all(&offpay_dir)
        .with_context(|| format!("Failed to create offpay directory: {:?}", offpay_dir))?;
    OffPayContext::new(&offpay_dir).context("Failed to initialize offpay context")
}

/// Gate a balance-changing command behind a valid session, and extend the
/// session on use (every interaction counts as activity)
pub fn require_session(ctx: &OffPayContext) -> Result<()> {
    ctx.auth_service.require_session()?;
    ctx.auth_service.extend_session()?;
    Ok(())
}
