//! Id command - print this wallet's identity payload

use anyhow::Result;

use super::get_context;
use crate::output;

pub fn run() -> Result<()> {
    let ctx = get_context()?;
    let identity = ctx.transfer_service.identity()?;

    output::info("Show this to the sender (it is what your receive QR encodes):");
    println!("{}", identity.encode()?);
    Ok(())
}
