//! Reset command - discard the enrollment (forgot PIN)

use anyhow::Result;
use dialoguer::Confirm;

use super::get_context;
use crate::output;

pub fn run(yes: bool) -> Result<()> {
    let ctx = get_context()?;

    if !ctx.auth_service.is_returning()? {
        output::info("No account to reset.");
        return Ok(());
    }

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt("This permanently deletes the account enrollment on this device. Continue?")
            .default(false)
            .interact()?;
        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    ctx.auth_service.reset_enrollment()?;
    output::warning("Enrollment deleted. Run 'offpay setup' to create a new account.");
    Ok(())
}
