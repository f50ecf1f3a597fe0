//! OffPay CLI - offline wallet in your terminal

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

mod commands;
mod output;

use commands::{history, id, receive, reset, send, session, setup, status, withdraw};

/// OffPay - offline wallet in your terminal
#[derive(Parser)]
#[command(name = "offpay", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the device's account (mobile number + PIN)
    Setup,

    /// Log in with your PIN
    Login,

    /// Log out, keeping the enrollment
    Logout,

    /// Forget the account entirely (forgot-PIN recovery)
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Show wallet balance and session state
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show this wallet's identity payload (for the sender to scan)
    Id,

    /// Send money: debits your balance and prints the payment payload
    Send {
        /// Receiver's wallet ID (from their identity payload)
        to: String,
        /// Amount to send
        amount: Decimal,
    },

    /// Receive money: apply a scanned payment payload
    Receive {
        /// Payload JSON text
        payload: Option<String>,
        /// Read payload from file
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Show transaction history
    History {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Withdraw to an external payout destination (simulated)
    Withdraw {
        /// Amount to withdraw
        amount: Decimal,
        /// Payout destination, e.g. name@bank
        #[arg(long)]
        to: String,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Setup => setup::run(),
        Commands::Login => session::login(),
        Commands::Logout => session::logout(),
        Commands::Reset { yes } => reset::run(yes),
        Commands::Status { json } => status::run(json),
        Commands::Id => id::run(),
        Commands::Send { to, amount } => send::run(&to, amount),
        Commands::Receive { payload, file } => receive::run(payload.as_deref(), file.as_deref()),
        Commands::History { json } => history::run(json),
        Commands::Withdraw { amount, to } => withdraw::run(amount, &to),
    }
}
