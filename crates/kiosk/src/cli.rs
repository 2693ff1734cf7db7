// src/cli.rs
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use formflow::PaymentMethod;

#[derive(Debug, Parser)]
#[command(
    name = "kiosk",
    version,
    about = "Drive the login, payment and profile screens headlessly"
)]
pub struct Cli {
    /// Extra configuration file, applied after the user config directory
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Debug, Subcommand)]
pub enum Cmd {
    /// Type credentials and sign in
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Toggle password visibility before submitting
        #[arg(long)]
        show_password: bool,
    },
    /// Enter an amount and pay
    Pay {
        /// Raw amount as typed, e.g. "13,50"
        #[arg(long, allow_hyphen_values = true)]
        amount: String,
        #[arg(long, default_value_t = PaymentMethod::Card)]
        method: PaymentMethod,
    },
    /// Load the account summary
    Profile {
        /// Make every load fail
        #[arg(long)]
        fail: bool,
        /// How many times to retry after an error
        #[arg(long, default_value_t = 0)]
        retries: u32,
    },
    /// Print the resolved flow settings as JSON
    Settings,
}
