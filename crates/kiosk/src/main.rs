use std::process::ExitCode;

use clap::Parser;
use color_eyre::Result;
use kiosk::cli::Cli;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    kiosk::errors::init()?;
    let cli = Cli::parse();
    kiosk::run(cli).await
}
