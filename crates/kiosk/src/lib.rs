//! Headless driver for the formflow screens.
//!
//! Every subcommand mounts one screen, feeds it the given input, prints each
//! published state to stdout and exits non-zero when the flow does not end in
//! success.

pub mod cli;
pub mod config;
pub mod errors;
pub mod flows;
pub mod logging;
pub mod render;

use std::process::ExitCode;

use color_eyre::Result;
use tracing::info;

use crate::cli::{Cli, Cmd};
use crate::config::Config;
use crate::flows::Verdict;
use crate::render::TextView;

pub async fn run(cli: Cli) -> Result<ExitCode> {
    let config = Config::new(cli.config.as_deref())?;
    crate::config::ensure_data_dir_exists(&config)?;
    let _guard = logging::init(&config)?;

    let mut settings = config.flows.clone();
    settings.validate()?;
    info!(data_dir = %config.data_dir.display(), "kiosk starting");

    let mut view = TextView::default();
    let verdict = match cli.cmd {
        Cmd::Login {
            email,
            password,
            show_password,
        } => flows::login(&settings, &email, &password, show_password, &mut view).await,
        Cmd::Pay { amount, method } => flows::pay(&settings, &amount, method, &mut view).await,
        Cmd::Profile { fail, retries } => {
            settings.profile.fail |= fail;
            flows::profile(&settings, retries, &mut view).await
        }
        Cmd::Settings => {
            println!("{}", serde_json::to_string_pretty(&settings)?);
            Verdict::Completed
        }
    };

    Ok(match verdict {
        Verdict::Completed => ExitCode::SUCCESS,
        Verdict::Failed => ExitCode::FAILURE,
    })
}
