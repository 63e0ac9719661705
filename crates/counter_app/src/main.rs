mod cli;
mod platform;

use std::path::PathBuf;

use anyhow::bail;
use clap::Parser;
use cli::{Cli, Command};
use counter_logging::{counter_info, counter_warn};
use log::LevelFilter;
use platform::settings::{read_settings, Settings, SETTINGS_FILENAME};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(SETTINGS_FILENAME));
    let loaded = read_settings(&config_path);
    if cli.config.is_some() && matches!(loaded, Ok(None)) {
        bail!("settings file {:?} does not exist", config_path);
    }

    let base = match &loaded {
        Ok(Some(settings)) => settings.clone(),
        _ => Settings::default(),
    };
    let settings = base.with_overrides(&cli);

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    platform::logging::initialize(settings.log_destination, level);
    match loaded {
        Ok(Some(_)) => counter_info!("Loaded settings from {:?}", config_path),
        Ok(None) => {}
        Err(err) => counter_warn!("{}; using defaults", err),
    }

    match &cli.command {
        None | Some(Command::Interactive) => platform::app::run_interactive(&settings),
        Some(Command::Count(args)) => platform::app::run_count(&settings, args),
        Some(Command::Models { filter }) => {
            platform::app::run_models(&settings, filter.as_deref())
        }
    }
}
