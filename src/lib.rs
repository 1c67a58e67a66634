pub mod cli;
pub mod config;
pub mod crm;
pub mod error;
pub mod input;
pub mod io_utils;
pub mod name;
pub mod profile;
pub mod reconcile;
pub mod stats;
pub mod sync;

use std::{env, sync::OnceLock};

use anyhow::Result;
use clap::Parser;
use log::{LevelFilter, debug};

use crate::cli::Cli;

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging(verbose: bool) {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            let level = if verbose {
                LevelFilter::Debug
            } else {
                LevelFilter::Info
            };
            builder
                .filter_module("csv2hatchbuck", level)
                .filter_module("reqwest", LevelFilter::Warn);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    debug!("starting with arguments: {cli:?}");
    sync::execute(&cli)?;
    Ok(())
}
