//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `caa_worker` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Ctrl-C cancellation
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;

use caa_worker::config::Opt;
use caa_worker::initialization::init_logger_with;
use caa_worker::{default_registry, Config, WORKER_NAME};

#[tokio::main]
async fn main() -> Result<()> {
    let opt = Opt::parse();

    init_logger_with(opt.log_level.clone().into(), opt.log_format.clone())
        .context("Failed to initialize logger")?;

    let config = Config::from(&opt);
    let registry = default_registry(&config);

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                log::warn!("Interrupted, cancelling outstanding CAA lookups");
                cancel.cancel();
            }
        });
    }

    let mut all_succeeded = true;
    for target in &opt.targets {
        let result = registry
            .run(WORKER_NAME, target, cancel.clone())
            .await
            .context("CAA analyzer missing from registry")?;
        all_succeeded &= result.success;

        if opt.json {
            println!("{}", result.to_json_value());
            continue;
        }

        for line in registry
            .format(&result)
            .with_context(|| format!("Failed to format CAA result for {target}"))?
        {
            println!("{line}");
        }
        for error in &result.errors {
            eprintln!("  ! {error}");
        }
    }

    if !all_succeeded {
        process::exit(1);
    }
    Ok(())
}
