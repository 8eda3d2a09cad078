use std::process::exit;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Command;
use log::{error, info};

use moncord::core::config::Config;
use moncord::core::dispatcher::Dispatcher;

fn main() -> Result<()> {
    moncord::init_logging();

    Command::new("moncord")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Containerized host resource monitor with Discord webhook notifications")
        .get_matches();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("{err}");
            exit(1);
        }
    };

    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let flag = Arc::clone(&shutdown);
        ctrlc::set_handler(move || {
            flag.store(true, Ordering::SeqCst);
        })
        .context("Failed to install shutdown signal handler")?;
    }

    let mut dispatcher = match Dispatcher::new(config, Arc::clone(&shutdown)) {
        Ok(dispatcher) => dispatcher,
        Err(err) => {
            error!("{err}");
            exit(1);
        }
    };

    dispatcher.run()?;
    info!("Moncord stopped");
    Ok(())
}
