//! `libcat` entry point.
//!
//! # Responsibility
//! - Load configuration and start file logging.
//! - Run the catalog walkthrough against stdout.
//!
//! # Invariants
//! - Exits 0 even when individual steps report failures.

use libcat_core::{init_logging, run_demo, AppConfig, BookGateway};
use log::{error, info};

fn main() {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Config Error: {err}; falling back to defaults");
            AppConfig::default()
        }
    };

    if let Err(err) = init_logging(&config.log) {
        eprintln!("Logging disabled: {err}");
    }

    let gateway = BookGateway::new(config.db);
    info!(
        "event=cli_start module=cli status=ok version={} db_path={}",
        libcat_core::core_version(),
        gateway.config().path.display()
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if let Err(err) = run_demo(&gateway, &mut out) {
        error!("event=cli_run module=cli status=error error={err}");
    }
}
