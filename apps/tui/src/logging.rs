use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use color_eyre::Result;
use tracing_subscriber::EnvFilter;

fn filter(debug: bool) -> EnvFilter {
    let default = if debug { "debug" } else { "info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Terminal mode logs to a file so the UI is not drawn over.
pub fn init_file(path: &Path, debug: bool) -> Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter(debug))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to initialise logging: {e}"))
}

pub fn init_stderr(debug: bool) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(filter(debug))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to initialise logging: {e}"))
}
