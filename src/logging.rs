// src/logging.rs
//! File logging. The terminal belongs to the UI, so nothing is logged unless
//! a log file is configured.

use std::{fs::OpenOptions, sync::Mutex};

use anyhow::{Context, Result, anyhow};

use crate::config::Config;

/// Install the global subscriber when `--log-file` was given.
pub fn init(config: &Config) -> Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|error| anyhow!("cannot install logger: {error}"))
}
