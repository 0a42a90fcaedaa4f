// src/config/mod.rs
//! Command-line configuration.

use std::{env, path::PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::Level;

use crate::{fs::SortOrder, viewer::SystemViewer};

/// Browse a directory tree for OpenDocument files and open them in a viewer.
#[derive(Debug, Parser)]
#[command(name = "odfpick", version, about)]
pub struct Config {
    /// Directory to browse [default: home directory]
    pub root: Option<PathBuf>,

    /// Order of listed entries
    #[arg(long, value_enum, default_value_t = SortOrder::Name)]
    pub order: SortOrder,

    /// Command used to open documents instead of the desktop default
    #[arg(long, value_name = "COMMAND")]
    pub viewer: Option<String>,

    /// Append log output to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Most verbose level written to the log file
    #[arg(long, value_name = "LEVEL", default_value_t = Level::INFO)]
    pub log_level: Level,
}

impl Config {
    /// The browse root as an absolute directory path.
    pub fn resolve_root(&self) -> Result<PathBuf> {
        let root = match &self.root {
            Some(root) => root.clone(),
            None => default_root()?,
        };
        let root = root
            .canonicalize()
            .with_context(|| format!("cannot resolve root {}", root.display()))?;
        if !root.is_dir() {
            bail!("{} is not a directory", root.display());
        }
        Ok(root)
    }

    /// The configured viewer, or the platform opener when none is set.
    pub fn viewer(&self) -> Result<SystemViewer> {
        match &self.viewer {
            Some(command) => SystemViewer::from_command_line(command)
                .with_context(|| format!("invalid viewer command {command:?}")),
            None => Ok(SystemViewer::platform_default()),
        }
    }
}

fn default_root() -> Result<PathBuf> {
    match dirs::home_dir() {
        Some(home) => Ok(home),
        None => env::current_dir().context("no home directory and no current directory"),
    }
}
