// src/viewer.rs
//! Hands documents to an external viewer application.

use std::{
    cell::RefCell,
    io,
    path::Path,
    process::{Child, Command, Stdio},
};

use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("viewer command is empty")]
    EmptyCommand,
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
}

/// Opens a document in whatever application the host provides.
#[cfg_attr(test, mockall::automock)]
pub trait ViewerLauncher {
    fn open(&self, path: &Path, mime: &str) -> Result<(), LaunchError>;
}

/// Launches a program with the document path as its last argument.
///
/// Spawned viewers are kept until they exit so they can be reaped.
#[derive(Debug)]
pub struct SystemViewer {
    program: String,
    args: Vec<String>,
    children: RefCell<Vec<Child>>,
}

impl SystemViewer {
    /// The desktop's default opener for the current platform.
    pub fn platform_default() -> Self {
        if cfg!(target_os = "macos") {
            Self::new("open", Vec::new())
        } else if cfg!(windows) {
            // The empty argument is the window title `start` expects first.
            Self::new("cmd", vec!["/C".into(), "start".into(), String::new()])
        } else {
            Self::new("xdg-open", Vec::new())
        }
    }

    /// Parse a whitespace-separated command line such as `libreoffice --view`.
    pub fn from_command_line(command: &str) -> Result<Self, LaunchError> {
        let mut words = command.split_whitespace().map(str::to_string);
        let program = words.next().ok_or(LaunchError::EmptyCommand)?;
        Ok(Self::new(program, words.collect()))
    }

    fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            children: RefCell::new(Vec::new()),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Number of spawned viewers not yet known to have exited.
    pub fn running(&self) -> usize {
        self.children.borrow().len()
    }

    /// Collect the exit status of every viewer that has finished.
    pub fn reap_finished(&self) {
        self.children.borrow_mut().retain_mut(|child| match child.try_wait() {
            Ok(None) => true,
            Ok(Some(status)) => {
                debug!(pid = child.id(), %status, "viewer exited");
                false
            }
            Err(error) => {
                debug!(pid = child.id(), %error, "cannot query viewer, dropping it");
                false
            }
        });
    }
}

impl Drop for SystemViewer {
    fn drop(&mut self) {
        self.reap_finished();
        let running = self.running();
        if running > 0 {
            debug!(running, "viewers still open at exit");
        }
    }
}

impl ViewerLauncher for SystemViewer {
    fn open(&self, path: &Path, mime: &str) -> Result<(), LaunchError> {
        self.reap_finished();

        let child = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| LaunchError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        info!(
            pid = child.id(),
            program = %self.program,
            path = %path.display(),
            mime,
            "viewer launched"
        );
        self.children.borrow_mut().push(child);
        Ok(())
    }
}
