// src/lib.rs
//! odfpick - a terminal browser for OpenDocument files.
//!
//! Lists the folders and ODF documents below a root directory and hands the
//! chosen document to an external viewer.

pub mod app;
pub mod config;
pub mod fs;
pub mod logging;
pub mod ui;
pub mod viewer;
