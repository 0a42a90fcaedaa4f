// src/fs/mod.rs
//! Filesystem module - handles directory navigation and ODF detection.

pub mod detection;
pub mod navigator;

// Re-export commonly used types
pub use detection::{
    DocumentDetector, OdfDetector, OdfKind, ProbeError, Signature, VIEWER_MIME, is_odf_document,
    probe,
};
pub use navigator::{Entry, EntryKind, Listing, NavigationResult, Navigator, SortOrder};
