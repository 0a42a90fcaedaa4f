// src/ui/icons.rs
//! Icon mappings for listed entries.

use crate::fs::{EntryKind, OdfKind};

/// Get the appropriate icon for a listing entry.
pub fn icon_for_entry(kind: &EntryKind) -> &'static str {
    match kind {
        EntryKind::NavigateUp => "\u{f062}", // arrow up
        EntryKind::Directory => "\u{f07b}",  // folder icon
        EntryKind::OdfDocument(document) => match document {
            OdfKind::Text => "\u{f15c}",
            OdfKind::Spreadsheet => "\u{f1c3}",
            OdfKind::Presentation => "\u{f1c4}",
            OdfKind::Graphics | OdfKind::Chart => "\u{f1c5}",
            _ => "\u{f016}",
        },
    }
}
