// src/fs/navigator.rs
//! Directory navigation below a fixed root.

use std::{
    cmp::Ordering,
    fs,
    path::{Path, PathBuf},
};

use clap::ValueEnum;
use tracing::{debug, info};

use super::detection::{DocumentDetector, OdfDetector, OdfKind, VIEWER_MIME};

/// Display name of the synthetic parent entry.
pub const PARENT_LABEL: &str = "..";

/// What a listed entry stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    NavigateUp,
    Directory,
    OdfDocument(OdfKind),
}

/// One row of a [`Listing`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl Entry {
    /// Name shown to the user: `..` for the parent entry, the file name otherwise.
    pub fn display_name(&self) -> String {
        if self.kind == EntryKind::NavigateUp {
            return PARENT_LABEL.to_string();
        }
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    fn sort_key(&self) -> String {
        self.display_name().to_lowercase()
    }
}

/// Entries shown for one location, parent entry first when present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    entries: Vec<Entry>,
}

impl Listing {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Strings handed to the list display, in order.
    pub fn display_names(&self) -> Vec<String> {
        self.entries.iter().map(Entry::display_name).collect()
    }

    pub fn has_parent_entry(&self) -> bool {
        self.entries
            .first()
            .is_some_and(|entry| entry.kind == EntryKind::NavigateUp)
    }

    /// Entries whose name contains `needle`, ignoring case. The parent entry
    /// is always kept.
    pub fn filtered(&self, needle: &str) -> Listing {
        let needle = needle.to_lowercase();
        let entries = self
            .entries
            .iter()
            .filter(|entry| {
                entry.kind == EntryKind::NavigateUp || entry.sort_key().contains(&needle)
            })
            .cloned()
            .collect();
        Listing { entries }
    }

    /// Index of the entry pointing at `path`, ignoring the parent entry.
    pub fn position_of(&self, path: &Path) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.kind != EntryKind::NavigateUp && entry.path == path)
    }
}

/// How entries of a listing are ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SortOrder {
    /// Directories first, then documents, each by case-insensitive name.
    #[default]
    Name,
    /// Whatever order the filesystem enumerates; differs across platforms.
    Native,
}

/// Effect of selecting an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationResult {
    /// The location changed; this is the listing for the new location.
    Navigated(Listing),
    /// The caller should hand `path` to a viewer for `mime`.
    OpenRequested { path: PathBuf, mime: &'static str },
}

/// Tracks the current location and turns selections into navigation.
pub struct Navigator<D = OdfDetector> {
    root: PathBuf,
    location: PathBuf,
    order: SortOrder,
    detector: D,
}

impl Navigator<OdfDetector> {
    pub fn new(root: PathBuf, order: SortOrder) -> Self {
        Self::with_detector(root, order, OdfDetector)
    }
}

impl<D: DocumentDetector> Navigator<D> {
    pub fn with_detector(root: PathBuf, order: SortOrder, detector: D) -> Self {
        Self {
            location: root.clone(),
            root,
            order,
            detector,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    pub fn is_at_root(&self) -> bool {
        self.location == self.root
    }

    /// Location relative to the root; empty at the root itself.
    pub fn relative_location(&self) -> &Path {
        self.location
            .strip_prefix(&self.root)
            .unwrap_or(&self.location)
    }

    /// Build the listing for the current location.
    ///
    /// A location that is missing or cannot be read yields an empty listing.
    pub fn listing(&self) -> Listing {
        let children = match fs::read_dir(&self.location) {
            Ok(children) => children,
            Err(error) => {
                debug!(location = %self.location.display(), %error, "location not readable");
                return Listing::default();
            }
        };

        let mut entries: Vec<Entry> = children
            .filter_map(Result::ok)
            .filter_map(|child| self.classify(child.path()))
            .collect();

        if self.order == SortOrder::Name {
            entries.sort_by(compare_entries);
        }

        if !self.is_at_root() {
            entries.insert(
                0,
                Entry {
                    path: self.parent_location(),
                    kind: EntryKind::NavigateUp,
                },
            );
        }

        Listing { entries }
    }

    /// Act on a selected entry.
    pub fn select(&mut self, entry: &Entry) -> NavigationResult {
        match &entry.kind {
            EntryKind::NavigateUp => {
                self.location = self.parent_location();
                info!(location = %self.location.display(), "moved up");
                NavigationResult::Navigated(self.listing())
            }
            EntryKind::Directory => {
                self.location = entry.path.clone();
                info!(location = %self.location.display(), "entered directory");
                NavigationResult::Navigated(self.listing())
            }
            EntryKind::OdfDocument(_) => NavigationResult::OpenRequested {
                path: entry.path.clone(),
                mime: VIEWER_MIME,
            },
        }
    }

    /// Parent of the location, clamped so it never leaves the root.
    fn parent_location(&self) -> PathBuf {
        match self.location.parent() {
            Some(parent) if !self.is_at_root() && parent.starts_with(&self.root) => {
                parent.to_path_buf()
            }
            _ => self.root.clone(),
        }
    }

    fn classify(&self, path: PathBuf) -> Option<Entry> {
        if path.is_dir() {
            return Some(Entry {
                path,
                kind: EntryKind::Directory,
            });
        }
        match self.detector.detect(&path) {
            Some(kind) => Some(Entry {
                path,
                kind: EntryKind::OdfDocument(kind),
            }),
            None => {
                debug!(path = %path.display(), "skipped");
                None
            }
        }
    }
}

fn compare_entries(a: &Entry, b: &Entry) -> Ordering {
    let a_dir = a.kind == EntryKind::Directory;
    let b_dir = b.kind == EntryKind::Directory;
    b_dir
        .cmp(&a_dir)
        .then_with(|| a.sort_key().cmp(&b.sort_key()))
        .then_with(|| a.path.cmp(&b.path))
}
