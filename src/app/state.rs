// src/app/state.rs
//! Application state management.

use std::path::{Path, PathBuf};

use crossterm::event::KeyEvent;
use ratatui::{Frame, widgets::ListState};
use tracing::{debug, info, warn};

use crate::{
    fs::{DocumentDetector, Entry, EntryKind, Listing, NavigationResult, Navigator, OdfDetector},
    ui::{
        keybindings::{FilterInput, NavigationAction, key_to_action, key_to_filter_input},
        layout::compute_layout,
        widgets::{render_file_list, render_header, render_status_bar},
    },
    viewer::{SystemViewer, ViewerLauncher},
};

/// Main application state.
pub struct App<V = SystemViewer, D = OdfDetector> {
    navigator: Navigator<D>,
    viewer: V,
    /// Every entry of the current location
    pub listing: Listing,
    /// Entries on screen: `listing` narrowed by the filter
    pub visible: Listing,
    /// Filter text while filtering is active
    pub filter: Option<String>,
    /// List widget state
    pub state: ListState,
    /// Currently selected index into `visible`
    pub selected: usize,
    /// Message replacing the key hints until the next action
    pub status: Option<String>,
}

impl<V: ViewerLauncher, D: DocumentDetector> App<V, D> {
    /// Create the application at the navigator's current location.
    pub fn new(navigator: Navigator<D>, viewer: V) -> Self {
        let listing = navigator.listing();
        let mut app = Self {
            navigator,
            viewer,
            visible: listing.clone(),
            listing,
            filter: None,
            state: ListState::default(),
            selected: 0,
            status: None,
        };
        app.sync_selection();
        app
    }

    pub fn navigator(&self) -> &Navigator<D> {
        &self.navigator
    }

    /// Handle a key event and return true if the app should quit.
    pub fn on_key(&mut self, key: KeyEvent) -> bool {
        let action = if self.filter.is_some() {
            match key_to_filter_input(&key) {
                FilterInput::Push(c) => {
                    self.edit_filter(|text| text.push(c));
                    return false;
                }
                FilterInput::Pop => {
                    self.edit_filter(|text| {
                        text.pop();
                    });
                    return false;
                }
                FilterInput::Clear => {
                    self.clear_filter();
                    return false;
                }
                FilterInput::Navigate(action) => action,
            }
        } else {
            key_to_action(&key)
        };
        if action != NavigationAction::None {
            self.status = None;
        }

        match action {
            NavigationAction::Down => {
                if self.selected + 1 < self.visible.len() {
                    self.selected += 1;
                }
            }
            NavigationAction::Up => {
                if self.selected > 0 {
                    self.selected -= 1;
                }
            }
            NavigationAction::Top => self.selected = 0,
            NavigationAction::Bottom => self.selected = self.visible.len().saturating_sub(1),
            NavigationAction::Enter => self.activate(),
            NavigationAction::Back => self.go_up(),
            NavigationAction::Refresh => self.refresh(),
            NavigationAction::Filter => self.filter = Some(String::new()),
            NavigationAction::Quit => return true,
            NavigationAction::None => {}
        }

        self.sync_selection();
        false
    }

    /// Act on the highlighted entry.
    pub fn activate(&mut self) {
        if let Some(entry) = self.visible.get(self.selected).cloned() {
            self.apply(&entry);
        }
    }

    /// Move to the parent directory; does nothing at the root.
    pub fn go_up(&mut self) {
        if self.navigator.is_at_root() {
            return;
        }
        // A vanished location has an empty listing, so build the entry by hand.
        let up = match self.listing.get(0) {
            Some(entry) if entry.kind == EntryKind::NavigateUp => entry.clone(),
            _ => Entry {
                path: self
                    .navigator
                    .location()
                    .parent()
                    .unwrap_or(self.navigator.root())
                    .to_path_buf(),
                kind: EntryKind::NavigateUp,
            },
        };
        self.apply(&up);
    }

    /// Re-read the current location, keeping the highlighted entry if it still exists.
    pub fn refresh(&mut self) {
        let current = self.visible.get(self.selected).map(|entry| entry.path.clone());
        self.listing = self.navigator.listing();
        self.narrow();
        if let Some(index) = current.and_then(|path| self.visible.position_of(&path)) {
            self.selected = index;
        }
        self.sync_selection();
    }

    /// Leave filtering and show the whole listing again.
    pub fn clear_filter(&mut self) {
        let current = self.visible.get(self.selected).map(|entry| entry.path.clone());
        self.filter = None;
        self.narrow();
        self.selected = current
            .and_then(|path| self.visible.position_of(&path))
            .unwrap_or(0);
        self.sync_selection();
    }

    /// Draw the application UI.
    pub fn draw(&mut self, f: &mut Frame<'_>) {
        let layout = compute_layout(f.area());

        render_header(
            f,
            layout.header,
            self.navigator.root(),
            self.navigator.relative_location(),
        );
        render_file_list(f, layout.list, &self.visible, &mut self.state);
        render_status_bar(
            f,
            layout.status,
            self.filter.as_deref(),
            self.status.as_deref(),
        );
    }

    fn edit_filter(&mut self, edit: impl FnOnce(&mut String)) {
        if let Some(text) = self.filter.as_mut() {
            edit(text);
            debug!(filter = %text, "filter changed");
        }
        self.narrow();
        // Highlight the first match rather than the parent entry.
        self.selected = usize::from(self.visible.has_parent_entry() && self.visible.len() > 1);
        self.sync_selection();
    }

    /// Recompute `visible` from `listing` and the filter text.
    fn narrow(&mut self) {
        self.visible = match self.filter.as_deref() {
            Some(text) if !text.is_empty() => self.listing.filtered(text),
            _ => self.listing.clone(),
        };
    }

    fn apply(&mut self, entry: &Entry) {
        let previous: PathBuf = self.navigator.location().to_path_buf();
        match self.navigator.select(entry) {
            NavigationResult::Navigated(listing) => self.show(listing, &previous),
            NavigationResult::OpenRequested { path, mime } => self.open(&path, mime),
        }
    }

    /// Replace the listing after navigating, highlighting the directory we
    /// came from if present. Navigation ends filtering.
    fn show(&mut self, listing: Listing, previous: &Path) {
        self.listing = listing;
        self.filter = None;
        self.narrow();
        self.selected = self.visible.position_of(previous).unwrap_or(0);
        self.sync_selection();
    }

    fn open(&mut self, path: &Path, mime: &str) {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        match self.viewer.open(path, mime) {
            Ok(()) => {
                info!(path = %path.display(), "document handed to viewer");
                self.status = Some(format!("Opened {name}"));
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "viewer launch failed");
                self.status = Some(format!("Cannot open {name}: {error}"));
            }
        }
    }

    fn sync_selection(&mut self) {
        if self.visible.is_empty() {
            self.selected = 0;
            self.state.select(None);
        } else {
            self.selected = self.selected.min(self.visible.len() - 1);
            self.state.select(Some(self.selected));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::{Terminal, backend::TestBackend};
    use tempfile::{TempDir, tempdir};

    use crate::{
        fs::{SortOrder, VIEWER_MIME, detection::odf_package_bytes},
        viewer::{LaunchError, MockViewerLauncher},
    };

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    /// Root with `Docs/a.odt`, `Docs/readme.txt` and `top.odt`.
    fn fixture() -> TempDir {
        let dir = tempdir().expect("tempdir");
        let docs = dir.path().join("Docs");
        fs::create_dir(&docs).expect("mkdir");
        fs::write(docs.join("a.odt"), odf_package_bytes("text", 200)).expect("write");
        fs::write(docs.join("readme.txt"), b"plain text").expect("write");
        fs::write(dir.path().join("top.odt"), odf_package_bytes("text", 200)).expect("write");
        dir
    }

    fn new_app(dir: &TempDir, viewer: MockViewerLauncher) -> App<MockViewerLauncher> {
        App::new(
            Navigator::new(dir.path().to_path_buf(), SortOrder::Name),
            viewer,
        )
    }

    #[test]
    fn test_new_app_lists_root() {
        // Arrange
        let dir = fixture();

        // Act
        let app = new_app(&dir, MockViewerLauncher::new());

        // Assert
        assert_eq!(app.listing.display_names(), vec!["Docs", "top.odt"]);
        assert_eq!(app.state.selected(), Some(0));
    }

    #[test]
    fn test_enter_on_document_launches_viewer_once() {
        // Arrange
        let dir = fixture();
        let mut viewer = MockViewerLauncher::new();
        viewer
            .expect_open()
            .withf(|path, mime| path.ends_with("top.odt") && mime == VIEWER_MIME)
            .times(1)
            .returning(|_, _| Ok(()));
        let mut app = new_app(&dir, viewer);
        app.on_key(key(KeyCode::Down));

        // Act
        let quit = app.on_key(key(KeyCode::Enter));

        // Assert
        assert!(!quit);
        assert!(app.navigator().is_at_root());
        assert_eq!(app.status.as_deref(), Some("Opened top.odt"));
    }

    #[test]
    fn test_launch_failure_becomes_status_message() {
        // Arrange
        let dir = fixture();
        let mut viewer = MockViewerLauncher::new();
        viewer
            .expect_open()
            .times(1)
            .returning(|_, _| Err(LaunchError::EmptyCommand));
        let mut app = new_app(&dir, viewer);
        app.selected = 1;

        // Act
        app.activate();

        // Assert
        let status = app.status.clone().expect("status message");
        assert!(status.starts_with("Cannot open top.odt"), "{status}");

        // Act
        app.on_key(key(KeyCode::Up));

        // Assert
        assert_eq!(app.status, None);
    }

    #[test]
    fn test_descend_then_back_highlights_previous_directory() {
        // Arrange
        let dir = fixture();
        let mut app = new_app(&dir, MockViewerLauncher::new());

        // Act
        app.on_key(key(KeyCode::Enter));

        // Assert
        assert_eq!(app.listing.display_names(), vec!["..", "a.odt"]);
        assert_eq!(app.selected, 0);

        // Act
        app.on_key(key(KeyCode::Left));

        // Assert
        assert!(app.navigator().is_at_root());
        assert_eq!(app.listing.display_names(), vec!["Docs", "top.odt"]);
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_back_at_root_does_nothing() {
        // Arrange
        let dir = fixture();
        let mut app = new_app(&dir, MockViewerLauncher::new());
        app.selected = 1;

        // Act
        app.on_key(key(KeyCode::Left));

        // Assert
        assert!(app.navigator().is_at_root());
        assert_eq!(app.selected, 1);
    }

    #[test]
    fn test_back_from_vanished_directory() {
        // Arrange
        let dir = fixture();
        let empty = dir.path().join("Empty");
        fs::create_dir(&empty).expect("mkdir");
        let mut app = new_app(&dir, MockViewerLauncher::new());
        app.selected = app.listing.position_of(&empty).expect("Empty entry");
        app.activate();
        fs::remove_dir(&empty).expect("rmdir");
        app.refresh();
        assert!(app.listing.is_empty());

        // Act
        app.go_up();

        // Assert
        assert!(app.navigator().is_at_root());
        assert_eq!(app.listing.display_names(), vec!["Docs", "top.odt"]);
    }

    #[test]
    fn test_selection_is_clamped() {
        // Arrange
        let dir = fixture();
        let mut app = new_app(&dir, MockViewerLauncher::new());

        // Act
        app.on_key(key(KeyCode::Up));
        let after_up = app.selected;
        for _ in 0..5 {
            app.on_key(key(KeyCode::Down));
        }

        // Assert
        assert_eq!(after_up, 0);
        assert_eq!(app.selected, 1);
        assert_eq!(app.state.selected(), Some(1));
    }

    #[test]
    fn test_refresh_picks_up_new_documents() {
        // Arrange
        let dir = fixture();
        let mut app = new_app(&dir, MockViewerLauncher::new());
        app.selected = 1;
        fs::write(dir.path().join("new.odt"), odf_package_bytes("text", 200)).expect("write");

        // Act
        app.on_key(key(KeyCode::Char('r')));

        // Assert
        assert_eq!(app.listing.display_names(), vec!["Docs", "new.odt", "top.odt"]);
        assert_eq!(app.selected, 2);
    }

    fn type_text(app: &mut App<MockViewerLauncher>, text: &str) {
        for c in text.chars() {
            app.on_key(key(KeyCode::Char(c)));
        }
    }

    /// Inside `Docs`, with `a.odt`, `Agenda.odt`, `budget.ods` and `Archive/`.
    fn filter_fixture() -> TempDir {
        let dir = fixture();
        let docs = dir.path().join("Docs");
        fs::write(docs.join("Agenda.odt"), odf_package_bytes("text", 200)).expect("write");
        fs::write(docs.join("budget.ods"), odf_package_bytes("spreadsheet", 200)).expect("write");
        fs::create_dir(docs.join("Archive")).expect("mkdir");
        dir
    }

    #[test]
    fn test_filter_narrows_listing_and_keeps_parent() {
        // Arrange
        let dir = filter_fixture();
        let mut app = new_app(&dir, MockViewerLauncher::new());
        app.activate();

        // Act
        app.on_key(key(KeyCode::Char('/')));
        type_text(&mut app, "GEN");

        // Assert
        assert_eq!(app.filter.as_deref(), Some("GEN"));
        assert_eq!(app.visible.display_names(), vec!["..", "Agenda.odt"]);
        assert_eq!(app.listing.len(), 5);
        assert_eq!(app.selected, 1);
    }

    #[test]
    fn test_filter_letters_do_not_trigger_bindings() {
        // Arrange
        let dir = filter_fixture();
        let mut app = new_app(&dir, MockViewerLauncher::new());
        app.activate();
        app.on_key(key(KeyCode::Char('/')));

        // Act
        let quit = app.on_key(key(KeyCode::Char('q')));
        app.on_key(key(KeyCode::Backspace));
        app.on_key(key(KeyCode::Char('r')));

        // Assert
        assert!(!quit);
        assert_eq!(app.filter.as_deref(), Some("r"));
        assert_eq!(app.visible.display_names(), vec!["..", "Archive"]);
    }

    #[test]
    fn test_selection_is_clamped_to_narrowed_listing() {
        // Arrange
        let dir = filter_fixture();
        let mut app = new_app(&dir, MockViewerLauncher::new());
        app.activate();
        app.on_key(key(KeyCode::End));
        assert_eq!(app.selected, 4);

        // Act
        app.on_key(key(KeyCode::Char('/')));
        type_text(&mut app, "budget");
        app.on_key(key(KeyCode::Down));
        app.on_key(key(KeyCode::Down));

        // Assert
        assert_eq!(app.visible.len(), 2);
        assert_eq!(app.selected, 1);
        assert_eq!(app.state.selected(), Some(1));
    }

    #[test]
    fn test_escape_clears_filter_and_keeps_highlight() {
        // Arrange
        let dir = filter_fixture();
        let mut app = new_app(&dir, MockViewerLauncher::new());
        app.activate();
        app.on_key(key(KeyCode::Char('/')));
        type_text(&mut app, "budget");

        // Act
        let quit = app.on_key(key(KeyCode::Esc));

        // Assert
        assert!(!quit);
        assert_eq!(app.filter, None);
        assert_eq!(app.visible, app.listing);
        assert_eq!(
            app.visible.get(app.selected).map(Entry::display_name),
            Some("budget.ods".to_string())
        );
    }

    #[test]
    fn test_enter_inside_filter_opens_match() {
        // Arrange
        let dir = filter_fixture();
        let mut viewer = MockViewerLauncher::new();
        viewer
            .expect_open()
            .withf(|path, _| path.ends_with("Docs/budget.ods"))
            .times(1)
            .returning(|_, _| Ok(()));
        let mut app = new_app(&dir, viewer);
        app.activate();
        app.on_key(key(KeyCode::Char('/')));
        type_text(&mut app, "bud");

        // Act
        app.on_key(key(KeyCode::Enter));

        // Assert
        assert_eq!(app.status.as_deref(), Some("Opened budget.ods"));
        assert_eq!(app.filter.as_deref(), Some("bud"));
    }

    #[test]
    fn test_navigating_resets_filter() {
        // Arrange
        let dir = filter_fixture();
        let mut app = new_app(&dir, MockViewerLauncher::new());
        app.activate();
        app.on_key(key(KeyCode::Char('/')));
        type_text(&mut app, "arch");

        // Act
        app.on_key(key(KeyCode::Enter));

        // Assert
        assert!(app.navigator().location().ends_with("Docs/Archive"));
        assert_eq!(app.filter, None);
        assert_eq!(app.visible.display_names(), vec![".."]);
    }

    #[test]
    fn test_draw_shows_filter_text() {
        // Arrange
        let dir = filter_fixture();
        let mut app = new_app(&dir, MockViewerLauncher::new());
        app.activate();
        app.on_key(key(KeyCode::Char('/')));
        type_text(&mut app, "agen");
        let mut terminal = Terminal::new(TestBackend::new(80, 12)).expect("terminal");

        // Act
        terminal.draw(|f| app.draw(f)).expect("draw");

        // Assert
        let text: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("/agen"));
        assert!(text.contains("Agenda.odt"));
        assert!(!text.contains("budget.ods"));
    }

    #[test]
    fn test_quit_key_returns_true() {
        // Arrange
        let dir = fixture();
        let mut app = new_app(&dir, MockViewerLauncher::new());

        // Act & Assert
        assert!(app.on_key(key(KeyCode::Char('q'))));
    }

    #[test]
    fn test_draw_renders_parent_entry_and_documents() {
        // Arrange
        let dir = fixture();
        let mut app = new_app(&dir, MockViewerLauncher::new());
        app.activate();
        let mut terminal = Terminal::new(TestBackend::new(80, 12)).expect("terminal");

        // Act
        terminal.draw(|f| app.draw(f)).expect("draw");

        // Assert
        let text: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("/Docs"));
        assert!(text.contains(".."));
        assert!(text.contains("a.odt"));
        assert!(!text.contains("readme.txt"));
    }

    #[test]
    fn test_draw_empty_listing_shows_placeholder() {
        // Arrange
        let dir = tempdir().expect("tempdir");
        let mut app = new_app(&dir, MockViewerLauncher::new());
        let mut terminal = Terminal::new(TestBackend::new(80, 12)).expect("terminal");

        // Act
        terminal.draw(|f| app.draw(f)).expect("draw");

        // Assert
        let text: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("No folders or OpenDocument files here"));
        assert_eq!(app.state.selected(), None);
    }
}
