// src/ui/layout.rs
//! Layout computation for the UI panels.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Computed layout areas for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComputedLayout {
    /// Current location
    pub header: Rect,
    /// Entry list
    pub list: Rect,
    /// One-line status / key hints
    pub status: Rect,
}

/// Split the terminal into header, list and status bar.
pub fn compute_layout(area: Rect) -> ComputedLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    ComputedLayout {
        header: chunks[0],
        list: chunks[1],
        status: chunks[2],
    }
}
