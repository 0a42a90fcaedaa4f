// src/ui/widgets/header.rs
//! Header showing the current location.

use std::path::{Component, Path};

use ratatui::{
    Frame,
    layout::Rect,
    widgets::{Block, Borders, Paragraph},
};

/// Render the root and the location below it.
pub fn render_header(f: &mut Frame<'_>, area: Rect, root: &Path, relative: &Path) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", root.display()));
    let location = format!("/{}", tail_path(relative, 3));
    f.render_widget(Paragraph::new(location).block(block), area);
}

/// Last `count` components of `path` joined with `/`, prefixed with `…/` when
/// anything was cut.
pub fn tail_path(path: &Path, count: usize) -> String {
    let parts: Vec<String> = path
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if parts.len() <= count {
        return parts.join("/");
    }
    format!("…/{}", parts[parts.len() - count..].join("/"))
}
