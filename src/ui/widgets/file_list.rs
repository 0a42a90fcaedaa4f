// src/ui/widgets/file_list.rs
//! File browser list widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};

use crate::fs::{Entry, EntryKind, Listing};
use crate::ui::icons::icon_for_entry;

/// Render the browser list. An empty listing shows a placeholder row.
pub fn render_file_list(f: &mut Frame<'_>, area: Rect, listing: &Listing, state: &mut ListState) {
    let block = Block::default().borders(Borders::ALL).title(" Files ");

    if listing.is_empty() {
        let placeholder = ListItem::new(Line::from(Span::styled(
            "No folders or OpenDocument files here",
            Style::default().fg(Color::DarkGray),
        )));
        f.render_widget(List::new([placeholder]).block(block), area);
        return;
    }

    let items: Vec<ListItem> = listing.iter().map(entry_item).collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol(">> ");

    f.render_stateful_widget(list, area, state);
}

fn entry_item(entry: &Entry) -> ListItem<'static> {
    let icon = icon_for_entry(&entry.kind);
    let name = entry.display_name();
    let line = match &entry.kind {
        EntryKind::OdfDocument(kind) => Line::from(vec![
            Span::raw(format!("{} {:<40} ", icon, name)),
            Span::styled(kind.to_string(), Style::default().fg(Color::Cyan)),
        ]),
        EntryKind::Directory => Line::from(Span::styled(
            format!("{} {}/", icon, name),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        EntryKind::NavigateUp => Line::from(format!("{} {}", icon, name)),
    };
    ListItem::new(line)
}
