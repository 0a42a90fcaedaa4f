// src/ui/widgets/status_bar.rs
//! One-line status bar.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    widgets::Paragraph,
};

use crate::ui::keybindings::KEY_HINTS;

/// Show the filter line while filtering, else `message` when set, else the
/// key hints.
pub fn render_status_bar(
    f: &mut Frame<'_>,
    area: Rect,
    filter: Option<&str>,
    message: Option<&str>,
) {
    let paragraph = match (filter, message) {
        (Some(filter), _) => {
            Paragraph::new(format!("/{filter}")).style(Style::default().fg(Color::Cyan))
        }
        (None, Some(message)) => {
            Paragraph::new(message.to_string()).style(Style::default().fg(Color::Yellow))
        }
        (None, None) => Paragraph::new(KEY_HINTS).style(Style::default().fg(Color::DarkGray)),
    };
    f.render_widget(paragraph, area);
}
