// src/ui/keybindings.rs
//! Keyboard input handling and key mappings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Navigation actions derived from key events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NavigationAction {
    Up,
    Down,
    Top,
    Bottom,
    Enter,
    Back,
    Refresh,
    Filter,
    Quit,
    None,
}

/// Key input while the filter line is being edited.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterInput {
    Push(char),
    Pop,
    Clear,
    Navigate(NavigationAction),
}

/// Convert a key event to a navigation action.
pub fn key_to_action(key: &KeyEvent) -> NavigationAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => NavigationAction::Quit,
            _ => NavigationAction::None,
        };
    }

    match key.code {
        KeyCode::Down | KeyCode::Char('j') => NavigationAction::Down,
        KeyCode::Up | KeyCode::Char('k') => NavigationAction::Up,
        KeyCode::Home | KeyCode::Char('g') => NavigationAction::Top,
        KeyCode::End | KeyCode::Char('G') => NavigationAction::Bottom,
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => NavigationAction::Enter,
        KeyCode::Left | KeyCode::Backspace | KeyCode::Char('h') => NavigationAction::Back,
        KeyCode::Char('r') => NavigationAction::Refresh,
        KeyCode::Char('/') => NavigationAction::Filter,
        KeyCode::Char('q') | KeyCode::Esc => NavigationAction::Quit,
        _ => NavigationAction::None,
    }
}

/// Convert a key event while filtering. Letters go to the filter text, so
/// only the arrow keys, Enter and Ctrl-C keep their usual meaning.
pub fn key_to_filter_input(key: &KeyEvent) -> FilterInput {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => FilterInput::Navigate(NavigationAction::Quit),
            _ => FilterInput::Navigate(NavigationAction::None),
        };
    }

    match key.code {
        KeyCode::Esc => FilterInput::Clear,
        KeyCode::Backspace => FilterInput::Pop,
        KeyCode::Char(c) => FilterInput::Push(c),
        KeyCode::Enter => FilterInput::Navigate(NavigationAction::Enter),
        KeyCode::Down => FilterInput::Navigate(NavigationAction::Down),
        KeyCode::Up => FilterInput::Navigate(NavigationAction::Up),
        _ => FilterInput::Navigate(NavigationAction::None),
    }
}

/// Short help text shown in the status bar.
pub const KEY_HINTS: &str = "↑↓ move  ⏎ open  ← up  / filter  r refresh  q quit";
