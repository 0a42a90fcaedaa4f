// src/ui/mod.rs
//! UI module - terminal rendering and input for the browser.

pub mod icons;
pub mod keybindings;
pub mod layout;
pub mod tui;
pub mod widgets;

// Re-export main entry point
pub use tui::run;
