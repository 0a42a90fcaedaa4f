// src/ui/widgets/mod.rs
//! Custom widgets for the odfpick UI.

pub mod file_list;
pub mod header;
pub mod status_bar;

// Re-export widget rendering functions
pub use file_list::render_file_list;
pub use header::{render_header, tail_path};
pub use status_bar::render_status_bar;
