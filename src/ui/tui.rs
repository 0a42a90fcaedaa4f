// src/ui/tui.rs
//! Terminal setup and the event loop.

use std::io::{self, Stdout, Write};

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{self, Event as CEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::info;

use crate::{app::App, fs::DocumentDetector, viewer::ViewerLauncher};

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Run the browser until the user quits. Once raw mode is on, the terminal is
/// restored on every exit path, including a failed setup.
pub fn run<V: ViewerLauncher, D: DocumentDetector>(mut app: App<V, D>) -> Result<()> {
    enable_raw_mode().context("cannot enable raw mode")?;

    let result = start(&mut app);

    let restored = restore(&mut io::stdout());
    disable_raw_mode().context("cannot disable raw mode")?;
    info!("exiting");
    result.and(restored.context("cannot leave alternate screen"))
}

fn start<V: ViewerLauncher, D: DocumentDetector>(app: &mut App<V, D>) -> Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("cannot enter alternate screen")?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout)).context("cannot create terminal")?;
    event_loop(&mut terminal, app)
}

/// Leave the alternate screen and show the cursor again.
fn restore<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(out, LeaveAlternateScreen, cursor::Show)
}

fn event_loop<V: ViewerLauncher, D: DocumentDetector>(
    terminal: &mut Tui,
    app: &mut App<V, D>,
) -> Result<()> {
    terminal.clear()?;
    loop {
        terminal.draw(|f| app.draw(f))?;

        if let CEvent::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press && app.on_key(key) {
                return Ok(());
            }
        }
    }
}
