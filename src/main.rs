use anyhow::Result;
use clap::Parser;
use tracing::info;

use odfpick::{app::App, config::Config, fs::Navigator, logging, ui};

fn main() -> Result<()> {
    let config = Config::parse();
    logging::init(&config)?;

    let root = config.resolve_root()?;
    let viewer = config.viewer()?;
    info!(root = %root.display(), order = ?config.order, "starting");

    let app = App::new(Navigator::new(root, config.order), viewer);
    ui::run(app)
}
