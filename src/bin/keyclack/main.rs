//! keyclack - humanized keyboard sound engine
//!
//! Run with: cargo run -- [ASSET_DIR]
//!
//! Every key typed into the terminal triggers a sound. Without an explicit
//! folder, `audio files/` or `audio/` next to the working directory or the
//! executable is used. ESC quits.

mod app;
mod ui;

use std::path::PathBuf;

use app::Keyclack;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    app::init_logging()?;

    let config = app::load_config()?;
    let asset_dir = std::env::args_os().nth(1).map(PathBuf::from);

    Keyclack::new(config).asset_dir(asset_dir).run()
}
