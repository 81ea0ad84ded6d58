#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Grid Walk experience.

mod config;
mod session;
mod terminal;

use std::{fs, io, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use grid_walk_rendering::{Presentation, RenderingBackend};
use grid_walk_system_bootstrap::Bootstrap;
use log::info;

use crate::{
    config::CliConfig,
    session::{parse_moves, Session},
    terminal::TerminalBackend,
};

/// Walk a text-defined grid maze from its start cell to its goal.
#[derive(Debug, Parser)]
#[command(name = "grid-walk", version)]
struct Args {
    /// Level file holding the dimensions, cell codes and endpoint indices.
    level: PathBuf,
    /// TOML file overriding glyphs, key bindings and the log level.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Plays the moves (letters U, D, L, R) and prints the outcome instead of reading input.
    #[arg(long, value_name = "SCRIPT")]
    moves: Option<String>,
    /// Prints the scripted outcome as JSON.
    #[arg(long, requires = "moves")]
    json: bool,
}

/// Entry point for the Grid Walk command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    let config = CliConfig::load(args.config.as_deref())?;
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .init();

    let level = fs::read_to_string(&args.level)
        .with_context(|| format!("failed to read level at {}", args.level.display()))?;
    let bootstrap = Bootstrap;
    let world = bootstrap
        .load(&level)
        .with_context(|| format!("failed to load level {}", args.level.display()))?;
    let banner = bootstrap.welcome_banner(&world).to_owned();
    info!("[Cli] loaded {}", args.level.display());

    let mut session = Session::new(world);
    let mut scene = session.scene()?;

    if let Some(script) = args.moves {
        let moves = parse_moves(&script)?;
        let summary = session.play_script(&moves, &mut scene);
        if args.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            for line in scene.render_lines(&config.glyphs) {
                println!("{line}");
            }
            for line in scene.status_lines() {
                println!("{line}");
            }
        }
        return Ok(());
    }

    let presentation = Presentation::new(banner, config.glyphs, scene);
    TerminalBackend::new(io::stdin().lock(), io::stdout(), config.keys)
        .run(presentation, move |input, scene| session.advance(input, scene))
}
