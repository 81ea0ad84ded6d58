use std::{fs, path::Path};

use anyhow::{Context, Result};
use grid_walk_core::Direction;
use grid_walk_rendering::{FrameInput, Glyphs};
use serde::Deserialize;

const DEFAULT_LOG_LEVEL: &str = "warn";

/// Optional TOML configuration for the command-line adapter.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub(crate) struct CliConfig {
    /// `env_logger` filter used when `RUST_LOG` is unset.
    pub(crate) log_level: String,
    /// Characters used to draw the grid.
    pub(crate) glyphs: Glyphs,
    /// Words accepted on each input line.
    pub(crate) keys: KeyBindings,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_owned(),
            glyphs: Glyphs::default(),
            keys: KeyBindings::default(),
        }
    }
}

impl CliConfig {
    /// Loads the configuration file, or the defaults when no path is given.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read configuration at {}", path.display()))?;
        Self::parse(&contents)
    }

    fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse configuration toml contents")
    }
}

/// Words mapped onto player actions. Matching ignores case.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub(crate) struct KeyBindings {
    up: Vec<String>,
    down: Vec<String>,
    left: Vec<String>,
    right: Vec<String>,
    restart: Vec<String>,
    quit: Vec<String>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        fn words(list: &[&str]) -> Vec<String> {
            list.iter().map(|word| (*word).to_owned()).collect()
        }

        Self {
            up: words(&["w", "up", "k"]),
            down: words(&["s", "down", "j"]),
            left: words(&["a", "left", "h"]),
            right: words(&["d", "right", "l"]),
            restart: words(&["r", "restart"]),
            quit: words(&["q", "quit", "exit"]),
        }
    }
}

impl KeyBindings {
    /// Translates a single input word into frame input.
    pub(crate) fn frame_input(&self, word: &str) -> Option<FrameInput> {
        let matches = |list: &[String]| list.iter().any(|bound| bound.eq_ignore_ascii_case(word));

        if matches(&self.quit) {
            return Some(FrameInput {
                quit: true,
                ..FrameInput::default()
            });
        }
        if matches(&self.restart) {
            return Some(FrameInput {
                restart: true,
                ..FrameInput::default()
            });
        }

        let direction = Direction::ALL
            .into_iter()
            .find(|direction| matches(self.words_for(*direction)))?;
        Some(FrameInput {
            step: Some(direction),
            ..FrameInput::default()
        })
    }

    /// One-line summary of the primary binding for each action.
    pub(crate) fn help_line(&self) -> String {
        let first = |list: &[String]| list.first().cloned().unwrap_or_else(|| "-".to_owned());
        format!(
            "Move: {} {} {} {}  Restart: {}  Quit: {}",
            first(&self.up),
            first(&self.left),
            first(&self.down),
            first(&self.right),
            first(&self.restart),
            first(&self.quit)
        )
    }

    fn words_for(&self, direction: Direction) -> &[String] {
        match direction {
            Direction::Up => &self.up,
            Direction::Down => &self.down,
            Direction::Left => &self.left,
            Direction::Right => &self.right,
        }
    }
}
