#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Grid Walk adapters.

use std::collections::HashSet;

use anyhow::Result as AnyResult;
use grid_walk_core::{CellCoord, CellKind, Direction, ProgressReport};
use serde::Deserialize;
use thiserror::Error;

/// Characters used when drawing a scene as text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Glyphs {
    /// Walkable cell not yet visited.
    pub safe: char,
    /// Danger cell, code `1`.
    pub danger: char,
    /// Danger cell drawn with the alternate visual, code `2`.
    pub danger_variant: char,
    /// Goal cell.
    pub goal: char,
    /// Player token.
    pub player: char,
    /// Walkable cell the player has already visited.
    pub visited: char,
}

impl Default for Glyphs {
    fn default() -> Self {
        Self {
            safe: '.',
            danger: '#',
            danger_variant: '%',
            goal: 'G',
            player: '@',
            visited: ':',
        }
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Direction requested by the player on this frame, if any.
    pub step: Option<Direction>,
    /// Whether the player asked to play again.
    pub restart: bool,
    /// Whether the player asked to leave the game.
    pub quit: bool,
}

/// Visual used for a single tile of the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileVisual {
    /// Walkable floor.
    Floor,
    /// First danger visual.
    Danger,
    /// Second danger visual.
    DangerVariant,
}

impl From<CellKind> for TileVisual {
    fn from(kind: CellKind) -> Self {
        match kind {
            CellKind::Safe => Self::Floor,
            CellKind::Danger => Self::Danger,
            CellKind::DangerVariant => Self::DangerVariant,
        }
    }
}

/// Presentation data describing the static tile layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileGridPresentation {
    /// Number of columns contained in the grid.
    pub columns: u32,
    /// Number of rows contained in the grid.
    pub rows: u32,
    tiles: Vec<TileVisual>,
}

impl TileGridPresentation {
    /// Creates a new tile grid presentation from row-major cell kinds.
    pub fn new<I>(columns: u32, rows: u32, kinds: I) -> Result<Self, RenderingError>
    where
        I: IntoIterator<Item = CellKind>,
    {
        let tiles: Vec<TileVisual> = kinds.into_iter().map(TileVisual::from).collect();
        let expected = usize::try_from(u64::from(columns) * u64::from(rows)).unwrap_or(usize::MAX);
        if tiles.len() != expected {
            return Err(RenderingError::TileCountMismatch {
                expected,
                found: tiles.len(),
            });
        }

        Ok(Self {
            columns,
            rows,
            tiles,
        })
    }

    /// Visual of the tile at the coordinate, if it lies inside the grid.
    #[must_use]
    pub fn tile(&self, cell: CellCoord) -> Option<TileVisual> {
        let column = u32::try_from(cell.x()).ok()?;
        let row = cell.y().checked_neg().and_then(|row| u32::try_from(row).ok())?;
        if column >= self.columns || row >= self.rows {
            return None;
        }
        let index = usize::try_from(u64::from(row) * u64::from(self.columns) + u64::from(column))
            .ok()?;
        self.tiles.get(index).copied()
    }
}

/// Scene description combining the tile grid, the player and the counters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scene {
    /// Tile grid that composes the play area.
    pub tile_grid: TileGridPresentation,
    /// Cell currently occupied by the player.
    pub player: CellCoord,
    /// Cell the player must reach.
    pub goal: CellCoord,
    /// Cells visited this session.
    pub visited: HashSet<CellCoord>,
    /// Counters shown beneath the grid.
    pub progress: ProgressReport,
}

impl Scene {
    /// Creates a new scene descriptor with only the player's cell visited.
    #[must_use]
    pub fn new(tile_grid: TileGridPresentation, player: CellCoord, goal: CellCoord) -> Self {
        Self {
            tile_grid,
            player,
            goal,
            visited: HashSet::from([player]),
            progress: ProgressReport::default(),
        }
    }

    /// Draws the grid top row first, one string per row.
    #[must_use]
    pub fn render_lines(&self, glyphs: &Glyphs) -> Vec<String> {
        let columns = i32::try_from(self.tile_grid.columns).unwrap_or(i32::MAX);
        let rows = i32::try_from(self.tile_grid.rows).unwrap_or(i32::MAX);

        (0..rows)
            .map(|row| {
                (0..columns)
                    .map(|column| self.glyph_at(CellCoord::new(column, -row), glyphs))
                    .collect::<String>()
            })
            .collect()
    }

    /// Status lines shown beneath the grid.
    #[must_use]
    pub fn status_lines(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "Tiles traversed: {}",
            self.progress.tiles_traversed
        )];
        if self.progress.won {
            lines.push("You win!".to_owned());
        }
        lines
    }

    fn glyph_at(&self, cell: CellCoord, glyphs: &Glyphs) -> char {
        if cell == self.player {
            return glyphs.player;
        }
        if cell == self.goal {
            return glyphs.goal;
        }
        match self.tile_grid.tile(cell) {
            Some(TileVisual::Danger) => glyphs.danger,
            Some(TileVisual::DangerVariant) => glyphs.danger_variant,
            Some(TileVisual::Floor) if self.visited.contains(&cell) => glyphs.visited,
            Some(TileVisual::Floor) | None => glyphs.safe,
        }
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Presentation {
    /// Title printed before the first frame.
    pub title: String,
    /// Characters used to draw the scene.
    pub glyphs: Glyphs,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(title: T, glyphs: Glyphs, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            title: title.into(),
            glyphs,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Grid Walk scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the input captured for a
    /// frame and mutates the scene before it is drawn again. Backends stop
    /// without calling it when the input requests quitting.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RenderingError {
    /// The tile list does not cover the grid exactly.
    #[error("expected {expected} tiles, received {found}")]
    TileCountMismatch {
        /// Number of tiles the grid requires.
        expected: usize,
        /// Number of tiles provided.
        found: usize,
    },
}
