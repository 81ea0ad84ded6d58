#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Grid Walk engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired moves, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. The level text format and its parser live in
//! [`description`].

pub mod description;

use serde::{Deserialize, Serialize};

pub use description::{parse_grid_description, GridDescription, MalformedInput};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Grid Walk.";

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Requests that the player advance a single cell in the specified direction.
    Step {
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Starts a new session on the same grid, returning the player to the start.
    Restart,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Confirms that the player moved between two cells.
    PlayerMoved {
        /// Cell the player occupied before moving.
        from: CellCoord,
        /// Cell the player occupies after completing the move.
        to: CellCoord,
    },
    /// Reports that the player entered a cell for the first time this session.
    CellVisited {
        /// Cell that joined the visited set.
        cell: CellCoord,
        /// Number of distinct cells visited after the insertion, start included.
        visited_count: usize,
    },
    /// Reports that a step request was refused and the player did not move.
    StepRejected {
        /// Direction of the refused step.
        direction: Direction,
        /// Specific reason the step failed.
        reason: StepRejection,
    },
    /// Announces that the player stands on the goal cell.
    GoalReached {
        /// Goal cell the player reached.
        cell: CellCoord,
    },
    /// Announces that a new session began with the player on the start cell.
    SessionRestarted {
        /// Start cell occupied by the player.
        start: CellCoord,
    },
    /// Published by the progress system whenever the counters change.
    ProgressUpdated {
        /// Latest progress snapshot.
        report: ProgressReport,
    },
}

/// Cardinal movement directions available to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward row zero (increasing `y`).
    Up,
    /// Movement away from row zero (decreasing `y`).
    Down,
    /// Movement toward decreasing `x`.
    Left,
    /// Movement toward increasing `x`.
    Right,
}

impl Direction {
    /// Every direction in a fixed order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Offset applied to a coordinate when stepping in this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, 1),
            Self::Down => (0, -1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Parses the single-letter move notation (`U`, `D`, `L`, `R`, any case).
    #[must_use]
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'U' => Some(Self::Up),
            'D' => Some(Self::Down),
            'L' => Some(Self::Left),
            'R' => Some(Self::Right),
            _ => None,
        }
    }
}

/// Reasons a step request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepRejection {
    /// The destination lies outside the grid.
    OutOfBounds,
    /// The destination is a danger cell.
    Danger,
    /// The goal was already reached, so movement is frozen for the session.
    GoalReached,
}

/// Location of a single grid cell.
///
/// Row zero is the top of the grid and `y` decreases downward, so every valid
/// coordinate satisfies `0 <= x < columns` and `-rows < y <= 0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    x: i32,
    y: i32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal component, zero at the left edge.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical component, zero on the top row and negative below it.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Coordinate one step away in the provided direction, if it fits in `i32`.
    #[must_use]
    pub fn stepped(self, direction: Direction) -> Option<CellCoord> {
        let (dx, dy) = direction.delta();
        Some(Self::new(
            self.x.checked_add(dx)?,
            self.y.checked_add(dy)?,
        ))
    }
}

/// Classification of a single cell as read from the level description.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    /// Walkable cell, code `0`.
    Safe,
    /// Blocked cell, code `1`.
    Danger,
    /// Blocked cell drawn with the alternate visual, code `2`.
    DangerVariant,
}

impl CellKind {
    /// Reports whether the player may occupy cells of this kind.
    #[must_use]
    pub const fn is_walkable(self) -> bool {
        matches!(self, Self::Safe)
    }

    /// Maps a level-file token onto a cell kind.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "0" => Some(Self::Safe),
            "1" => Some(Self::Danger),
            "2" => Some(Self::DangerVariant),
            _ => None,
        }
    }
}

/// Player-facing counters derived from the event stream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProgressReport {
    /// Distinct cells entered this session, not counting the start cell.
    pub tiles_traversed: usize,
    /// Whether the goal has been reached this session.
    pub won: bool,
}

impl ProgressReport {
    /// Builds a report from a visited-set size that includes the start cell.
    #[must_use]
    pub const fn from_visited(visited_count: usize, won: bool) -> Self {
        Self {
            tiles_traversed: visited_count.saturating_sub(1),
            won,
        }
    }
}
