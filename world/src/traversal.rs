//! Discrete single-step movement over an immutable [`Grid`].

use std::collections::HashSet;

use grid_walk_core::{CellCoord, Direction, StepRejection};

use crate::grid::{Endpoints, Grid};

/// Mutable per-session traversal state.
///
/// The current cell is always safe, the visited set only grows, and once the
/// goal is reached the state stays won until a new session begins.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraversalState {
    current: CellCoord,
    goal: CellCoord,
    visited: HashSet<CellCoord>,
    won: bool,
}

impl TraversalState {
    /// Places the player on the start cell and marks it visited.
    #[must_use]
    pub fn begin(endpoints: Endpoints) -> Self {
        let start = endpoints.start();
        let mut visited = HashSet::new();
        let _ = visited.insert(start);
        let mut state = Self {
            current: start,
            goal: endpoints.end(),
            visited,
            won: false,
        };
        state.won = has_won(&state, state.goal);
        state
    }

    /// Cell currently occupied by the player.
    #[must_use]
    pub const fn current(&self) -> CellCoord {
        self.current
    }

    /// Goal cell captured when the session began.
    #[must_use]
    pub const fn goal(&self) -> CellCoord {
        self.goal
    }

    /// Whether the goal was reached this session.
    #[must_use]
    pub const fn won(&self) -> bool {
        self.won
    }

    /// Reports whether the player has stood on the cell this session.
    #[must_use]
    pub fn has_visited(&self, cell: CellCoord) -> bool {
        self.visited.contains(&cell)
    }

    /// Visited cells in unspecified order.
    pub fn visited(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.visited.iter().copied()
    }

    /// Validates and applies one step in place.
    pub fn step(&mut self, grid: &Grid, direction: Direction) -> StepVerdict {
        let to = match self.check_step(grid, direction) {
            Ok(to) => to,
            Err(reason) => return StepVerdict::Rejected(reason),
        };

        let from = self.current;
        self.current = to;
        let newly_visited = self.visited.insert(to);
        self.won = self.won || has_won(self, self.goal);

        StepVerdict::Moved {
            from,
            to,
            newly_visited,
        }
    }

    fn check_step(&self, grid: &Grid, direction: Direction) -> Result<CellCoord, StepRejection> {
        if self.won {
            return Err(StepRejection::GoalReached);
        }

        let candidate = self
            .current
            .stepped(direction)
            .ok_or(StepRejection::OutOfBounds)?;
        if !grid.within_step_bounds(direction, candidate) {
            return Err(StepRejection::OutOfBounds);
        }
        if grid.is_danger(candidate) {
            return Err(StepRejection::Danger);
        }

        Ok(candidate)
    }
}

/// Result of a single step request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepVerdict {
    /// The player moved.
    Moved {
        /// Cell occupied before the step.
        from: CellCoord,
        /// Cell occupied after the step.
        to: CellCoord,
        /// Whether `to` joined the visited set with this step.
        newly_visited: bool,
    },
    /// The step was refused; the state is unchanged.
    Rejected(StepRejection),
}

/// Updated state returned by [`apply_step`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepOutcome {
    /// State after the step.
    pub state: TraversalState,
    /// What happened to the request.
    pub verdict: StepVerdict,
    /// Win flag after the post-step check.
    pub won: bool,
}

/// Applies one step to `state`, returning the updated state.
///
/// A rejected step hands the state back untouched.
#[must_use]
pub fn apply_step(mut state: TraversalState, grid: &Grid, direction: Direction) -> StepOutcome {
    let verdict = state.step(grid, direction);
    let won = state.won;
    StepOutcome {
        state,
        verdict,
        won,
    }
}

/// Number of distinct cells visited this session, start cell included.
#[must_use]
pub fn visited_count(state: &TraversalState) -> usize {
    state.visited.len()
}

/// Reports whether the player stands on `end`.
#[must_use]
pub fn has_won(state: &TraversalState, end: CellCoord) -> bool {
    state.current == end
}
