#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure controls system responsible for turning player input into world commands.

use grid_walk_core::{Command, Direction, Event};

/// Input snapshot distilled from adapter-provided frame input data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlInput {
    /// Direction requested by the player on this frame, if any.
    pub step: Option<Direction>,
    /// Indicates whether the player asked to play again on this frame.
    pub restart: bool,
}

impl ControlInput {
    /// Creates a new input descriptor with explicit field values.
    #[must_use]
    pub const fn new(step: Option<Direction>, restart: bool) -> Self {
        Self { step, restart }
    }

    /// Input carrying a single step request.
    #[must_use]
    pub const fn step(direction: Direction) -> Self {
        Self::new(Some(direction), false)
    }
}

/// Controls system that translates input into step and restart commands.
///
/// Movement input is dropped once the goal has been reached and resumes after
/// the world confirms a restart.
#[derive(Debug, Clone, Default)]
pub struct Controls {
    goal_reached: bool,
}

impl Controls {
    /// Creates a new controls system instance.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            goal_reached: false,
        }
    }

    /// Creates a controls system for a world that may already be won.
    #[must_use]
    pub const fn with_goal_reached(goal_reached: bool) -> Self {
        Self { goal_reached }
    }

    /// Whether movement input is currently being dropped.
    #[must_use]
    pub const fn movement_locked(&self) -> bool {
        self.goal_reached
    }

    /// Consumes world events and adapter-derived input to emit commands.
    ///
    /// A restart request takes precedence over a step on the same frame.
    pub fn handle(&mut self, events: &[Event], input: ControlInput, out: &mut Vec<Command>) {
        for event in events {
            match event {
                Event::GoalReached { .. } => self.goal_reached = true,
                Event::SessionRestarted { .. } => self.goal_reached = false,
                _ => {}
            }
        }

        if input.restart {
            out.push(Command::Restart);
            return;
        }

        if self.goal_reached {
            return;
        }

        if let Some(direction) = input.step {
            out.push(Command::Step { direction });
        }
    }
}
