#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Grid Walk.

pub mod grid;
pub mod traversal;

use grid_walk_core::{Command, Event, GridDescription, MalformedInput, WELCOME_BANNER};
use log::{info, trace};
use thiserror::Error;

pub use grid::{Endpoints, Grid, GridCell};
pub use traversal::{apply_step, has_won, visited_count, StepOutcome, StepVerdict, TraversalState};

/// Reasons a world cannot be initialised. No partial world is ever produced.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InitError {
    /// The level text did not decode.
    #[error("malformed level description: {0}")]
    Malformed(#[from] MalformedInput),
    /// The grid holds no walkable cell to place the player on.
    #[error("grid has no safe cell to place the player on")]
    NoSafeCell,
}

/// Represents the authoritative Grid Walk world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    grid: Grid,
    endpoints: Endpoints,
    traversal: TraversalState,
}

impl World {
    /// Builds the grid, resolves the endpoints and places the player on the start cell.
    pub fn new(description: &GridDescription) -> Result<Self, InitError> {
        let grid = Grid::build(description)?;
        let endpoints =
            grid.resolve_endpoints(description.start_index(), description.end_index());
        let traversal = TraversalState::begin(endpoints);
        info!(
            "[World] session started at {:?}, goal {:?}",
            endpoints.start(),
            endpoints.end()
        );

        Ok(Self {
            banner: WELCOME_BANNER,
            grid,
            endpoints,
            traversal,
        })
    }

    /// Parses level text and builds a world from it.
    pub fn from_text(text: &str) -> Result<Self, InitError> {
        let description = GridDescription::from_text(text)?;
        Self::new(&description)
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Step { direction } => match world.traversal.step(&world.grid, direction) {
            StepVerdict::Moved {
                from,
                to,
                newly_visited,
            } => {
                out_events.push(Event::PlayerMoved { from, to });
                if newly_visited {
                    out_events.push(Event::CellVisited {
                        cell: to,
                        visited_count: visited_count(&world.traversal),
                    });
                }
                if world.traversal.won() {
                    info!("[Traversal] goal reached at {to:?}");
                    out_events.push(Event::GoalReached { cell: to });
                }
            }
            StepVerdict::Rejected(reason) => {
                trace!("[Traversal] step {direction:?} rejected: {reason:?}");
                out_events.push(Event::StepRejected { direction, reason });
            }
        },
        Command::Restart => {
            world.traversal = TraversalState::begin(world.endpoints);
            let start = world.endpoints.start();
            info!("[World] session restarted at {start:?}");
            out_events.push(Event::SessionRestarted { start });
            if world.traversal.won() {
                out_events.push(Event::GoalReached { cell: start });
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use grid_walk_core::{CellCoord, ProgressReport};

    use super::{traversal, Endpoints, Grid, TraversalState, World};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the grid.
    #[must_use]
    pub fn grid(world: &World) -> &Grid {
        &world.grid
    }

    /// Start and goal cells resolved at initialisation.
    #[must_use]
    pub fn endpoints(world: &World) -> Endpoints {
        world.endpoints
    }

    /// Provides read-only access to the current session's traversal state.
    #[must_use]
    pub fn traversal(world: &World) -> &TraversalState {
        &world.traversal
    }

    /// Cell currently occupied by the player.
    #[must_use]
    pub fn player_cell(world: &World) -> CellCoord {
        world.traversal.current()
    }

    /// Number of distinct cells visited this session, start cell included.
    #[must_use]
    pub fn visited_count(world: &World) -> usize {
        traversal::visited_count(&world.traversal)
    }

    /// Reports whether the player has stood on the cell this session.
    #[must_use]
    pub fn has_visited(world: &World, cell: CellCoord) -> bool {
        world.traversal.has_visited(cell)
    }

    /// Reports whether the goal has been reached this session.
    #[must_use]
    pub fn has_won(world: &World) -> bool {
        world.traversal.won()
    }

    /// Player-facing counters for the current session.
    #[must_use]
    pub fn progress_report(world: &World) -> ProgressReport {
        ProgressReport::from_visited(visited_count(world), has_won(world))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_walk_core::{CellCoord, Direction, StepRejection};

    const REFERENCE_LEVEL: &str = "3 2\n0 0 1 0 1 0\n0 5\n";
    const CORRIDOR_LEVEL: &str = "4 1\n0 0 0 0\n0 3\n";

    fn step(world: &mut World, direction: Direction) -> Vec<Event> {
        let mut events = Vec::new();
        apply(world, Command::Step { direction }, &mut events);
        events
    }

    #[test]
    fn world_starts_on_resolved_start() {
        let world = World::from_text(REFERENCE_LEVEL).expect("level loads");

        assert_eq!(query::player_cell(&world), CellCoord::new(0, 0));
        assert_eq!(query::endpoints(&world).end(), CellCoord::new(2, -1));
        assert_eq!(query::visited_count(&world), 1);
        assert!(!query::has_won(&world));
        assert_eq!(query::welcome_banner(&world), WELCOME_BANNER);
    }

    #[test]
    fn malformed_text_does_not_initialise() {
        let error = World::from_text("3 2\n0 0 1").expect_err("two lines are not enough");

        assert_eq!(
            error,
            InitError::Malformed(MalformedInput::MissingLine { line: 3 })
        );
    }

    #[test]
    fn grid_without_safe_cells_does_not_initialise() {
        let error = World::from_text("2 1\n1 2\n0 1").expect_err("no safe cell");

        assert_eq!(error, InitError::NoSafeCell);
    }

    #[test]
    fn moving_into_a_new_cell_reports_the_visit() {
        let mut world = World::from_text(REFERENCE_LEVEL).expect("level loads");

        let events = step(&mut world, Direction::Right);

        assert_eq!(
            events,
            vec![
                Event::PlayerMoved {
                    from: CellCoord::new(0, 0),
                    to: CellCoord::new(1, 0),
                },
                Event::CellVisited {
                    cell: CellCoord::new(1, 0),
                    visited_count: 2,
                },
            ]
        );
    }

    #[test]
    fn returning_to_a_visited_cell_only_reports_the_move() {
        let mut world = World::from_text(REFERENCE_LEVEL).expect("level loads");
        let _ = step(&mut world, Direction::Right);

        let events = step(&mut world, Direction::Left);

        assert_eq!(
            events,
            vec![Event::PlayerMoved {
                from: CellCoord::new(1, 0),
                to: CellCoord::new(0, 0),
            }]
        );
        assert_eq!(query::visited_count(&world), 2);
    }

    #[test]
    fn rejected_step_reports_reason() {
        let mut world = World::from_text(REFERENCE_LEVEL).expect("level loads");
        let _ = step(&mut world, Direction::Right);

        let events = step(&mut world, Direction::Right);

        assert_eq!(
            events,
            vec![Event::StepRejected {
                direction: Direction::Right,
                reason: StepRejection::Danger,
            }]
        );
        assert_eq!(query::player_cell(&world), CellCoord::new(1, 0));
    }

    #[test]
    fn reaching_goal_emits_goal_event_after_visit() {
        let mut world = World::from_text(CORRIDOR_LEVEL).expect("level loads");
        let _ = step(&mut world, Direction::Right);
        let _ = step(&mut world, Direction::Right);

        let events = step(&mut world, Direction::Right);

        assert_eq!(
            events,
            vec![
                Event::PlayerMoved {
                    from: CellCoord::new(2, 0),
                    to: CellCoord::new(3, 0),
                },
                Event::CellVisited {
                    cell: CellCoord::new(3, 0),
                    visited_count: 4,
                },
                Event::GoalReached {
                    cell: CellCoord::new(3, 0),
                },
            ]
        );
        assert!(query::has_won(&world));
        assert_eq!(query::progress_report(&world).tiles_traversed, 3);
    }

    #[test]
    fn restart_resets_the_session() {
        let mut world = World::from_text(CORRIDOR_LEVEL).expect("level loads");
        for _ in 0..3 {
            let _ = step(&mut world, Direction::Right);
        }
        assert!(query::has_won(&world));

        let mut events = Vec::new();
        apply(&mut world, Command::Restart, &mut events);

        assert_eq!(
            events,
            vec![Event::SessionRestarted {
                start: CellCoord::new(0, 0),
            }]
        );
        assert!(!query::has_won(&world));
        assert_eq!(query::visited_count(&world), 1);
        assert!(!query::has_visited(&world, CellCoord::new(3, 0)));
    }

    #[test]
    fn restart_on_single_cell_grid_reports_immediate_win() {
        let mut world = World::from_text("1 1\n0\n0 0").expect("level loads");
        assert!(query::has_won(&world));

        let mut events = Vec::new();
        apply(&mut world, Command::Restart, &mut events);

        assert_eq!(
            events,
            vec![
                Event::SessionRestarted {
                    start: CellCoord::new(0, 0),
                },
                Event::GoalReached {
                    cell: CellCoord::new(0, 0),
                },
            ]
        );
    }
}
