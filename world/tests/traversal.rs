use grid_walk_core::{parse_grid_description, CellCoord, Direction, StepRejection};
use grid_walk_world::{apply_step, has_won, visited_count, Grid, StepVerdict, TraversalState};

fn start_session(dimensions: &str, cells: &str, endpoints: &str) -> (Grid, TraversalState) {
    let description =
        parse_grid_description(dimensions, cells, endpoints).expect("description parses");
    let grid = Grid::build(&description).expect("grid builds");
    let endpoints = grid.resolve_endpoints(description.start_index(), description.end_index());
    (grid, TraversalState::begin(endpoints))
}

#[test]
fn reference_level_walkthrough() {
    let (grid, state) = start_session("3 2", "0 0 1 0 1 0", "0 5");
    let end = CellCoord::new(2, -1);
    assert_eq!(state.current(), CellCoord::new(0, 0));
    assert_eq!(state.goal(), end);

    let outcome = apply_step(state, &grid, Direction::Right);
    assert!(matches!(outcome.verdict, StepVerdict::Moved { .. }));
    let outcome = apply_step(outcome.state, &grid, Direction::Right);
    assert_eq!(
        outcome.verdict,
        StepVerdict::Rejected(StepRejection::Danger),
        "(2,0) is a danger cell"
    );
    let outcome = apply_step(outcome.state, &grid, Direction::Left);
    let outcome = apply_step(outcome.state, &grid, Direction::Down);
    assert_eq!(outcome.state.current(), CellCoord::new(0, -1));
    let outcome = apply_step(outcome.state, &grid, Direction::Right);
    assert_eq!(
        outcome.verdict,
        StepVerdict::Rejected(StepRejection::Danger),
        "(1,-1) is a danger cell"
    );

    assert_eq!(outcome.state.current(), CellCoord::new(0, -1));
    assert_eq!(visited_count(&outcome.state), 3);
    assert!(!has_won(&outcome.state, end));
    assert!(!outcome.won);
}

#[test]
fn goal_reached_exactly_on_arrival() {
    let (grid, state) = start_session("3 3", "0 0 0 1 1 0 0 0 0", "0 6");
    let end = CellCoord::new(0, -2);

    let mut state = state;
    let path = [
        Direction::Right,
        Direction::Right,
        Direction::Down,
        Direction::Down,
        Direction::Left,
        Direction::Left,
    ];
    for (index, direction) in path.into_iter().enumerate() {
        let outcome = apply_step(state, &grid, direction);
        assert!(
            matches!(outcome.verdict, StepVerdict::Moved { .. }),
            "step {index} ({direction:?}) should be legal"
        );
        let arrived = index == path.len() - 1;
        assert_eq!(outcome.won, arrived, "won flag after step {index}");
        assert_eq!(has_won(&outcome.state, end), arrived);
        state = outcome.state;
    }

    assert_eq!(visited_count(&state), 7);
}

#[test]
fn current_cell_is_always_safe() {
    let (grid, mut state) = start_session("4 4", "0 1 0 0 0 2 0 1 0 0 0 1 1 0 2 0", "0 15");
    let script = [
        Direction::Right,
        Direction::Down,
        Direction::Down,
        Direction::Right,
        Direction::Right,
        Direction::Up,
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Down,
        Direction::Down,
        Direction::Left,
        Direction::Left,
    ];

    assert!(grid.is_safe(state.current()));
    for direction in script {
        let _ = state.step(&grid, direction);
        assert!(
            grid.is_safe(state.current()),
            "player left the safe zone at {:?}",
            state.current()
        );
    }
}

#[test]
fn every_edge_rejects_outward_steps() {
    let (grid, _) = start_session("3 3", "0 0 0 0 0 0 0 0 0", "4 4");

    for cell in grid.safe_zones().iter().copied() {
        for direction in Direction::ALL {
            let Some(candidate) = cell.stepped(direction) else {
                continue;
            };
            if grid.contains(candidate) {
                continue;
            }
            let endpoints = grid_walk_world::Endpoints::new(cell, CellCoord::new(1, -1));
            let mut state = TraversalState::begin(endpoints);
            assert_eq!(
                state.step(&grid, direction),
                StepVerdict::Rejected(StepRejection::OutOfBounds),
                "{direction:?} from {cell:?} must be rejected"
            );
        }
    }
}
