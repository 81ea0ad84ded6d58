use grid_walk_core::{CellCoord, Command, Direction, Event, ProgressReport};
use grid_walk_system_progress::Progress;
use grid_walk_world::{self as world, query, World};

#[test]
fn first_handle_publishes_initial_report() {
    let mut progress = Progress::new(1, false);
    let mut emitted = Vec::new();

    progress.handle(&[], &mut emitted);

    assert_eq!(
        emitted,
        vec![Event::ProgressUpdated {
            report: ProgressReport {
                tiles_traversed: 0,
                won: false,
            },
        }]
    );
    assert_eq!(progress.last_report(), Some(&ProgressReport::default()));
}

#[test]
fn unchanged_counters_are_not_republished() {
    let mut progress = Progress::new(1, false);
    let mut emitted = Vec::new();
    progress.handle(&[], &mut emitted);
    emitted.clear();

    progress.handle(
        &[
            Event::PlayerMoved {
                from: CellCoord::new(1, 0),
                to: CellCoord::new(0, 0),
            },
            Event::StepRejected {
                direction: Direction::Up,
                reason: grid_walk_core::StepRejection::OutOfBounds,
            },
        ],
        &mut emitted,
    );

    assert!(emitted.is_empty(), "moves onto visited cells change nothing");
}

#[test]
fn visits_and_goal_update_report() {
    let mut progress = Progress::new(1, false);
    let mut emitted = Vec::new();

    progress.handle(
        &[
            Event::CellVisited {
                cell: CellCoord::new(1, 0),
                visited_count: 2,
            },
            Event::CellVisited {
                cell: CellCoord::new(2, 0),
                visited_count: 3,
            },
            Event::GoalReached {
                cell: CellCoord::new(2, 0),
            },
        ],
        &mut emitted,
    );

    assert_eq!(
        emitted,
        vec![Event::ProgressUpdated {
            report: ProgressReport {
                tiles_traversed: 2,
                won: true,
            },
        }]
    );
}

#[test]
fn restart_resets_counters() {
    let mut progress = Progress::new(4, true);
    let mut emitted = Vec::new();

    progress.handle(
        &[Event::SessionRestarted {
            start: CellCoord::new(0, 0),
        }],
        &mut emitted,
    );

    assert_eq!(progress.report(), ProgressReport::default());
}

#[test]
fn progress_tracks_world_queries() {
    let mut world = World::from_text("2 2\n0 0 0 0\n0 2\n").expect("level loads");
    let mut progress = Progress::new(query::visited_count(&world), query::has_won(&world));
    let script = [Direction::Right, Direction::Down, Direction::Left];

    for direction in script {
        let mut events = Vec::new();
        world::apply(&mut world, Command::Step { direction }, &mut events);
        let mut published = Vec::new();
        progress.handle(&events, &mut published);
        assert_eq!(progress.report(), query::progress_report(&world));
    }

    assert!(progress.report().won);
    assert_eq!(progress.report().tiles_traversed, 3);
}
