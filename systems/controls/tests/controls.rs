use grid_walk_core::{CellCoord, Command, Direction, Event};
use grid_walk_system_controls::{ControlInput, Controls};
use grid_walk_world::{self as world, query, World};

#[test]
fn step_input_emits_step_command() {
    let mut controls = Controls::default();
    let mut commands = Vec::new();

    controls.handle(&[], ControlInput::step(Direction::Left), &mut commands);

    assert_eq!(
        commands,
        vec![Command::Step {
            direction: Direction::Left,
        }],
        "controls should forward a single step request",
    );
}

#[test]
fn empty_input_emits_nothing() {
    let mut controls = Controls::default();
    let mut commands = Vec::new();

    controls.handle(&[], ControlInput::default(), &mut commands);

    assert!(commands.is_empty(), "no input, no commands");
}

#[test]
fn step_input_ignored_after_goal_reached() {
    let mut controls = Controls::default();
    let mut commands = Vec::new();

    controls.handle(
        &[Event::GoalReached {
            cell: CellCoord::new(1, 0),
        }],
        ControlInput::step(Direction::Right),
        &mut commands,
    );

    assert!(
        commands.is_empty(),
        "movement must stop once the goal is reached"
    );
    assert!(controls.movement_locked());
}

#[test]
fn restart_unlocks_movement() {
    let mut controls = Controls::with_goal_reached(true);
    let mut commands = Vec::new();

    controls.handle(&[], ControlInput::new(None, true), &mut commands);
    assert_eq!(commands, vec![Command::Restart]);

    commands.clear();
    controls.handle(
        &[Event::SessionRestarted {
            start: CellCoord::new(0, 0),
        }],
        ControlInput::step(Direction::Down),
        &mut commands,
    );

    assert_eq!(
        commands,
        vec![Command::Step {
            direction: Direction::Down,
        }],
        "movement resumes once the world confirms the restart",
    );
}

#[test]
fn restart_takes_precedence_over_step() {
    let mut controls = Controls::new();
    let mut commands = Vec::new();

    controls.handle(
        &[],
        ControlInput::new(Some(Direction::Up), true),
        &mut commands,
    );

    assert_eq!(commands, vec![Command::Restart]);
}

#[test]
fn controls_drive_world_to_goal() {
    let mut world = World::from_text("3 1\n0 0 0\n0 2\n").expect("level loads");
    let mut controls = Controls::new();
    let mut events = Vec::new();

    for _ in 0..4 {
        let mut commands = Vec::new();
        controls.handle(&events, ControlInput::step(Direction::Right), &mut commands);
        events.clear();
        for command in commands {
            world::apply(&mut world, command, &mut events);
        }
    }

    assert!(query::has_won(&world));
    assert_eq!(query::player_cell(&world), CellCoord::new(2, 0));
    assert!(controls.movement_locked());
}
