use anyhow::{bail, Result};
use grid_walk_core::{CellCoord, Direction, Event};
use grid_walk_rendering::{FrameInput, Scene, TileGridPresentation};
use grid_walk_system_controls::{ControlInput, Controls};
use grid_walk_system_progress::Progress;
use grid_walk_world::{self as world, query, GridCell, World};
use log::{debug, trace};
use serde::Serialize;

/// Drives the world with the controls and progress systems on behalf of an adapter.
#[derive(Debug)]
pub(crate) struct Session {
    world: World,
    controls: Controls,
    progress: Progress,
    pending: Vec<Event>,
    rejected_steps: usize,
}

/// Outcome of a scripted run, printed by `--moves`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct ScriptSummary {
    pub(crate) player: CellCoord,
    pub(crate) goal: CellCoord,
    pub(crate) visited_count: usize,
    pub(crate) tiles_traversed: usize,
    pub(crate) won: bool,
    pub(crate) rejected_steps: usize,
}

impl Session {
    pub(crate) fn new(world: World) -> Self {
        let won = query::has_won(&world);
        let progress = Progress::new(query::visited_count(&world), won);
        Self {
            world,
            controls: Controls::with_goal_reached(won),
            progress,
            pending: Vec::new(),
            rejected_steps: 0,
        }
    }

    /// Builds the scene for the current state of the world.
    pub(crate) fn scene(&mut self) -> Result<Scene> {
        let grid = query::grid(&self.world);
        let tiles = TileGridPresentation::new(
            grid.columns(),
            grid.rows(),
            grid.cells().iter().map(GridCell::kind),
        )?;
        let mut scene = Scene::new(
            tiles,
            query::player_cell(&self.world),
            query::endpoints(&self.world).end(),
        );
        scene.visited = query::traversal(&self.world).visited().collect();
        self.publish_progress(&mut scene);
        Ok(scene)
    }

    /// Runs one frame: input through controls, commands through the world,
    /// events onto the scene.
    pub(crate) fn advance(&mut self, input: FrameInput, scene: &mut Scene) {
        let mut commands = Vec::new();
        self.controls.handle(
            &self.pending,
            ControlInput::new(input.step, input.restart),
            &mut commands,
        );

        self.pending.clear();
        for command in commands {
            trace!("[Session] applying {command:?}");
            world::apply(&mut self.world, command, &mut self.pending);
        }

        for event in &self.pending {
            match event {
                Event::PlayerMoved { to, .. } => scene.player = *to,
                Event::CellVisited { cell, .. } => {
                    let _ = scene.visited.insert(*cell);
                }
                Event::SessionRestarted { start } => {
                    scene.player = *start;
                    scene.visited.clear();
                    let _ = scene.visited.insert(*start);
                }
                Event::StepRejected { direction, reason } => {
                    self.rejected_steps += 1;
                    debug!("[Session] {direction:?} rejected: {reason:?}");
                }
                Event::GoalReached { .. } | Event::ProgressUpdated { .. } => {}
            }
        }

        self.publish_progress(scene);
    }

    /// Plays every move in order and summarises where the player ended up.
    pub(crate) fn play_script(&mut self, moves: &[Direction], scene: &mut Scene) -> ScriptSummary {
        for direction in moves {
            self.advance(
                FrameInput {
                    step: Some(*direction),
                    ..FrameInput::default()
                },
                scene,
            );
        }

        let report = query::progress_report(&self.world);
        ScriptSummary {
            player: query::player_cell(&self.world),
            goal: query::endpoints(&self.world).end(),
            visited_count: query::visited_count(&self.world),
            tiles_traversed: report.tiles_traversed,
            won: report.won,
            rejected_steps: self.rejected_steps,
        }
    }

    fn publish_progress(&mut self, scene: &mut Scene) {
        let mut published = Vec::new();
        self.progress.handle(&self.pending, &mut published);
        for event in published {
            if let Event::ProgressUpdated { report } = event {
                scene.progress = report;
            }
        }
    }
}

/// Parses a move script such as `RRDL`. Whitespace and commas are ignored.
pub(crate) fn parse_moves(script: &str) -> Result<Vec<Direction>> {
    script
        .chars()
        .filter(|letter| !letter.is_whitespace() && *letter != ',')
        .map(|letter| match Direction::from_letter(letter) {
            Some(direction) => Ok(direction),
            None => bail!("unknown move `{letter}`, expected one of U, D, L or R"),
        })
        .collect()
}
