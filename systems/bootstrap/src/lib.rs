#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares the Grid Walk experience.

use grid_walk_core::ProgressReport;
use grid_walk_world::{query, Endpoints, Grid, InitError, World};
use log::warn;

/// Produces the world and the data required to greet the player.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Builds a world from level text, logging why initialisation failed.
    pub fn load(&self, level: &str) -> Result<World, InitError> {
        World::from_text(level).inspect_err(|error| warn!("[Bootstrap] level rejected: {error}"))
    }

    /// Derives the banner that should be shown when the experience starts.
    #[must_use]
    pub fn welcome_banner<'world>(&self, world: &'world World) -> &'world str {
        query::welcome_banner(world)
    }

    /// Exposes the grid layout required for rendering.
    #[must_use]
    pub fn grid<'world>(&self, world: &'world World) -> &'world Grid {
        query::grid(world)
    }

    /// Exposes the start and goal cells for presentation purposes.
    #[must_use]
    pub fn endpoints(&self, world: &World) -> Endpoints {
        query::endpoints(world)
    }

    /// Counters the presentation should show before the first move.
    #[must_use]
    pub fn initial_progress(&self, world: &World) -> ProgressReport {
        query::progress_report(world)
    }
}
