#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic progress system that tracks the tiles-traversed counter.

use grid_walk_core::{Event, ProgressReport};

/// Pure progress system that folds world events into player-facing counters.
#[derive(Debug, Default)]
pub struct Progress {
    visited_count: usize,
    won: bool,
    last_report: Option<ProgressReport>,
}

impl Progress {
    /// Creates a progress tracker seeded from the world's current counters.
    ///
    /// `visited_count` includes the start cell, matching the world's query.
    #[must_use]
    pub fn new(visited_count: usize, won: bool) -> Self {
        Self {
            visited_count,
            won,
            last_report: None,
        }
    }

    /// Current counters, whether or not they have been published yet.
    #[must_use]
    pub fn report(&self) -> ProgressReport {
        ProgressReport::from_visited(self.visited_count, self.won)
    }

    /// Returns the last report published by the system, if any.
    #[must_use]
    pub fn last_report(&self) -> Option<&ProgressReport> {
        self.last_report.as_ref()
    }

    /// Consumes world events and publishes a report when the counters change.
    ///
    /// The first call always publishes so adapters can show the initial state.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Event>) {
        for event in events {
            match event {
                Event::CellVisited { visited_count, .. } => {
                    self.visited_count = self.visited_count.max(*visited_count);
                }
                Event::GoalReached { .. } => self.won = true,
                Event::SessionRestarted { .. } => {
                    self.visited_count = 1;
                    self.won = false;
                }
                _ => {}
            }
        }

        let report = self.report();
        if self.last_report == Some(report) {
            return;
        }

        self.last_report = Some(report);
        out.push(Event::ProgressUpdated { report });
    }
}
