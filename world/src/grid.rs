//! Classified cell layout built once from a level description.

use std::collections::HashSet;

use grid_walk_core::{CellCoord, CellKind, Direction, GridDescription};
use log::debug;

use crate::InitError;

/// Single cell of the grid paired with its resolved coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridCell {
    coord: CellCoord,
    kind: CellKind,
}

impl GridCell {
    /// Coordinate assigned to the cell by the traversal order.
    #[must_use]
    pub const fn coord(&self) -> CellCoord {
        self.coord
    }

    /// Kind read from the level description.
    #[must_use]
    pub const fn kind(&self) -> CellKind {
        self.kind
    }
}

/// Start and goal cells resolved from the raw level indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Endpoints {
    start: CellCoord,
    end: CellCoord,
}

impl Endpoints {
    /// Pairs a start cell with a goal cell.
    #[must_use]
    pub const fn new(start: CellCoord, end: CellCoord) -> Self {
        Self { start, end }
    }

    /// Cell the player occupies when a session begins.
    #[must_use]
    pub const fn start(&self) -> CellCoord {
        self.start
    }

    /// Cell the player must reach to win.
    #[must_use]
    pub const fn end(&self) -> CellCoord {
        self.end
    }
}

/// Immutable grid of safe and danger cells.
///
/// Linear index `i` sits at `x = i % columns`, `y = -(i / columns)`: cells are
/// laid out left to right, top to bottom, with `y` decreasing downward from
/// the top row. Every cell is either safe or dangerous, never both.
#[derive(Clone, Debug)]
pub struct Grid {
    columns: u32,
    rows: u32,
    x_max: i32,
    y_max: i32,
    cells: Vec<GridCell>,
    safe_zones: Vec<CellCoord>,
    safe_lookup: HashSet<CellCoord>,
    danger_zones: HashSet<CellCoord>,
    first_safe: CellCoord,
    last_safe: CellCoord,
}

impl Grid {
    /// Lays out and classifies every cell of the description.
    ///
    /// Fails with [`InitError::NoSafeCell`] when no cell is walkable, since
    /// the player could never be placed.
    pub fn build(description: &GridDescription) -> Result<Self, InitError> {
        let width = usize::try_from(description.columns()).unwrap_or(usize::MAX);
        let mut cells = Vec::with_capacity(description.cell_count());
        let mut safe_zones = Vec::new();
        let mut safe_lookup = HashSet::new();
        let mut danger_zones = HashSet::new();

        let mut cursor = CellCoord::new(0, 0);
        for (index, kind) in description.cells().iter().copied().enumerate() {
            cells.push(GridCell {
                coord: cursor,
                kind,
            });
            if kind.is_walkable() {
                safe_zones.push(cursor);
                let _ = safe_lookup.insert(cursor);
            } else {
                let _ = danger_zones.insert(cursor);
            }

            cursor = if (index + 1) % width == 0 {
                CellCoord::new(0, cursor.y() - 1)
            } else {
                CellCoord::new(cursor.x() + 1, cursor.y())
            };
        }

        let (Some(&first_safe), Some(&last_safe)) = (safe_zones.first(), safe_zones.last()) else {
            return Err(InitError::NoSafeCell);
        };

        debug!(
            "[Grid] built {}x{} grid: {} safe, {} danger",
            description.columns(),
            description.rows(),
            safe_zones.len(),
            danger_zones.len()
        );

        Ok(Self {
            columns: description.columns(),
            rows: description.rows(),
            x_max: i32::try_from(description.columns()).unwrap_or(i32::MAX),
            y_max: i32::try_from(description.rows()).map_or(i32::MIN, |rows| -rows),
            cells,
            safe_zones,
            safe_lookup,
            danger_zones,
            first_safe,
            last_safe,
        })
    }

    /// Resolves the raw level indices into start and goal cells.
    ///
    /// An index that is out of range or points at a danger cell falls back to
    /// the first safe cell (start) or the last safe cell (goal) in traversal
    /// order. Both fallbacks are independent, so start and goal may coincide.
    #[must_use]
    pub fn resolve_endpoints(&self, start_index: i64, end_index: i64) -> Endpoints {
        let start = self.safe_at_index(start_index).unwrap_or_else(|| {
            debug!(
                "[Grid] start index {start_index} is not a safe cell; using {:?}",
                self.first_safe
            );
            self.first_safe
        });
        let end = self.safe_at_index(end_index).unwrap_or_else(|| {
            debug!(
                "[Grid] end index {end_index} is not a safe cell; using {:?}",
                self.last_safe
            );
            self.last_safe
        });
        Endpoints::new(start, end)
    }

    /// Number of cell columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of cell rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Total number of cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Exclusive upper bound on `x`.
    #[must_use]
    pub const fn x_max(&self) -> i32 {
        self.x_max
    }

    /// Exclusive lower bound on `y`.
    #[must_use]
    pub const fn y_max(&self) -> i32 {
        self.y_max
    }

    /// Every cell in traversal order.
    #[must_use]
    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    /// Cell stored at the provided linear index, if the index is in range.
    #[must_use]
    pub fn cell_at_index(&self, index: i64) -> Option<GridCell> {
        usize::try_from(index)
            .ok()
            .and_then(|index| self.cells.get(index).copied())
    }

    /// Linear index of the coordinate, if it lies inside the grid.
    #[must_use]
    pub fn index_of(&self, cell: CellCoord) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        let column = usize::try_from(cell.x()).ok()?;
        let row = usize::try_from(cell.y().unsigned_abs()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }

    /// Kind of the cell at the coordinate, if it lies inside the grid.
    #[must_use]
    pub fn kind_at(&self, cell: CellCoord) -> Option<CellKind> {
        self.index_of(cell)
            .and_then(|index| self.cells.get(index))
            .map(GridCell::kind)
    }

    /// Reports whether the coordinate lies inside the grid.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        (0..self.x_max).contains(&cell.x()) && cell.y() <= 0 && cell.y() > self.y_max
    }

    /// Reports whether the player may stand on the coordinate.
    #[must_use]
    pub fn is_safe(&self, cell: CellCoord) -> bool {
        self.safe_lookup.contains(&cell)
    }

    /// Reports whether the coordinate is a danger cell.
    #[must_use]
    pub fn is_danger(&self, cell: CellCoord) -> bool {
        self.danger_zones.contains(&cell)
    }

    /// Safe cells in traversal order.
    #[must_use]
    pub fn safe_zones(&self) -> &[CellCoord] {
        &self.safe_zones
    }

    /// Danger cells in traversal order.
    pub fn danger_zones(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.cells
            .iter()
            .filter(|cell| !cell.kind.is_walkable())
            .map(GridCell::coord)
    }

    /// Number of danger cells.
    #[must_use]
    pub fn danger_count(&self) -> usize {
        self.danger_zones.len()
    }

    /// Checks the moving axis of a one-cell step against the grid edges.
    ///
    /// Upward steps may reach row zero inclusive, downward steps must stay
    /// strictly above `y_max`, rightward steps strictly below `x_max`, and
    /// leftward steps at or above zero.
    #[must_use]
    pub fn within_step_bounds(&self, direction: Direction, candidate: CellCoord) -> bool {
        match direction {
            Direction::Up => candidate.y() <= 0,
            Direction::Down => candidate.y() > self.y_max,
            Direction::Right => candidate.x() < self.x_max,
            Direction::Left => candidate.x() >= 0,
        }
    }

    fn safe_at_index(&self, index: i64) -> Option<CellCoord> {
        self.cell_at_index(index)
            .map(|cell| cell.coord)
            .filter(|coord| self.is_safe(*coord))
    }
}
