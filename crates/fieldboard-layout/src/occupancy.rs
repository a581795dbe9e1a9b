//! Cell-level occupancy tracking for overlap queries.
//!
//! The index is a derived structure: it always equals the union of the
//! cells covered by the board's committed regions, and is updated
//! atomically with every region mutation. It exists to make overlap
//! testing O(cells) instead of O(regions squared).

use fieldboard_core::Rect;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One grid cell, addressed by column and row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    /// Column index
    pub col: i32,
    /// Row index
    pub row: i32,
}

impl Cell {
    /// Create a cell address.
    #[must_use]
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }
}

/// Map a rectangle to the set of grid cells it covers.
///
/// Right and bottom edges are exclusive of the next cell: a rectangle
/// exactly one unit wide covers exactly one column. Empty rectangles
/// cover no cells.
#[must_use]
pub fn cells_of(rect: &Rect, unit: f32) -> HashSet<Cell> {
    let mut cells = HashSet::new();
    if rect.is_empty() {
        return cells;
    }

    let left = (rect.left() / unit).floor() as i32;
    let top = (rect.top() / unit).floor() as i32;
    let right = ((rect.right() - 1.0) / unit).floor() as i32;
    let bottom = ((rect.bottom() - 1.0) / unit).floor() as i32;

    for col in left..=right {
        for row in top..=bottom {
            cells.insert(Cell::new(col, row));
        }
    }
    cells
}

/// Set of grid cells covered by all committed regions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OccupancyIndex {
    occupied: HashSet<Cell>,
}

impl OccupancyIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a set of cells.
    pub fn insert(&mut self, cells: &HashSet<Cell>) {
        self.occupied.extend(cells);
    }

    /// Remove a set of cells.
    pub fn remove(&mut self, cells: &HashSet<Cell>) {
        for cell in cells {
            self.occupied.remove(cell);
        }
    }

    /// True iff any of the given cells is occupied.
    #[must_use]
    pub fn overlaps(&self, cells: &HashSet<Cell>) -> bool {
        !self.occupied.is_disjoint(cells)
    }

    /// Whether a single cell is occupied.
    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        self.occupied.contains(&cell)
    }

    /// All occupied cells.
    #[must_use]
    pub fn cells(&self) -> &HashSet<Cell> {
        &self.occupied
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.occupied.len()
    }

    /// True when no cell is occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.occupied.is_empty()
    }

    /// Drop every cell.
    pub fn clear(&mut self) {
        self.occupied.clear();
    }
}
