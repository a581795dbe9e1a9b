//! Grid arithmetic: the snapping quantum and the frozen zone.

use crate::geometry::{Point, Rect};
use serde::{Deserialize, Serialize};

/// The snapping quantum for all board geometry.
///
/// One `GridSpec` cell is a square of `unit` device-independent units.
/// Every committed rectangle has its origin and size aligned to this
/// quantum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    unit: f32,
}

impl GridSpec {
    /// Smallest accepted cell side; smaller values would produce
    /// degenerate cells and division blow-ups.
    pub const MIN_UNIT: f32 = 10.0;

    /// Number of reserved rows at the top of the canvas. No region may
    /// occupy any part of rows `0..FROZEN_ROWS`.
    pub const FROZEN_ROWS: i32 = 3;

    /// Create a grid with the given cell side, clamped to [`Self::MIN_UNIT`].
    #[must_use]
    pub fn new(unit: f32) -> Self {
        Self {
            unit: unit.max(Self::MIN_UNIT),
        }
    }

    /// Derive a grid from display density: one cell per centimetre.
    #[must_use]
    pub fn from_dpi(dpi: f32) -> Self {
        Self::new((dpi / 2.54).floor())
    }

    /// Side length of one cell.
    #[must_use]
    pub const fn unit(&self) -> f32 {
        self.unit
    }

    /// Floor a scalar to the nearest lower multiple of the unit.
    #[must_use]
    pub fn snap_down(&self, v: f32) -> f32 {
        (v / self.unit).floor() * self.unit
    }

    /// Ceil a scalar to the nearest higher multiple of the unit.
    #[must_use]
    pub fn snap_up(&self, v: f32) -> f32 {
        (v / self.unit).ceil() * self.unit
    }

    /// Floor both coordinates of a point to the grid.
    #[must_use]
    pub fn snap(&self, p: Point) -> Point {
        Point::new(self.snap_down(p.x), self.snap_down(p.y))
    }

    /// Height of the frozen zone in device units.
    #[must_use]
    pub fn frozen_height(&self) -> f32 {
        self.unit * Self::FROZEN_ROWS as f32
    }

    /// True when any part of `rect` lies inside the frozen rows.
    ///
    /// Only the top edge needs checking: a rectangle whose top row is at
    /// or below the frozen boundary lies entirely below it.
    #[must_use]
    pub fn intersects_frozen(&self, rect: &Rect) -> bool {
        (rect.top() / self.unit).floor() < Self::FROZEN_ROWS as f32
    }
}
