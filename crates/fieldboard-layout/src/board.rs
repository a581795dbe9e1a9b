//! The placement engine: regions, drag state machine, collision rules.

use crate::occupancy::{cells_of, Cell, OccupancyIndex};
use fieldboard_core::{Color, FieldCatalog, FieldEvent, GridSpec, Point, PointerEvent, Rect};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Outline color regions are created with unless overridden.
pub const DEFAULT_REGION_COLOR: Color = Color {
    r: 0.0,
    g: 100.0 / 255.0,
    b: 1.0,
    a: 1.0,
};

/// Half-size of the square hit zone around each corner, in device units.
const CORNER_HANDLE_ZONE: f32 = 8.0;

/// Distance from an edge that still grabs that edge, in device units.
const EDGE_HANDLE_ZONE: f32 = 5.0;

/// A placed, named rectangle bound to one field identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Snapped bounds on the canvas.
    pub bounds: Rect,
    /// The field this region is bound to; unique among placed regions.
    pub field_id: String,
    /// Outline color.
    pub color: Color,
}

/// Resize handle tags, named for the edge or corner they grab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Handle {
    /// Top-left corner
    TopLeft,
    /// Top-right corner
    TopRight,
    /// Bottom-left corner
    BottomLeft,
    /// Bottom-right corner
    BottomRight,
    /// Top edge
    Top,
    /// Bottom edge
    Bottom,
    /// Left edge
    Left,
    /// Right edge
    Right,
}

/// What an in-progress edit does to its region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditMode {
    Move,
    Resize(Handle),
}

/// Interaction state machine.
///
/// `Creating` and `Editing` are mutually exclusive: a creation drag
/// cannot start while a move/resize is active and vice versa.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Interaction {
    Idle,
    Creating {
        start: Point,
        end: Point,
    },
    Editing {
        index: usize,
        mode: EditMode,
        origin: Rect,
        drag_start: Point,
    },
}

/// The placement engine.
///
/// Owns the committed regions (insertion order is z-order, topmost
/// last), the derived [`OccupancyIndex`], and the interaction state.
/// Every rejected mutation is a silent no-op: the board is left
/// identical to before the attempt.
#[derive(Debug)]
pub struct Board {
    grid: GridSpec,
    catalog: FieldCatalog,
    regions: Vec<Region>,
    occupancy: OccupancyIndex,
    active_field: Option<String>,
    interaction: Interaction,
    events: Vec<FieldEvent>,
    region_color: Color,
}

impl Board {
    /// Create an empty board over the given grid and field catalog.
    #[must_use]
    pub fn new(grid: GridSpec, catalog: FieldCatalog) -> Self {
        Self {
            grid,
            catalog,
            regions: Vec::new(),
            occupancy: OccupancyIndex::new(),
            active_field: None,
            interaction: Interaction::Idle,
            events: Vec::new(),
            region_color: DEFAULT_REGION_COLOR,
        }
    }

    /// The board's grid.
    #[must_use]
    pub const fn grid(&self) -> GridSpec {
        self.grid
    }

    /// The field catalog.
    #[must_use]
    pub const fn catalog(&self) -> &FieldCatalog {
        &self.catalog
    }

    /// Committed regions in z-order (topmost last).
    #[must_use]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// The region bound to a field, if placed.
    #[must_use]
    pub fn region_for(&self, field_id: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.field_id == field_id)
    }

    /// The occupancy index.
    #[must_use]
    pub const fn occupancy(&self) -> &OccupancyIndex {
        &self.occupancy
    }

    /// Set the outline color for subsequently created regions.
    pub fn set_region_color(&mut self, color: Color) {
        self.region_color = color;
    }

    /// Floor a point to the grid.
    #[must_use]
    pub fn snap(&self, point: Point) -> Point {
        self.grid.snap(point)
    }

    /// Arm a field for one-shot placement by the next creation drag.
    ///
    /// Ignored for unknown or already-placed fields.
    pub fn set_active_field(&mut self, field_id: &str) {
        if self.catalog.contains(field_id) && !self.catalog.is_used(field_id) {
            self.active_field = Some(field_id.to_string());
        }
    }

    /// The field armed for placement, if any.
    #[must_use]
    pub fn active_field(&self) -> Option<&str> {
        self.active_field.as_deref()
    }

    /// Take all usage events emitted since the last drain, in order.
    pub fn drain_events(&mut self) -> Vec<FieldEvent> {
        std::mem::take(&mut self.events)
    }

    // ------------------------------------------------------------------
    // Creation drag
    // ------------------------------------------------------------------

    /// Start a creation drag for an unplaced field.
    ///
    /// No-op if the field is unknown or already placed, or if another
    /// interaction is in progress.
    pub fn begin_create(&mut self, field_id: &str, point: Point) {
        if self.interaction != Interaction::Idle {
            return;
        }
        if !self.catalog.contains(field_id) || self.catalog.is_used(field_id) {
            return;
        }
        self.active_field = Some(field_id.to_string());
        let snapped = self.grid.snap(point);
        self.interaction = Interaction::Creating {
            start: snapped,
            end: snapped,
        };
    }

    /// Update the live end-point of a creation drag. Purely visual
    /// until release; idempotent per call.
    pub fn update_create(&mut self, point: Point) {
        if let Interaction::Creating { end, .. } = &mut self.interaction {
            *end = self.grid.snap(point);
        }
    }

    /// The normalized draft rectangle of an in-progress creation drag.
    #[must_use]
    pub fn creation_preview(&self) -> Option<Rect> {
        match self.interaction {
            Interaction::Creating { start, end } => Some(Rect::from_corners(start, end)),
            _ => None,
        }
    }

    /// Finish a creation drag.
    ///
    /// The draft is discarded (and the field stays armed) if the
    /// normalized rectangle touches the frozen zone, has zero width or
    /// height, or overlaps occupied cells. On success the region is
    /// committed and the armed field cleared.
    pub fn end_create(&mut self) {
        let Interaction::Creating { start, end } = self.interaction else {
            return;
        };
        self.interaction = Interaction::Idle;

        let Some(field_id) = self.active_field.clone() else {
            return;
        };
        let bounds = Rect::from_corners(start, end);
        if self.place(&field_id, bounds) {
            self.active_field = None;
        }
    }

    /// Commit a rectangle for a field through the standard checks.
    ///
    /// Rejects (returning `false`, with no state change) when the field
    /// is unknown or already placed, or the rectangle touches the
    /// frozen zone, is empty, or overlaps occupied cells.
    pub fn place(&mut self, field_id: &str, bounds: Rect) -> bool {
        if !self.catalog.contains(field_id) || self.catalog.is_used(field_id) {
            return false;
        }
        if bounds.is_empty() || self.grid.intersects_frozen(&bounds) {
            return false;
        }
        let cells = self.cells(&bounds);
        if self.occupancy.overlaps(&cells) {
            return false;
        }

        self.occupancy.insert(&cells);
        self.regions.push(Region {
            bounds,
            field_id: field_id.to_string(),
            color: self.region_color,
        });
        self.catalog.mark_used(field_id);
        self.events.push(FieldEvent::new(field_id, true));
        true
    }

    // ------------------------------------------------------------------
    // Move / resize drag
    // ------------------------------------------------------------------

    /// Hit-test the point and select a region for move or resize.
    ///
    /// Regions are tested topmost-first. A point within the corner or
    /// edge handle zones selects a resize; elsewhere inside a region it
    /// selects a move. The selected region's cells leave the occupancy
    /// index so it cannot collide with itself, and its bounds are
    /// snapshotted for cancellation.
    pub fn begin_interaction(&mut self, point: Point) {
        if self.interaction != Interaction::Idle {
            return;
        }

        let Some((index, mode)) = self.hit_test(point) else {
            return;
        };
        let origin = self.regions[index].bounds;
        let cells = self.cells(&origin);
        self.occupancy.remove(&cells);
        self.interaction = Interaction::Editing {
            index,
            mode,
            origin,
            drag_start: point,
        };
    }

    fn hit_test(&self, point: Point) -> Option<(usize, EditMode)> {
        for (index, region) in self.regions.iter().enumerate().rev() {
            if !region.bounds.contains_point(&point) {
                continue;
            }
            let mode = match Self::handle_at(&region.bounds, point) {
                Some(handle) => EditMode::Resize(handle),
                None => EditMode::Move,
            };
            return Some((index, mode));
        }
        None
    }

    /// Classify a point (already inside `bounds`) against the handle
    /// zones. Corners win over edges.
    fn handle_at(bounds: &Rect, point: Point) -> Option<Handle> {
        let dl = (point.x - bounds.left()).abs();
        let dr = (bounds.right() - point.x).abs();
        let dt = (point.y - bounds.top()).abs();
        let db = (bounds.bottom() - point.y).abs();

        let near = |d: f32| d <= CORNER_HANDLE_ZONE;
        if near(dl) && near(dt) {
            return Some(Handle::TopLeft);
        }
        if near(dr) && near(dt) {
            return Some(Handle::TopRight);
        }
        if near(dl) && near(db) {
            return Some(Handle::BottomLeft);
        }
        if near(dr) && near(db) {
            return Some(Handle::BottomRight);
        }

        if dt <= EDGE_HANDLE_ZONE {
            return Some(Handle::Top);
        }
        if db <= EDGE_HANDLE_ZONE {
            return Some(Handle::Bottom);
        }
        if dl <= EDGE_HANDLE_ZONE {
            return Some(Handle::Left);
        }
        if dr <= EDGE_HANDLE_ZONE {
            return Some(Handle::Right);
        }
        None
    }

    /// Advance a move/resize drag to the given point.
    ///
    /// The candidate rectangle is recomputed from the snapshot, so
    /// repeated calls with the same point are idempotent. It is
    /// committed into the live region only if it clears the frozen
    /// zone, keeps each dimension at least one unit (resize), and
    /// overlaps no occupied cell; otherwise the region keeps its last
    /// good bounds.
    pub fn update_interaction(&mut self, point: Point) {
        let Interaction::Editing {
            index,
            mode,
            origin,
            drag_start,
        } = self.interaction
        else {
            return;
        };

        let candidate = match mode {
            EditMode::Move => {
                let delta = point - drag_start;
                let moved = origin.translate(delta.x, delta.y);
                moved.with_origin(self.grid.snap(moved.origin()))
            }
            EditMode::Resize(handle) => {
                Self::resized(&origin, handle, self.grid.snap(point))
            }
        };

        if self.grid.intersects_frozen(&candidate) {
            return;
        }
        if let EditMode::Resize(_) = mode {
            if candidate.width < self.grid.unit() || candidate.height < self.grid.unit() {
                return;
            }
        }
        let cells = self.cells(&candidate);
        if self.occupancy.overlaps(&cells) {
            return;
        }
        self.regions[index].bounds = candidate;
    }

    /// Move the edge(s) named by the handle to the snapped point, then
    /// normalize.
    fn resized(origin: &Rect, handle: Handle, to: Point) -> Rect {
        let mut left = origin.left();
        let mut top = origin.top();
        let mut right = origin.right();
        let mut bottom = origin.bottom();

        match handle {
            Handle::TopLeft => {
                left = to.x;
                top = to.y;
            }
            Handle::TopRight => {
                right = to.x;
                top = to.y;
            }
            Handle::BottomLeft => {
                left = to.x;
                bottom = to.y;
            }
            Handle::BottomRight => {
                right = to.x;
                bottom = to.y;
            }
            Handle::Top => top = to.y,
            Handle::Bottom => bottom = to.y,
            Handle::Left => left = to.x,
            Handle::Right => right = to.x,
        }
        Rect::from_corners(Point::new(left, top), Point::new(right, bottom))
    }

    /// Finish a move/resize drag: the region's final cells rejoin the
    /// occupancy index and the interaction state clears. No-op when no
    /// interaction is active.
    pub fn end_interaction(&mut self) {
        let Interaction::Editing { index, .. } = self.interaction else {
            return;
        };
        self.interaction = Interaction::Idle;
        let bounds = self.regions[index].bounds;
        let cells = self.cells(&bounds);
        self.occupancy.insert(&cells);
        let field_id = self.regions[index].field_id.clone();
        self.events.push(FieldEvent::new(field_id, true));
    }

    /// Abort the current drag.
    ///
    /// A move/resize is rolled back to its snapshot and the snapshot's
    /// cells rejoin the index, so the index is never left missing cells
    /// for a region that still exists. A creation draft is discarded
    /// with the field left armed.
    pub fn cancel_interaction(&mut self) {
        match std::mem::replace(&mut self.interaction, Interaction::Idle) {
            Interaction::Editing { index, origin, .. } => {
                self.regions[index].bounds = origin;
                let cells = self.cells(&origin);
                self.occupancy.insert(&cells);
            }
            Interaction::Creating { .. } | Interaction::Idle => {}
        }
    }

    // ------------------------------------------------------------------
    // Deletion, preload, export
    // ------------------------------------------------------------------

    /// Remove every region bound to the field.
    ///
    /// Sweeps all matching regions (tolerating degenerate multi-region
    /// states) and rebuilds the occupancy index from the survivors, so
    /// cells shared by overlapping preloaded regions are never
    /// stranded. No-op while a drag is in progress.
    pub fn delete_region(&mut self, field_id: &str) {
        if self.interaction != Interaction::Idle {
            return;
        }
        let before = self.regions.len();
        self.regions.retain(|r| r.field_id != field_id);
        if self.regions.len() == before {
            return;
        }
        self.rebuild_occupancy();
        if !self.regions.iter().any(|r| r.field_id == field_id) {
            self.catalog.mark_unused(field_id);
            self.events.push(FieldEvent::new(field_id, false));
        }
    }

    /// Preload previously saved `(rect, field)` pairs as regions.
    ///
    /// No validation beyond structure: overlapping rectangles are
    /// accepted as-is (last processed wins visually), and the occupancy
    /// index and used set are repopulated from the input.
    pub fn load_saved<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (Rect, String)>,
    {
        for (bounds, field_id) in entries {
            let cells = self.cells(&bounds);
            self.occupancy.insert(&cells);
            self.catalog.mark_used(&field_id);
            self.events.push(FieldEvent::new(field_id.clone(), true));
            self.regions.push(Region {
                bounds,
                field_id,
                color: self.region_color,
            });
        }
    }

    /// Export every region as a `(field, x, y, width, height)` tuple.
    pub fn export(&self) -> impl Iterator<Item = (&str, f32, f32, f32, f32)> {
        self.regions.iter().map(|r| {
            (
                r.field_id.as_str(),
                r.bounds.x,
                r.bounds.y,
                r.bounds.width,
                r.bounds.height,
            )
        })
    }

    /// Full-state reset: all regions destroyed, index emptied, used
    /// marks cleared, any drag abandoned.
    pub fn clear(&mut self) {
        let used: Vec<String> = self
            .catalog
            .fields()
            .iter()
            .filter(|f| self.catalog.is_used(f))
            .cloned()
            .collect();
        for field in used {
            self.events.push(FieldEvent::new(field, false));
        }
        self.regions.clear();
        self.occupancy.clear();
        self.catalog.clear_used();
        self.active_field = None;
        self.interaction = Interaction::Idle;
    }

    // ------------------------------------------------------------------
    // Pointer dispatch
    // ------------------------------------------------------------------

    /// Drive the state machine from an abstract pointer event.
    ///
    /// A press starts a creation drag when a field is armed, otherwise
    /// a move/resize on whatever region it hits.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { position } => {
                if let Some(field) = self.active_field.clone() {
                    self.begin_create(&field, position);
                } else {
                    self.begin_interaction(position);
                }
            }
            PointerEvent::Move { position } => match self.interaction {
                Interaction::Creating { .. } => self.update_create(position),
                Interaction::Editing { .. } => self.update_interaction(position),
                Interaction::Idle => {}
            },
            PointerEvent::Up { position } => match self.interaction {
                Interaction::Creating { .. } => {
                    self.update_create(position);
                    self.end_create();
                }
                Interaction::Editing { .. } => {
                    self.update_interaction(position);
                    self.end_interaction();
                }
                Interaction::Idle => {}
            },
            PointerEvent::Cancel => self.cancel_interaction(),
        }
    }

    fn cells(&self, rect: &Rect) -> HashSet<Cell> {
        cells_of(rect, self.grid.unit())
    }

    fn rebuild_occupancy(&mut self) {
        self.occupancy.clear();
        let unit = self.grid.unit();
        for region in &self.regions {
            let cells = cells_of(&region.bounds, unit);
            self.occupancy.insert(&cells);
        }
    }
}
