//! Grid-constrained spatial layout engine for Fieldboard.
//!
//! Places, moves, and resizes axis-aligned rectangles on a snapped grid
//! while guaranteeing no two rectangles overlap, keeping the reserved
//! top rows free, and auto-packing unplaced fields into free space.
//!
//! The engine is headless: it consumes abstract pointer events and a
//! field catalog, and emits placed regions plus usage events. Rendering
//! and persistence are collaborators' concerns.

mod board;
mod occupancy;
mod packer;

pub use board::{Board, Handle, Region, DEFAULT_REGION_COLOR};
pub use occupancy::{cells_of, Cell, OccupancyIndex};
pub use packer::{AutoPacker, PackPolicy, PackReport};
