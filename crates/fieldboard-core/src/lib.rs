//! Core types for the Fieldboard form-region designer.
//!
//! This crate provides the foundational types shared by the layout
//! engine and its collaborators:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`]
//! - Grid arithmetic: [`GridSpec`]
//! - Color representation: [`Color`]
//! - Abstract pointer input: [`PointerEvent`]
//! - Field catalog and usage events: [`FieldCatalog`], [`FieldEvent`]

mod catalog;
mod color;
mod event;
mod geometry;
mod grid;

pub use catalog::{FieldCatalog, FieldEvent};
pub use color::{Color, ColorParseError};
pub use event::PointerEvent;
pub use geometry::{Point, Rect, Size};
pub use grid::GridSpec;
