//! JSON round-trip of the engine's own state.
//!
//! The on-disk shape is the application's historical `config.json`:
//! a list of `{field, x, y, width, height}` rectangles plus the field
//! list, pretty-printed. Nothing else is persisted; colors and grid
//! configuration are runtime concerns.

use fieldboard_core::{FieldCatalog, GridSpec, Rect};
use fieldboard_layout::Board;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One saved region: a field identifier and its rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedRegion {
    /// Field identifier.
    pub field: String,
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl SavedRegion {
    /// The saved rectangle.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// The persisted layout: saved regions plus the field catalog order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutFile {
    /// Placed regions in z-order.
    pub rects: Vec<SavedRegion>,
    /// Known field identifiers in catalog order.
    pub fields: Vec<String>,
}

/// Errors from reading or writing a layout file.
#[derive(Debug, thiserror::Error)]
pub enum LayoutFileError {
    /// Filesystem failure.
    #[error("layout file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    /// Malformed JSON.
    #[error("layout file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl LayoutFile {
    /// Snapshot a board's regions and catalog.
    #[must_use]
    pub fn from_board(board: &Board) -> Self {
        let rects = board
            .export()
            .map(|(field, x, y, width, height)| SavedRegion {
                field: field.to_string(),
                x,
                y,
                width,
                height,
            })
            .collect();
        let fields = board.catalog().fields().to_vec();
        Self { rects, fields }
    }

    /// Rebuild a board over the given grid: the catalog comes from the
    /// field list and every saved region is preloaded as-is.
    #[must_use]
    pub fn into_board(&self, grid: GridSpec) -> Board {
        let mut board = Board::new(grid, FieldCatalog::new(self.fields.iter().cloned()));
        board.load_saved(
            self.rects
                .iter()
                .map(|saved| (saved.rect(), saved.field.clone())),
        );
        board.drain_events();
        board
    }

    /// Parse a layout from JSON.
    pub fn from_json(json: &str) -> Result<Self, LayoutFileError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, LayoutFileError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a layout file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LayoutFileError> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Write the layout to disk as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), LayoutFileError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
