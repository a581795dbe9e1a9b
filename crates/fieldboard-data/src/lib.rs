//! Collaborator plumbing for the Fieldboard layout engine:
//! - [`RecordSet`]: in-memory rows with cursor navigation, bound to
//!   the same field names the board places.
//! - [`LayoutFile`]: JSON round-trip of the board's own state.

mod layout_file;
mod records;

pub use layout_file::{LayoutFile, LayoutFileError, SavedRegion};
pub use records::RecordSet;
