//! Abstract pointer events driving the placement engine.
//!
//! The engine never talks to a windowing toolkit; the embedding
//! application translates its native mouse/touch events into these.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Pointer input event types.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    /// Pointer pressed
    Down {
        /// Position of press
        position: Point,
    },
    /// Pointer moved
    Move {
        /// New position
        position: Point,
    },
    /// Pointer released
    Up {
        /// Position of release
        position: Point,
    },
    /// Pointer left the canvas or the drag was aborted
    Cancel,
}

impl PointerEvent {
    /// The event position, if it carries one.
    #[must_use]
    pub const fn position(&self) -> Option<Point> {
        match self {
            Self::Down { position } | Self::Move { position } | Self::Up { position } => {
                Some(*position)
            }
            Self::Cancel => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position() {
        let p = Point::new(10.0, 20.0);
        assert_eq!(PointerEvent::Down { position: p }.position(), Some(p));
        assert_eq!(PointerEvent::Move { position: p }.position(), Some(p));
        assert_eq!(PointerEvent::Up { position: p }.position(), Some(p));
        assert_eq!(PointerEvent::Cancel.position(), None);
    }
}
