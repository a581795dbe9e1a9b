//! Automatic placement of fields that have no hand-drawn region.

use crate::board::{Board, Region};
use fieldboard_core::{Rect, Size};
use serde::{Deserialize, Serialize};

/// Tuning knobs for the auto-packer.
///
/// The defaults are empirically tuned, not derived from a requirement:
/// treat them as policy. The width ladder must be non-increasing and
/// end at the minimum viable width.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackPolicy {
    /// Candidate widths in grid units, tried in order per field.
    pub widths: Vec<u32>,
    /// Region height in grid units.
    pub height: u32,
    /// Clearance in grid units kept from canvas edges and from every
    /// existing region.
    pub margin: u32,
}

impl Default for PackPolicy {
    fn default() -> Self {
        Self {
            widths: vec![8, 6, 5, 4, 3],
            height: 2,
            margin: 1,
        }
    }
}

impl PackPolicy {
    /// The size used by the stack-below fallback: the widest ladder
    /// entry (or the minimum unit when the ladder is empty).
    #[must_use]
    pub fn default_width(&self) -> u32 {
        self.widths.first().copied().unwrap_or(1)
    }
}

/// Outcome of one auto-placement run.
#[derive(Debug, Clone, Default)]
pub struct PackReport {
    /// Regions committed by this run, in placement order.
    pub placed: Vec<Region>,
    /// Fields no legal position could be found for.
    pub failed: Vec<String>,
}

impl PackReport {
    /// True when every requested field found a position.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Searches for legal positions for unplaced fields.
///
/// The scan is deterministic: per field, a descending ladder of sizes,
/// and per size, row-major anchors starting below the frozen zone.
/// Each accepted placement commits through the same path as a manual
/// create before the next field is attempted, so later fields see
/// earlier ones as obstacles. Existing regions are never moved.
#[derive(Debug, Clone, Default)]
pub struct AutoPacker {
    policy: PackPolicy,
}

impl AutoPacker {
    /// Create a packer with the default policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a packer with a custom policy.
    #[must_use]
    pub const fn with_policy(policy: PackPolicy) -> Self {
        Self { policy }
    }

    /// The active policy.
    #[must_use]
    pub const fn policy(&self) -> &PackPolicy {
        &self.policy
    }

    /// Place every field of the board's catalog that has no region yet.
    pub fn pack(&self, board: &mut Board, canvas: Size) -> PackReport {
        let unplaced: Vec<String> = board.catalog().unplaced().map(String::from).collect();
        self.pack_fields(board, &unplaced, canvas)
    }

    /// Place the given fields, in the order given.
    pub fn pack_fields(&self, board: &mut Board, fields: &[String], canvas: Size) -> PackReport {
        let mut report = PackReport::default();
        for field in fields {
            if self.place_one(board, field, canvas) {
                if let Some(region) = board.region_for(field) {
                    report.placed.push(region.clone());
                }
            } else {
                report.failed.push(field.clone());
            }
        }
        report
    }

    fn place_one(&self, board: &mut Board, field: &str, canvas: Size) -> bool {
        let unit = board.grid().unit();
        let margin = self.policy.margin as f32 * unit;
        let height = self.policy.height as f32 * unit;

        for &width_units in &self.policy.widths {
            let width = width_units as f32 * unit;
            if let Some(rect) = self.scan(board, width, height, canvas) {
                if board.place(field, rect) {
                    return true;
                }
            }
        }

        // Fallback: stack below the lowest bottom edge at the default
        // size.
        let grid = board.grid();
        let lowest = board
            .regions()
            .iter()
            .map(|r| r.bounds.bottom())
            .fold(grid.frozen_height(), f32::max);
        let rect = Rect::new(
            margin,
            grid.snap_up(lowest) + margin,
            self.policy.default_width() as f32 * unit,
            height,
        );
        if rect.bottom() > canvas.height {
            return false;
        }
        board.place(field, rect)
    }

    /// Row-major anchor scan for the first clear spot of the given
    /// size. An anchor is clear when the candidate stays one margin
    /// away from the canvas edges and from every existing region
    /// (regions are expanded outward by the margin before the
    /// intersection test, so packed regions never sit flush against
    /// hand-drawn ones).
    fn scan(&self, board: &Board, width: f32, height: f32, canvas: Size) -> Option<Rect> {
        let grid = board.grid();
        let unit = grid.unit();
        let margin = self.policy.margin as f32 * unit;

        let x0 = margin;
        let y0 = grid.frozen_height() + margin;

        let mut y = y0;
        while y + height + margin <= canvas.height {
            let mut x = x0;
            while x + width + margin <= canvas.width {
                let candidate = Rect::new(x, y, width, height);
                let clear = board
                    .regions()
                    .iter()
                    .all(|r| !r.bounds.expand(margin).intersects(&candidate));
                if clear {
                    return Some(candidate);
                }
                x += unit;
            }
            y += unit;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldboard_core::{FieldCatalog, GridSpec, Point};

    fn board(fields: &[&str]) -> Board {
        Board::new(GridSpec::new(20.0), FieldCatalog::new(fields.iter().copied()))
    }

    #[test]
    fn test_packs_two_fields_into_empty_canvas() {
        let mut b = board(&["c", "d"]);
        let report = AutoPacker::new().pack(&mut b, Size::new(600.0, 600.0));

        assert!(report.is_complete());
        assert_eq!(report.placed.len(), 2);

        // First legal anchor below the frozen zone at the largest
        // ladder size: one margin in from the left, one below row 2
        let c = &report.placed[0];
        assert_eq!(c.bounds, Rect::new(20.0, 80.0, 160.0, 40.0));

        // "d" scans past "c" honoring the one-unit margin around it
        let d = &report.placed[1];
        assert_eq!(d.bounds, Rect::new(200.0, 80.0, 160.0, 40.0));
        assert!(!c.bounds.expand(20.0).intersects(&d.bounds));
    }

    #[test]
    fn test_ladder_shrinks_when_row_is_tight() {
        // A hand-drawn region leaves a gap to its left that only the
        // 4-unit ladder entry clears with margin
        let mut b = board(&["drawn", "auto"]);
        b.begin_create("drawn", Point::new(120.0, 80.0));
        b.update_create(Point::new(240.0, 200.0));
        b.end_create();

        let report = AutoPacker::new().pack(&mut b, Size::new(280.0, 260.0));
        assert!(report.is_complete());

        let placed = &report.placed[0];
        // The 8/6/5-wide candidates cannot clear the margin anywhere;
        // the 4-wide one fits between the left edge and the drawn region
        assert_eq!(placed.bounds, Rect::new(20.0, 80.0, 80.0, 40.0));
    }

    #[test]
    fn test_fallback_stacks_below_lowest_region() {
        let mut b = board(&["drawn", "auto"]);
        // Wall off every scanning row: the expanded wall reaches y=560,
        // past the deepest anchor the scan may try (540)
        b.load_saved([(Rect::new(0.0, 60.0, 600.0, 480.0), "drawn".to_string())]);

        let report = AutoPacker::new().pack(&mut b, Size::new(600.0, 600.0));
        assert!(report.is_complete());

        let placed = &report.placed[0];
        // Lowest bottom edge is 540; stacked one margin below it
        assert_eq!(placed.bounds, Rect::new(20.0, 560.0, 160.0, 40.0));
    }

    #[test]
    fn test_reports_failure_when_canvas_is_exhausted() {
        let mut b = board(&["drawn", "auto"]);
        b.load_saved([(Rect::new(0.0, 60.0, 600.0, 520.0), "drawn".to_string())]);

        let report = AutoPacker::new().pack(&mut b, Size::new(600.0, 600.0));
        assert_eq!(report.failed, vec!["auto".to_string()]);
        assert!(report.placed.is_empty());
        assert!(b.region_for("auto").is_none());
    }

    #[test]
    fn test_never_moves_existing_regions() {
        let mut b = board(&["drawn", "a", "b", "c"]);
        b.begin_create("drawn", Point::new(100.0, 100.0));
        b.update_create(Point::new(300.0, 200.0));
        b.end_create();
        let before = b.region_for("drawn").cloned();

        AutoPacker::new().pack(&mut b, Size::new(600.0, 600.0));
        assert_eq!(b.region_for("drawn").cloned(), before);
    }

    #[test]
    fn test_packed_regions_become_obstacles() {
        let mut b = board(&["a", "b", "c", "d", "e"]);
        let report = AutoPacker::new().pack(&mut b, Size::new(600.0, 600.0));
        assert!(report.is_complete());

        let margin = 20.0;
        for (i, lhs) in report.placed.iter().enumerate() {
            for rhs in &report.placed[i + 1..] {
                assert!(
                    !lhs.bounds.expand(margin).intersects(&rhs.bounds),
                    "{} and {} violate the packing margin",
                    lhs.field_id,
                    rhs.field_id
                );
            }
        }
    }

    #[test]
    fn test_custom_policy_ladder() {
        let mut b = board(&["a"]);
        let packer = AutoPacker::with_policy(PackPolicy {
            widths: vec![2],
            height: 1,
            margin: 1,
        });
        let report = packer.pack(&mut b, Size::new(200.0, 200.0));
        assert!(report.is_complete());
        assert_eq!(report.placed[0].bounds, Rect::new(20.0, 80.0, 40.0, 20.0));
    }

    #[test]
    fn test_pack_skips_already_placed_fields() {
        let mut b = board(&["a", "b"]);
        b.begin_create("a", Point::new(20.0, 80.0));
        b.update_create(Point::new(100.0, 120.0));
        b.end_create();

        let report = AutoPacker::new().pack(&mut b, Size::new(600.0, 600.0));
        assert_eq!(report.placed.len(), 1);
        assert_eq!(report.placed[0].field_id, "b");
    }
}
