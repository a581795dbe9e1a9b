//! In-memory record store with cursor navigation.
//!
//! Holds the rows a layout's fields are bound to and a cursor over
//! them. Building a `RecordSet` from a file is the caller's concern;
//! this crate only navigates and edits what it is given.

use serde::{Deserialize, Serialize};

/// Ordered field names, rows of values, and a cursor.
///
/// Every row is padded or truncated to the field count on insertion,
/// so `get`/`set` by field name never go out of bounds. The cursor
/// clamps at both ends.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordSet {
    fields: Vec<String>,
    rows: Vec<Vec<String>>,
    cursor: usize,
}

impl RecordSet {
    /// Create a record set, normalizing every row to the field count.
    #[must_use]
    pub fn new<I, R, S>(fields: I, rows: R) -> Self
    where
        I: IntoIterator<Item = S>,
        R: IntoIterator<Item = Vec<String>>,
        S: Into<String>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        let width = fields.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self {
            fields,
            rows,
            cursor: 0,
        }
    }

    /// The field names, in column order.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The cursor position, clamped to the row range.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor.min(self.rows.len().saturating_sub(1))
    }

    /// Move the cursor to the given row, clamped to the last row.
    pub fn seek(&mut self, index: usize) {
        self.cursor = index.min(self.rows.len().saturating_sub(1));
    }

    /// Advance the cursor; stays on the last row at the end.
    pub fn next(&mut self) {
        if self.cursor + 1 < self.rows.len() {
            self.cursor += 1;
        }
    }

    /// Step the cursor back; stays on the first row at the start.
    pub fn previous(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Value of a field in the current row.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        let col = self.column(field)?;
        self.rows.get(self.cursor()).map(|row| row[col].as_str())
    }

    /// Set a field's value in the current row. Returns `false` for an
    /// unknown field or when there is no current row.
    pub fn set(&mut self, field: &str, value: impl Into<String>) -> bool {
        let Some(col) = self.column(field) else {
            return false;
        };
        let cursor = self.cursor();
        match self.rows.get_mut(cursor) {
            Some(row) => {
                row[col] = value.into();
                true
            }
            None => false,
        }
    }

    /// A full row by index.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&[String]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    fn column(&self, field: &str) -> Option<usize> {
        self.fields.iter().position(|f| f == field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RecordSet {
        RecordSet::new(
            ["name", "city"],
            vec![
                vec!["Alice".to_string(), "Hanoi".to_string()],
                vec!["Bob".to_string()],
                vec![
                    "Carol".to_string(),
                    "Hue".to_string(),
                    "overflow".to_string(),
                ],
            ],
        )
    }

    #[test]
    fn test_rows_are_normalized() {
        let rs = sample();
        assert_eq!(rs.row(1), Some(&["Bob".to_string(), String::new()][..]));
        // Extra columns are dropped
        assert_eq!(rs.row(2).map(<[String]>::len), Some(2));
    }

    #[test]
    fn test_navigation_clamps() {
        let mut rs = sample();
        rs.previous();
        assert_eq!(rs.cursor(), 0);
        rs.next();
        rs.next();
        rs.next();
        rs.next();
        assert_eq!(rs.cursor(), 2);
        rs.seek(99);
        assert_eq!(rs.cursor(), 2);
    }

    #[test]
    fn test_get_set_by_field() {
        let mut rs = sample();
        assert_eq!(rs.get("name"), Some("Alice"));
        assert_eq!(rs.get("missing"), None);

        rs.next();
        assert!(rs.set("city", "Da Nang"));
        assert_eq!(rs.get("city"), Some("Da Nang"));
        assert!(!rs.set("missing", "x"));
    }

    #[test]
    fn test_empty_set() {
        let mut rs = RecordSet::new(["a"], Vec::new());
        assert!(rs.is_empty());
        assert_eq!(rs.get("a"), None);
        assert!(!rs.set("a", "v"));
        rs.next();
        assert_eq!(rs.cursor(), 0);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_cursor_stays_in_range(
                rows in 0usize..20,
                steps in prop::collection::vec(any::<bool>(), 0..50)
            ) {
                let mut rs = RecordSet::new(
                    ["only"],
                    (0..rows).map(|i| vec![i.to_string()]).collect::<Vec<_>>(),
                );
                for forward in steps {
                    if forward { rs.next() } else { rs.previous() }
                    prop_assert!(rs.cursor() < rows.max(1));
                }
            }
        }
    }
}
