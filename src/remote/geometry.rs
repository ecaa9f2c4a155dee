//! Button grid geometry and pointer hit-testing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a button in the grid, counted row-major from the top left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ButtonIndex(usize);

impl ButtonIndex {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for ButtonIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A button's drawn rectangle in pointer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub x: i32,
    pub y: i32,
    pub width: u16,
    pub height: u16,
}

/// Placement of the button grid.
///
/// Buttons are `button_width` × `button_height` and repeat every
/// `pitch_x` / `pitch_y`; whatever is left over between two buttons is a gap
/// that belongs to no button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridGeometry {
    pub origin_x: i32,
    pub origin_y: i32,
    pub button_width: u16,
    pub button_height: u16,
    pub pitch_x: u16,
    pub pitch_y: u16,
    pub rows: u16,
    pub columns: u16,
}

impl GridGeometry {
    /// Layout used by the terminal remote, in character cells.
    pub const fn terminal() -> Self {
        Self {
            origin_x: 3,
            origin_y: 2,
            button_width: 7,
            button_height: 2,
            pitch_x: 9,
            pitch_y: 3,
            rows: 10,
            columns: 4,
        }
    }

    /// The 400×768 pixel window layout: 54 px buttons on a 71 px pitch.
    pub const fn classic_window() -> Self {
        Self {
            origin_x: 65,
            origin_y: 39,
            button_width: 54,
            button_height: 54,
            pitch_x: 71,
            pitch_y: 71,
            rows: 10,
            columns: 4,
        }
    }

    /// Number of buttons in the grid.
    pub fn len(&self) -> usize {
        usize::from(self.rows) * usize::from(self.columns)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check the layout is usable: non-empty buttons that do not overlap,
    /// with the whole grid inside the terminal coordinate range.
    pub fn validate(&self) -> Result<(), String> {
        if self.rows == 0 || self.columns == 0 {
            return Err("grid needs at least one row and one column".to_string());
        }
        if self.button_width == 0 || self.button_height == 0 {
            return Err("button size must be non-zero".to_string());
        }
        if self.pitch_x < self.button_width || self.pitch_y < self.button_height {
            return Err("pitch must be at least the button size".to_string());
        }
        if self.origin_x < 0 || self.origin_y < 0 {
            return Err("origin must not be negative".to_string());
        }
        let far = |origin: i32, count: u16, pitch: u16, extent: u16| {
            i64::from(origin) + i64::from(count - 1) * i64::from(pitch) + i64::from(extent)
        };
        let max = i64::from(u16::MAX);
        if far(self.origin_x, self.columns, self.pitch_x, self.button_width) > max
            || far(self.origin_y, self.rows, self.pitch_y, self.button_height) > max
        {
            return Err(format!("grid must end within {max} cells of the origin"));
        }
        Ok(())
    }

    /// Map a pointer position to the button under it.
    ///
    /// Returns `None` left of or above the origin, past the last row or
    /// column, and inside the gaps between buttons.
    pub fn hit_test(&self, x: i32, y: i32) -> Option<ButtonIndex> {
        let column = Self::axis(x.saturating_sub(self.origin_x), self.pitch_x, self.button_width)?;
        let row = Self::axis(y.saturating_sub(self.origin_y), self.pitch_y, self.button_height)?;
        if column >= usize::from(self.columns) || row >= usize::from(self.rows) {
            return None;
        }
        Some(ButtonIndex(row * usize::from(self.columns) + column))
    }

    fn axis(offset: i32, pitch: u16, extent: u16) -> Option<usize> {
        if offset < 0 || pitch == 0 {
            return None;
        }
        let pitch = i32::from(pitch);
        if offset % pitch > i32::from(extent) {
            return None;
        }
        usize::try_from(offset / pitch).ok()
    }

    /// Row and column of a button.
    pub fn position(&self, index: ButtonIndex) -> (u16, u16) {
        let columns = usize::from(self.columns.max(1));
        ((index.0 / columns) as u16, (index.0 % columns) as u16)
    }

    /// The drawn rectangle of a button.
    pub fn cell_rect(&self, index: ButtonIndex) -> CellRect {
        let (row, column) = self.position(index);
        CellRect {
            x: self
                .origin_x
                .saturating_add(i32::from(column).saturating_mul(i32::from(self.pitch_x))),
            y: self
                .origin_y
                .saturating_add(i32::from(row).saturating_mul(i32::from(self.pitch_y))),
            width: self.button_width,
            height: self.button_height,
        }
    }

    /// Where a label `label_width` wide starts so that it is centred on its button.
    pub fn label_anchor(&self, index: ButtonIndex, label_width: u16) -> (i32, i32) {
        let rect = self.cell_rect(index);
        let x = rect
            .x
            .saturating_add((i32::from(rect.width) - i32::from(label_width)) / 2);
        let y = rect.y.saturating_add(i32::from(rect.height) / 2);
        (x, y)
    }

    /// Bottom-right corner of the grid, exclusive.
    pub fn extent(&self) -> (i32, i32) {
        let last = ButtonIndex(self.len().saturating_sub(1));
        let rect = self.cell_rect(last);
        (
            rect.x.saturating_add(i32::from(rect.width)),
            rect.y.saturating_add(i32::from(rect.height)),
        )
    }
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self::terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_origin_plus_one_is_first_button() {
        for grid in [GridGeometry::terminal(), GridGeometry::classic_window()] {
            let hit = grid.hit_test(grid.origin_x + 1, grid.origin_y + 1);
            assert_eq!(hit, Some(ButtonIndex::new(0)));
        }
    }

    #[test]
    fn test_outside_grid_is_none() {
        let grid = GridGeometry::classic_window();
        assert_eq!(grid.hit_test(-10, 100), None);
        assert_eq!(grid.hit_test(100, -10), None);
        assert_eq!(grid.hit_test(0, 0), None);
        assert_eq!(grid.hit_test(399, 100), None);
        assert_eq!(grid.hit_test(100, 767), None);
    }

    #[test]
    fn test_gap_between_buttons_is_none() {
        let grid = GridGeometry::classic_window();
        // A remainder equal to the button size still belongs to the button;
        // the gap starts one past it.
        assert_eq!(grid.hit_test(65 + 54, 50), Some(ButtonIndex::new(0)));
        assert_eq!(grid.hit_test(65 + 55, 50), None);
        assert_eq!(grid.hit_test(65 + 70, 50), None);
        assert_eq!(grid.hit_test(65 + 71, 50), Some(ButtonIndex::new(1)));
        assert_eq!(grid.hit_test(70, 39 + 54), Some(ButtonIndex::new(0)));
        assert_eq!(grid.hit_test(70, 39 + 55), None);
    }

    #[test]
    fn test_last_row_is_inside_and_one_past_is_not() {
        let grid = GridGeometry::classic_window();
        let last_row_y = 39 + 9 * 71 + 1;
        assert_eq!(grid.hit_test(66, last_row_y), Some(ButtonIndex::new(36)));
        assert_eq!(grid.hit_test(66, last_row_y + 71), None);
    }

    #[test]
    fn test_label_anchor_centres() {
        let grid = GridGeometry::terminal();
        let (x, y) = grid.label_anchor(ButtonIndex::new(5), 3);
        // column 1, row 1
        assert_eq!((x, y), (3 + 9 + 2, 2 + 3 + 1));
    }

    #[test]
    fn test_validate() {
        assert!(GridGeometry::terminal().validate().is_ok());
        let overlapping = GridGeometry {
            pitch_x: 5,
            ..GridGeometry::terminal()
        };
        assert!(overlapping.validate().is_err());
        let empty = GridGeometry {
            rows: 0,
            ..GridGeometry::terminal()
        };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_grid_past_coordinate_range() {
        let far = GridGeometry {
            origin_x: i32::MAX - 5,
            ..GridGeometry::terminal()
        };
        assert!(far.validate().is_err());

        let negative = GridGeometry {
            origin_y: -1,
            ..GridGeometry::terminal()
        };
        assert!(negative.validate().is_err());

        // The last column ends at origin + 3 * 9 + 7.
        let edge = GridGeometry {
            origin_x: i32::from(u16::MAX) - 34,
            ..GridGeometry::terminal()
        };
        assert!(edge.validate().is_ok());
        let past = GridGeometry {
            origin_x: edge.origin_x + 1,
            ..edge
        };
        assert!(past.validate().is_err());
    }

    #[test]
    fn test_unvalidated_far_origin_does_not_overflow() {
        let grid = GridGeometry {
            origin_x: i32::MAX - 5,
            origin_y: i32::MIN + 1,
            ..GridGeometry::terminal()
        };
        assert_eq!(grid.cell_rect(ButtonIndex::new(1)).x, i32::MAX);
        assert_eq!(grid.extent().0, i32::MAX);
        assert_eq!(grid.hit_test(0, 0), None);
    }

    proptest! {
        #[test]
        fn prop_inside_rect_hits_that_button(index in 0usize..40, dx in 0u16..54, dy in 0u16..54) {
            let grid = GridGeometry::classic_window();
            let rect = grid.cell_rect(ButtonIndex::new(index));
            let hit = grid.hit_test(rect.x + i32::from(dx), rect.y + i32::from(dy));
            prop_assert_eq!(hit, Some(ButtonIndex::new(index)));
        }

        #[test]
        fn prop_index_is_row_major(row in 0u16..10, column in 0u16..4) {
            let grid = GridGeometry::terminal();
            let x = grid.origin_x + i32::from(column * grid.pitch_x);
            let y = grid.origin_y + i32::from(row * grid.pitch_y);
            let hit = grid.hit_test(x, y).unwrap();
            prop_assert_eq!(hit.get(), usize::from(row) * 4 + usize::from(column));
            prop_assert_eq!(grid.position(hit), (row, column));
        }

        #[test]
        fn prop_gaps_never_hit(column in 0i32..4, row in 0i32..10, gap in 55i32..71, y_off in 0i32..54) {
            let grid = GridGeometry::classic_window();
            let x = grid.origin_x + column * 71 + gap;
            let y = grid.origin_y + row * 71 + y_off;
            prop_assert_eq!(grid.hit_test(x, y), None);
        }
    }
}
