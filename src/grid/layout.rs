//! Window sizing for the launcher grid.
//!
//! The grid always has [`COLUMNS`] columns, so the width never changes; only
//! the number of rows drives the height.

pub const COLUMNS: u32 = 4;
pub const ITEM_WIDTH: u32 = 80;
pub const ITEM_HEIGHT: u32 = 80;
pub const GAP_X: u32 = 12;
pub const GAP_Y: u32 = 24;
/// Band below the last row that holds the running indicators.
pub const INDICATOR_SPACE: u32 = 20;
pub const PADDING: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSize {
    pub width: i32,
    pub height: i32,
}
impl WindowSize {
    pub fn for_count(count: usize) -> Self {
        let rows = rows_for(count);
        let width = COLUMNS * ITEM_WIDTH + (COLUMNS - 1) * GAP_X + 2 * PADDING;
        let height = rows * ITEM_HEIGHT
            + rows.saturating_sub(1) * GAP_Y
            + INDICATOR_SPACE
            + 2 * PADDING;

        Self {
            width: width as i32,
            height: height as i32,
        }
    }
}

/// Number of grid rows for `count` items. An empty grid still gets one row.
pub fn rows_for(count: usize) -> u32 {
    let columns = COLUMNS as usize;
    (count.div_ceil(columns) as u32).max(1)
}

/// Column and row of the item at `index`.
pub fn position_of(index: usize) -> (i32, i32) {
    let columns = COLUMNS as usize;
    ((index % columns) as i32, (index / columns) as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_is_constant() {
        let expected = WindowSize::for_count(0).width;
        assert_eq!(expected, 416);
        for count in 0..64 {
            assert_eq!(WindowSize::for_count(count).width, expected);
        }
    }

    #[test]
    fn height_never_shrinks_as_items_grow() {
        let mut last = 0;
        for count in 0..64 {
            let height = WindowSize::for_count(count).height;
            assert!(height >= last, "height dropped at {}", count);
            last = height;
        }
    }

    #[test]
    fn one_row_height() {
        // 1×80 + 0 gaps + 20 indicator + 60 padding
        assert_eq!(WindowSize::for_count(1).height, 160);
        assert_eq!(WindowSize::for_count(4).height, 160);
    }

    #[test]
    fn multi_row_height_includes_gaps() {
        assert_eq!(rows_for(5), 2);
        assert_eq!(WindowSize::for_count(5).height, 2 * 80 + 24 + 20 + 60);
        assert_eq!(rows_for(12), 3);
        assert_eq!(WindowSize::for_count(12).height, 3 * 80 + 2 * 24 + 20 + 60);
    }

    #[test]
    fn empty_grid_is_clamped_to_one_row() {
        // Plain ceil(0 / 4) would be zero rows and a negative gap term.
        assert_eq!(0usize.div_ceil(COLUMNS as usize), 0);
        assert_eq!(rows_for(0), 1);
        assert_eq!(WindowSize::for_count(0), WindowSize::for_count(1));
    }

    #[test]
    fn positions_fill_rows_left_to_right() {
        assert_eq!(position_of(0), (0, 0));
        assert_eq!(position_of(3), (3, 0));
        assert_eq!(position_of(4), (0, 1));
        assert_eq!(position_of(11), (3, 2));
    }
}
