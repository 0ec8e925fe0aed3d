//! # Column Flow
//!
//! Vertical placement of lines into the columns of a page.
//!
//! Each column keeps its own baseline cursor, starting at the top of the
//! content box and moving down as lines are placed. Before a line is placed
//! the flow asks: "does this fit in the column I'd put it in?" If no column
//! on the page can take it, a fresh page is opened and every cursor resets.
//!
//! Column choice is fullest-first: the column with the greatest Y (the most
//! room left) wins, ties going to the lowest index. This is not round robin.
//! [`BalanceMode`] decides how often that choice is made.

use crate::error::FolioError;
use crate::model::{BalanceMode, PageBox};

/// Slack for floating-point error in the room check, so a page sized to an
/// exact multiple of the line height holds exactly that many lines.
const ROOM_EPSILON: f64 = 1e-6;

/// The horizontal and vertical bounds of a flow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowGeometry {
    /// X of column 0's left edge.
    pub left: f64,
    pub column_width: f64,
    pub gap: f64,
    pub count: usize,
    /// Starting baseline on a fresh page.
    pub top: f64,
    /// Lowest baseline a line may sit on.
    pub bottom: f64,
}

impl FlowGeometry {
    /// Split a page's content box into `columns` equal columns.
    pub fn for_page(page: &PageBox, columns: u32, gap: f64) -> Result<Self, FolioError> {
        if columns == 0 {
            return Err(FolioError::invalid("columns must be at least 1"));
        }
        if !gap.is_finite() || gap < 0.0 {
            return Err(FolioError::invalid(format!(
                "column gap must be a non-negative number, got {gap}"
            )));
        }
        let count = columns as usize;
        let column_width =
            (page.content_width() - (count as f64 - 1.0) * gap) / count as f64;
        if column_width <= 0.0 {
            return Err(FolioError::invalid(format!(
                "{columns} columns with a {gap}pt gap leave no room on a {:.2}pt wide content box",
                page.content_width()
            )));
        }
        Ok(Self {
            left: page.margin,
            column_width,
            gap,
            count,
            top: page.top(),
            bottom: page.bottom(),
        })
    }

    /// A single column spanning `[left, left + width]`.
    pub fn single(left: f64, width: f64, top: f64, bottom: f64) -> Self {
        Self {
            left,
            column_width: width,
            gap: 0.0,
            count: 1,
            top,
            bottom,
        }
    }

    /// Left edge of column `index`.
    pub fn column_x(&self, index: usize) -> f64 {
        self.left + index as f64 * (self.column_width + self.gap)
    }
}

/// One column's cursor on the current page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column {
    pub index: usize,
    pub current_y: f64,
}

/// Where a reserved line goes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot {
    pub page_index: usize,
    pub column: usize,
    /// Left edge of the column box.
    pub x: f64,
    /// Baseline.
    pub y: f64,
    /// Width of the column box.
    pub width: f64,
}

/// Cursor state for a multi-column, multi-page flow.
#[derive(Debug, Clone)]
pub struct ColumnFlow {
    geometry: FlowGeometry,
    mode: BalanceMode,
    page_index: usize,
    columns: Vec<Column>,
    active: Option<usize>,
}

impl ColumnFlow {
    /// Start on page 0 with every column at the top.
    pub fn new(geometry: FlowGeometry, mode: BalanceMode) -> Self {
        Self::starting_at(geometry, mode, 0, geometry.top)
    }

    /// Start on `page_index` with every column at baseline `y`. Pages opened
    /// later start at the geometry's top as usual.
    pub fn starting_at(geometry: FlowGeometry, mode: BalanceMode, page_index: usize, y: f64) -> Self {
        let columns = (0..geometry.count)
            .map(|index| Column {
                index,
                current_y: y,
            })
            .collect();
        Self {
            geometry,
            mode,
            page_index,
            columns,
            active: None,
        }
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// The column with the greatest Y; lowest index on ties.
    pub fn select(&self) -> usize {
        let mut best = 0;
        for column in &self.columns[1..] {
            if column.current_y > self.columns[best].current_y {
                best = column.index;
            }
        }
        best
    }

    /// Whether column `index` can take a line of `line_height`.
    pub fn has_room(&self, index: usize, line_height: f64) -> bool {
        self.columns[index].current_y - line_height >= self.geometry.bottom - ROOM_EPSILON
    }

    /// Whether column `index` has not taken anything on this page yet.
    fn at_top(&self, index: usize) -> bool {
        self.columns[index].current_y >= self.geometry.top - ROOM_EPSILON
    }

    /// Open the next page and reset every column to the top.
    pub fn new_page(&mut self) {
        self.page_index += 1;
        for column in &mut self.columns {
            column.current_y = self.geometry.top;
        }
        self.active = None;
        log::debug!("column flow opened page {}", self.page_index);
    }

    /// Claim a slot for one line of `line_height`, opening a new page if no
    /// column has room.
    ///
    /// A line taller than a whole column still gets a slot at the top of a
    /// page: it stays on the current page when its column is untouched,
    /// otherwise one page is opened for it.
    pub fn reserve(&mut self, line_height: f64) -> Slot {
        let mut index = match (self.mode, self.active) {
            (BalanceMode::Fill, Some(active)) if self.has_room(active, line_height) => active,
            _ => self.select(),
        };
        if !self.has_room(index, line_height) && !self.at_top(index) {
            self.new_page();
            index = self.select();
        }

        let column = &mut self.columns[index];
        let y = column.current_y;
        column.current_y -= line_height;
        self.active = Some(index);

        Slot {
            page_index: self.page_index,
            column: index,
            x: self.geometry.column_x(index),
            y,
            width: self.geometry.column_width,
        }
    }

    /// Move the active column down by a block's trailing space. Not checked
    /// against the bottom: the next line's room check sorts out overflow.
    pub fn advance(&mut self, spacing: f64) {
        if let Some(index) = self.active {
            self.columns[index].current_y -= spacing;
        }
    }

    /// The baseline the next line would get in the active column (or the
    /// selected one if nothing was placed on this page yet).
    pub fn cursor(&self) -> (usize, f64) {
        let index = self.active.unwrap_or_else(|| self.select());
        (self.page_index, self.columns[index].current_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry(columns: u32) -> FlowGeometry {
        // 200 x 340 page, margin 20: usable height 300, content width 160.
        let page = PageBox::new(200.0, 340.0, 20.0).unwrap();
        FlowGeometry::for_page(&page, columns, 10.0).unwrap()
    }

    #[test]
    fn column_width_subtracts_gaps() {
        let g = geometry(3);
        assert!((g.column_width - 140.0 / 3.0).abs() < 1e-9);
        assert!((g.column_x(2) - (20.0 + 2.0 * (140.0 / 3.0 + 10.0))).abs() < 1e-9);
    }

    #[test]
    fn rejects_zero_columns_and_no_width() {
        let page = PageBox::new(200.0, 340.0, 20.0).unwrap();
        assert!(FlowGeometry::for_page(&page, 0, 10.0).is_err());
        assert!(FlowGeometry::for_page(&page, 3, 80.0).is_err());
        assert!(FlowGeometry::for_page(&page, 2, f64::NAN).is_err());
    }

    #[test]
    fn single_column_fills_page_exactly() {
        let mut flow = ColumnFlow::new(geometry(1), BalanceMode::Fill);
        let slots: Vec<_> = (0..10).map(|_| flow.reserve(30.0)).collect();
        assert!(slots.iter().all(|s| s.page_index == 0));
        assert_eq!(slots[0].y, 320.0);
        assert_eq!(slots[9].y, 50.0);

        let next = flow.reserve(30.0);
        assert_eq!(next.page_index, 1);
        assert_eq!(next.y, 320.0);
    }

    #[test]
    fn fill_mode_keeps_short_content_in_column_zero() {
        let mut flow = ColumnFlow::new(geometry(3), BalanceMode::Fill);
        for _ in 0..3 {
            for _ in 0..2 {
                assert_eq!(flow.reserve(15.0).column, 0);
            }
            flow.advance(10.0);
        }
    }

    #[test]
    fn fill_mode_moves_to_fullest_column_on_overflow() {
        let mut flow = ColumnFlow::new(geometry(3), BalanceMode::Fill);
        for _ in 0..10 {
            assert_eq!(flow.reserve(30.0).column, 0);
        }
        assert_eq!(flow.columns()[0].current_y, 20.0);
        let slot = flow.reserve(30.0);
        assert_eq!((slot.page_index, slot.column, slot.y), (0, 1, 320.0));
        assert_eq!(flow.columns()[1].current_y, 290.0);
        assert_eq!(flow.columns()[2].current_y, 320.0);
    }

    #[test]
    fn line_mode_picks_greatest_y_each_line() {
        let mut flow = ColumnFlow::new(geometry(3), BalanceMode::Line);
        let columns: Vec<_> = (0..4).map(|_| flow.reserve(20.0).column).collect();
        assert_eq!(columns, vec![0, 1, 2, 0]);
    }

    #[test]
    fn new_page_only_when_no_column_fits() {
        let mut flow = ColumnFlow::new(geometry(2), BalanceMode::Line);
        for _ in 0..20 {
            assert_eq!(flow.reserve(30.0).page_index, 0);
        }
        let slot = flow.reserve(30.0);
        assert_eq!((slot.page_index, slot.column), (1, 0));
    }

    #[test]
    fn spacing_overflow_defers_to_next_line() {
        let mut flow = ColumnFlow::new(geometry(1), BalanceMode::Fill);
        for _ in 0..9 {
            flow.reserve(30.0);
        }
        // 50 left; spacing takes the cursor below the bottom without a break.
        flow.advance(40.0);
        assert_eq!(flow.page_index(), 0);
        assert_eq!(flow.columns()[0].current_y, 10.0);
        assert_eq!(flow.reserve(30.0).page_index, 1);
    }

    #[test]
    fn over_tall_line_opens_one_page() {
        let mut flow = ColumnFlow::new(geometry(1), BalanceMode::Fill);
        flow.reserve(30.0);
        let slot = flow.reserve(500.0);
        assert_eq!((slot.page_index, slot.y), (1, 320.0));
        let slot = flow.reserve(500.0);
        assert_eq!((slot.page_index, slot.y), (2, 320.0));
    }

    #[test]
    fn over_tall_first_line_stays_on_first_page() {
        let mut flow = ColumnFlow::new(geometry(1), BalanceMode::Fill);
        let slot = flow.reserve(500.0);
        assert_eq!((slot.page_index, slot.y), (0, 320.0));
        let slot = flow.reserve(30.0);
        assert_eq!((slot.page_index, slot.y), (1, 320.0));
    }

    #[test]
    fn over_tall_line_after_new_page_uses_that_page() {
        let mut flow = ColumnFlow::new(geometry(2), BalanceMode::Fill);
        for _ in 0..20 {
            flow.reserve(30.0);
        }
        assert!(flow.columns().iter().all(|c| c.current_y < 21.0));
        let slot = flow.reserve(500.0);
        assert_eq!((slot.page_index, slot.column, slot.y), (1, 0, 320.0));
        let slot = flow.reserve(500.0);
        assert_eq!((slot.page_index, slot.column, slot.y), (1, 1, 320.0));
    }

    #[test]
    fn resumes_mid_page() {
        let g = FlowGeometry::single(20.0, 100.0, 320.0, 20.0);
        let mut flow = ColumnFlow::starting_at(g, BalanceMode::Fill, 0, 100.0);
        assert_eq!(flow.reserve(40.0).y, 100.0);
        assert_eq!(flow.reserve(40.0).y, 60.0);
        let slot = flow.reserve(40.0);
        assert_eq!((slot.page_index, slot.y), (1, 320.0));
    }
}
