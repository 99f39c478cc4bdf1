//! Cursor and viewport mapping.
//!
//! `ViewportCursor` translates a logical buffer position into a screen
//! position plus a top-left buffer origin. The viewport is `height` text rows
//! by `width` columns; one display row is reserved for the status line, so
//! `height = display_rows - 1`.
//!
//! Scrolling policy:
//! * Vertical: the origin row only changes when the target row falls outside
//!   the window. It then becomes 0 if the whole buffer fits, otherwise the
//!   target row is recentred (`row - height / 2`, saturating).
//! * Horizontal: the origin column only changes on overrun, by the minimum
//!   amount that brings the column back into the window.
//!
//! Invariants (hold after every public call):
//! * `origin.row + screen.row < line_count`.
//! * `origin.col + screen.col <= visible_length(cursor row)`.
//!
//! Degenerate sizes (height 0 or 1, width 0) are valid: the cursor then sits
//! on screen row/column 0 and the origin tracks it exactly.

use core_text::{EditError, LineBuffer, Position};
use tracing::trace;

/// What `move_to` does with a column past the end of the target line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnPolicy {
    /// Clamp to the line's visible length.
    #[default]
    Snap,
    /// Reject with `EditError::OutOfRange`.
    Exact,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewportCursor {
    origin: Position,
    screen: Position,
    wanderlust: usize,
    height: usize,
    width: usize,
}

/// Origin row after moving to `row`, given the current origin `first`.
pub fn compute_origin_row(first: usize, row: usize, height: usize, line_count: usize) -> usize {
    if row >= first && row < first + height {
        return first;
    }
    if line_count <= height {
        0
    } else {
        row.saturating_sub(height / 2)
    }
}

/// Origin column after moving to `col`, given the current origin `first`.
pub fn compute_origin_col(first: usize, col: usize, width: usize) -> usize {
    if width == 0 || col < first {
        col
    } else if col >= first + width {
        col + 1 - width
    } else {
        first
    }
}

impl ViewportCursor {
    /// A cursor at the buffer origin for a terminal of `width` x `display_rows`.
    pub fn new(width: usize, display_rows: usize) -> Self {
        Self {
            origin: Position::origin(),
            screen: Position::origin(),
            wanderlust: 0,
            height: display_rows.saturating_sub(1),
            width,
        }
    }

    /// Logical cursor position in the buffer.
    pub fn cursor(&self) -> Position {
        Position::new(
            self.origin.row + self.screen.row,
            self.origin.col + self.screen.col,
        )
    }

    pub fn origin(&self) -> Position {
        self.origin
    }

    pub fn screen(&self) -> Position {
        self.screen
    }

    /// Sticky column for vertical movement (unclamped).
    pub fn wanderlust(&self) -> usize {
        self.wanderlust
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Move the cursor to a logical position, scrolling as needed.
    ///
    /// The requested column is remembered as the sticky column even when it
    /// gets clamped.
    pub fn move_to(
        &mut self,
        buf: &LineBuffer,
        row: usize,
        col: usize,
        policy: ColumnPolicy,
    ) -> Result<(), EditError> {
        if row >= buf.line_count() {
            return Err(EditError::OutOfRange { row, col });
        }
        let visible = buf.visible_length(row);
        let clamped = match policy {
            ColumnPolicy::Snap => col.min(visible),
            ColumnPolicy::Exact if col > visible => {
                return Err(EditError::OutOfRange { row, col });
            }
            ColumnPolicy::Exact => col,
        };
        self.wanderlust = col;
        self.place(buf, row, clamped);
        Ok(())
    }

    /// Scroll forward by one window less one line of overlap.
    pub fn page_down(&mut self, buf: &LineBuffer) {
        let last = buf.line_count() - 1;
        self.origin.row = (self.origin.row + self.page_step()).min(last);
        self.settle_after_page(buf);
    }

    /// Scroll backward by one window less one line of overlap.
    pub fn page_up(&mut self, buf: &LineBuffer) {
        let last = buf.line_count() - 1;
        self.origin.row = self.origin.row.saturating_sub(self.page_step()).min(last);
        self.settle_after_page(buf);
    }

    /// Put the cursor row in the middle of the window. A buffer that fits is
    /// left alone.
    pub fn recenter(&mut self, buf: &LineBuffer) {
        if buf.line_count() <= self.height {
            return;
        }
        let cursor = self.cursor();
        self.origin.row = cursor.row.saturating_sub(self.height / 2);
        self.screen.row = cursor.row - self.origin.row;
        trace!(target: "view", origin_row = self.origin.row, "recenter");
    }

    /// Adopt a new terminal size and re-place the cursor.
    pub fn resize(&mut self, buf: &LineBuffer, width: usize, display_rows: usize) {
        self.width = width;
        self.height = display_rows.saturating_sub(1);
        trace!(target: "view", width, height = self.height, "resize");
        self.sync(buf);
    }

    /// Re-derive the mapping after the buffer changed underneath the cursor.
    pub fn sync(&mut self, buf: &LineBuffer) {
        let cursor = self.cursor();
        let row = cursor.row.min(buf.line_count() - 1);
        let col = cursor.col.min(buf.visible_length(row));
        self.place(buf, row, col);
    }

    fn page_step(&self) -> usize {
        if self.height <= 1 { 1 } else { self.height - 1 }
    }

    fn settle_after_page(&mut self, buf: &LineBuffer) {
        let last = buf.line_count() - 1;
        let window_end = (self.origin.row + self.height.max(1) - 1).min(last);
        let row = self.cursor().row.clamp(self.origin.row, window_end);
        trace!(target: "view", origin_row = self.origin.row, row, "page");
        let col = self.wanderlust.min(buf.visible_length(row));
        self.place(buf, row, col);
    }

    /// Assumes `row` exists and `col <= visible_length(row)`.
    fn place(&mut self, buf: &LineBuffer, row: usize, col: usize) {
        let origin_row = compute_origin_row(self.origin.row, row, self.height, buf.line_count());
        let origin_col = compute_origin_col(self.origin.col, col, self.width);
        self.origin = Position::new(origin_row, origin_col);
        self.screen = Position::new(row - origin_row, col - origin_col);
        trace!(
            target: "view",
            row,
            col,
            screen_row = self.screen.row,
            screen_col = self.screen.col,
            "move_to"
        );
    }
}
