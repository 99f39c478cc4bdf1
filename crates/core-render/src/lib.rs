//! Frame composition and terminal emission.
//!
//! A `Frame` is a grid of single-column `Cell`s: one buffer byte maps to one
//! cell, so screen columns and byte columns agree. Bytes that a terminal would
//! not draw as one column are replaced by a substitute glyph (`glyph`).
//!
//! Layout of a frame `height` rows tall:
//! - rows `0..height-1`: buffer rows `origin.row..`, clipped horizontally to
//!   `origin.col..origin.col+width`; rows past the end of the buffer are blank.
//! - row `height-1`: the status line (see `status`).
//!
//! Presentation layers are applied on top in order: the search highlight
//! (reverse video), the describe-bindings overlay, then the status line with
//! its file-name span flagged `ACCENT`.
//!
//! Components:
//! - `compose`: builds a `Frame` from an `EditorSession`.
//! - `status`: status line segments and formatting.
//! - `overlay`: paints the describe-bindings listing.
//! - `writer`: command queue flushed to any `io::Write` through crossterm.
//! - `render_engine`: `Renderer`, the `Frontend` that ties these together and
//!   skips frames identical to the last one emitted.

use bitflags::bitflags;

pub mod compose;
pub mod overlay;
pub mod render_engine;
pub mod status;
pub mod writer;

pub use compose::compose_frame;
pub use render_engine::Renderer;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CellFlags: u8 {
        const REVERSE = 0b0000_0001; // search highlight
        const ACCENT  = 0b0000_0010; // bold, status colour
    }
}

/// Substitute glyph for one buffer byte. Tab shows as a single space and any
/// other byte outside printable ASCII as `?`.
pub fn glyph(byte: u8) -> char {
    match byte {
        b' '..=b'~' => byte as char,
        b'\t' => ' ',
        _ => '?',
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub flags: CellFlags,
}

impl Default for Cell {
    fn default() -> Self {
        Cell {
            ch: ' ',
            flags: CellFlags::empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: u16,
    pub height: u16,
    pub cells: Vec<Cell>,
    /// Hardware cursor (x, y).
    pub cursor: (u16, u16),
}

impl Frame {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); usize::from(width) * usize::from(height)],
            cursor: (0, 0),
        }
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(usize::from(y) * usize::from(self.width) + usize::from(x))
        } else {
            None
        }
    }

    pub fn cell(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, ch: char, flags: CellFlags) {
        if let Some(idx) = self.index(x, y) {
            self.cells[idx] = Cell { ch, flags };
        }
    }

    /// Write `text` from column `x`, clipping at the right edge.
    pub fn put_str(&mut self, x: u16, y: u16, text: &str) {
        for (dx, ch) in text.chars().enumerate() {
            let Ok(dx) = u16::try_from(dx) else { break };
            let Some(cx) = x.checked_add(dx).filter(|cx| *cx < self.width) else {
                break;
            };
            self.set(cx, y, ch, CellFlags::empty());
        }
    }

    /// Blank a whole row.
    pub fn clear_row(&mut self, y: u16) {
        for x in 0..self.width {
            self.set(x, y, ' ', CellFlags::empty());
        }
    }

    pub fn apply_flags_span(&mut self, x: u16, y: u16, span_width: u16, flags: CellFlags) {
        let span = span_width.min(self.width.saturating_sub(x));
        for dx in 0..span {
            if let Some(idx) = self.index(x + dx, y) {
                self.cells[idx].flags |= flags;
            }
        }
    }

    /// Runs of equally-flagged cells in a row, yielding (start_x, text, flags).
    pub fn row_runs(&self, y: u16) -> Vec<(u16, String, CellFlags)> {
        let mut runs: Vec<(u16, String, CellFlags)> = Vec::new();
        for x in 0..self.width {
            let Some(cell) = self.cell(x, y) else { break };
            match runs.last_mut() {
                Some((_, text, flags)) if *flags == cell.flags => text.push(cell.ch),
                _ => runs.push((x, cell.ch.to_string(), cell.flags)),
            }
        }
        runs
    }

    /// Row contents as a string with trailing blanks removed (tests / diagnostics).
    pub fn line_text(&self, y: u16) -> String {
        if y >= self.height {
            return String::new();
        }
        let start = usize::from(y) * usize::from(self.width);
        let row = &self.cells[start..start + usize::from(self.width)];
        let text: String = row.iter().map(|c| c.ch).collect();
        text.trim_end().to_string()
    }
}
