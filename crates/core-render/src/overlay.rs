//! Describe-bindings overlay.
//!
//! The listing replaces the text area from the top row down. Lines past the
//! last text row are dropped; the final visible row says how many were cut.

use crate::Frame;

pub fn paint_overlay(frame: &mut Frame, lines: &[String], text_rows: u16) {
    let rows = usize::from(text_rows);
    if rows == 0 {
        return;
    }
    for y in 0..text_rows {
        frame.clear_row(y);
    }
    let hidden = lines.len().saturating_sub(rows);
    let shown = if hidden > 0 { rows - 1 } else { lines.len() };
    for (y, line) in (0..text_rows).zip(lines.iter().take(shown)) {
        frame.put_str(0, y, line);
    }
    if hidden > 0 {
        // One row gave way to the notice, so one more line is hidden.
        let notice = format!("-- {} more --", hidden + 1);
        frame.put_str(0, text_rows - 1, &notice);
    }
}
