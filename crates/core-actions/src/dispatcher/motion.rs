//! Motion sub-dispatch (cursor movement).
//!
//! Horizontal motions reset the sticky column to the new column; vertical
//! motions request the sticky column and let the viewport clamp it.

use crate::Alert;
use core_state::EditorSession;
use core_view::ColumnPolicy;
use tracing::trace;

fn goto(session: &mut EditorSession, row: usize, col: usize) -> Result<(), Alert> {
    trace!(target: "actions.dispatch", row, col, "motion");
    session
        .view
        .move_to(&session.buffer, row, col, ColumnPolicy::Snap)?;
    Ok(())
}

/// One byte right, wrapping to the start of the next line.
pub(crate) fn forward_char(session: &mut EditorSession) -> Result<(), Alert> {
    let cur = session.cursor();
    if cur.col < session.buffer.visible_length(cur.row) {
        goto(session, cur.row, cur.col + 1)
    } else if cur.row + 1 < session.buffer.line_count() {
        goto(session, cur.row + 1, 0)
    } else {
        Err(Alert::OutOfRange)
    }
}

/// One byte left, wrapping to the end of the previous line.
pub(crate) fn backward_char(session: &mut EditorSession) -> Result<(), Alert> {
    let cur = session.cursor();
    if cur.col > 0 {
        goto(session, cur.row, cur.col - 1)
    } else if cur.row > 0 {
        let row = cur.row - 1;
        let col = session.buffer.visible_length(row);
        goto(session, row, col)
    } else {
        Err(Alert::AtBufferStart)
    }
}

pub(crate) fn next_line(session: &mut EditorSession) -> Result<(), Alert> {
    let cur = session.cursor();
    if cur.row + 1 >= session.buffer.line_count() {
        return Err(Alert::OutOfRange);
    }
    let col = session.view.wanderlust();
    goto(session, cur.row + 1, col)
}

pub(crate) fn previous_line(session: &mut EditorSession) -> Result<(), Alert> {
    let cur = session.cursor();
    if cur.row == 0 {
        return Err(Alert::AtBufferStart);
    }
    let col = session.view.wanderlust();
    goto(session, cur.row - 1, col)
}

pub(crate) fn beginning_of_line(session: &mut EditorSession) -> Result<(), Alert> {
    let row = session.cursor().row;
    goto(session, row, 0)
}

pub(crate) fn end_of_line(session: &mut EditorSession) -> Result<(), Alert> {
    let row = session.cursor().row;
    let col = session.buffer.visible_length(row);
    goto(session, row, col)
}

pub(crate) fn beginning_of_buffer(session: &mut EditorSession) -> Result<(), Alert> {
    goto(session, 0, 0)
}

pub(crate) fn end_of_buffer(session: &mut EditorSession) -> Result<(), Alert> {
    let row = session.buffer.line_count() - 1;
    let col = session.buffer.visible_length(row);
    goto(session, row, col)
}
