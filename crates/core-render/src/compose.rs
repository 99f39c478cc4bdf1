use crate::overlay::paint_overlay;
use crate::status::{StatusContext, build_status};
use crate::{CellFlags, Frame, glyph};
use core_state::EditorSession;
use tracing::trace;

fn clamp_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

/// Build the full frame for the session's current viewport: text rows, the
/// search highlight, any overlay, the status line and the cursor.
pub fn compose_frame(session: &EditorSession) -> Frame {
    let view = &session.view;
    let width = clamp_u16(view.width());
    let text_rows = clamp_u16(view.height());
    if width == 0 {
        return Frame::new(0, 0);
    }
    let mut frame = Frame::new(width, text_rows.saturating_add(1));
    let origin = view.origin();

    for y in 0..text_rows {
        let row = origin.row + usize::from(y);
        let Some(bytes) = session.buffer.visible(row) else {
            break;
        };
        for (x, &b) in bytes.iter().skip(origin.col).take(usize::from(width)).enumerate() {
            frame.set(clamp_u16(x), y, glyph(b), CellFlags::empty());
        }
    }

    if let Some(h) = session.highlight
        && h.start.row >= origin.row
        && h.start.row - origin.row < usize::from(text_rows)
    {
        let y = clamp_u16(h.start.row - origin.row);
        let end = h.start.col + h.len;
        let start = h.start.col.max(origin.col);
        if end > start {
            frame.apply_flags_span(
                clamp_u16(start - origin.col),
                y,
                clamp_u16(end - start),
                CellFlags::REVERSE,
            );
        }
    }

    if let Some(lines) = &session.overlay {
        paint_overlay(&mut frame, lines, text_rows);
    }

    let cursor = view.cursor();
    let name = session.display_name();
    let status = build_status(
        &StatusContext {
            file_name: &name,
            dirty: session.dirty,
            origin_row: origin.row,
            line_count: session.buffer.line_count(),
            row: cursor.row,
            col: cursor.col,
            visible: session.buffer.visible_length(cursor.row),
            message: session.status.as_deref(),
        },
        usize::from(width),
    );
    frame.put_str(0, text_rows, &status.text);
    frame.apply_flags_span(0, text_rows, clamp_u16(status.name_len), CellFlags::ACCENT);

    let screen = view.screen();
    frame.cursor = (
        clamp_u16(screen.col).min(width - 1),
        clamp_u16(screen.row).min(text_rows.saturating_sub(1)),
    );
    trace!(target: "render", width, height = frame.height, cursor = ?frame.cursor, "compose");
    frame
}
