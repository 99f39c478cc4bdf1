//! Edit sub-dispatch (buffer mutation at the cursor).
//!
//! Every edit marks the session dirty and leaves the sticky column on the
//! cursor's new column.

use crate::Alert;
use core_state::EditorSession;
use core_text::Position;
use core_view::ColumnPolicy;
use tracing::trace;

fn land(session: &mut EditorSession, pos: Position) -> Result<(), Alert> {
    session.touch();
    session
        .view
        .move_to(&session.buffer, pos.row, pos.col, ColumnPolicy::Snap)?;
    Ok(())
}

pub(crate) fn self_insert(session: &mut EditorSession, byte: u8) -> Result<(), Alert> {
    let cur = session.cursor();
    session.buffer.insert_char(cur.row, cur.col, byte)?;
    trace!(target: "actions.dispatch", byte, "self_insert");
    land(session, Position::new(cur.row, cur.col + 1))
}

pub(crate) fn newline(session: &mut EditorSession) -> Result<(), Alert> {
    let cur = session.cursor();
    let pos = session.buffer.insert_line_break(cur.row, cur.col)?;
    land(session, pos)
}

pub(crate) fn delete_backward_char(session: &mut EditorSession) -> Result<(), Alert> {
    let cur = session.cursor();
    let pos = session.buffer.delete_char(cur.row, cur.col)?;
    land(session, pos)
}

/// Delete the byte under the cursor by stepping over it and deleting backward.
/// At the end of a line the next line is joined on.
pub(crate) fn delete_char(session: &mut EditorSession) -> Result<(), Alert> {
    let cur = session.cursor();
    let pos = if cur.col < session.buffer.visible_length(cur.row) {
        session.buffer.delete_char(cur.row, cur.col + 1)?
    } else if cur.row + 1 < session.buffer.line_count() {
        session.buffer.delete_char(cur.row + 1, 0)?
    } else {
        return Err(Alert::OutOfRange);
    };
    land(session, pos)
}

/// Kill to the end of the line. An empty line is removed outright; at the end
/// of a non-empty line the following line is joined on.
pub(crate) fn kill_line(session: &mut EditorSession) -> Result<(), Alert> {
    let cur = session.cursor();
    let visible = session.buffer.visible_length(cur.row);
    let last = session.buffer.line_count() - 1;
    if cur.col >= visible && cur.row == last {
        return Err(Alert::OutOfRange);
    }
    if visible == 0 {
        session.buffer.remove_line(cur.row)?;
    } else if cur.col >= visible {
        session.buffer.delete_char(cur.row + 1, 0)?;
    } else {
        session.buffer.truncate_line(cur.row, cur.col)?;
    }
    trace!(target: "actions.dispatch", row = cur.row, col = cur.col, "kill_line");
    land(session, cur)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_state::SessionOptions;
    use core_text::LineBuffer;

    fn session(text: &[u8]) -> EditorSession {
        let mut s = EditorSession::new(LineBuffer::from_bytes(text), "t", SessionOptions::default());
        s.resize(80, 24);
        s
    }

    fn at(s: &mut EditorSession, row: usize, col: usize) {
        s.view
            .move_to(&s.buffer, row, col, ColumnPolicy::Exact)
            .unwrap();
    }

    #[test]
    fn insert_newline_backspace() {
        let mut s = session(b"");
        self_insert(&mut s, b'a').unwrap();
        self_insert(&mut s, b'b').unwrap();
        newline(&mut s).unwrap();
        assert_eq!(s.buffer.to_bytes(), b"ab\n");
        assert_eq!(s.cursor(), Position::new(1, 0));
        delete_backward_char(&mut s).unwrap();
        assert_eq!(s.buffer.to_bytes(), b"ab");
        assert_eq!(s.cursor(), Position::new(0, 2));
        assert!(s.dirty);
    }

    #[test]
    fn backspace_at_origin_alerts() {
        let mut s = session(b"x");
        assert_eq!(delete_backward_char(&mut s), Err(Alert::AtBufferStart));
        assert!(!s.dirty);
    }

    #[test]
    fn newline_keeps_crlf_ending() {
        let mut s = session(b"abcd\r\n");
        at(&mut s, 0, 2);
        newline(&mut s).unwrap();
        assert_eq!(s.buffer.to_bytes(), b"ab\r\ncd\r\n");
    }

    #[test]
    fn delete_char_joins_at_line_end() {
        let mut s = session(b"ab\ncd\n");
        at(&mut s, 0, 1);
        delete_char(&mut s).unwrap();
        assert_eq!(s.buffer.to_bytes(), b"a\ncd\n");
        assert_eq!(s.cursor(), Position::new(0, 1));
        delete_char(&mut s).unwrap();
        assert_eq!(s.buffer.to_bytes(), b"acd\n");
        assert_eq!(s.cursor(), Position::new(0, 1));
    }

    #[test]
    fn delete_char_at_buffer_end_alerts() {
        let mut s = session(b"ab");
        at(&mut s, 0, 2);
        assert_eq!(delete_char(&mut s), Err(Alert::OutOfRange));
        assert_eq!(s.buffer.to_bytes(), b"ab");
    }

    #[test]
    fn kill_line_truncates_then_joins_then_removes() {
        let mut s = session(b"hello\n\nworld\n");
        at(&mut s, 0, 2);
        kill_line(&mut s).unwrap();
        assert_eq!(s.buffer.to_bytes(), b"he\n\nworld\n");
        kill_line(&mut s).unwrap();
        assert_eq!(s.buffer.to_bytes(), b"he\nworld\n");
        assert_eq!(s.cursor(), Position::new(0, 2));

        let mut s = session(b"a\n\nb\n");
        at(&mut s, 1, 0);
        kill_line(&mut s).unwrap();
        assert_eq!(s.buffer.to_bytes(), b"a\nb\n");
        assert_eq!(s.cursor(), Position::new(1, 0));
    }

    #[test]
    fn kill_line_at_end_of_last_line_alerts() {
        let mut s = session(b"a\n");
        at(&mut s, 1, 0);
        assert_eq!(kill_line(&mut s), Err(Alert::OutOfRange));
        assert_eq!(s.buffer.to_bytes(), b"a\n");
    }
}
