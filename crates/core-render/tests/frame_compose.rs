use core_render::{CellFlags, compose_frame};
use core_state::{EditorSession, Highlight, SessionOptions};
use core_text::{LineBuffer, Position};
use core_view::ColumnPolicy;
use pretty_assertions::assert_eq;

fn session(text: &[u8], cols: u16, rows: u16) -> EditorSession {
    let mut s = EditorSession::new(LineBuffer::from_bytes(text), "scratch.txt", SessionOptions::default());
    s.resize(cols, rows);
    s
}

fn numbered(n: usize) -> Vec<u8> {
    (0..n).flat_map(|i| format!("row {i}\n").into_bytes()).collect()
}

#[test]
fn text_rows_then_status_line() {
    let s = session(b"hello\nworld\n", 40, 5);
    let f = compose_frame(&s);
    assert_eq!((f.width, f.height), (40, 5));
    let rows: Vec<String> = (0..5).map(|y| f.line_text(y)).collect();
    assert_eq!(
        rows,
        vec![
            "hello".to_string(),
            "world".to_string(),
            String::new(),
            String::new(),
            "scratch.txt    0%  (1/3,0/5)".to_string(),
        ]
    );
    assert_eq!(f.cursor, (0, 0));
}

#[test]
fn file_name_is_accented() {
    let s = session(b"x\n", 40, 3);
    let f = compose_frame(&s);
    for x in 0..11 {
        assert_eq!(f.cell(x, 2).unwrap().flags, CellFlags::ACCENT);
    }
    assert_eq!(f.cell(11, 2).unwrap().flags, CellFlags::empty());
}

#[test]
fn dirty_marker_and_message() {
    let mut s = session(b"x\n", 40, 3);
    s.dirty = true;
    s.set_status("Quit");
    let f = compose_frame(&s);
    let status = f.line_text(2);
    assert!(status.starts_with("scratch.txt*    0%"));
    assert!(status.ends_with("Quit"));
    assert_eq!(status.chars().count(), 40);
}

#[test]
fn horizontal_scroll_clips_columns() {
    let mut s = session(b"abcdefghij\n", 4, 3);
    s.view.move_to(&s.buffer, 0, 8, ColumnPolicy::Snap).unwrap();
    let f = compose_frame(&s);
    assert_eq!(f.line_text(0), "fghi");
    assert_eq!(f.cursor, (3, 0));
}

#[test]
fn unprintable_bytes_keep_one_column_each() {
    let s = session(b"a\tb\x01c\xc3\xa9d\n", 20, 3);
    let f = compose_frame(&s);
    assert_eq!(f.line_text(0), "a b?c??d");
}

#[test]
fn vertical_scroll_shows_window_and_percent() {
    let mut s = session(&numbered(100), 40, 6);
    s.view.move_to(&s.buffer, 50, 0, ColumnPolicy::Snap).unwrap();
    let f = compose_frame(&s);
    let origin = s.view.origin().row;
    assert_eq!(f.line_text(0), format!("row {origin}"));
    assert_eq!(f.cursor.1 as usize, 50 - origin);
    let pct = origin * 100 / 101;
    assert!(f.line_text(5).contains(&format!("    {pct}%  (51/101,0/6)")));
}

#[test]
fn highlight_is_reversed_on_screen() {
    let mut s = session(b"alpha\nbeta\n", 20, 4);
    s.highlight = Some(Highlight {
        start: Position::new(1, 1),
        len: 3,
    });
    let f = compose_frame(&s);
    let flagged: Vec<u16> = (0..20)
        .filter(|x| f.cell(*x, 1).unwrap().flags.contains(CellFlags::REVERSE))
        .collect();
    assert_eq!(flagged, vec![1, 2, 3]);
}

#[test]
fn highlight_outside_window_is_suppressed() {
    let mut s = session(&numbered(30), 20, 5);
    s.highlight = Some(Highlight {
        start: Position::new(10, 0),
        len: 3,
    });
    let f = compose_frame(&s);
    assert!(
        f.cells
            .iter()
            .all(|c| !c.flags.contains(CellFlags::REVERSE))
    );
}

#[test]
fn overlay_replaces_text_area() {
    let mut s = session(b"hidden\n", 30, 4);
    s.overlay = Some(vec!["C-f  forward-char".into(), "C-b  backward-char".into()]);
    let f = compose_frame(&s);
    assert_eq!(f.line_text(0), "C-f  forward-char");
    assert_eq!(f.line_text(1), "C-b  backward-char");
    assert!(f.line_text(3).starts_with("scratch.txt"));
}

#[test]
fn zero_width_terminal_yields_empty_frame() {
    let s = session(b"abc\n", 0, 0);
    let f = compose_frame(&s);
    assert_eq!((f.width, f.height), (0, 0));
    assert!(f.cells.is_empty());
}
