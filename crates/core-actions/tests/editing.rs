mod common;

use common::{feed, key, session};
use core_actions::Dispatcher;
use core_text::Position;
use pretty_assertions::assert_eq;

#[test]
fn type_newline_and_backspace() {
    let mut s = session(b"");
    let mut d = Dispatcher::default();
    feed(&mut d, &mut s, "a b RET");
    assert_eq!(s.buffer.to_bytes(), b"ab\n");
    assert_eq!(s.cursor(), Position::new(1, 0));
    feed(&mut d, &mut s, "<backspace>");
    assert_eq!(s.buffer.to_bytes(), b"ab");
    assert_eq!(s.cursor(), Position::new(0, 2));
    assert!(s.dirty);
}

#[test]
fn space_and_tab_insert_literally() {
    let mut s = session(b"");
    let mut d = Dispatcher::default();
    feed(&mut d, &mut s, "a SPC TAB b");
    assert_eq!(s.buffer.to_bytes(), b"a \tb");
    assert_eq!(s.cursor(), Position::new(0, 4));
}

#[test]
fn kill_line_sequence() {
    let mut s = session(b"first line\nsecond\n");
    let mut d = Dispatcher::default();
    feed(&mut d, &mut s, "C-f C-f C-f C-f C-f C-k");
    assert_eq!(s.buffer.to_bytes(), b"first\nsecond\n");
    feed(&mut d, &mut s, "C-k");
    assert_eq!(s.buffer.to_bytes(), b"firstsecond\n");
    feed(&mut d, &mut s, "M-> C-k");
    assert_eq!(s.status.as_deref(), Some("End of buffer"));
}

#[test]
fn delete_forward_joins_lines() {
    let mut s = session(b"ab\r\ncd\r\n");
    let mut d = Dispatcher::default();
    feed(&mut d, &mut s, "C-e C-d");
    assert_eq!(s.buffer.to_bytes(), b"abcd\r\n");
    feed(&mut d, &mut s, "C-a <delete>");
    assert_eq!(s.buffer.to_bytes(), b"bcd\r\n");
}

#[test]
fn alert_message_clears_on_next_key() {
    let mut s = session(b"abc\n");
    let mut d = Dispatcher::default();
    let r = d.handle_key(&mut s, key("C-b")).unwrap();
    assert!(r.alert);
    assert_eq!(s.status.as_deref(), Some("Beginning of buffer"));
    let r = d.handle_key(&mut s, key("C-f")).unwrap();
    assert!(!r.alert);
    assert!(s.status.is_none());
    assert_eq!(s.cursor(), Position::new(0, 1));
}

#[test]
fn motion_does_not_dirty_buffer() {
    let mut s = session(b"one\ntwo\nthree\n");
    let mut d = Dispatcher::default();
    feed(&mut d, &mut s, "C-n C-n C-e C-p <right> <home> M-<");
    assert!(!s.dirty);
    assert_eq!(s.cursor(), Position::origin());
}

#[test]
fn sticky_column_survives_short_line() {
    let mut s = session(b"abcdef\nab\nabcdef\n");
    let mut d = Dispatcher::default();
    feed(&mut d, &mut s, "C-e C-n");
    assert_eq!(s.cursor(), Position::new(1, 2));
    feed(&mut d, &mut s, "C-n");
    assert_eq!(s.cursor(), Position::new(2, 6));
}

#[test]
fn paging_moves_the_window() {
    let text: Vec<u8> = (0..100).flat_map(|i| format!("line {i}\n").into_bytes()).collect();
    let mut s = session(&text);
    let mut d = Dispatcher::default();
    feed(&mut d, &mut s, "C-v");
    assert_eq!(s.view.origin().row, 22);
    assert_eq!(s.cursor().row, 22);
    feed(&mut d, &mut s, "<next> M-v");
    assert_eq!(s.view.origin().row, 22);
    feed(&mut d, &mut s, "<prior>");
    assert_eq!(s.view.origin().row, 0);
}

#[test]
fn recenter_puts_cursor_mid_window() {
    let text: Vec<u8> = (0..100).flat_map(|i| format!("{i}\n").into_bytes()).collect();
    let mut s = session(&text);
    let mut d = Dispatcher::default();
    feed(&mut d, &mut s, "C-v");
    assert_eq!(s.view.screen().row, 0);
    feed(&mut d, &mut s, "C-l");
    assert_eq!(s.cursor().row, 22);
    assert_eq!(s.view.origin().row, 11);
    assert_eq!(s.view.screen().row, 11);
}

#[test]
fn describe_bindings_overlay_dismissed_by_next_key() {
    let mut s = session(b"abc\n");
    let mut d = Dispatcher::default();
    feed(&mut d, &mut s, "C-h b");
    let overlay = s.overlay.clone().unwrap();
    assert!(overlay.iter().any(|l| l.contains("save-buffer")));
    feed(&mut d, &mut s, "C-f");
    assert!(s.overlay.is_none());
    assert_eq!(s.cursor(), Position::new(0, 1));

    feed(&mut d, &mut s, "<f1>");
    assert!(s.overlay.is_some());
}
