//! Line-oriented byte buffer.
//!
//! The buffer is a vector of owned byte lines. Every line except the final one
//! keeps its original line ending (`\n`, optionally preceded by `\r`); the final
//! line never carries one. A file that ends with a newline therefore loads with
//! a trailing empty *sentinel* line which stands for "end of buffer" and can be
//! edited like any other line.
//!
//! Columns are byte offsets into a line. A column is valid when it is at most
//! the line's *visible* length (length without the line ending), so the cursor
//! can rest after the last visible byte but never inside the ending.
//!
//! Invariants (hold after every public call):
//! * `line_count() >= 1`.
//! * Only the final line may lack a line ending, and it always does.
//! * `save(load(bytes))` reproduces `bytes` exactly.

use std::io::{self, BufRead, Write};
use tracing::{debug, trace};

mod error;
pub mod search;

pub use error::EditError;

/// A logical buffer coordinate: line index and byte column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub const fn origin() -> Self {
        Self { row: 0, col: 0 }
    }
}

/// Line ending flavour. Every line except the final one carries one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    Crlf,
}

impl LineEnding {
    pub fn as_bytes(self) -> &'static [u8] {
        match self {
            LineEnding::Lf => b"\n",
            LineEnding::Crlf => b"\r\n",
        }
    }

    pub fn byte_len(self) -> usize {
        self.as_bytes().len()
    }

    /// Classify the trailing bytes of a freshly read record. Only used at
    /// load time; edits carry the ending along explicitly.
    fn detect(record: &[u8]) -> Option<Self> {
        match record {
            [.., b'\r', b'\n'] => Some(LineEnding::Crlf),
            [.., b'\n'] => Some(LineEnding::Lf),
            _ => None,
        }
    }
}

/// One stored line: raw bytes (ending included) plus the ending it carries.
///
/// The ending is tracked on its own so a content `\r` that comes to sit
/// before the `\n` after an edit stays content.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct Line {
    raw: Vec<u8>,
    ending: Option<LineEnding>,
}

impl Line {
    fn from_record(raw: Vec<u8>) -> Self {
        let ending = LineEnding::detect(&raw);
        Self { raw, ending }
    }

    fn visible_len(&self) -> usize {
        self.raw.len() - self.ending.map_or(0, LineEnding::byte_len)
    }

    fn visible(&self) -> &[u8] {
        &self.raw[..self.visible_len()]
    }

    /// Drop the ending, leaving only visible bytes.
    fn strip_ending(&mut self) {
        let keep = self.visible_len();
        self.raw.truncate(keep);
        self.ending = None;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBuffer {
    lines: Vec<Line>,
    default_ending: LineEnding,
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl LineBuffer {
    /// An empty buffer: exactly one empty sentinel line.
    pub fn new() -> Self {
        Self {
            lines: vec![Line::default()],
            default_ending: LineEnding::Lf,
        }
    }

    /// Build a buffer from in-memory bytes using the same splitting rules as `load`.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let records = bytes
            .split_inclusive(|b| *b == b'\n')
            .map(<[u8]>::to_vec)
            .collect();
        Self::from_records(records)
    }

    /// Replace-by-construction: read every `\n`-terminated record from `reader`.
    pub fn load<R: BufRead>(mut reader: R) -> io::Result<Self> {
        let mut records = Vec::new();
        loop {
            let mut record = Vec::new();
            if reader.read_until(b'\n', &mut record)? == 0 {
                break;
            }
            records.push(record);
        }
        Ok(Self::from_records(records))
    }

    fn from_records(records: Vec<Vec<u8>>) -> Self {
        let mut lines: Vec<Line> = records.into_iter().map(Line::from_record).collect();
        let default_ending = lines
            .iter()
            .find_map(|l| l.ending)
            .unwrap_or_default();
        let needs_sentinel = lines.last().is_none_or(|l| l.ending.is_some());
        if needs_sentinel {
            lines.push(Line::default());
        }
        debug!(
            target: "text.buffer",
            lines = lines.len(),
            crlf = matches!(default_ending, LineEnding::Crlf),
            sentinel = needs_sentinel,
            "buffer_loaded"
        );
        Self {
            lines,
            default_ending,
        }
    }

    /// Write every line's raw bytes, in order, without adding or removing endings.
    pub fn save<W: Write>(&self, mut writer: W) -> io::Result<()> {
        for line in &self.lines {
            writer.write_all(&line.raw)?;
        }
        writer.flush()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.lines.iter().flat_map(|l| l.raw.iter().copied()).collect()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn default_ending(&self) -> LineEnding {
        self.default_ending
    }

    /// Raw bytes of a line, including its ending.
    pub fn line(&self, row: usize) -> Option<&[u8]> {
        self.lines.get(row).map(|l| l.raw.as_slice())
    }

    /// The ending a line carries; `None` only for the final line.
    pub fn ending(&self, row: usize) -> Option<LineEnding> {
        self.lines.get(row).and_then(|l| l.ending)
    }

    /// Bytes of a line without its ending.
    pub fn visible(&self, row: usize) -> Option<&[u8]> {
        self.lines.get(row).map(Line::visible)
    }

    /// Line length minus the trailing line ending. Rows past the end measure 0.
    pub fn visible_length(&self, row: usize) -> usize {
        self.lines.get(row).map_or(0, Line::visible_len)
    }

    /// True when `pos` names a row that exists and a column within its visible length.
    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.lines.len() && pos.col <= self.visible_length(pos.row)
    }

    fn check(&self, row: usize, col: usize) -> Result<(), EditError> {
        if self.contains(Position::new(row, col)) {
            Ok(())
        } else {
            Err(EditError::OutOfRange { row, col })
        }
    }

    /// Insert one byte at `col`, shifting the rest of the line right.
    ///
    /// `\n` and `\r` are refused with `OutOfRange`; line breaks go through
    /// `insert_line_break`.
    pub fn insert_char(&mut self, row: usize, col: usize, byte: u8) -> Result<(), EditError> {
        self.check(row, col)?;
        if byte == b'\n' || byte == b'\r' {
            return Err(EditError::OutOfRange { row, col });
        }
        self.lines[row].raw.insert(col, byte);
        trace!(target: "text.buffer", row, col, byte, "insert_char");
        Ok(())
    }

    /// Backward deletion of the byte before `col`.
    ///
    /// At column 0 the line is merged onto the end of the previous line: the
    /// previous line loses its ending and receives this line's bytes (ending
    /// included), and this line is removed. Forward deletion is expressed by
    /// advancing the cursor and calling this same primitive.
    ///
    /// Returns the cursor position after the deletion.
    pub fn delete_char(&mut self, row: usize, col: usize) -> Result<Position, EditError> {
        self.check(row, col)?;
        if col > 0 {
            self.lines[row].raw.remove(col - 1);
            trace!(target: "text.buffer", row, col, "delete_char");
            return Ok(Position::new(row, col - 1));
        }
        if row == 0 {
            return Err(EditError::AtBufferStart);
        }
        let tail = self.lines.remove(row);
        let prev = &mut self.lines[row - 1];
        prev.strip_ending();
        let join_col = prev.raw.len();
        prev.raw.extend_from_slice(&tail.raw);
        prev.ending = tail.ending;
        trace!(target: "text.buffer", row, join_col, "merge_lines");
        Ok(Position::new(row - 1, join_col))
    }

    /// Split `lines[row]` at `col`.
    ///
    /// The first half is terminated with the line's own ending, or with the
    /// buffer's default ending when the line has none (the final line). The
    /// second half keeps the original tail, including any original ending.
    /// Returns the start of the new line.
    pub fn insert_line_break(&mut self, row: usize, col: usize) -> Result<Position, EditError> {
        self.check(row, col)?;
        let default_ending = self.default_ending;
        let line = &mut self.lines[row];
        let ending = line.ending.unwrap_or(default_ending);
        let tail = Line {
            raw: line.raw.split_off(col),
            ending: line.ending,
        };
        line.raw.extend_from_slice(ending.as_bytes());
        line.ending = Some(ending);
        self.lines.insert(row + 1, tail);
        trace!(target: "text.buffer", row, col, "split_line");
        Ok(Position::new(row + 1, 0))
    }

    /// Remove `lines[row]` entirely.
    ///
    /// Removing the final line moves the "no ending" role to the new final
    /// line, whose ending is stripped.
    pub fn remove_line(&mut self, row: usize) -> Result<(), EditError> {
        if row >= self.lines.len() || self.lines.len() == 1 {
            return Err(EditError::OutOfRange { row, col: 0 });
        }
        self.lines.remove(row);
        if row == self.lines.len()
            && let Some(last) = self.lines.last_mut()
        {
            last.strip_ending();
        }
        trace!(target: "text.buffer", row, "remove_line");
        Ok(())
    }

    /// Drop the visible bytes from `col` to the end of the line, keeping the ending.
    pub fn truncate_line(&mut self, row: usize, col: usize) -> Result<(), EditError> {
        self.check(row, col)?;
        let line = &mut self.lines[row];
        let end = line.visible_len();
        line.raw.drain(col..end);
        trace!(target: "text.buffer", row, col, removed = end - col, "truncate_line");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(buf: &LineBuffer) -> Vec<&[u8]> {
        (0..buf.line_count()).filter_map(|r| buf.line(r)).collect()
    }

    #[test]
    fn empty_input_is_single_sentinel() {
        let buf = LineBuffer::from_bytes(b"");
        assert_eq!(buf.line_count(), 1);
        assert_eq!(buf.line(0).unwrap(), b"");
    }

    #[test]
    fn trailing_newline_appends_sentinel() {
        let buf = LineBuffer::from_bytes(b"foo\nbar\n");
        assert_eq!(lines(&buf), vec![&b"foo\n"[..], b"bar\n", b""]);
    }

    #[test]
    fn missing_trailing_newline_keeps_last_line_final() {
        let buf = LineBuffer::from_bytes(b"foo\nbar");
        assert_eq!(lines(&buf), vec![&b"foo\n"[..], b"bar"]);
        assert_eq!(buf.visible_length(1), 3);
    }

    #[test]
    fn load_matches_from_bytes() {
        let bytes = b"one\r\ntwo\r\n";
        let loaded = LineBuffer::load(&bytes[..]).unwrap();
        assert_eq!(loaded, LineBuffer::from_bytes(bytes));
        assert_eq!(loaded.default_ending(), LineEnding::Crlf);
    }

    #[test]
    fn visible_length_strips_lf_and_crlf() {
        let buf = LineBuffer::from_bytes(b"ab\ncd\r\nef\r");
        assert_eq!(buf.visible_length(0), 2);
        assert_eq!(buf.visible_length(1), 2);
        // A lone trailing '\r' without '\n' is content.
        assert_eq!(buf.visible_length(2), 3);
        assert_eq!(buf.visible_length(99), 0);
    }

    #[test]
    fn save_round_trips_exact_bytes() {
        let bytes = b"alpha\r\nbeta\n\ngamma";
        let buf = LineBuffer::from_bytes(bytes);
        let mut out = Vec::new();
        buf.save(&mut out).unwrap();
        assert_eq!(out, bytes);
    }

    #[test]
    fn insert_char_shifts_right() {
        let mut buf = LineBuffer::from_bytes(b"ac\n");
        buf.insert_char(0, 1, b'b').unwrap();
        assert_eq!(buf.line(0).unwrap(), b"abc\n");
    }

    #[test]
    fn insert_char_rejects_bad_positions() {
        let mut buf = LineBuffer::from_bytes(b"ab\n");
        assert_eq!(
            buf.insert_char(0, 3, b'x'),
            Err(EditError::OutOfRange { row: 0, col: 3 })
        );
        assert_eq!(
            buf.insert_char(5, 0, b'x'),
            Err(EditError::OutOfRange { row: 5, col: 0 })
        );
        assert_eq!(
            buf.insert_char(0, 0, b'\n'),
            Err(EditError::OutOfRange { row: 0, col: 0 })
        );
    }

    #[test]
    fn delete_char_removes_previous_byte() {
        let mut buf = LineBuffer::from_bytes(b"abc\n");
        let pos = buf.delete_char(0, 2).unwrap();
        assert_eq!(pos, Position::new(0, 1));
        assert_eq!(buf.line(0).unwrap(), b"ac\n");
    }

    #[test]
    fn delete_char_at_buffer_start() {
        let mut buf = LineBuffer::from_bytes(b"abc\n");
        assert_eq!(buf.delete_char(0, 0), Err(EditError::AtBufferStart));
        assert_eq!(buf.line(0).unwrap(), b"abc\n");
    }

    #[test]
    fn delete_char_merges_with_previous_line() {
        let mut buf = LineBuffer::from_bytes(b"ab\r\ncd\nef");
        let pos = buf.delete_char(1, 0).unwrap();
        assert_eq!(pos, Position::new(0, 2));
        assert_eq!(lines(&buf), vec![&b"abcd\n"[..], b"ef"]);
    }

    #[test]
    fn merge_into_sentinel_drops_ending() {
        let mut buf = LineBuffer::from_bytes(b"ab\n");
        let pos = buf.delete_char(1, 0).unwrap();
        assert_eq!(pos, Position::new(0, 2));
        assert_eq!(lines(&buf), vec![&b"ab"[..]]);
    }

    #[test]
    fn split_keeps_endings_on_both_halves() {
        let mut buf = LineBuffer::from_bytes(b"abcd\r\n");
        let pos = buf.insert_line_break(0, 2).unwrap();
        assert_eq!(pos, Position::new(1, 0));
        assert_eq!(lines(&buf), vec![&b"ab\r\n"[..], b"cd\r\n", b""]);
    }

    #[test]
    fn split_final_line_uses_default_ending() {
        let mut buf = LineBuffer::from_bytes(b"x\r\nab");
        buf.insert_line_break(1, 1).unwrap();
        assert_eq!(lines(&buf), vec![&b"x\r\n"[..], b"a\r\n", b"b"]);
    }

    #[test]
    fn split_then_merge_restores_line() {
        let original = LineBuffer::from_bytes(b"hello world\nnext\n");
        let mut buf = original.clone();
        buf.insert_line_break(0, 5).unwrap();
        buf.delete_char(1, 0).unwrap();
        assert_eq!(buf, original);
    }

    #[test]
    fn type_enter_backspace_scenario() {
        let mut buf = LineBuffer::new();
        buf.insert_char(0, 0, b'a').unwrap();
        buf.insert_char(0, 1, b'b').unwrap();
        let pos = buf.insert_line_break(0, 1).unwrap();
        assert_eq!(lines(&buf), vec![&b"a\n"[..], b"b"]);
        assert_eq!(pos, Position::new(1, 0));
        let pos = buf.delete_char(pos.row, pos.col).unwrap();
        assert_eq!(lines(&buf), vec![&b"ab"[..]]);
        assert_eq!(pos, Position::new(0, 1));
    }

    #[test]
    fn remove_line_never_empties_buffer() {
        let mut buf = LineBuffer::new();
        assert_eq!(
            buf.remove_line(0),
            Err(EditError::OutOfRange { row: 0, col: 0 })
        );
        assert_eq!(buf.line_count(), 1);
    }

    #[test]
    fn remove_final_line_strips_new_final_ending() {
        let mut buf = LineBuffer::from_bytes(b"a\nb\n");
        buf.remove_line(2).unwrap();
        assert_eq!(lines(&buf), vec![&b"a\n"[..], b"b"]);
        buf.remove_line(0).unwrap();
        assert_eq!(lines(&buf), vec![&b"b"[..]]);
    }

    #[test]
    fn truncate_line_keeps_ending() {
        let mut buf = LineBuffer::from_bytes(b"abcdef\r\n");
        buf.truncate_line(0, 2).unwrap();
        assert_eq!(buf.line(0).unwrap(), b"ab\r\n");
    }

    #[test]
    fn split_and_merge_keep_content_carriage_return() {
        let original = LineBuffer::from_bytes(b"a\rb\n");
        let mut buf = original.clone();
        buf.insert_line_break(0, 2).unwrap();
        assert_eq!(lines(&buf), vec![&b"a\r\n"[..], b"b\n", b""]);
        assert_eq!(buf.visible(0).unwrap(), b"a\r");
        assert_eq!(buf.ending(0), Some(LineEnding::Lf));
        buf.delete_char(1, 0).unwrap();
        assert_eq!(buf, original);
        assert_eq!(buf.to_bytes(), b"a\rb\n");
    }

    #[test]
    fn backspace_before_newline_removes_one_visible_byte() {
        let mut buf = LineBuffer::from_bytes(b"a\rb\n");
        let pos = buf.delete_char(0, 3).unwrap();
        assert_eq!(pos, Position::new(0, 2));
        assert_eq!(buf.line(0).unwrap(), b"a\r\n");
        assert_eq!(buf.visible_length(0), 2);
        assert!(buf.contains(pos));
    }
}
