//! Literal substring search with wraparound.
//!
//! Matching runs over each line's visible bytes, so a needle never matches
//! across a line ending. A scan starts at a position (inclusive), runs to the
//! end of the buffer, then wraps to the top and continues through the start
//! row. `Found::wrapped` records whether the wrap was needed.

use crate::{LineBuffer, Position};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseMode {
    Sensitive,
    Insensitive,
}

impl CaseMode {
    /// Sensitive when the needle contains an ASCII uppercase letter.
    pub fn smart(needle: &[u8]) -> Self {
        if needle.iter().any(u8::is_ascii_uppercase) {
            CaseMode::Sensitive
        } else {
            CaseMode::Insensitive
        }
    }

    fn matches(self, window: &[u8], needle: &[u8]) -> bool {
        match self {
            CaseMode::Sensitive => window == needle,
            CaseMode::Insensitive => window.eq_ignore_ascii_case(needle),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Found {
    /// Start of the match.
    pub pos: Position,
    pub wrapped: bool,
}

impl Found {
    /// Position just past the last matched byte.
    pub fn end(&self, needle_len: usize) -> Position {
        Position::new(self.pos.row, self.pos.col + needle_len)
    }
}

fn find_in(hay: &[u8], needle: &[u8], case: CaseMode) -> Option<usize> {
    if needle.len() > hay.len() {
        return None;
    }
    hay.windows(needle.len())
        .position(|w| case.matches(w, needle))
}

/// First match at or after `start`, wrapping once past the end of the buffer.
/// An empty needle never matches.
pub fn find_from(
    buf: &LineBuffer,
    needle: &[u8],
    start: Position,
    case: CaseMode,
) -> Option<Found> {
    if needle.is_empty() {
        return None;
    }
    let last_row = buf.line_count() - 1;
    for row in start.row..=last_row {
        let Some(hay) = buf.visible(row) else {
            continue;
        };
        let from = if row == start.row {
            start.col.min(hay.len())
        } else {
            0
        };
        if let Some(i) = find_in(&hay[from..], needle, case) {
            return Some(Found {
                pos: Position::new(row, from + i),
                wrapped: false,
            });
        }
    }
    // Nothing at or after the start on its row, so a full-row scan of the
    // start row only reports matches that begin before `start.col`.
    for row in 0..=start.row.min(last_row) {
        let Some(hay) = buf.visible(row) else {
            continue;
        };
        if let Some(i) = find_in(hay, needle, case) {
            trace!(target: "text.search", row, col = i, "wrapped_match");
            return Some(Found {
                pos: Position::new(row, i),
                wrapped: true,
            });
        }
    }
    None
}

/// The `skip`-th successive match after the first one found from `anchor`.
///
/// The search restarts `skip + 1` times, each time one byte past the previous
/// match start. `wrapped` is set if any restart had to wrap.
pub fn find_nth(
    buf: &LineBuffer,
    needle: &[u8],
    anchor: Position,
    skip: usize,
    case: CaseMode,
) -> Option<Found> {
    let mut found = find_from(buf, needle, anchor, case)?;
    let mut wrapped = found.wrapped;
    for _ in 0..skip {
        let resume = Position::new(found.pos.row, found.pos.col + 1);
        found = find_from(buf, needle, resume, case)?;
        wrapped |= found.wrapped;
    }
    Some(Found {
        pos: found.pos,
        wrapped,
    })
}
