//! Status line composition.
//!
//! Format: `<name>[*]    <pct>%  (<row>/<lines>,<col>/<visible>)` followed by
//! the transient echo-area message, right-aligned when it fits.
//! * `<name>` is the path as given on the command line.
//! * `*` appears only when the buffer has unsaved edits.
//! * `<pct>` is how far down the window's top row sits: `origin.row * 100 / lines`.
//! * `<row>` is 1-based; `<col>` is the 0-based byte column.
//!
//! Two stages, so callers can inspect the pieces before they become text:
//! 1. `compose_status` produces ordered `StatusSegment`s.
//! 2. `format_status` renders them for a given width and reports the span of
//!    the file name, which the frame draws bold in the accent colour.

use std::fmt::Write as _;

/// What the status line needs to know.
#[derive(Debug, Clone, Copy)]
pub struct StatusContext<'a> {
    pub file_name: &'a str,
    pub dirty: bool,
    /// Topmost buffer row in the window.
    pub origin_row: usize,
    pub line_count: usize,
    pub row: usize,
    pub col: usize,
    /// Visible length of the cursor's line.
    pub visible: usize,
    pub message: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusSegment<'a> {
    FileName { name: &'a str, dirty: bool },
    Percent(usize),
    Position {
        row_1: usize,
        lines: usize,
        col: usize,
        visible: usize,
    },
    Message(&'a str),
}

/// A formatted status row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    /// Length in chars of the leading file-name span (dirty marker excluded).
    pub name_len: usize,
}

pub fn compose_status<'a>(ctx: &StatusContext<'a>) -> Vec<StatusSegment<'a>> {
    let lines = ctx.line_count.max(1);
    let mut out = Vec::with_capacity(4);
    out.push(StatusSegment::FileName {
        name: ctx.file_name,
        dirty: ctx.dirty,
    });
    out.push(StatusSegment::Percent(ctx.origin_row * 100 / lines));
    out.push(StatusSegment::Position {
        row_1: ctx.row + 1,
        lines,
        col: ctx.col,
        visible: ctx.visible,
    });
    if let Some(msg) = ctx.message.filter(|m| !m.is_empty()) {
        out.push(StatusSegment::Message(msg));
    }
    out
}

/// Render segments into at most `width` chars.
pub fn format_status(segments: &[StatusSegment<'_>], width: usize) -> StatusLine {
    let mut text = String::with_capacity(width.max(48));
    let mut name_len = 0;
    let mut message = None;
    for seg in segments {
        match seg {
            StatusSegment::FileName { name, dirty } => {
                name_len = name.chars().count();
                text.push_str(name);
                if *dirty {
                    text.push('*');
                }
            }
            StatusSegment::Percent(pct) => {
                let _ = write!(text, "    {pct}%");
            }
            StatusSegment::Position {
                row_1,
                lines,
                col,
                visible,
            } => {
                let _ = write!(text, "  ({row_1}/{lines},{col}/{visible})");
            }
            StatusSegment::Message(msg) => message = Some(*msg),
        }
    }
    if let Some(msg) = message {
        let used = text.chars().count();
        let msg_len = msg.chars().count();
        let pad = if used + 2 + msg_len <= width {
            width - used - msg_len
        } else {
            2
        };
        text.extend(std::iter::repeat_n(' ', pad));
        text.push_str(msg);
    }
    if let Some((cut, _)) = text.char_indices().nth(width) {
        text.truncate(cut);
    }
    StatusLine {
        name_len: name_len.min(width),
        text,
    }
}

pub fn build_status(ctx: &StatusContext<'_>, width: usize) -> StatusLine {
    format_status(&compose_status(ctx), width)
}
