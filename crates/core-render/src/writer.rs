//! Terminal writer.
//!
//! Frames are translated into a short list of primitive commands which are
//! queued through crossterm and flushed once, so a frame never appears half
//! drawn.
//!
//! Invariants:
//! * Commands preserve ordering; no flushing mid-frame.
//! * All positions are absolute with a (0,0) origin; callers keep them in bounds.
//! * The writer owns no terminal state; it is a short-lived object per frame.

use crate::{CellFlags, Frame};
use anyhow::Result;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    MoveTo(u16, u16),
    ClearAll,
    ClearLine,
    Print(String),
    Style(CellFlags),
    HideCursor,
    ShowCursor,
    Bell,
}

#[derive(Debug, Default)]
pub struct Writer {
    cmds: Vec<Command>,
}

impl Writer {
    pub fn new() -> Self {
        Self { cmds: Vec::new() }
    }

    pub fn commands(&self) -> &[Command] {
        &self.cmds
    }

    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cmds.push(Command::MoveTo(x, y));
    }

    pub fn clear_all(&mut self) {
        self.cmds.push(Command::ClearAll);
    }

    pub fn clear_line(&mut self) {
        self.cmds.push(Command::ClearLine);
    }

    pub fn print<S: Into<String>>(&mut self, s: S) {
        let s: String = s.into();
        if !s.is_empty() {
            self.cmds.push(Command::Print(s));
        }
    }

    pub fn style(&mut self, flags: CellFlags) {
        self.cmds.push(Command::Style(flags));
    }

    pub fn bell(&mut self) {
        self.cmds.push(Command::Bell);
    }

    /// Queue a whole frame: every row is repainted, then the cursor is placed.
    pub fn paint_frame(&mut self, frame: &Frame, clear_first: bool) {
        self.cmds.push(Command::HideCursor);
        if clear_first {
            self.clear_all();
        }
        for y in 0..frame.height {
            self.move_to(0, y);
            self.clear_line();
            let runs = frame.row_runs(y);
            let last = runs.len().saturating_sub(1);
            for (i, (_, text, flags)) in runs.into_iter().enumerate() {
                if flags.is_empty() {
                    // The line was cleared, so trailing blanks need not be sent.
                    self.print(if i == last { text.trim_end().to_string() } else { text });
                    continue;
                }
                self.style(flags);
                self.print(text);
                self.style(CellFlags::empty());
            }
        }
        self.move_to(frame.cursor.0, frame.cursor.1);
        self.cmds.push(Command::ShowCursor);
    }

    /// Emit all queued commands to `out`. `accent` colours `ACCENT` cells.
    pub fn flush<W: Write>(self, out: &mut W, accent: Color) -> Result<()> {
        for c in self.cmds {
            match c {
                Command::MoveTo(x, y) => queue!(out, MoveTo(x, y))?,
                Command::ClearAll => queue!(out, Clear(ClearType::All))?,
                Command::ClearLine => queue!(out, Clear(ClearType::CurrentLine))?,
                Command::Print(s) => queue!(out, Print(s))?,
                Command::Style(flags) if flags.is_empty() => {
                    queue!(out, SetAttribute(Attribute::Reset), ResetColor)?
                }
                Command::Style(flags) => {
                    if flags.contains(CellFlags::REVERSE) {
                        queue!(out, SetAttribute(Attribute::Reverse))?;
                    }
                    if flags.contains(CellFlags::ACCENT) {
                        queue!(out, SetAttribute(Attribute::Bold), SetForegroundColor(accent))?;
                    }
                }
                Command::HideCursor => queue!(out, Hide)?,
                Command::ShowCursor => queue!(out, Show)?,
                Command::Bell => queue!(out, Print('\x07'))?,
            }
        }
        out.flush()?;
        Ok(())
    }
}
