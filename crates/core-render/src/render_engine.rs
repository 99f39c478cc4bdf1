//! `Renderer`: composes frames from the session and emits them.
//!
//! The last emitted frame is cached. A frame identical to it is skipped, and a
//! change of frame size forces a full clear before painting.

use crate::writer::Writer;
use crate::{Frame, compose_frame};
use anyhow::Result;
use core_actions::Frontend;
use core_config::StatusColor;
use core_state::EditorSession;
use crossterm::style::Color;
use std::io::Write;
use tracing::{debug, trace};

pub fn accent_color(color: StatusColor) -> Color {
    match color {
        StatusColor::Black => Color::Black,
        StatusColor::Red => Color::DarkRed,
        StatusColor::Green => Color::DarkGreen,
        StatusColor::Yellow => Color::DarkYellow,
        StatusColor::Blue => Color::DarkBlue,
        StatusColor::Magenta => Color::DarkMagenta,
        StatusColor::Cyan => Color::DarkCyan,
        StatusColor::White => Color::Grey,
        StatusColor::Default => Color::Reset,
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RenderMetrics {
    pub frames_emitted: u64,
    pub frames_skipped: u64,
    pub full_clears: u64,
    pub bells: u64,
}

pub struct Renderer<W: Write> {
    out: W,
    accent: Color,
    prev: Option<Frame>,
    metrics: RenderMetrics,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W, color: StatusColor) -> Self {
        Self {
            out,
            accent: accent_color(color),
            prev: None,
            metrics: RenderMetrics::default(),
        }
    }

    pub fn metrics(&self) -> RenderMetrics {
        self.metrics
    }

    /// Forget the cached frame so the next render repaints everything.
    pub fn invalidate(&mut self) {
        self.prev = None;
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Emit `frame` unless it matches the previous one.
    pub fn present(&mut self, frame: Frame) -> Result<()> {
        if self.prev.as_ref() == Some(&frame) {
            self.metrics.frames_skipped += 1;
            trace!(target: "render", "frame_unchanged");
            return Ok(());
        }
        let clear = self
            .prev
            .as_ref()
            .is_none_or(|p| p.width != frame.width || p.height != frame.height);
        let mut writer = Writer::new();
        writer.paint_frame(&frame, clear);
        writer.flush(&mut self.out, self.accent)?;
        if clear {
            self.metrics.full_clears += 1;
            debug!(target: "render", width = frame.width, height = frame.height, "full_clear");
        }
        self.metrics.frames_emitted += 1;
        self.prev = Some(frame);
        Ok(())
    }
}

impl<W: Write> Frontend for Renderer<W> {
    fn render(&mut self, session: &EditorSession) -> Result<()> {
        self.present(compose_frame(session))
    }

    fn alert(&mut self) -> Result<()> {
        let mut writer = Writer::new();
        writer.bell();
        writer.flush(&mut self.out, self.accent)?;
        self.metrics.bells += 1;
        Ok(())
    }
}
