//! Editor session: the single buffer, its viewport, and file metadata.
//!
//! `EditorSession` is the one piece of mutable editor state. Commands receive
//! it by `&mut` and the frontend reads it by `&` to draw a frame. Besides the
//! buffer and viewport it carries presentation state that lives for one
//! interaction only:
//! - `status`: the transient echo-area message, cleared on the next key.
//! - `highlight`: the current incremental-search match.
//! - `overlay`: the describe-bindings listing, dismissed by the next key.

use core_config::{Config, SearchCase, StatusColor};
use core_text::{LineBuffer, Position};
use core_view::ViewportCursor;
use std::path::{Path, PathBuf};

mod error;
mod file;

pub use error::SessionError;

/// Byte span on one line highlighted by incremental search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight {
    pub start: Position,
    pub len: usize,
}

/// Behaviour knobs taken from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    pub create_if_missing: bool,
    pub search_case: SearchCase,
    pub status_color: StatusColor,
    pub audible_alert: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl SessionOptions {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            create_if_missing: cfg.file.editor.create_if_missing,
            search_case: cfg.file.search.case,
            status_color: cfg.file.display.status_color,
            audible_alert: cfg.file.display.audible_alert,
        }
    }
}

#[derive(Debug)]
pub struct EditorSession {
    pub buffer: LineBuffer,
    pub view: ViewportCursor,
    path: PathBuf,
    pub dirty: bool,
    pub status: Option<String>,
    pub highlight: Option<Highlight>,
    pub overlay: Option<Vec<String>>,
    /// Needle of the last confirmed or cancelled search, recalled by `C-s C-s`.
    pub last_needle: Option<Vec<u8>>,
    pub options: SessionOptions,
}

impl EditorSession {
    /// A session over an in-memory buffer. The viewport starts at 0x0 until
    /// the first `resize`.
    pub fn new(buffer: LineBuffer, path: impl Into<PathBuf>, options: SessionOptions) -> Self {
        Self {
            buffer,
            view: ViewportCursor::new(0, 0),
            path: path.into(),
            dirty: false,
            status: None,
            highlight: None,
            overlay: None,
            last_needle: None,
            options,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Name shown in the status line.
    pub fn display_name(&self) -> String {
        self.path.display().to_string()
    }

    pub fn cursor(&self) -> Position {
        self.view.cursor()
    }

    pub fn set_status<S: Into<String>>(&mut self, msg: S) {
        self.status = Some(msg.into());
    }

    /// Drop the echo-area message and any overlay.
    pub fn clear_transient(&mut self) {
        self.status = None;
        self.overlay = None;
    }

    /// Apply a terminal size in display rows (the status line included).
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.view
            .resize(&self.buffer, usize::from(cols), usize::from(rows));
    }

    /// Record a buffer mutation: mark dirty and re-derive the viewport.
    pub fn touch(&mut self) {
        self.dirty = true;
        self.view.sync(&self.buffer);
    }
}
