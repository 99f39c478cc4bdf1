//! Whole-file open, save and revert.
//!
//! Bytes go through `LineBuffer::load`/`save` untouched, so a save after an
//! open reproduces the file exactly.

use crate::{EditorSession, SessionError, SessionOptions};
use core_text::LineBuffer;
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing::{error, info};

fn read_buffer(path: &Path) -> io::Result<LineBuffer> {
    let file = File::open(path)?;
    LineBuffer::load(BufReader::new(file))
}

impl EditorSession {
    /// Open `path`. A missing file yields an empty buffer when
    /// `options.create_if_missing` is set; any other failure is an error.
    pub fn open(path: impl Into<PathBuf>, options: SessionOptions) -> Result<Self, SessionError> {
        let path = path.into();
        match read_buffer(&path) {
            Ok(buffer) => {
                info!(target: "io", path = %path.display(), lines = buffer.line_count(), "file_opened");
                Ok(Self::new(buffer, path, options))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound && options.create_if_missing => {
                info!(target: "io", path = %path.display(), "new_file");
                let mut session = Self::new(LineBuffer::new(), path, options);
                session.set_status("(New file)");
                Ok(session)
            }
            Err(source) => {
                error!(target: "io", path = %path.display(), error = %source, "file_open_error");
                Err(SessionError::Open { path, source })
            }
        }
    }

    /// Write the buffer to its file and mark the session clean.
    pub fn save(&mut self) -> Result<(), SessionError> {
        let write = || -> io::Result<()> {
            let file = File::create(&self.path)?;
            self.buffer.save(BufWriter::new(file))
        };
        if let Err(source) = write() {
            error!(target: "io", path = %self.path.display(), error = %source, "file_write_error");
            return Err(SessionError::Save {
                path: self.path.clone(),
                source,
            });
        }
        self.dirty = false;
        info!(target: "io", path = %self.path.display(), lines = self.buffer.line_count(), "file_saved");
        self.set_status(format!("Wrote {}", self.display_name()));
        Ok(())
    }

    /// Replace the buffer with the file's current contents, discarding edits.
    pub fn revert(&mut self) -> Result<(), SessionError> {
        let buffer = read_buffer(&self.path).map_err(|source| {
            error!(target: "io", path = %self.path.display(), error = %source, "file_revert_error");
            SessionError::Revert {
                path: self.path.clone(),
                source,
            }
        })?;
        self.buffer = buffer;
        self.dirty = false;
        self.highlight = None;
        self.view.sync(&self.buffer);
        info!(target: "io", path = %self.path.display(), "file_reverted");
        self.set_status(format!("Reverted {}", self.display_name()));
        Ok(())
    }
}
