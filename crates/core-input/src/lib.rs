//! Blocking terminal input.
//!
//! `TerminalKeys` reads crossterm events, maps key presses to editor `Key`s,
//! folds escape prefixes into meta, and reports resizes. Everything else the
//! terminal sends (mouse, focus, paste) is skipped.

mod key_token;
mod meta;

pub use meta::MetaFolder;

use core_events::{InputEvent, KeySource};
use crossterm::event::Event as CEvent;
use std::collections::VecDeque;
use std::io;
use tracing::trace;

/// Where raw crossterm events come from.
pub trait EventReader {
    fn read(&mut self) -> io::Result<CEvent>;
}

/// Reads from the real terminal, blocking until an event arrives.
#[derive(Debug, Default, Clone, Copy)]
pub struct Blocking;

impl EventReader for Blocking {
    fn read(&mut self) -> io::Result<CEvent> {
        crossterm::event::read()
    }
}

/// Replays queued events; reports end of input once drained.
impl EventReader for VecDeque<CEvent> {
    fn read(&mut self) -> io::Result<CEvent> {
        self.pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no more terminal events"))
    }
}

#[derive(Debug, Default)]
pub struct TerminalKeys<R: EventReader = Blocking> {
    reader: R,
    folder: MetaFolder,
}

impl TerminalKeys<Blocking> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R: EventReader> TerminalKeys<R> {
    pub fn with_reader(reader: R) -> Self {
        Self {
            reader,
            folder: MetaFolder::new(),
        }
    }
}

impl<R: EventReader> KeySource for TerminalKeys<R> {
    fn next_event(&mut self) -> anyhow::Result<InputEvent> {
        loop {
            match self.reader.read()? {
                CEvent::Key(ev) => {
                    let Some(key) = key_token::map_key_event(&ev) else {
                        continue;
                    };
                    if let Some(key) = self.folder.feed(key) {
                        trace!(target: "input", key = %key, "key");
                        return Ok(InputEvent::Key(key));
                    }
                }
                CEvent::Resize(cols, rows) => {
                    trace!(target: "input", cols, rows, "resize");
                    return Ok(InputEvent::Resize(cols, rows));
                }
                _ => continue,
            }
        }
    }
}
