#![allow(dead_code)] // Shared across integration tests; each test binary uses a subset of helpers.

use anyhow::anyhow;
use core_actions::{Dispatcher, Frontend};
use core_events::{InputEvent, Key, KeySource, parse_seq};
use core_state::{EditorSession, SessionOptions};
use core_text::LineBuffer;
use std::collections::VecDeque;

/// Replays a fixed list of events, then fails like a closed terminal.
pub struct ScriptedKeys {
    events: VecDeque<InputEvent>,
}

impl ScriptedKeys {
    pub fn new(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    /// Parse emacs key notation, e.g. `"a b RET C-x C-c"`.
    pub fn parse(notation: &str) -> Self {
        let keys = parse_seq(notation).expect("valid key notation");
        Self::new(keys.into_iter().map(InputEvent::Key))
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl KeySource for ScriptedKeys {
    fn next_event(&mut self) -> anyhow::Result<InputEvent> {
        self.events
            .pop_front()
            .ok_or_else(|| anyhow!("input exhausted"))
    }
}

/// Counts frames and bells instead of drawing.
#[derive(Debug, Default)]
pub struct RecordingFrontend {
    pub renders: usize,
    pub alerts: usize,
    pub last_status: Option<String>,
}

impl Frontend for RecordingFrontend {
    fn render(&mut self, session: &EditorSession) -> anyhow::Result<()> {
        self.renders += 1;
        self.last_status = session.status.clone();
        Ok(())
    }

    fn alert(&mut self) -> anyhow::Result<()> {
        self.alerts += 1;
        Ok(())
    }
}

pub fn session(text: &[u8]) -> EditorSession {
    let mut s = EditorSession::new(LineBuffer::from_bytes(text), "scratch.txt", SessionOptions::default());
    s.resize(80, 24);
    s
}

/// Feed keys one at a time through the dispatcher, ignoring results.
pub fn feed(dispatcher: &mut Dispatcher, session: &mut EditorSession, notation: &str) {
    for key in parse_seq(notation).expect("valid key notation") {
        dispatcher.handle_key(session, key).expect("no file error");
    }
}

pub fn key(notation: &str) -> Key {
    notation.parse().expect("valid key")
}
