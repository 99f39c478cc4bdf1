//! Modal incremental search.
//!
//! A `SearchSession` exists only while search mode is active. Every key that
//! changes the needle or the skip count re-runs the search from the anchor
//! (the cursor position when search began), skipping `skip_count` earlier
//! matches. Typing more characters does not reset the skip count.
//!
//! | key           | effect                                                   |
//! |---------------|----------------------------------------------------------|
//! | printable     | append to the needle                                     |
//! | `<backspace>` | undo one `C-s` if any, else drop the last needle byte    |
//! | `C-s`         | next match; on an empty needle recall the previous one   |
//! | `<RET>`       | confirm, cursor stays on the match                       |
//! | `C-g`         | cancel, cursor returns to the anchor                     |

use crate::Alert;
use core_config::SearchCase;
use core_events::{Key, KeyCode};
use core_state::{EditorSession, Highlight};
use core_text::Position;
use core_text::search::{CaseMode, Found, find_nth};
use core_view::ColumnPolicy;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStep {
    Continue,
    Confirmed,
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct SearchSession {
    needle: Vec<u8>,
    skip_count: usize,
    anchor: Position,
    wrapped: bool,
    failing: bool,
    current: Option<Found>,
}

fn case_mode(setting: SearchCase, needle: &[u8]) -> CaseMode {
    match setting {
        SearchCase::Smart => CaseMode::smart(needle),
        SearchCase::Sensitive => CaseMode::Sensitive,
        SearchCase::Insensitive => CaseMode::Insensitive,
    }
}

impl SearchSession {
    /// Enter search mode at the session's cursor.
    pub fn begin(session: &mut EditorSession) -> Self {
        let search = Self {
            needle: Vec::new(),
            skip_count: 0,
            anchor: session.cursor(),
            wrapped: false,
            failing: false,
            current: None,
        };
        debug!(target: "actions.isearch", row = search.anchor.row, col = search.anchor.col, "isearch_begin");
        session.set_status(search.prompt());
        search
    }

    pub fn needle(&self) -> &[u8] {
        &self.needle
    }

    pub fn skip_count(&self) -> usize {
        self.skip_count
    }

    pub fn anchor(&self) -> Position {
        self.anchor
    }

    pub fn is_failing(&self) -> bool {
        self.failing
    }

    pub fn is_wrapped(&self) -> bool {
        self.wrapped
    }

    pub fn current(&self) -> Option<Found> {
        self.current
    }

    /// Echo-area text for the current state.
    pub fn prompt(&self) -> String {
        let label = if self.failing {
            "Failing search: "
        } else if self.wrapped {
            "Wrapped search: "
        } else {
            "search: "
        };
        format!("{label}{}", String::from_utf8_lossy(&self.needle))
    }

    /// Feed one key. `Err` leaves the search active and asks for an alert.
    pub fn handle_key(&mut self, session: &mut EditorSession, key: Key) -> Result<SearchStep, Alert> {
        trace!(target: "actions.isearch", key = %key, "isearch_key");
        match key {
            k if k.code == KeyCode::Enter && k.mods.is_empty() => {
                self.finish(session);
                debug!(target: "actions.isearch", found = self.current.is_some(), "isearch_confirm");
                session.status = None;
                Ok(SearchStep::Confirmed)
            }
            k if k == Key::ctrl('g') => {
                self.finish(session);
                session
                    .view
                    .move_to(&session.buffer, self.anchor.row, self.anchor.col, ColumnPolicy::Snap)?;
                debug!(target: "actions.isearch", "isearch_cancel");
                session.set_status("Quit");
                Ok(SearchStep::Cancelled)
            }
            k if k.code == KeyCode::Backspace && k.mods.is_empty() => {
                if self.skip_count > 0 {
                    self.skip_count -= 1;
                } else if self.needle.pop().is_none() {
                    return Err(Alert::NoMatchToTrim);
                }
                self.refresh(session)
            }
            k if k == Key::ctrl('s') => {
                if !self.needle.is_empty() {
                    self.skip_count += 1;
                } else if let Some(last) = &session.last_needle {
                    self.needle = last.clone();
                } else {
                    return Ok(SearchStep::Continue);
                }
                self.refresh(session)
            }
            k => match k.self_insert_byte() {
                Some(byte) => {
                    self.needle.push(byte);
                    self.refresh(session)
                }
                None => Err(Alert::UndefinedBinding(k.to_string())),
            },
        }
    }

    fn finish(&self, session: &mut EditorSession) {
        session.highlight = None;
        if !self.needle.is_empty() {
            session.last_needle = Some(self.needle.clone());
        }
    }

    fn refresh(&mut self, session: &mut EditorSession) -> Result<SearchStep, Alert> {
        if self.needle.is_empty() {
            self.current = None;
            self.failing = false;
            self.wrapped = false;
            session.highlight = None;
            session
                .view
                .move_to(&session.buffer, self.anchor.row, self.anchor.col, ColumnPolicy::Snap)?;
            session.set_status(self.prompt());
            return Ok(SearchStep::Continue);
        }
        let case = case_mode(session.options.search_case, &self.needle);
        let found = find_nth(&session.buffer, &self.needle, self.anchor, self.skip_count, case);
        trace!(
            target: "actions.isearch",
            needle_len = self.needle.len(),
            skip = self.skip_count,
            found = found.is_some(),
            "isearch_refresh"
        );
        let Some(found) = found else {
            self.failing = true;
            session.set_status(self.prompt());
            return Err(Alert::NoMatch);
        };
        self.failing = false;
        self.wrapped = found.wrapped;
        self.current = Some(found);
        let end = found.end(self.needle.len());
        session
            .view
            .move_to(&session.buffer, end.row, end.col, ColumnPolicy::Snap)?;
        session.highlight = Some(Highlight {
            start: found.pos,
            len: self.needle.len(),
        });
        session.set_status(self.prompt());
        Ok(SearchStep::Continue)
    }
}
