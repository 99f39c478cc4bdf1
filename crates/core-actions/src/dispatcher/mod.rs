//! Dispatcher applying resolved commands to the editor session.
//!
//! Sub-modules:
//! * `motion` - cursor movement and scrolling
//! * `edit`   - text mutation (self-insert, newline, deletes, kill-line)
//! * `file`   - save / revert
//!
//! Incremental search is a sub-mode: while a `SearchSession` is active every
//! key goes to it instead of the chord resolver.

use crate::isearch::{SearchSession, SearchStep};
use crate::{Alert, Frontend};
use core_events::{InputEvent, Key, KeySource, describe};
use core_keymap::{ChordResolver, Command, Keymap, Resolution};
use core_state::{EditorSession, SessionError};
use tracing::{debug, info};

mod edit;
mod file;
mod motion;

/// Result of dispatching a single key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    pub dirty: bool,
    pub quit: bool,
    /// An alert was raised; the frontend may ring the bell.
    pub alert: bool,
}

impl DispatchResult {
    pub fn dirty() -> Self {
        Self {
            dirty: true,
            quit: false,
            alert: false,
        }
    }
    pub fn clean() -> Self {
        Self {
            dirty: false,
            quit: false,
            alert: false,
        }
    }
    pub fn quit() -> Self {
        Self {
            dirty: true,
            quit: true,
            alert: false,
        }
    }
    pub fn alerted() -> Self {
        Self {
            dirty: true,
            quit: false,
            alert: true,
        }
    }
}

/// Record an alert in the echo area.
fn raise(session: &mut EditorSession, alert: Alert) -> DispatchResult {
    debug!(target: "actions.dispatch", alert = %alert, "alert");
    session.set_status(alert.to_string());
    DispatchResult::alerted()
}

/// Map a command's soft failure to an alert, success to a redraw.
fn settle(session: &mut EditorSession, outcome: Result<(), Alert>) -> DispatchResult {
    match outcome {
        Ok(()) => DispatchResult::dirty(),
        Err(alert) => raise(session, alert),
    }
}

#[derive(Debug, Default)]
pub struct Dispatcher {
    resolver: ChordResolver,
    search: Option<SearchSession>,
}

impl Dispatcher {
    pub fn new(keymap: Keymap) -> Self {
        Self {
            resolver: ChordResolver::new(keymap),
            search: None,
        }
    }

    pub fn is_searching(&self) -> bool {
        self.search.is_some()
    }

    /// Read, resolve, execute, redraw until the exit command.
    pub fn run<S, F>(
        &mut self,
        session: &mut EditorSession,
        source: &mut S,
        frontend: &mut F,
    ) -> anyhow::Result<()>
    where
        S: KeySource + ?Sized,
        F: Frontend + ?Sized,
    {
        frontend.render(session)?;
        loop {
            let result = match source.next_event()? {
                InputEvent::Key(key) => self.handle_key(session, key)?,
                InputEvent::Resize(cols, rows) => {
                    session.resize(cols, rows);
                    DispatchResult::dirty()
                }
            };
            if result.alert && session.options.audible_alert {
                frontend.alert()?;
            }
            if result.quit {
                info!(target: "actions.dispatch", dirty_buffer = session.dirty, "exit");
                return Ok(());
            }
            if result.dirty {
                frontend.render(session)?;
            }
        }
    }

    /// Dispatch one key. Only file errors are returned as `Err`.
    pub fn handle_key(
        &mut self,
        session: &mut EditorSession,
        key: Key,
    ) -> Result<DispatchResult, SessionError> {
        if key.is_none() {
            return Ok(DispatchResult::clean());
        }
        if self.search.is_some() {
            return Ok(self.handle_search_key(session, key));
        }
        let had_transient = session.status.is_some() || session.overlay.is_some();
        session.clear_transient();
        let mut result = match self.resolver.feed(key) {
            Resolution::Invoke(command) => self.execute(session, command)?,
            Resolution::SelfInsert(byte) => {
                let outcome = edit::self_insert(session, byte);
                settle(session, outcome)
            }
            Resolution::Pending(prefix) => {
                session.set_status(format!("{prefix}-"));
                DispatchResult::dirty()
            }
            Resolution::Undefined(keys) => raise(session, Alert::UndefinedBinding(describe(&keys))),
            Resolution::Cancelled => {
                session.set_status("Quit");
                DispatchResult::dirty()
            }
            Resolution::Ignored => DispatchResult::clean(),
        };
        result.dirty |= had_transient;
        Ok(result)
    }

    fn handle_search_key(&mut self, session: &mut EditorSession, key: Key) -> DispatchResult {
        let Some(search) = self.search.as_mut() else {
            return DispatchResult::clean();
        };
        match search.handle_key(session, key) {
            Ok(SearchStep::Continue) => {
                session.set_status(search.prompt());
                DispatchResult::dirty()
            }
            Ok(SearchStep::Confirmed | SearchStep::Cancelled) => {
                self.search = None;
                DispatchResult::dirty()
            }
            // "Failing search: ..." already says it; the bell is enough.
            Err(Alert::NoMatch) => {
                debug!(target: "actions.isearch", alert = %Alert::NoMatch, "alert");
                DispatchResult::alerted()
            }
            // Shown until the next search key puts the prompt back.
            Err(alert) => raise(session, alert),
        }
    }

    /// Execute one command against the session.
    pub fn execute(
        &mut self,
        session: &mut EditorSession,
        command: Command,
    ) -> Result<DispatchResult, SessionError> {
        debug!(target: "actions.dispatch", command = command.name(), "execute");
        let outcome = match command {
            Command::ForwardChar => motion::forward_char(session),
            Command::BackwardChar => motion::backward_char(session),
            Command::NextLine => motion::next_line(session),
            Command::PreviousLine => motion::previous_line(session),
            Command::BeginningOfLine => motion::beginning_of_line(session),
            Command::EndOfLine => motion::end_of_line(session),
            Command::PageDown => {
                session.view.page_down(&session.buffer);
                Ok(())
            }
            Command::PageUp => {
                session.view.page_up(&session.buffer);
                Ok(())
            }
            Command::BeginningOfBuffer => motion::beginning_of_buffer(session),
            Command::EndOfBuffer => motion::end_of_buffer(session),
            Command::Recenter => {
                session.view.recenter(&session.buffer);
                Ok(())
            }
            Command::Newline => edit::newline(session),
            Command::InsertTab => edit::self_insert(session, b'\t'),
            Command::DeleteBackwardChar => edit::delete_backward_char(session),
            Command::DeleteChar => edit::delete_char(session),
            Command::KillLine => edit::kill_line(session),
            Command::IsearchForward => {
                self.search = Some(SearchSession::begin(session));
                Ok(())
            }
            Command::KeyboardQuit => {
                session.highlight = None;
                session.set_status("Quit");
                Ok(())
            }
            Command::DescribeBindings => {
                session.overlay = Some(self.resolver.keymap().describe_lines());
                Ok(())
            }
            Command::SaveBuffer => {
                file::save(session)?;
                Ok(())
            }
            Command::RevertBuffer => {
                file::revert(session)?;
                Ok(())
            }
            Command::Exit => return Ok(DispatchResult::quit()),
        };
        Ok(settle(session, outcome))
    }
}
