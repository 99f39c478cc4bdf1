//! File sub-dispatch. Failures propagate and end the dispatch loop.

use core_state::{EditorSession, SessionError};
use tracing::info;

pub(crate) fn save(session: &mut EditorSession) -> Result<(), SessionError> {
    info!(target: "actions.dispatch", path = %session.path().display(), "save_buffer");
    session.save()
}

pub(crate) fn revert(session: &mut EditorSession) -> Result<(), SessionError> {
    info!(target: "actions.dispatch", path = %session.path().display(), was_dirty = session.dirty, "revert_buffer");
    session.revert()
}
