//! Command execution, incremental search, and the dispatch loop.
//!
//! The dispatcher pulls events from a `KeySource`, resolves them through the
//! chord resolver, applies the resulting command to the `EditorSession`, and
//! asks a `Frontend` to redraw. Soft failures surface as an `Alert`: a status
//! message plus an optional bell. Only file errors end the loop.

use core_state::EditorSession;
use core_text::EditError;
use thiserror::Error;

mod dispatcher;
pub mod isearch;

pub use dispatcher::{DispatchResult, Dispatcher};

/// Recoverable, user-visible failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Alert {
    #[error("End of buffer")]
    OutOfRange,
    #[error("{0} is undefined")]
    UndefinedBinding(String),
    #[error("Beginning of buffer")]
    AtBufferStart,
    #[error("Search failed")]
    NoMatch,
    #[error("Search string is empty")]
    NoMatchToTrim,
}

impl From<EditError> for Alert {
    fn from(e: EditError) -> Self {
        match e {
            EditError::AtBufferStart => Alert::AtBufferStart,
            EditError::OutOfRange { .. } => Alert::OutOfRange,
        }
    }
}

/// Where frames and alerts go.
pub trait Frontend {
    fn render(&mut self, session: &EditorSession) -> anyhow::Result<()>;
    /// Signal an alert (terminal bell).
    fn alert(&mut self) -> anyhow::Result<()>;
}
