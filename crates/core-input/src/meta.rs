//! Meta prefix folding.
//!
//! Terminals without a usable Alt key send `ESC` followed by the key. The
//! folder holds a lone `<escape>` and merges it into the next key as `M-`.

use core_events::{Key, KeyCode};
use tracing::trace;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MetaFolder {
    pending: bool,
}

impl MetaFolder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Feed one key. Returns the key to deliver, or `None` while an escape is held.
    pub fn feed(&mut self, key: Key) -> Option<Key> {
        if self.pending {
            self.pending = false;
            let folded = key.with_meta();
            trace!(target: "input", key = %folded, "meta_folded");
            return Some(folded);
        }
        if key.code == KeyCode::Esc && key.mods.is_empty() {
            self.pending = true;
            return None;
        }
        Some(key)
    }
}
