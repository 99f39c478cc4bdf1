//! core-keymap: chord binding table and resolver.
//!
//! Design principles:
//! - Pure and deterministic: resolution depends only on the table and the
//!   resolver's own state.
//! - A binding is one key or a two-key chord, optionally reachable through a
//!   single named-key alias (`<right>` for `C-f`). The table is an ordered
//!   list scanned linearly; the first entry whose first key or alias matches
//!   decides whether that key is a complete command or a chord prefix.
//! - No side effects: logging only at TRACE/DEBUG.

use core_events::{Key, KeyCode, describe};
use smallvec::{SmallVec, smallvec};
use tracing::{debug, trace};

// -------------------------------------------------------------------------------------------------
// Commands
// -------------------------------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    ForwardChar,
    BackwardChar,
    NextLine,
    PreviousLine,
    BeginningOfLine,
    EndOfLine,
    PageDown,
    PageUp,
    BeginningOfBuffer,
    EndOfBuffer,
    Recenter,
    Newline,
    InsertTab,
    DeleteBackwardChar,
    DeleteChar,
    KillLine,
    IsearchForward,
    KeyboardQuit,
    DescribeBindings,
    SaveBuffer,
    RevertBuffer,
    Exit,
}

impl Command {
    /// Emacs-style command name.
    pub fn name(self) -> &'static str {
        match self {
            Command::ForwardChar => "forward-char",
            Command::BackwardChar => "backward-char",
            Command::NextLine => "next-line",
            Command::PreviousLine => "previous-line",
            Command::BeginningOfLine => "move-beginning-of-line",
            Command::EndOfLine => "move-end-of-line",
            Command::PageDown => "scroll-up-command",
            Command::PageUp => "scroll-down-command",
            Command::BeginningOfBuffer => "beginning-of-buffer",
            Command::EndOfBuffer => "end-of-buffer",
            Command::Recenter => "recenter",
            Command::Newline => "newline",
            Command::InsertTab => "insert-tab",
            Command::DeleteBackwardChar => "delete-backward-char",
            Command::DeleteChar => "delete-char",
            Command::KillLine => "kill-line",
            Command::IsearchForward => "isearch-forward",
            Command::KeyboardQuit => "keyboard-quit",
            Command::DescribeBindings => "describe-bindings",
            Command::SaveBuffer => "save-buffer",
            Command::RevertBuffer => "revert-buffer",
            Command::Exit => "save-buffers-kill-terminal",
        }
    }
}

// -------------------------------------------------------------------------------------------------
// Binding table
// -------------------------------------------------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub first: Key,
    pub second: Option<Key>,
    /// A single key that invokes the command directly.
    pub alias: Option<Key>,
    pub command: Command,
    pub description: &'static str,
}

impl Binding {
    pub fn single(key: Key, command: Command, description: &'static str) -> Self {
        Self {
            first: key,
            second: None,
            alias: None,
            command,
            description,
        }
    }

    pub fn chord(prefix: Key, key: Key, command: Command, description: &'static str) -> Self {
        Self {
            first: prefix,
            second: Some(key),
            alias: None,
            command,
            description,
        }
    }

    /// Also bind the command to the single key `alias`.
    pub fn or(mut self, alias: Key) -> Self {
        self.alias = Some(alias);
        self
    }

    pub fn keys(&self) -> SmallVec<[Key; 2]> {
        let mut keys = smallvec![self.first];
        keys.extend(self.second);
        keys
    }
}

#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: Vec<Binding>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self::default_bindings()
    }
}

impl Keymap {
    pub fn new(bindings: Vec<Binding>) -> Self {
        Self { bindings }
    }

    /// The built-in emacs-flavoured table, in registration order.
    pub fn default_bindings() -> Self {
        use Binding as B;
        use Command as C;
        let named = Key::plain;
        let ctrl_x = Key::ctrl('x');
        Self::new(vec![
            B::single(Key::ctrl('f'), C::ForwardChar, "move forward one character").or(named(KeyCode::Right)),
            B::single(Key::ctrl('b'), C::BackwardChar, "move backward one character").or(named(KeyCode::Left)),
            B::single(Key::ctrl('n'), C::NextLine, "move to the next line").or(named(KeyCode::Down)),
            B::single(Key::ctrl('p'), C::PreviousLine, "move to the previous line").or(named(KeyCode::Up)),
            B::single(Key::ctrl('a'), C::BeginningOfLine, "move to the start of the line").or(named(KeyCode::Home)),
            B::single(Key::ctrl('e'), C::EndOfLine, "move to the end of the line").or(named(KeyCode::End)),
            B::single(Key::ctrl('v'), C::PageDown, "scroll forward one screen").or(named(KeyCode::PageDown)),
            B::single(Key::meta('v'), C::PageUp, "scroll backward one screen").or(named(KeyCode::PageUp)),
            B::single(Key::meta('<'), C::BeginningOfBuffer, "move to the start of the buffer"),
            B::single(Key::meta('>'), C::EndOfBuffer, "move to the end of the buffer"),
            B::single(Key::ctrl('l'), C::Recenter, "centre the cursor line in the window"),
            B::single(named(KeyCode::Enter), C::Newline, "split the line at the cursor"),
            B::single(named(KeyCode::Tab), C::InsertTab, "insert a tab character"),
            B::single(named(KeyCode::Backspace), C::DeleteBackwardChar, "delete the previous character"),
            B::single(Key::ctrl('d'), C::DeleteChar, "delete the character under the cursor").or(named(KeyCode::Delete)),
            B::single(Key::ctrl('k'), C::KillLine, "kill to the end of the line"),
            B::single(Key::ctrl('s'), C::IsearchForward, "incremental search forward"),
            B::single(Key::ctrl('g'), C::KeyboardQuit, "cancel the current operation"),
            B::chord(Key::ctrl('h'), Key::char('b'), C::DescribeBindings, "list key bindings").or(named(KeyCode::F(1))),
            B::chord(ctrl_x, Key::ctrl('s'), C::SaveBuffer, "save the buffer to its file"),
            B::chord(ctrl_x, Key::ctrl('r'), C::RevertBuffer, "reload the buffer from its file"),
            B::chord(ctrl_x, Key::ctrl('c'), C::Exit, "exit the editor"),
        ])
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// First binding whose first key or alias is `key`.
    pub fn lookup_first(&self, key: Key) -> Option<&Binding> {
        self.bindings
            .iter()
            .find(|b| b.first == key || b.alias == Some(key))
    }

    /// First chord binding for `prefix` followed by `key`.
    pub fn lookup_chord(&self, prefix: Key, key: Key) -> Option<&Binding> {
        self.bindings
            .iter()
            .find(|b| b.first == prefix && b.second == Some(key))
    }

    /// One line per binding: keys (alias after a comma), command name, description.
    pub fn describe_lines(&self) -> Vec<String> {
        self.bindings
            .iter()
            .map(|b| {
                let mut keys = describe(&b.keys());
                if let Some(alias) = b.alias {
                    keys.push_str(&format!(", {alias}"));
                }
                format!("{:<14} {:<28} {}", keys, b.command.name(), b.description)
            })
            .collect()
    }
}

// -------------------------------------------------------------------------------------------------
// Resolver
// -------------------------------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChordState {
    #[default]
    Idle,
    AwaitingSecond {
        prefix: Key,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Invoke(Command),
    SelfInsert(u8),
    /// A chord prefix was consumed; the next key completes it.
    Pending(Key),
    Undefined(SmallVec<[Key; 2]>),
    /// `C-g` while a prefix was pending.
    Cancelled,
    /// The no-key sentinel.
    Ignored,
}

/// Two-state machine turning single keys into commands.
#[derive(Debug, Clone, Default)]
pub struct ChordResolver {
    keymap: Keymap,
    state: ChordState,
}

impl ChordResolver {
    pub fn new(keymap: Keymap) -> Self {
        Self {
            keymap,
            state: ChordState::Idle,
        }
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    pub fn state(&self) -> ChordState {
        self.state
    }

    /// Drop any pending prefix.
    pub fn reset(&mut self) {
        self.state = ChordState::Idle;
    }

    pub fn feed(&mut self, key: Key) -> Resolution {
        if key.is_none() {
            return Resolution::Ignored;
        }
        let res = match self.state {
            ChordState::Idle => self.resolve_first(key),
            ChordState::AwaitingSecond { prefix } => {
                self.state = ChordState::Idle;
                self.resolve_second(prefix, key)
            }
        };
        trace!(target: "keymap", key = %key, resolution = ?res, "feed");
        res
    }

    fn resolve_first(&mut self, key: Key) -> Resolution {
        match self.keymap.lookup_first(key) {
            Some(b) if b.alias == Some(key) => Resolution::Invoke(b.command),
            Some(Binding {
                second: None,
                command,
                ..
            }) => Resolution::Invoke(*command),
            Some(Binding {
                second: Some(_), ..
            }) => {
                self.state = ChordState::AwaitingSecond { prefix: key };
                debug!(target: "keymap", prefix = %key, "chord_prefix");
                Resolution::Pending(key)
            }
            None => match key.self_insert_byte() {
                Some(byte) => Resolution::SelfInsert(byte),
                None => Resolution::Undefined(smallvec![key]),
            },
        }
    }

    fn resolve_second(&self, prefix: Key, key: Key) -> Resolution {
        if key == Key::ctrl('g') {
            debug!(target: "keymap", prefix = %prefix, "chord_cancelled");
            return Resolution::Cancelled;
        }
        match self.keymap.lookup_chord(prefix, key) {
            Some(b) => Resolution::Invoke(b.command),
            None => Resolution::Undefined(smallvec![prefix, key]),
        }
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn resolver() -> ChordResolver {
        ChordResolver::new(Keymap::default_bindings())
    }

    #[test]
    fn single_key_invokes() {
        let mut r = resolver();
        assert_eq!(r.feed(Key::ctrl('f')), Resolution::Invoke(Command::ForwardChar));
        assert_eq!(
            r.feed(Key::plain(KeyCode::PageUp)),
            Resolution::Invoke(Command::PageUp)
        );
        assert_eq!(r.state(), ChordState::Idle);
    }

    #[test]
    fn chord_save_and_exit() {
        let mut r = resolver();
        assert_eq!(r.feed(Key::ctrl('x')), Resolution::Pending(Key::ctrl('x')));
        assert_eq!(
            r.state(),
            ChordState::AwaitingSecond {
                prefix: Key::ctrl('x')
            }
        );
        assert_eq!(r.feed(Key::ctrl('s')), Resolution::Invoke(Command::SaveBuffer));
        assert_eq!(r.feed(Key::ctrl('x')), Resolution::Pending(Key::ctrl('x')));
        assert_eq!(r.feed(Key::ctrl('c')), Resolution::Invoke(Command::Exit));
    }

    #[test]
    fn undefined_chord_returns_to_idle() {
        let mut r = resolver();
        r.feed(Key::ctrl('x'));
        let res = r.feed(Key::ctrl('z'));
        assert_eq!(res, Resolution::Undefined(smallvec![Key::ctrl('x'), Key::ctrl('z')]));
        assert_eq!(r.state(), ChordState::Idle);
        assert_eq!(r.feed(Key::ctrl('f')), Resolution::Invoke(Command::ForwardChar));
    }

    #[test]
    fn ctrl_g_cancels_pending_prefix() {
        let mut r = resolver();
        r.feed(Key::ctrl('x'));
        assert_eq!(r.feed(Key::ctrl('g')), Resolution::Cancelled);
        assert_eq!(r.state(), ChordState::Idle);
        assert_eq!(r.feed(Key::ctrl('g')), Resolution::Invoke(Command::KeyboardQuit));
    }

    #[test]
    fn printable_keys_self_insert() {
        let mut r = resolver();
        assert_eq!(r.feed(Key::char('a')), Resolution::SelfInsert(b'a'));
        assert_eq!(r.feed(Key::char(' ')), Resolution::SelfInsert(b' '));
        assert_eq!(
            r.feed(Key::meta('q')),
            Resolution::Undefined(smallvec![Key::meta('q')])
        );
    }

    #[test]
    fn no_key_is_ignored_in_both_states() {
        let mut r = resolver();
        assert_eq!(r.feed(Key::NONE), Resolution::Ignored);
        r.feed(Key::ctrl('x'));
        assert_eq!(r.feed(Key::NONE), Resolution::Ignored);
        assert_eq!(r.feed(Key::ctrl('s')), Resolution::Invoke(Command::SaveBuffer));
    }

    #[test]
    fn prefix_in_second_position_is_not_a_chord() {
        let mut r = resolver();
        r.feed(Key::ctrl('x'));
        assert_eq!(
            r.feed(Key::ctrl('x')),
            Resolution::Undefined(smallvec![Key::ctrl('x'), Key::ctrl('x')])
        );
    }

    #[test]
    fn first_match_decides_prefix_vs_single() {
        let keymap = Keymap::new(vec![
            Binding::single(Key::ctrl('q'), Command::Exit, "first wins"),
            Binding::chord(Key::ctrl('q'), Key::char('a'), Command::SaveBuffer, "shadowed"),
        ]);
        let mut r = ChordResolver::new(keymap);
        assert_eq!(r.feed(Key::ctrl('q')), Resolution::Invoke(Command::Exit));
    }

    #[test]
    fn help_chord_and_f1() {
        let mut r = resolver();
        r.feed(Key::ctrl('h'));
        assert_eq!(
            r.feed(Key::char('b')),
            Resolution::Invoke(Command::DescribeBindings)
        );
        assert_eq!(
            r.feed(Key::plain(KeyCode::F(1))),
            Resolution::Invoke(Command::DescribeBindings)
        );
    }

    #[test]
    fn describe_lines_use_emacs_names() {
        let lines = Keymap::default_bindings().describe_lines();
        let save = lines
            .iter()
            .find(|l| l.contains("save-buffer"))
            .unwrap();
        assert!(save.starts_with("C-x C-s"));
        assert_eq!(lines.len(), Keymap::default_bindings().bindings().len());
    }

    #[test]
    fn table_stays_small() {
        assert!(Keymap::default_bindings().bindings().len() < 30);
    }

    #[test]
    fn named_keys_alias_their_control_chords() {
        let mut r = resolver();
        assert_eq!(
            r.feed(Key::plain(KeyCode::Right)),
            Resolution::Invoke(Command::ForwardChar)
        );
        assert_eq!(
            r.feed(Key::plain(KeyCode::Delete)),
            Resolution::Invoke(Command::DeleteChar)
        );
        assert_eq!(r.state(), ChordState::Idle);
        let lines = Keymap::default_bindings().describe_lines();
        assert!(lines[0].starts_with("C-f, <right>"));
    }
}
