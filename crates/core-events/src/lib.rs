//! Key tokens and the key source seam.
//!
//! A `Key` is a logical key identity (`KeyCode`) plus a `Modifiers` mask. Keys
//! print and parse using emacs notation: `C-x`, `M-v`, `C-M-f`, `<RET>`,
//! `<prior>`, `SPC`. `KeyCode::NoKey` is the reserved "nothing was pressed"
//! sentinel; every consumer ignores it.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const CTRL = 0b0000_0001;
        const META = 0b0000_0010;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Tab,
    Backspace,
    Delete,
    Esc,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
    NoKey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key {
    pub code: KeyCode,
    pub mods: Modifiers,
}

impl Key {
    pub const NONE: Key = Key::plain(KeyCode::NoKey);

    pub const fn new(code: KeyCode, mods: Modifiers) -> Self {
        Self { code, mods }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, Modifiers::empty())
    }

    pub const fn char(c: char) -> Self {
        Self::plain(KeyCode::Char(c))
    }

    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), Modifiers::CTRL)
    }

    pub const fn meta(c: char) -> Self {
        Self::new(KeyCode::Char(c), Modifiers::META)
    }

    pub fn with_meta(self) -> Self {
        Self::new(self.code, self.mods | Modifiers::META)
    }

    pub fn is_none(&self) -> bool {
        self.code == KeyCode::NoKey
    }

    /// The byte to insert when this key self-inserts: an unmodified ASCII
    /// graphic character or space.
    pub fn self_insert_byte(&self) -> Option<u8> {
        match self.code {
            KeyCode::Char(c)
                if self.mods.is_empty() && (c.is_ascii_graphic() || c == ' ') =>
            {
                Some(c as u8)
            }
            _ => None,
        }
    }
}

fn code_name(code: KeyCode) -> Option<&'static str> {
    Some(match code {
        KeyCode::Enter => "<RET>",
        KeyCode::Tab => "<TAB>",
        KeyCode::Backspace => "<backspace>",
        KeyCode::Delete => "<delete>",
        KeyCode::Esc => "<escape>",
        KeyCode::Up => "<up>",
        KeyCode::Down => "<down>",
        KeyCode::Left => "<left>",
        KeyCode::Right => "<right>",
        KeyCode::Home => "<home>",
        KeyCode::End => "<end>",
        KeyCode::PageUp => "<prior>",
        KeyCode::PageDown => "<next>",
        KeyCode::NoKey => "<nokey>",
        KeyCode::Char(' ') => "SPC",
        KeyCode::Char(_) | KeyCode::F(_) => return None,
    })
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mods.contains(Modifiers::CTRL) {
            f.write_str("C-")?;
        }
        if self.mods.contains(Modifiers::META) {
            f.write_str("M-")?;
        }
        match (self.code, code_name(self.code)) {
            (_, Some(name)) => f.write_str(name),
            (KeyCode::F(n), None) => write!(f, "<f{n}>"),
            (KeyCode::Char(c), None) => write!(f, "{c}"),
            _ => Ok(()),
        }
    }
}

/// Space-separated emacs description of a key sequence, e.g. `C-x C-s`.
pub fn describe(keys: &[Key]) -> String {
    keys.iter()
        .map(Key::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyParseError {
    #[error("empty key description")]
    Empty,
    #[error("unknown key name `{0}`")]
    UnknownName(String),
}

fn parse_name(name: &str) -> Option<KeyCode> {
    let bare = name
        .strip_prefix('<')
        .and_then(|n| n.strip_suffix('>'))
        .unwrap_or(name);
    Some(match bare {
        "RET" | "return" => KeyCode::Enter,
        "TAB" | "tab" => KeyCode::Tab,
        "backspace" | "DEL" => KeyCode::Backspace,
        "delete" | "deletechar" => KeyCode::Delete,
        "escape" | "ESC" => KeyCode::Esc,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "prior" => KeyCode::PageUp,
        "next" => KeyCode::PageDown,
        "SPC" => KeyCode::Char(' '),
        _ => {
            let n = bare.strip_prefix('f')?.parse::<u8>().ok()?;
            KeyCode::F(n)
        }
    })
}

impl FromStr for Key {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rest = s;
        let mut mods = Modifiers::empty();
        loop {
            if let Some(r) = rest.strip_prefix("C-")
                && !r.is_empty()
            {
                mods |= Modifiers::CTRL;
                rest = r;
            } else if let Some(r) = rest.strip_prefix("M-")
                && !r.is_empty()
            {
                mods |= Modifiers::META;
                rest = r;
            } else {
                break;
            }
        }
        let mut chars = rest.chars();
        let code = match (chars.next(), chars.next()) {
            (None, _) => return Err(KeyParseError::Empty),
            (Some(c), None) => KeyCode::Char(c),
            _ => parse_name(rest).ok_or_else(|| KeyParseError::UnknownName(rest.to_string()))?,
        };
        Ok(Key::new(code, mods))
    }
}

/// Parse a space-separated key sequence such as `C-x C-s`.
pub fn parse_seq(s: &str) -> Result<Vec<Key>, KeyParseError> {
    s.split_whitespace().map(str::parse).collect()
}

/// Normalized input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(Key),
    /// Terminal resize (columns, rows).
    Resize(u16, u16),
}

/// Blocking producer of input events.
pub trait KeySource {
    fn next_event(&mut self) -> anyhow::Result<InputEvent>;
}
