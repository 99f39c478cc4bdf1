use core_events::{Key, KeyCode, Modifiers};
use crossterm::event::{
    KeyCode as CKeyCode, KeyEvent as CKeyEvent, KeyEventKind as CKeyEventKind,
    KeyModifiers as CKeyModifiers,
};

/// Map a crossterm key event into an editor `Key`.
///
/// Returns `None` for releases and for key codes the editor has no use for
/// (media keys, lock keys, bare modifiers).
pub(crate) fn map_key_event(event: &CKeyEvent) -> Option<Key> {
    if matches!(event.kind, CKeyEventKind::Release) {
        return None;
    }
    let mods = map_mods(event.modifiers);
    let code = match event.code {
        // Shift is already folded into the character; control chords are
        // case-insensitive.
        CKeyCode::Char(c) if mods.contains(Modifiers::CTRL) => KeyCode::Char(c.to_ascii_lowercase()),
        CKeyCode::Char(c) => KeyCode::Char(c),
        other => map_named(other)?,
    };
    Some(Key::new(code, mods))
}

fn map_named(code: CKeyCode) -> Option<KeyCode> {
    Some(match code {
        CKeyCode::Enter => KeyCode::Enter,
        CKeyCode::Esc => KeyCode::Esc,
        CKeyCode::Backspace => KeyCode::Backspace,
        CKeyCode::Tab | CKeyCode::BackTab => KeyCode::Tab,
        CKeyCode::Up => KeyCode::Up,
        CKeyCode::Down => KeyCode::Down,
        CKeyCode::Left => KeyCode::Left,
        CKeyCode::Right => KeyCode::Right,
        CKeyCode::Home => KeyCode::Home,
        CKeyCode::End => KeyCode::End,
        CKeyCode::PageUp => KeyCode::PageUp,
        CKeyCode::PageDown => KeyCode::PageDown,
        CKeyCode::Delete => KeyCode::Delete,
        CKeyCode::F(n) => KeyCode::F(n),
        CKeyCode::Char(c) => KeyCode::Char(c),
        CKeyCode::Insert
        | CKeyCode::Null
        | CKeyCode::CapsLock
        | CKeyCode::ScrollLock
        | CKeyCode::NumLock
        | CKeyCode::PrintScreen
        | CKeyCode::Pause
        | CKeyCode::Menu
        | CKeyCode::KeypadBegin
        | CKeyCode::Media(_)
        | CKeyCode::Modifier(_) => return None,
    })
}

/// Control stays control; Alt and Meta both become emacs meta. Shift and
/// Super are dropped.
pub(crate) fn map_mods(mods: CKeyModifiers) -> Modifiers {
    let mut out = Modifiers::empty();
    if mods.contains(CKeyModifiers::CONTROL) {
        out |= Modifiers::CTRL;
    }
    if mods.intersects(CKeyModifiers::ALT | CKeyModifiers::META) {
        out |= Modifiers::META;
    }
    out
}
