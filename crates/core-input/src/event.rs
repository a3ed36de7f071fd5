//! The key event model: a printable codepoint or symbolic key id, plus
//! modifier flags. Deliberately narrower than a full terminal-event union —
//! this engine's input path only ever produces key events.

use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct KeyModifiers: u8 {
        const CTRL  = 0b0001;
        const META  = 0b0010;
        const SHIFT = 0b0100;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    Char(char),
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    PageUp,
    PageDown,
    Delete,
    Insert,
    Backspace,
    Enter,
    Tab,
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyEvent {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::empty())
    }

    pub fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CTRL)
    }

    /// Canonical GNU Readline notation for this event: `"C-a"`, `"M-f"`,
    /// `"UP"`, `"RET"`, a bare printable character, etc. This is the exact
    /// string the keybinding engine keys its hashtable on.
    pub fn to_readline_notation(self) -> String {
        let mut out = String::new();
        if self.mods.contains(KeyModifiers::CTRL) {
            out.push_str("C-");
        }
        if self.mods.contains(KeyModifiers::META) {
            out.push_str("M-");
        }
        match self.code {
            KeyCode::Char(' ') if self.mods.contains(KeyModifiers::CTRL) => out.push_str("SPC"),
            KeyCode::Char(c) => out.push(c),
            KeyCode::ArrowLeft => out.push_str("LEFT"),
            KeyCode::ArrowRight => out.push_str("RIGHT"),
            KeyCode::ArrowUp => out.push_str("UP"),
            KeyCode::ArrowDown => out.push_str("DOWN"),
            KeyCode::Home => out.push_str("HOME"),
            KeyCode::End => out.push_str("END"),
            KeyCode::PageUp => out.push_str("PPAGE"),
            KeyCode::PageDown => out.push_str("NPAGE"),
            KeyCode::Delete => out.push_str("DEL"),
            KeyCode::Insert => out.push_str("INS"),
            KeyCode::Backspace => out.push_str("RUBOUT"),
            KeyCode::Enter => out.push_str("RET"),
            KeyCode::Tab => out.push_str("TAB"),
            KeyCode::Escape => out.push_str("ESC"),
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ctrl_letter_notation() {
        assert_eq!(KeyEvent::ctrl('a').to_readline_notation(), "C-a");
    }

    #[test]
    fn meta_letter_notation() {
        let ev = KeyEvent::new(KeyCode::Char('f'), KeyModifiers::META);
        assert_eq!(ev.to_readline_notation(), "M-f");
    }

    #[test]
    fn named_key_notation() {
        assert_eq!(KeyEvent::plain(KeyCode::ArrowUp).to_readline_notation(), "UP");
        assert_eq!(KeyEvent::plain(KeyCode::Enter).to_readline_notation(), "RET");
    }

    #[test]
    fn bare_printable_notation() {
        assert_eq!(KeyEvent::plain(KeyCode::Char('x')).to_readline_notation(), "x");
    }
}
