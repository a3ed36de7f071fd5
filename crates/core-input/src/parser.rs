//! Byte-in, key-event-out state machine. Pure with respect to its
//! [`ByteSource`](crate::reader::ByteSource): it only ever asks for the next
//! byte, never looks at terminal state, and produces exactly one
//! [`KeyEvent`] per call to [`KeyParser::next_event`].
//!
//! The escape-sequence handling follows the standard VT100/xterm grammar:
//! ESC alone (timeout before a follow byte arrives) is the Escape key; ESC
//! followed immediately by `[` is a CSI sequence (parameter bytes in
//! `0..=9` and `;`, a final byte in `A-Z`/`a-z`/`~`); ESC followed by any
//! other byte is that byte with the Meta modifier set, Readline's usual
//! interpretation of an Alt-chorded key on terminals that send ESC prefixes
//! instead of the high bit.

use std::time::Duration;

use crate::error::{InputError, InputResult};
use crate::event::{KeyCode, KeyEvent, KeyModifiers};
use crate::reader::ByteSource;

/// How long to wait, after a lone ESC byte, for a follow byte before
/// concluding the user pressed the Escape key by itself.
pub const ESCAPE_TIMEOUT: Duration = Duration::from_millis(100);

pub struct KeyParser<S: ByteSource> {
    source: S,
}

impl<S: ByteSource> KeyParser<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn into_inner(self) -> S {
        self.source
    }

    /// Blocks until the next complete key event is available.
    pub fn next_event(&mut self) -> InputResult<KeyEvent> {
        let first = self.source.read_byte()?;
        self.decode_first_byte(first)
    }

    fn decode_first_byte(&mut self, byte: u8) -> InputResult<KeyEvent> {
        match byte {
            0x1b => self.decode_escape(),
            0x00 => Ok(KeyEvent::ctrl('@')),
            0x01..=0x08 | 0x0b..=0x1a => {
                // Ctrl-a through Ctrl-h, Ctrl-k through Ctrl-z, excluding Tab
                // (0x09) and Enter (0x0d/0x0a) which get their own symbolic
                // keys below.
                let letter = (byte + b'a' - 1) as char;
                Ok(KeyEvent::ctrl(letter))
            }
            0x09 => Ok(KeyEvent::plain(KeyCode::Tab)),
            0x0d | 0x0a => Ok(KeyEvent::plain(KeyCode::Enter)),
            0x7f => Ok(KeyEvent::plain(KeyCode::Backspace)),
            0x1c => Ok(KeyEvent::ctrl('\\')),
            0x1d => Ok(KeyEvent::ctrl(']')),
            0x1e => Ok(KeyEvent::ctrl('^')),
            0x1f => Ok(KeyEvent::ctrl('_')),
            b if b < 0x80 => Ok(KeyEvent::plain(KeyCode::Char(b as char))),
            b => self.decode_utf8_continuation(b),
        }
    }

    fn decode_escape(&mut self) -> InputResult<KeyEvent> {
        let next = match self.source.read_byte_timeout(ESCAPE_TIMEOUT) {
            Ok(b) => b,
            Err(InputError::Timeout) => return Ok(KeyEvent::plain(KeyCode::Escape)),
            Err(e) => return Err(e),
        };
        match next {
            b'[' => self.decode_csi(),
            b'O' => self.decode_ss3(),
            other => {
                // Meta-prefixed key: ESC + byte. Recurse to decode the byte
                // itself, then fold in the META modifier.
                let inner = self.decode_first_byte(other)?;
                let mut mods = inner.mods;
                mods.insert(KeyModifiers::META);
                Ok(KeyEvent::new(inner.code, mods))
            }
        }
    }

    /// `ESC O` sequences: the application-keypad encoding some terminals use
    /// for arrow/Home/End instead of CSI.
    fn decode_ss3(&mut self) -> InputResult<KeyEvent> {
        let final_byte = self.source.read_byte_timeout(ESCAPE_TIMEOUT)?;
        let code = match final_byte {
            b'A' => KeyCode::ArrowUp,
            b'B' => KeyCode::ArrowDown,
            b'C' => KeyCode::ArrowRight,
            b'D' => KeyCode::ArrowLeft,
            b'H' => KeyCode::Home,
            b'F' => KeyCode::End,
            _ => return Ok(KeyEvent::plain(KeyCode::Escape)),
        };
        Ok(KeyEvent::plain(code))
    }

    fn decode_csi(&mut self) -> InputResult<KeyEvent> {
        let mut params = String::new();
        loop {
            let b = self.source.read_byte_timeout(ESCAPE_TIMEOUT)?;
            match b {
                b'0'..=b'9' | b';' => params.push(b as char),
                final_byte @ (b'A'..=b'Z' | b'a'..=b'z' | b'~') => {
                    return Ok(Self::csi_event(final_byte, &params));
                }
                _ => return Ok(KeyEvent::plain(KeyCode::Escape)),
            }
        }
    }

    fn csi_event(final_byte: u8, params: &str) -> KeyEvent {
        let code = match final_byte {
            b'A' => KeyCode::ArrowUp,
            b'B' => KeyCode::ArrowDown,
            b'C' => KeyCode::ArrowRight,
            b'D' => KeyCode::ArrowLeft,
            b'H' => KeyCode::Home,
            b'F' => KeyCode::End,
            b'~' => match params.split(';').next().unwrap_or("") {
                "1" | "7" => KeyCode::Home,
                "2" => KeyCode::Insert,
                "3" => KeyCode::Delete,
                "4" | "8" => KeyCode::End,
                "5" => KeyCode::PageUp,
                "6" => KeyCode::PageDown,
                _ => return KeyEvent::plain(KeyCode::Escape),
            },
            _ => return KeyEvent::plain(KeyCode::Escape),
        };
        let mods = csi_modifiers(params);
        KeyEvent::new(code, mods)
    }

    fn decode_utf8_continuation(&mut self, first: u8) -> InputResult<KeyEvent> {
        let extra = utf8_continuation_len(first).ok_or(InputError::InvalidUtf8)?;
        let mut buf = vec![first];
        for _ in 0..extra {
            buf.push(self.source.read_byte_timeout(ESCAPE_TIMEOUT)?);
        }
        let s = std::str::from_utf8(&buf).map_err(|_| InputError::InvalidUtf8)?;
        let ch = s.chars().next().ok_or(InputError::InvalidUtf8)?;
        Ok(KeyEvent::plain(KeyCode::Char(ch)))
    }
}

/// Number of UTF-8 continuation bytes following a leading byte, or `None`
/// if `first` cannot start a multi-byte sequence (ASCII, or an invalid
/// 0x80..0xBF/0xF8..0xFF leading byte).
fn utf8_continuation_len(first: u8) -> Option<usize> {
    match first {
        0x00..=0x7f => Some(0),
        0xc0..=0xdf => Some(1),
        0xe0..=0xef => Some(2),
        0xf0..=0xf7 => Some(3),
        _ => None,
    }
}

/// `CSI ... ; <modifier> ~` or `CSI 1 ; <modifier> <letter>` parameter
/// encodes modifiers as `1 + bitmask(shift=1, alt=2, ctrl=4)`.
fn csi_modifiers(params: &str) -> KeyModifiers {
    let Some(raw) = params.split(';').nth(1) else {
        return KeyModifiers::empty();
    };
    let Ok(code) = raw.parse::<u8>() else {
        return KeyModifiers::empty();
    };
    let bits = code.saturating_sub(1);
    let mut mods = KeyModifiers::empty();
    if bits & 0b001 != 0 {
        mods.insert(KeyModifiers::SHIFT);
    }
    if bits & 0b010 != 0 {
        mods.insert(KeyModifiers::META);
    }
    if bits & 0b100 != 0 {
        mods.insert(KeyModifiers::CTRL);
    }
    mods
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::FixedByteSource;

    fn parse_all(bytes: &[u8]) -> Vec<KeyEvent> {
        let mut parser = KeyParser::new(FixedByteSource::new(bytes.to_vec()));
        let mut out = Vec::new();
        loop {
            match parser.next_event() {
                Ok(ev) => out.push(ev),
                Err(InputError::EndOfStream) | Err(InputError::Timeout) => break,
                Err(e) => panic!("unexpected parse error: {e}"),
            }
        }
        out
    }

    #[test]
    fn plain_ascii_passthrough() {
        assert_eq!(parse_all(b"a"), vec![KeyEvent::plain(KeyCode::Char('a'))]);
    }

    #[test]
    fn control_byte_maps_to_ctrl_letter() {
        assert_eq!(parse_all(&[0x01]), vec![KeyEvent::ctrl('a')]);
        assert_eq!(parse_all(&[0x18]), vec![KeyEvent::ctrl('x')]);
    }

    #[test]
    fn lone_escape_times_out_to_escape_key() {
        assert_eq!(parse_all(&[0x1b]), vec![KeyEvent::plain(KeyCode::Escape)]);
    }

    #[test]
    fn meta_prefixed_letter() {
        let events = parse_all(&[0x1b, b'f']);
        assert_eq!(
            events,
            vec![KeyEvent::new(KeyCode::Char('f'), KeyModifiers::META)]
        );
    }

    #[test]
    fn csi_arrow_keys() {
        assert_eq!(
            parse_all(&[0x1b, b'[', b'A']),
            vec![KeyEvent::plain(KeyCode::ArrowUp)]
        );
        assert_eq!(
            parse_all(&[0x1b, b'[', b'D']),
            vec![KeyEvent::plain(KeyCode::ArrowLeft)]
        );
    }

    #[test]
    fn csi_delete_with_tilde_parameter() {
        assert_eq!(
            parse_all(&[0x1b, b'[', b'3', b'~']),
            vec![KeyEvent::plain(KeyCode::Delete)]
        );
    }

    #[test]
    fn csi_with_modifier_parameter() {
        let events = parse_all(&[0x1b, b'[', b'1', b';', b'5', b'C']);
        assert_eq!(
            events,
            vec![KeyEvent::new(KeyCode::ArrowRight, KeyModifiers::CTRL)]
        );
    }

    #[test]
    fn multibyte_utf8_codepoint() {
        let events = parse_all("é".as_bytes());
        assert_eq!(events, vec![KeyEvent::plain(KeyCode::Char('é'))]);
    }

    #[test]
    fn tab_and_enter_are_symbolic() {
        assert_eq!(parse_all(&[0x09]), vec![KeyEvent::plain(KeyCode::Tab)]);
        assert_eq!(parse_all(&[0x0d]), vec![KeyEvent::plain(KeyCode::Enter)]);
    }

    #[test]
    fn sequence_of_events_from_one_stream() {
        let events = parse_all(b"ab\x01");
        assert_eq!(
            events,
            vec![
                KeyEvent::plain(KeyCode::Char('a')),
                KeyEvent::plain(KeyCode::Char('b')),
                KeyEvent::ctrl('a'),
            ]
        );
    }
}
