//! Prompt-metric walk: determines the absolute column
//! at which command text begins, skipping both raw ANSI escape sequences
//! and Readline's invisible-width markers (`\x01` ... `\x02`), which wrap
//! prompt escape codes whose width must not count toward the cursor math.

use unicode_width::UnicodeWidthChar;

pub const READLINE_INVISIBLE_START: char = '\u{1}';
pub const READLINE_INVISIBLE_END: char = '\u{2}';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptMetrics {
    /// 1-indexed terminal column where command text starts.
    pub command_column: u16,
    /// Visible width of the rendered prompt, excluding escapes/invisible
    /// markers.
    pub visible_width: u16,
}

/// Walks `prompt`, summing the display width of every visible character
/// while skipping ANSI CSI sequences and Readline invisible-marker spans.
///
/// Multi-line prompts reset the running width at each newline: the command
/// starts at the visible width of the *final* prompt line, not the widest
/// one or the sum of all of them (spec §4.4 step 4).
pub fn analyze_prompt(prompt: &str) -> PromptMetrics {
    let mut current_line_width: u32 = 0;
    let mut in_invisible = false;
    let mut chars = prompt.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\n' => current_line_width = 0,
            READLINE_INVISIBLE_START => in_invisible = true,
            READLINE_INVISIBLE_END => in_invisible = false,
            '\u{1b}' => {
                if chars.peek() == Some(&'[') {
                    chars.next();
                    for c2 in chars.by_ref() {
                        if c2.is_ascii_alphabetic() {
                            break;
                        }
                    }
                }
            }
            _ if in_invisible => {}
            _ => current_line_width += c.width().unwrap_or(0) as u32,
        }
    }

    let visible_width = current_line_width.min(u16::MAX as u32) as u16;
    PromptMetrics { command_column: visible_width.saturating_add(1), visible_width }
}
