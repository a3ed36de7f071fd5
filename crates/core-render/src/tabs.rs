//! Column-aware tab expansion at render time ("Tab expansion
//! happens at render time ... column-aware so subsequent columns align").

use unicode_width::UnicodeWidthChar;

/// Expands `\t` in `line` to spaces, aligning each tab stop to a multiple
/// of `tab_width` measured in display columns, not byte or codepoint
/// offsets (so a preceding wide character still lands the next tab stop
/// correctly).
pub fn expand_tabs(line: &str, tab_width: u16) -> String {
    let tab_width = tab_width.max(1) as usize;
    let mut out = String::with_capacity(line.len());
    let mut col = 0usize;
    for c in line.chars() {
        if c == '\t' {
            let spaces = tab_width - (col % tab_width);
            out.extend(std::iter::repeat_n(' ', spaces));
            col += spaces;
        } else {
            out.push(c);
            col += c.width().unwrap_or(0);
        }
    }
    out
}

/// Display-column width of `prefix` (chars 0..cursor_codepoint of the
/// original line) after tab expansion — used to place the cursor at its
/// true screen column rather than its codepoint offset.
pub fn visual_column_offset(line: &str, cursor_codepoint: usize, tab_width: u16) -> u16 {
    let prefix: String = line.chars().take(cursor_codepoint).collect();
    let expanded = expand_tabs(&prefix, tab_width);
    expanded.chars().map(|c| c.width().unwrap_or(0) as u32).sum::<u32>().min(u16::MAX as u32) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_at_start_expands_to_full_width() {
        assert_eq!(expand_tabs("\tx", 4), "    x");
    }

    #[test]
    fn tab_after_text_aligns_to_next_stop() {
        assert_eq!(expand_tabs("ab\tx", 4), "ab  x");
    }

    #[test]
    fn no_tabs_is_unchanged() {
        assert_eq!(expand_tabs("echo hi", 4), "echo hi");
    }

    #[test]
    fn visual_offset_accounts_for_expanded_tabs_before_cursor() {
        // "ab\tx" with tab_width 4: "ab" (2) + 2 spaces to reach col 4 = "ab  "
        assert_eq!(visual_column_offset("ab\tx", 3, 4), 4);
    }
}
