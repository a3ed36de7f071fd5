//! Ordered-subsequence scoring: "does every pattern char appear in text, in order?"

/// Returns 100 iff every character of `pattern` appears in `text` in order
/// (not necessarily contiguous); otherwise `(matches / pattern_len) * 100`.
pub fn subsequence_score(pattern: &str, text: &str, case_sensitive: bool) -> u32 {
    let pattern_chars: Vec<char> = normalize_chars(pattern, case_sensitive).collect();
    if pattern_chars.is_empty() {
        return 100;
    }
    let text_chars: Vec<char> = normalize_chars(text, case_sensitive).collect();

    let mut matches = 0usize;
    let mut text_idx = 0usize;
    for &pc in &pattern_chars {
        while text_idx < text_chars.len() {
            let tc = text_chars[text_idx];
            text_idx += 1;
            if tc == pc {
                matches += 1;
                break;
            }
        }
    }

    if matches == pattern_chars.len() {
        100
    } else {
        ((matches * 100) / pattern_chars.len()) as u32
    }
}

fn normalize_chars(s: &str, case_sensitive: bool) -> Box<dyn Iterator<Item = char> + '_> {
    if case_sensitive {
        Box::new(s.chars())
    } else {
        Box::new(s.chars().flat_map(|c| c.to_lowercase()))
    }
}
