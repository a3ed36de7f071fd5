//! Levenshtein edit distance over bytes.
//!
//! Operates on bytes (acceptable because inputs are command tokens, not
//! arbitrary UTF-8 prose) and is case-insensitive by default.

/// Case-insensitive Levenshtein distance between two byte strings.
///
/// Uses the classic two-row dynamic-programming formulation rather than a
/// full `m*n` matrix, since only the previous row is ever needed.
pub fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let a = lower_bytes(s1);
    let b = lower_bytes(s2);

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut cur = vec![0usize; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        cur[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            cur[j + 1] = (prev[j + 1] + 1).min(cur[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    prev[b.len()]
}

/// Worst-case distance used as the resource-exhaustion fallback: sum of
/// the two input lengths, the maximum possible number of edits (delete
/// everything, then insert everything).
pub fn worst_case_distance(s1: &str, s2: &str) -> usize {
    s1.len() + s2.len()
}

fn lower_bytes(s: &str) -> Vec<u8> {
    s.bytes().map(|b| b.to_ascii_lowercase()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_distance_zero() {
        assert_eq!(levenshtein_distance("git", "git"), 0);
    }

    #[test]
    fn case_insensitive_by_default() {
        assert_eq!(levenshtein_distance("GIT", "git"), 0);
    }

    #[test]
    fn single_substitution() {
        assert_eq!(levenshtein_distance("git", "bit"), 1);
    }

    #[test]
    fn insertion_and_deletion() {
        assert_eq!(levenshtein_distance("gti", "git"), 2);
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("abc", ""), 3);
    }

    #[test]
    fn worst_case_is_sum_of_lengths() {
        assert_eq!(worst_case_distance("abcd", "xy"), 6);
    }

    #[test]
    fn symmetric() {
        assert_eq!(
            levenshtein_distance("kitten", "sitting"),
            levenshtein_distance("sitting", "kitten")
        );
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
    }
}
