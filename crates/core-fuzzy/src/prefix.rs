//! Common-prefix length, terminating at the first differing character.

/// Length (in chars) of the shared leading run of `s1` and `s2`.
pub fn common_prefix_len(s1: &str, s2: &str, case_sensitive: bool) -> usize {
    let it1 = s1.chars();
    let it2 = s2.chars();
    if case_sensitive {
        it1.zip(it2).take_while(|(a, b)| a == b).count()
    } else {
        it1.flat_map(|c| c.to_lowercase())
            .zip(it2.flat_map(|c| c.to_lowercase()))
            .take_while(|(a, b)| a == b)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_match_is_shorter_len() {
        assert_eq!(common_prefix_len("git", "git log", true), 3);
    }

    #[test]
    fn terminates_at_first_difference() {
        assert_eq!(common_prefix_len("gitlab", "github", true), 3);
    }

    #[test]
    fn case_sensitive_respects_case() {
        assert_eq!(common_prefix_len("Git", "git", true), 0);
        assert_eq!(common_prefix_len("Git", "git", false), 3);
    }

    #[test]
    fn no_common_prefix() {
        assert_eq!(common_prefix_len("abc", "xyz", true), 0);
    }

    #[test]
    fn empty_inputs() {
        assert_eq!(common_prefix_len("", "abc", true), 0);
        assert_eq!(common_prefix_len("abc", "", true), 0);
    }
}
