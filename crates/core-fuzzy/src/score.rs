//! Weighted combination of the four primitive scores into a single `[0, 100]`
//! result, selected by named preset rather than ad-hoc tuning per call site.

use crate::levenshtein::{levenshtein_distance, worst_case_distance};
use crate::prefix::common_prefix_len;
use crate::similarity::jaro_winkler_similarity;
use crate::subsequence::subsequence_score;

/// Named weight configurations. Call sites pick the preset that matches their
/// use case rather than constructing [`FuzzyWeights`] directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FuzzyPreset {
    /// General-purpose matching and autocorrect suggestions.
    Default,
    /// Tab-completion candidate ranking: favors prefix and subsequence fit
    /// over edit distance, since completions extend what's already typed.
    Completion,
    /// History search ranking: favors similarity over raw edit distance,
    /// since recalled commands are often paraphrased rather than mistyped.
    History,
}

/// Weights (each `0..=100`, summing to 100) applied to the four primitive
/// scores before combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FuzzyWeights {
    pub levenshtein: u32,
    pub jaro_winkler: u32,
    pub prefix: u32,
    pub subsequence: u32,
}

impl FuzzyWeights {
    pub const fn for_preset(preset: FuzzyPreset) -> Self {
        match preset {
            FuzzyPreset::Default => FuzzyWeights {
                levenshtein: 40,
                jaro_winkler: 30,
                prefix: 20,
                subsequence: 10,
            },
            FuzzyPreset::Completion => FuzzyWeights {
                levenshtein: 25,
                jaro_winkler: 25,
                prefix: 40,
                subsequence: 10,
            },
            FuzzyPreset::History => FuzzyWeights {
                levenshtein: 20,
                jaro_winkler: 50,
                prefix: 20,
                subsequence: 10,
            },
        }
    }
}

/// Combined similarity score in `[0, 100]` for `s1` against `s2` under
/// `weights`. Identical strings (case-insensitive) always score 100 without
/// running the primitive scorers.
pub fn combined_score(s1: &str, s2: &str, weights: FuzzyWeights) -> u32 {
    if s1.eq_ignore_ascii_case(s2) {
        return 100;
    }

    let max_len = worst_case_distance(s1, s2).max(1);
    let distance = levenshtein_distance(s1, s2);
    let levenshtein_score = 100u32.saturating_sub(((distance * 100) / max_len) as u32);

    let jw = (jaro_winkler_similarity(s1, s2) * 100.0).round() as u32;

    let prefix_len = common_prefix_len(s1, s2, false);
    let avg_len = ((s1.chars().count() + s2.chars().count()) / 2).max(1);
    let prefix_score = (((prefix_len * 100) / avg_len) as u32).min(100);

    let subseq_score = subsequence_score(s1, s2, false);

    let total = levenshtein_score * weights.levenshtein
        + jw * weights.jaro_winkler
        + prefix_score * weights.prefix
        + subseq_score * weights.subsequence;

    (total / 100).min(100)
}
