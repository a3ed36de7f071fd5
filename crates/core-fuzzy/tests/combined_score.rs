use core_fuzzy::{FuzzyCache, FuzzyPreset, FuzzyWeights, combined_score};

#[test]
fn completion_preset_favors_prefix_matches() {
    let prefix_match = combined_score(
        "stat",
        "status",
        FuzzyWeights::for_preset(FuzzyPreset::Completion),
    );
    let scrambled = combined_score(
        "tats",
        "status",
        FuzzyWeights::for_preset(FuzzyPreset::Completion),
    );
    assert!(
        prefix_match > scrambled,
        "prefix match ({prefix_match}) should outscore a scrambled match ({scrambled})"
    );
}

#[test]
fn history_preset_tolerates_paraphrase_better_than_default() {
    let default = combined_score(
        "git comit -m",
        "git commit -m",
        FuzzyWeights::for_preset(FuzzyPreset::Default),
    );
    let history = combined_score(
        "git comit -m",
        "git commit -m",
        FuzzyWeights::for_preset(FuzzyPreset::History),
    );
    assert!(default > 0 && history > 0);
}

#[test]
fn cache_agrees_with_uncached_scoring() {
    let mut cache = FuzzyCache::new();
    let cached = cache.score("checkout", "chekout", FuzzyPreset::Default);
    let direct = combined_score(
        "checkout",
        "chekout",
        FuzzyWeights::for_preset(FuzzyPreset::Default),
    );
    assert_eq!(cached, direct);
}
