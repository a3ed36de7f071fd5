use core_history::{HistoryStore, RecallCache, RecallCursor, SearchDirection, SearchSession, reconstruct};
use std::time::Duration;

#[test]
fn append_then_lookup_by_id_returns_same_entry_bytes_and_original() {
    let mut store = HistoryStore::new(50, true);
    let original = "for f in *.txt; do\n  cat \"$f\"\ndone";
    let id = store.append("for f in *.txt; do cat \"$f\"; done", 1, "/home/u", Some(original.to_string())).unwrap();

    let entry = store.get(id).unwrap();
    assert_eq!(entry.recall_source(), original);
}

#[test]
fn multiline_for_loop_recall_reindents_and_positions_cursor_at_end() {
    let mut store = HistoryStore::new(50, true);
    let original = "for i in 1 2 3; do\n      echo $i\n  done";
    let id = store
        .append("for i in 1 2 3; do echo $i; done", 1, "/home/u", Some(original.to_string()))
        .unwrap();

    let mut cache = RecallCache::new(32, Duration::from_secs(60));
    let entry = store.get_mut(id).unwrap();
    let recall = reconstruct(entry, &mut cache);

    assert_eq!(recall.cursor, RecallCursor::End);
    assert_eq!(recall.text, "for i in 1 2 3; do\n  echo $i\ndone");
}

#[test]
fn reverse_i_search_with_fuzzy_match_finds_git_status() {
    let mut store = HistoryStore::new(50, true);
    store.append("git status", 1, "/home/u", None);
    store.append("git commit", 2, "/home/u", None);
    store.append("grep foo", 3, "/home/u", None);

    let mut session = SearchSession::begin("", SearchDirection::Backward);
    session.push_char('g');
    session.push_char('s');
    let best = session.search(&store, 0).unwrap();

    assert_eq!(best.normalized, "git status");
}
