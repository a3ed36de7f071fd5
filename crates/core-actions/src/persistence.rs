//! History persistence: the engine's half of the history-persistence
//! collaborator contract (`load_all`/`append`/`flush`). The engine
//! deliberately has no opinion on the on-disk format — the host supplies
//! it, the same way it supplies completion candidates.

/// One history line as the persistence layer sees it, independent of
/// `core_history`'s internal `HistoryEntry` (which also carries a cache of
/// its own structure analysis that has no business being serialized).
#[derive(Debug, Clone)]
pub struct PersistedEntry {
    pub raw_command: String,
    pub created_at: u64,
    pub cwd: String,
    pub original_multiline: Option<String>,
    pub exit_code: Option<i32>,
}

/// Host-supplied history storage. `engine_init` calls `load_all` once at
/// startup; `accept_line` calls `append` for each accepted command;
/// `engine_shutdown` calls `flush`.
pub trait HistoryPersistence {
    fn load_all(&mut self) -> Vec<PersistedEntry>;
    fn append(&mut self, entry: &PersistedEntry);
    fn flush(&mut self);
}

/// A `HistoryPersistence` that keeps everything in memory and persists
/// nothing — the default when a host doesn't care to wire up a real one
/// (tests, embedding contexts with no durable history).
#[derive(Debug, Default)]
pub struct NullHistoryPersistence;

impl HistoryPersistence for NullHistoryPersistence {
    fn load_all(&mut self) -> Vec<PersistedEntry> {
        Vec::new()
    }

    fn append(&mut self, _entry: &PersistedEntry) {}

    fn flush(&mut self) {}
}
