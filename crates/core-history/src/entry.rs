use crate::structure::{self, StructureRecord};

/// A single recorded command line ("History entry").
///
/// Carries both a normalized single-line form (used for dedup and
/// single-line recall) and, when the original command spanned multiple
/// lines, the verbatim `original_multiline` text that recall prefers so the
/// user's own formatting survives the round trip.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub id: u64,
    pub created_at: u64,
    pub exit_code: Option<i32>,
    pub cwd: String,
    pub edit_counter: u32,
    pub normalized: String,
    pub original_multiline: Option<String>,
    structure_cache: Option<StructureRecord>,
}

impl HistoryEntry {
    pub fn new(
        id: u64,
        created_at: u64,
        cwd: impl Into<String>,
        normalized: impl Into<String>,
        original_multiline: Option<String>,
    ) -> Self {
        Self {
            id,
            created_at,
            exit_code: None,
            cwd: cwd.into(),
            edit_counter: 0,
            normalized: normalized.into(),
            original_multiline,
            structure_cache: None,
        }
    }

    pub fn is_multiline(&self) -> bool {
        self.original_multiline.as_deref().is_some_and(|s| s.contains('\n'))
    }

    /// The text recall should load into the buffer: the verbatim multiline
    /// original when one was captured, else the normalized single line.
    pub fn recall_source(&self) -> &str {
        self.original_multiline.as_deref().unwrap_or(&self.normalized)
    }

    /// Structure analysis, computed once and cached on the entry for
    /// subsequent recalls.
    pub fn structure(&mut self) -> &StructureRecord {
        if self.structure_cache.is_none() {
            self.structure_cache = Some(structure::analyze(self.recall_source()));
        }
        self.structure_cache.as_ref().expect("just populated")
    }

    pub fn invalidate_structure_cache(&mut self) {
        self.structure_cache = None;
    }
}
