//! Engine configuration: a TOML file loaded with serde, covering every
//! tunable option the engine exposes. Follows a discover-then-load-with-
//! fallback-to-defaults policy: a missing or unparseable file silently
//! yields defaults (logged at `info`/`warn`), it never aborts engine
//! startup.

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use core_fuzzy::FuzzyPreset;
use serde::Deserialize;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditingMode {
    Emacs,
    Vi,
}

impl Default for EditingMode {
    fn default() -> Self {
        EditingMode::Emacs
    }
}

/// Serde-facing mirror of [`core_fuzzy::FuzzyPreset`] (kept separate so
/// `core-fuzzy` stays a pure, dependency-free scoring library with no
/// serde coupling).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FuzzyPresetName {
    Default,
    Autocorrect,
    Completion,
    History,
}

impl Default for FuzzyPresetName {
    fn default() -> Self {
        FuzzyPresetName::Default
    }
}

impl From<FuzzyPresetName> for FuzzyPreset {
    fn from(name: FuzzyPresetName) -> Self {
        match name {
            FuzzyPresetName::Default | FuzzyPresetName::Autocorrect => FuzzyPreset::Default,
            FuzzyPresetName::Completion => FuzzyPreset::Completion,
            FuzzyPresetName::History => FuzzyPreset::History,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub auto_scroll: bool,
    pub wrap_long_lines: bool,
    pub tab_width: u16,
    pub max_undo_sequences: usize,
    pub max_undo_memory_bytes: usize,
    pub sequence_timeout_ms: u64,
    pub chord_timeout_ms: u64,
    pub history_max_entries: usize,
    pub history_ignore_leading_space: bool,
    pub fuzzy_preset: FuzzyPresetName,
    pub kill_ring_size: usize,
    pub editing_mode: EditingMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            auto_scroll: true,
            wrap_long_lines: false,
            tab_width: 4,
            max_undo_sequences: 100,
            max_undo_memory_bytes: 1 << 20,
            sequence_timeout_ms: 500,
            chord_timeout_ms: 100,
            history_max_entries: 1000,
            history_ignore_leading_space: true,
            fuzzy_preset: FuzzyPresetName::Default,
            kill_ring_size: 32,
            editing_mode: EditingMode::Emacs,
        }
    }
}

impl EngineConfig {
    pub fn fuzzy_preset(&self) -> FuzzyPreset {
        self.fuzzy_preset.into()
    }

    pub fn sequence_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.sequence_timeout_ms)
    }

    pub fn chord_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.chord_timeout_ms)
    }
}

/// Best-effort config path: prefer `./lnedit.toml` in the working directory
/// (lets a project pin its own settings), then the platform config dir.
pub fn discover() -> PathBuf {
    let local = PathBuf::from("lnedit.toml");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("lnedit").join("lnedit.toml");
    }
    PathBuf::from("lnedit.toml")
}

pub fn load_from(path: Option<PathBuf>) -> Result<EngineConfig> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        info!(target: "config", path = %path.display(), "no config file found, using defaults");
        return Ok(EngineConfig::default());
    };
    match toml::from_str(&content) {
        Ok(cfg) => {
            info!(target: "config", path = %path.display(), "loaded config");
            Ok(cfg)
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "failed to parse config, using defaults");
            Ok(EngineConfig::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_when_missing_file() {
        let cfg = load_from(Some(PathBuf::from("__nonexistent_lnedit__.toml"))).unwrap();
        assert_eq!(cfg.tab_width, 4);
        assert_eq!(cfg.editing_mode, EditingMode::Emacs);
    }

    #[test]
    fn parses_partial_overrides_with_defaults_for_rest() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "tab_width = 8\nediting_mode = \"vi\"\n").unwrap();
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.tab_width, 8);
        assert_eq!(cfg.editing_mode, EditingMode::Vi);
        assert_eq!(cfg.kill_ring_size, 32); // untouched default
    }

    #[test]
    fn invalid_toml_falls_back_to_defaults() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "not valid toml {{{").unwrap();
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.tab_width, EngineConfig::default().tab_width);
    }

    #[test]
    fn fuzzy_preset_maps_to_core_fuzzy_preset() {
        let mut cfg = EngineConfig::default();
        cfg.fuzzy_preset = FuzzyPresetName::History;
        assert_eq!(cfg.fuzzy_preset(), FuzzyPreset::History);
    }
}
