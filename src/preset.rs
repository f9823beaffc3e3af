//! Persisted compile presets.
//!
//! A preset records the *raw* inputs of a compile - source paths,
//! per-document selection spec strings, cover configuration - so a compile
//! can be re-run without re-entering input. The core never reads this
//! format; the front-end reconstructs a fresh
//! [`crate::plan::CompilationPlan`] from it on every run, re-resolving the
//! spec strings against the files' current page counts.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One source entry in a preset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetSource {
    /// Path to the source PDF.
    pub path: PathBuf,

    /// Selection spec string, if one was entered for this source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<String>,
}

/// A named, persisted record of a compile's raw inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    /// Human-chosen preset name.
    pub name: String,

    /// Source documents in assembly order.
    pub sources: Vec<PresetSource>,

    /// Title for a generated cover page, if enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_title: Option<String>,

    /// Cover page selection spec against the first source, if enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_pages: Option<String>,

    /// Whether sources without a selection are appended in full.
    #[serde(default)]
    pub append_unselected: bool,
}

impl Preset {
    /// Write this preset as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .with_context(|| format!("failed to serialize preset '{}'", self.name))?;

        std::fs::write(path, json)
            .with_context(|| format!("failed to write preset file: {}", path.display()))?;

        Ok(())
    }

    /// Load a preset from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read preset file: {}", path.display()))?;

        serde_json::from_str(&json)
            .with_context(|| format!("invalid preset file: {}", path.display()))
    }
}
