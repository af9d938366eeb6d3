// src/config.rs
use anyhow::{Context, Result};
use std::env;

pub const ENV_ARTIFACT_PREFIX: &str = "HATCH_ARTIFACT_PREFIX";
pub const ENV_PREVIEW_ROWS: &str = "HATCH_PREVIEW_ROWS";

/// Naming and display settings for a cleaning run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanerConfig {
    /// Prepended to the uploaded filename to name each cleaned artifact.
    pub artifact_prefix: String,
    /// Appended to `artifact_prefix` to name the merged artifact.
    pub merged_name: String,
    /// Rows shown in each file's preview.
    pub preview_rows: usize,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            artifact_prefix: "hatch_cleaned_".into(),
            merged_name: "merged.csv".into(),
            preview_rows: 20,
        }
    }
}

impl CleanerConfig {
    /// Defaults overridden by `HATCH_ARTIFACT_PREFIX` / `HATCH_PREVIEW_ROWS` when set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut cfg = Self::default();
        if let Some(prefix) = lookup(ENV_ARTIFACT_PREFIX) {
            cfg.artifact_prefix = prefix;
        }
        if let Some(rows) = lookup(ENV_PREVIEW_ROWS) {
            cfg.preview_rows = rows.trim().parse().with_context(|| {
                format!("{} must be a row count, got {:?}", ENV_PREVIEW_ROWS, rows)
            })?;
        }
        Ok(cfg)
    }

    pub fn artifact_name(&self, filename: &str) -> String {
        format!("{}{}", self.artifact_prefix, filename)
    }

    pub fn merged_artifact_name(&self) -> String {
        self.artifact_name(&self.merged_name)
    }
}
