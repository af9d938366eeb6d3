// src/batch.rs
use anyhow::{Context, Result};
use glob::glob;
use serde::Serialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{error, info, instrument};

use crate::config::CleanerConfig;
use crate::process::{
    clean_table, load_csv_bytes, merge_tables, to_csv_bytes, write::CSV_MIME, TextEncoding,
};
use crate::schema::{OutputRecord, OutputTable};

/// One uploaded vendor file: its name and raw bytes.
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }

    /// Read a file from disk, named after its final path component.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        Ok(Self::new(upload_name(path), bytes))
    }
}

fn upload_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// All `*.csv` files directly inside `dir`, sorted by path.
pub fn discover_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = format!("{}/*.csv", dir.display());
    let mut paths: Vec<PathBuf> = glob(&pattern)
        .with_context(|| format!("bad input pattern {}", pattern))?
        .filter_map(|entry| match entry {
            Ok(p) if p.is_file() => Some(p),
            Ok(_) => None,
            Err(e) => {
                error!("skipping unreadable path: {}", e);
                None
            }
        })
        .collect();
    paths.sort();
    Ok(paths)
}

/// Row counts shown for each cleaned file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSummary {
    pub filename: String,
    pub rows_read: usize,
    pub rows_output: usize,
    pub encoding: TextEncoding,
}

/// Downloadable bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl Artifact {
    fn csv(file_name: String, table: &OutputTable) -> Result<Self> {
        let bytes = to_csv_bytes(table).with_context(|| format!("serializing {}", file_name))?;
        Ok(Self {
            file_name,
            mime: CSV_MIME,
            bytes,
        })
    }

    /// Write into `dir` under the artifact's name.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        let path = dir.join(&self.file_name);
        fs::write(&path, &self.bytes).with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }
}

#[derive(Debug, Clone)]
pub struct CleanedFile {
    pub summary: FileSummary,
    pub table: OutputTable,
    pub artifact: Artifact,
    preview_rows: usize,
}

impl CleanedFile {
    /// Leading rows of the cleaned table, for display only.
    pub fn preview(&self) -> &[OutputRecord] {
        self.table.head(self.preview_rows)
    }
}

#[derive(Debug, Clone)]
pub enum FileOutcome {
    Cleaned(CleanedFile),
    Failed { filename: String, reason: String },
}

impl FileOutcome {
    pub fn filename(&self) -> &str {
        match self {
            FileOutcome::Cleaned(c) => &c.summary.filename,
            FileOutcome::Failed { filename, .. } => filename,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BatchOutcome {
    /// One entry per upload, in upload order.
    pub files: Vec<FileOutcome>,
    /// Present when two or more files were cleaned.
    pub merged: Option<Artifact>,
}

impl BatchOutcome {
    pub fn cleaned(&self) -> impl Iterator<Item = &CleanedFile> {
        self.files.iter().filter_map(|f| match f {
            FileOutcome::Cleaned(c) => Some(c),
            FileOutcome::Failed { .. } => None,
        })
    }

    pub fn failure_count(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f, FileOutcome::Failed { .. }))
            .count()
    }

    /// Every artifact produced, per-file first, then the merge.
    pub fn artifacts(&self) -> impl Iterator<Item = &Artifact> {
        self.cleaned()
            .map(|c| &c.artifact)
            .chain(self.merged.as_ref())
    }

    pub fn report(&self) -> BatchReport<'_> {
        BatchReport {
            files: self
                .files
                .iter()
                .map(|f| match f {
                    FileOutcome::Cleaned(c) => FileReport::Cleaned {
                        summary: &c.summary,
                        artifact: &c.artifact.file_name,
                    },
                    FileOutcome::Failed { filename, reason } => FileReport::Failed {
                        filename,
                        reason,
                    },
                })
                .collect(),
            merged: self.merged.as_ref().map(|a| a.file_name.as_str()),
        }
    }
}

/// Serializable view of a batch for machine-readable output.
#[derive(Debug, Serialize)]
pub struct BatchReport<'a> {
    pub files: Vec<FileReport<'a>>,
    pub merged: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileReport<'a> {
    Cleaned {
        #[serde(flatten)]
        summary: &'a FileSummary,
        artifact: &'a str,
    },
    Failed {
        filename: &'a str,
        reason: &'a str,
    },
}

/// Run one upload through read → clean → serialize.
#[instrument(level = "info", skip(upload, cfg), fields(file = %upload.filename))]
pub fn clean_upload(upload: &Upload, cfg: &CleanerConfig) -> Result<CleanedFile> {
    let raw = load_csv_bytes(&upload.bytes)
        .with_context(|| format!("reading {}", upload.filename))?;
    let table = clean_table(&raw);

    let summary = FileSummary {
        filename: upload.filename.clone(),
        rows_read: raw.row_count(),
        rows_output: table.len(),
        encoding: raw.encoding,
    };
    // the raw table is not needed past this point
    drop(raw);

    let artifact = Artifact::csv(cfg.artifact_name(&upload.filename), &table)?;
    info!(
        rows_read = summary.rows_read,
        rows_output = summary.rows_output,
        encoding = %summary.encoding,
        artifact = %artifact.file_name,
        "cleaned"
    );

    Ok(CleanedFile {
        summary,
        table,
        artifact,
        preview_rows: cfg.preview_rows,
    })
}

/// Clean every upload in order. A failing file is recorded and does not stop
/// the others. The merged artifact concatenates all cleaned files in upload order.
pub fn clean_batch(uploads: &[Upload], cfg: &CleanerConfig) -> Result<BatchOutcome> {
    let files = uploads
        .iter()
        .map(|upload| record(&upload.filename, clean_upload(upload, cfg)))
        .collect();
    finish_batch(files, cfg)
}

/// Like `clean_batch`, reading each path from disk first. A path that cannot be
/// read is recorded as a failed file under its final component.
pub fn clean_paths(paths: &[PathBuf], cfg: &CleanerConfig) -> Result<BatchOutcome> {
    let files = paths
        .iter()
        .map(|path| {
            let result = Upload::from_path(path).and_then(|upload| clean_upload(&upload, cfg));
            record(&upload_name(path), result)
        })
        .collect();
    finish_batch(files, cfg)
}

fn record(filename: &str, result: Result<CleanedFile>) -> FileOutcome {
    match result {
        Ok(cleaned) => FileOutcome::Cleaned(cleaned),
        Err(e) => {
            error!("{} failed: {:#}", filename, e);
            FileOutcome::Failed {
                filename: filename.to_string(),
                reason: format!("{:#}", e),
            }
        }
    }
}

fn finish_batch(files: Vec<FileOutcome>, cfg: &CleanerConfig) -> Result<BatchOutcome> {
    let cleaned: Vec<&OutputTable> = files
        .iter()
        .filter_map(|f| match f {
            FileOutcome::Cleaned(c) => Some(&c.table),
            FileOutcome::Failed { .. } => None,
        })
        .collect();

    let merged = if cleaned.len() > 1 {
        let table = merge_tables(cleaned);
        let artifact = Artifact::csv(cfg.merged_artifact_name(), &table)?;
        info!(rows = table.len(), artifact = %artifact.file_name, "merged");
        Some(artifact)
    } else {
        None
    };

    Ok(BatchOutcome { files, merged })
}
