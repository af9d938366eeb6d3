use anyhow::{bail, Context, Result};
use clap::Parser;
use hatchclean::{
    batch::{clean_paths, discover_csv_files, BatchOutcome, CleanedFile, FileOutcome},
    config::CleanerConfig,
    schema::OUTPUT_COLUMNS,
};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "hatchclean")]
#[command(about = "Clean vendor contact CSVs into the Hatch import format")]
struct Args {
    /// Vendor CSV files, processed in the order given
    files: Vec<PathBuf>,

    /// Also process every *.csv file in this directory (sorted by name)
    #[arg(long)]
    input_dir: Option<PathBuf>,

    /// Where cleaned files are written
    #[arg(short, long, default_value = "cleaned")]
    out_dir: PathBuf,

    /// Rows shown per file preview (default: HATCH_PREVIEW_ROWS or 20)
    #[arg(long)]
    preview_rows: Option<usize>,

    /// Skip printing previews
    #[arg(long)]
    no_preview: bool,

    /// Print the batch summary as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // ─── 1) init logging ─────────────────────────────────────────────
    let default_level = if args.verbose { "debug" } else { "info" };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    // ─── 2) configuration ────────────────────────────────────────────
    let mut cfg = CleanerConfig::from_env()?;
    if let Some(rows) = args.preview_rows {
        cfg.preview_rows = rows;
    }

    // ─── 3) gather uploads in order ──────────────────────────────────
    let mut paths = args.files.clone();
    if let Some(dir) = &args.input_dir {
        let found = discover_csv_files(dir)?;
        info!("{} CSV files in {}", found.len(), dir.display());
        paths.extend(found);
    }
    if paths.is_empty() {
        bail!("no input files; pass file paths or --input-dir");
    }

    // ─── 4) clean ────────────────────────────────────────────────────
    let outcome = clean_paths(&paths, &cfg)?;

    // ─── 5) write artifacts ──────────────────────────────────────────
    for artifact in outcome.artifacts() {
        let path = artifact
            .write_to(&args.out_dir)
            .with_context(|| format!("saving {}", artifact.file_name))?;
        info!("wrote {} ({})", path.display(), artifact.mime);
    }

    // ─── 6) report ───────────────────────────────────────────────────
    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome.report())?);
    } else {
        print_report(&outcome, !args.no_preview);
    }

    let failures = outcome.failure_count();
    if failures > 0 {
        error!("{} of {} files failed", failures, outcome.files.len());
        bail!("{} file(s) could not be cleaned", failures);
    }
    info!("all done");
    Ok(())
}

fn print_report(outcome: &BatchOutcome, show_preview: bool) {
    for file in &outcome.files {
        match file {
            FileOutcome::Cleaned(cleaned) => {
                let s = &cleaned.summary;
                println!(
                    "File: {} — Rows read: {}, Rows output: {}",
                    s.filename, s.rows_read, s.rows_output
                );
                if show_preview {
                    print_preview(cleaned);
                }
                println!("  → {}", cleaned.artifact.file_name);
            }
            FileOutcome::Failed { filename, reason } => {
                println!("File: {} — FAILED: {}", filename, reason);
            }
        }
    }
    if let Some(merged) = &outcome.merged {
        println!("Merged → {}", merged.file_name);
    }
}

fn print_preview(cleaned: &CleanedFile) {
    let rows: Vec<[&str; 5]> = cleaned.preview().iter().map(|r| r.fields()).collect();

    let mut widths = OUTPUT_COLUMNS.map(|c| c.chars().count());
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let line = |cells: [&str; 5]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:<width$}", c, width = *w))
            .collect::<Vec<_>>()
            .join(" | ")
    };

    println!("  {}", line(OUTPUT_COLUMNS));
    for row in rows {
        println!("  {}", line(row));
    }
    if cleaned.summary.rows_output > cleaned.preview().len() {
        println!(
            "  … {} more rows",
            cleaned.summary.rows_output - cleaned.preview().len()
        );
    }
}
