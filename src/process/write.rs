// src/process/write.rs
use anyhow::{Context, Result};
use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::schema::{OutputTable, OUTPUT_COLUMNS};

pub const CSV_MIME: &str = "text/csv";

/// Render `table` as UTF-8 CSV: header row, then one line per record.
/// Fields containing a comma, quote or newline are quoted.
pub fn to_csv_bytes(table: &OutputTable) -> Result<Vec<u8>> {
    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    // written explicitly so an empty table still carries its header
    wtr.write_record(OUTPUT_COLUMNS)
        .context("writing header row")?;
    for (idx, rec) in table.records.iter().enumerate() {
        wtr.write_record(rec.fields())
            .with_context(|| format!("writing record {}", idx))?;
    }

    wtr.into_inner()
        .map_err(|e| anyhow::anyhow!("flushing CSV buffer: {}", e.error()))
}
