// src/process/reader.rs
use csv::ReaderBuilder;
use encoding_rs::{mem::decode_latin1, UTF_8};
use serde::Serialize;
use std::{
    borrow::Cow,
    fmt,
    io::{Cursor, Read, Seek, SeekFrom},
};
use tracing::{debug, instrument, warn};

use crate::error::{AttemptError, ReadError};
use crate::process::raw_table::{dedupe_headers, RawTable};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Text encodings the reader knows how to try.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextEncoding {
    /// Strict UTF-8. Input starting with a byte-order mark is left to `Utf8Bom`.
    Utf8,
    /// UTF-8 with an optional leading byte-order mark, which is stripped.
    Utf8Bom,
    /// ISO-8859-1: byte 0xNN becomes U+00NN. Decodes any byte sequence.
    Latin1,
}

/// Encodings tried in order until one decodes and parses.
pub const CANDIDATES: [TextEncoding; 3] = [
    TextEncoding::Utf8,
    TextEncoding::Utf8Bom,
    TextEncoding::Latin1,
];

/// Encoding of the last attempt made once every candidate has failed.
pub const DEFAULT_ENCODING: TextEncoding = TextEncoding::Utf8;

impl TextEncoding {
    pub fn label(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Utf8Bom => "utf-8-sig",
            TextEncoding::Latin1 => "latin-1",
        }
    }

    pub fn decode(self, bytes: &[u8]) -> Result<Cow<'_, str>, AttemptError> {
        let decoded = match self {
            TextEncoding::Utf8 if bytes.starts_with(UTF8_BOM) => None,
            TextEncoding::Utf8 => UTF_8.decode_without_bom_handling_and_without_replacement(bytes),
            TextEncoding::Utf8Bom => UTF_8.decode_without_bom_handling_and_without_replacement(
                bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes),
            ),
            TextEncoding::Latin1 => Some(decode_latin1(bytes)),
        };
        decoded.ok_or(AttemptError::Decode { encoding: self })
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Read delimited text with a header row from `src`, trying each of `CANDIDATES`
/// and then `DEFAULT_ENCODING`. The source is rewound before every attempt.
/// All cells are kept as literal strings; a missing value is the empty string.
#[instrument(level = "debug", skip(src))]
pub fn load_csv_any<R: Read + Seek>(src: &mut R) -> Result<RawTable, ReadError> {
    let mut attempts = Vec::with_capacity(CANDIDATES.len() + 1);

    for encoding in CANDIDATES {
        attempts.push(encoding);
        let bytes = rewind_and_read(src)?;
        match parse_bytes(&bytes, encoding) {
            Ok(table) => {
                debug!(
                    %encoding,
                    columns = table.headers.len(),
                    rows = table.row_count(),
                    "parsed"
                );
                return Ok(table);
            }
            Err(err) => warn!(%encoding, error = %err, "attempt failed; trying next encoding"),
        }
    }

    attempts.push(DEFAULT_ENCODING);
    let bytes = rewind_and_read(src)?;
    parse_bytes(&bytes, DEFAULT_ENCODING)
        .map_err(|source| ReadError::DecodeExhaustion { attempts, source })
}

/// Convenience wrapper around `load_csv_any` for an in-memory upload.
pub fn load_csv_bytes(bytes: &[u8]) -> Result<RawTable, ReadError> {
    load_csv_any(&mut Cursor::new(bytes))
}

fn rewind_and_read<R: Read + Seek>(src: &mut R) -> std::io::Result<Vec<u8>> {
    src.seek(SeekFrom::Start(0))?;
    let mut buf = Vec::new();
    src.read_to_end(&mut buf)?;
    Ok(buf)
}

fn parse_bytes(bytes: &[u8], encoding: TextEncoding) -> Result<RawTable, AttemptError> {
    let text = encoding.decode(bytes)?;

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true) // short rows are padded below
        .from_reader(text.as_bytes());

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    if headers.is_empty() {
        return Err(AttemptError::MissingHeader);
    }
    let width = headers.len();

    let mut rows = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record = result?;
        if record.len() > width {
            return Err(AttemptError::TooManyFields {
                record: idx + 1,
                expected: width,
                found: record.len(),
            });
        }
        let mut row: Vec<String> = record.iter().map(str::to_string).collect();
        row.resize(width, String::new());
        rows.push(row);
    }

    Ok(RawTable {
        headers: dedupe_headers(headers),
        rows,
        encoding,
    })
}
