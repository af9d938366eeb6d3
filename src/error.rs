// src/error.rs
use thiserror::Error;

use crate::process::reader::TextEncoding;

/// Why a single encoding attempt could not produce a table.
#[derive(Debug, Error)]
pub enum AttemptError {
    #[error("bytes are not valid {encoding}")]
    Decode { encoding: TextEncoding },
    #[error("no header row")]
    MissingHeader,
    #[error("record {record} has {found} fields, header has {expected}")]
    TooManyFields {
        record: usize,
        expected: usize,
        found: usize,
    },
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

/// Error returned by the encoding-tolerant reader.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("reading input: {0}")]
    Io(#[from] std::io::Error),
    /// Every candidate encoding failed, and so did the final default attempt.
    #[error("no encoding could parse the file (tried {})", display_attempts(.attempts))]
    DecodeExhaustion {
        attempts: Vec<TextEncoding>,
        #[source]
        source: AttemptError,
    },
}

fn display_attempts(attempts: &[TextEncoding]) -> String {
    attempts
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
