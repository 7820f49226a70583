use thiserror::Error;

/// Structural problems with the input file. Row-level problems are never
/// errors; those rows are dropped during cleaning.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("header line {line} not found (file has {lines_read} lines)")]
    HeaderNotFound { line: u64, lines_read: u64 },

    #[error("required column '{0}' missing from header")]
    MissingColumn(&'static str),

    #[error("data must start after the header (header line {header_line}, data line {data_line})")]
    BadOffsets { header_line: u64, data_line: u64 },
}
