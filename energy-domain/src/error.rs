/// Failures while turning uploaded bytes into a `UsageTable`.
///
/// Any of these rejects the whole upload; no partial table is produced.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TableError {
    #[error("failed to parse CSV: {0}")]
    Parse(String),
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("invalid timestamp '{value}' on row {row}")]
    TimestampFormat { row: usize, value: String },
    #[error("invalid {column} value '{value}' on row {row}")]
    InvalidNumber {
        row: usize,
        column: &'static str,
        value: String,
    },
}

/// Failures of the analytics over an already-normalized table.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("usage table has no rows")]
    EmptyTable,
    #[error("division by zero while computing {0}")]
    DivisionByZero(&'static str),
}
