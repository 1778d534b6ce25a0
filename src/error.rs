use std::io;

use annotator::doc::RectError;

/// Errors that stop a replay.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("line {line}: invalid step: {source}")]
    Json { line: usize, source: serde_json::Error },
    #[error("line {line}: no rect with ordinal {ordinal}")]
    UnknownRect { line: usize, ordinal: usize },
    #[error("line {line}: {source}")]
    Rect { line: usize, source: RectError },
    #[error("line {line}: {reason}")]
    InvalidStep { line: usize, reason: String },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
