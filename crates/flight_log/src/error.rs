//! Flight log error types

use contracts::ParseTimestampError;
use thiserror::Error;

/// Why a single log line was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    /// Blank line
    #[error("empty line")]
    Empty,

    /// Not enough comma separated fields for the current layout
    #[error("expected at least {expected} fields, found {found}")]
    TooFewFields { expected: usize, found: usize },

    /// Leading timestamp did not parse
    #[error("bad timestamp: {0}")]
    Timestamp(#[from] ParseTimestampError),

    /// Event type code is not a known single character
    #[error("unknown event kind '{0}'")]
    UnknownKind(String),

    /// Origin code is neither 'R' nor 'S'
    #[error("unknown origin '{0}'")]
    UnknownOrigin(String),
}

impl LineError {
    /// Short label for metrics
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::TooFewFields { .. } => "too_few_fields",
            Self::Timestamp(_) => "timestamp",
            Self::UnknownKind(_) => "kind",
            Self::UnknownOrigin(_) => "origin",
        }
    }
}
