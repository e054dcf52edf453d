//! Error classification shared by every error enum in the crate.
//!
//! Each enum (`InventoryError`, `MenuError`, `OrderError`, `ReportError`, `SearchError`)
//! exposes `kind()`. Callers that need to pick a response (an HTTP status, a batch
//! rejection reason) match on the kind or on the typed variant, never on the message.

use serde::Serialize;
use std::fmt::Display;

/// Broad category of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Bad input. Never retried.
    Validation,
    /// Operation not allowed in the current status.
    State,
    /// Resource conflict, e.g. not enough stock.
    Conflict,
    NotFound,
    /// Store unavailable. Details are logged, not shown.
    Internal,
}

impl ErrorKind {
    /// The HTTP status an outer layer would answer with.
    pub fn status_code(self) -> u16 {
        match self {
            Self::Validation | Self::State | Self::Conflict => 400,
            Self::NotFound => 404,
            Self::Internal => 500,
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Validation => "validation",
            Self::State => "state",
            Self::Conflict => "conflict",
            Self::NotFound => "not found",
            Self::Internal => "internal",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_kind() {
        assert_eq!(ErrorKind::Validation.status_code(), 400);
        assert_eq!(ErrorKind::Conflict.status_code(), 400);
        assert_eq!(ErrorKind::NotFound.status_code(), 404);
        assert_eq!(ErrorKind::Internal.status_code(), 500);
    }
}
