//! Error types for fsh

use thiserror::Error;

/// Result type alias for fsh operations
pub type FshResult<T> = Result<T, FshError>;

/// Error types for fsh shell operations.
///
/// Every variant's display form is the exact line the REPL prints to
/// stderr, so dispatch sites pick the variant and nothing else.
#[derive(Error, Debug)]
pub enum FshError {
    /// Unknown command, missing arguments, or an operation whose
    /// detailed cause is not reported.
    #[error("err")]
    Failed,

    /// Mode string that is not 1-4 octal digits.
    #[error("err: bad mode")]
    BadMode,

    /// `cd` target exists but is not a directory.
    #[error("err: not a directory")]
    NotADirectory,

    /// Operation failed with an OS error worth showing.
    #[error("err: {0}")]
    Io(#[from] std::io::Error),

    /// Exit requested (not really an error)
    #[error("exit")]
    Exit,
}
