//! Codec error types

use charref_tables::ParseLevelError;
use thiserror::Error;

/// Codec result type
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors from parsing codec options.
///
/// Encoding and decoding themselves never fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error(transparent)]
    UnknownLevel(#[from] ParseLevelError),

    #[error("Unknown encode mode: {0}")]
    UnknownEncodeMode(String),

    #[error("Unknown numeric format: {0}")]
    UnknownNumericFormat(String),

    #[error("Unknown decode scope: {0}")]
    UnknownDecodeScope(String),
}
