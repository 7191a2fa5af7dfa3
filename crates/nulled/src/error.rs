//! Types for working with errors produced by nulled.

use std::num::{ParseFloatError, ParseIntError};

/// A specialized `Result` type for nulled.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure to decode a nullable value from one of its encodings.
///
/// The documented null-equivalents (empty input, `null`, and for integers `""` and `nil`) are not errors; they
/// decode to an invalid instance.
#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    /// Malformed or wrongly typed structured-text token.
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid boolean literal: {0:?}")]
    Bool(String),
    #[error("invalid integer literal: {0}")]
    Int(#[from] ParseIntError),
    #[error("invalid float literal: {0}")]
    Float(#[from] ParseFloatError),
    #[error("invalid timestamp: {0}")]
    Time(#[from] time::error::Parse),
    /// A binary record was truncated or malformed.
    #[error("invalid binary record: {0}")]
    Record(#[from] bincode::Error),
}

/// Failure to encode a nullable value.
#[derive(thiserror::Error, Debug)]
pub enum EncodeError {
    /// The value has no structured-text form, e.g. a non-finite float.
    #[error("json encoding failed: {0}")]
    Json(#[from] serde_json::Error),
    /// The timestamp cannot be represented in the requested format.
    #[error("timestamp formatting failed: {0}")]
    Time(#[from] time::error::Format),
    #[error("binary record encoding failed: {0}")]
    Record(#[from] bincode::Error),
}

/// Represents all the ways a method can fail within nulled.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Error occurred while encoding a value.
    #[error("error occurred while encoding: {0}")]
    Encode(#[from] EncodeError),

    /// Error occurred while decoding a value.
    #[error("error occurred while decoding: {0}")]
    Decode(#[from] DecodeError),

    /// Error occurred while encoding the value for a specific query key.
    #[error("error occurred while encoding query key {key}: {source}")]
    KeyEncode {
        key: String,

        #[source]
        source: EncodeError,
    },
}
