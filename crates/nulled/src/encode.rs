//! Provides [`Encode`], the output hooks every nullable type implements.
use std::io::Write;

use serde::Serialize;

use crate::{error::EncodeError, values::QueryValues};

/// Encode a nullable value into each of the supported encodings.
///
/// Structured text goes through the type's [`Serialize`] implementation, so `encode_json` only needs overriding
/// when a type wants to bypass `serde_json`.
pub trait Encode: Serialize {
    /// Encode as a structured-text (JSON) document. Invalid values encode as `null`.
    fn encode_json(&self) -> Result<Vec<u8>, EncodeError> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Encode as plain text. Invalid values encode as the empty string.
    fn encode_text(&self) -> Result<String, EncodeError>;

    /// Set `key` in `values` to the query form of this value.
    ///
    /// Invalid values leave `values` untouched: the key is omitted, never set to an empty string. Keys other than
    /// `key` are never modified.
    fn encode_values(&self, key: &str, values: &mut QueryValues) -> Result<(), EncodeError>;

    /// Write the binary record form: the value, then the validity flag.
    fn write_record<W: Write>(&self, writer: W) -> Result<(), EncodeError>
    where
        Self: Sized;

    /// Encode the binary record form into a fresh buffer.
    fn encode_record(&self) -> Result<Vec<u8>, EncodeError>
    where
        Self: Sized,
    {
        let mut buf = Vec::new();
        self.write_record(&mut buf)?;
        Ok(buf)
    }
}

impl<T> Encode for &T
where
    T: Encode,
{
    fn encode_json(&self) -> Result<Vec<u8>, EncodeError> {
        (**self).encode_json()
    }

    fn encode_text(&self) -> Result<String, EncodeError> {
        (**self).encode_text()
    }

    fn encode_values(&self, key: &str, values: &mut QueryValues) -> Result<(), EncodeError> {
        (**self).encode_values(key, values)
    }

    fn write_record<W: Write>(&self, writer: W) -> Result<(), EncodeError> {
        (**self).write_record(writer)
    }
}
