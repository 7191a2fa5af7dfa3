//! Provides [`Decode`], the input hooks every nullable type implements.
use std::io::Read;

use serde::de::DeserializeOwned;

use crate::error::DecodeError;

/// A nullable value that can be decoded from each of the supported encodings.
///
/// The associated functions build a fresh instance. The `unmarshal_*` methods decode into existing storage and
/// define what happens to that storage on failure.
pub trait Decode: Sized + Default + DeserializeOwned {
    /// Decode from a structured-text (JSON) document.
    fn decode_json(data: &[u8]) -> Result<Self, DecodeError> {
        Ok(serde_json::from_slice(data)?)
    }

    /// Decode from plain text.
    fn decode_text(text: &str) -> Result<Self, DecodeError>;

    /// Read the binary record form: the value, then the validity flag.
    ///
    /// A failure reading the value returns immediately without touching the flag.
    fn read_record<R: Read>(reader: R) -> Result<Self, DecodeError>;

    /// Decode the binary record form from a buffer.
    fn decode_record(data: &[u8]) -> Result<Self, DecodeError> {
        Self::read_record(data)
    }

    /// Decode JSON into `self`. On failure `self` is reset to null and the error is returned.
    fn unmarshal_json(&mut self, data: &[u8]) -> Result<(), DecodeError> {
        reset_on_error(self, Self::decode_json(data))
    }

    /// Decode plain text into `self`. On failure `self` is reset to null and the error is returned.
    fn unmarshal_text(&mut self, text: &str) -> Result<(), DecodeError> {
        reset_on_error(self, Self::decode_text(text))
    }

    /// Decode a binary record into `self`. On failure `self` is left untouched.
    fn unmarshal_record(&mut self, data: &[u8]) -> Result<(), DecodeError> {
        *self = Self::decode_record(data)?;
        Ok(())
    }
}

fn reset_on_error<T: Default>(
    target: &mut T,
    decoded: Result<T, DecodeError>,
) -> Result<(), DecodeError> {
    match decoded {
        Ok(value) => {
            *target = value;
            Ok(())
        }
        Err(err) => {
            tracing::debug!(
                target: "nulled::decode",
                type_name = std::any::type_name::<T>(),
                error = %err,
                "decode failed, resetting to null"
            );
            *target = T::default();
            Err(err)
        }
    }
}
