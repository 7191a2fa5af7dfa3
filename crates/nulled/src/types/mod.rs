//! Nullable wrappers around Rust scalar types.
//!
//! # Types
//!
//! | Nullable type  | Value type                 | Null when constructed from      |
//! |----------------|----------------------------|---------------------------------|
//! | [`NullBool`]   | `bool`                     | `None`                          |
//! | [`NullInt`]    | `i64`                      | `None`                          |
//! | [`NullFloat`]  | `f64`                      | `None`                          |
//! | [`NullString`] | [`String`]                 | `None`, empty or blank input    |
//! | [`NullTime`]   | `time::OffsetDateTime`     | `None`, [`NullTime::ZERO`]      |
//!
//! # Encodings
//!
//! | Encoding        | Null encodes as  | Null decodes from                                   |
//! |-----------------|------------------|-----------------------------------------------------|
//! | JSON            | `null`           | `null`; also `""` for strings, `""`/`nil` for ints |
//! | Plain text      | empty string     | empty string; also `null` except for strings        |
//! | Query values    | key omitted      | n/a                                                 |
//! | Binary record   | zero value, flag | zero value, flag                                    |
//!
//! Each type owns its null policy. The only shared pieces are the [`Nullable`], [`Encode`](crate::Encode) and
//! [`Decode`](crate::Decode) traits.

pub mod time;

mod bool;
mod float;
mod int;
mod str;

pub use self::{bool::NullBool, float::NullFloat, int::NullInt, str::NullString, time::NullTime};

/// The accessor contract shared by every nullable type.
pub trait Nullable {
    /// The wrapped scalar type.
    type Value;

    /// Returns `true` if a value is present.
    fn is_valid(&self) -> bool;

    /// Returns `true` if the value is absent.
    fn is_null(&self) -> bool {
        !self.is_valid()
    }

    /// Returns the value, or the type's zero value if null.
    fn value_or_zero(&self) -> Self::Value;

    /// Converts into the canonical optional form. Null converts to `None`, never to `Some(zero)`.
    fn into_option(self) -> Option<Self::Value>;
}
