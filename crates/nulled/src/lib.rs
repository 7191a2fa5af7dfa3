//! Nullable scalar types that keep NULL distinct from zero.
//!
//! [`NullBool`], [`NullInt`], [`NullFloat`], [`NullString`] and [`NullTime`] pair a value with a validity flag and
//! encode consistently across four formats:
//!
//! - structured text (JSON) through [`serde`], with byte-level hooks on [`Encode`] and [`Decode`],
//! - plain text through [`Encode::encode_text`] and [`Decode::decode_text`] (also [`std::str::FromStr`]),
//! - URL query parameters through [`Encode::encode_values`] and [`QueryValues`],
//! - binary records (value, then flag) through [`Encode::write_record`] and [`Decode::read_record`].
//!
//! ```
//! use nulled::{Decode, NullInt, NullString, QueryValues};
//!
//! let id = NullInt::decode_json(b"42").unwrap();
//! let name = NullString::from_value("   ");
//! assert!(name.is_null());
//!
//! let query = QueryValues::new().val("id", id).unwrap().val("name", &name).unwrap();
//! assert_eq!(query.encode(), "id=42");
//! ```

pub mod decode;
pub mod encode;
mod error;
mod record;
pub mod types;
mod values;

pub use crate::{
    decode::Decode,
    encode::Encode,
    error::{DecodeError, EncodeError, Error, Result},
    types::{NullBool, NullFloat, NullInt, NullString, NullTime, Nullable},
    values::QueryValues,
};
