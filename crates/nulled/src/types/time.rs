//! Nullable timestamps.
//!
//! Timestamps keep whatever UTC offset they were built or parsed with; nothing here converts between zones.
use std::{fmt, io, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de, ser};
use time::format_description::{BorrowedFormatItem, well_known::Rfc3339};
use time::macros::{datetime, format_description as fd};
pub use time::{OffsetDateTime, UtcOffset};

use crate::{
    decode::Decode,
    encode::Encode,
    error::{DecodeError, EncodeError},
    record,
    types::Nullable,
    values::QueryValues,
};

/// Layout used by the query hook, rendered in the timestamp's own offset.
pub const QUERY_FORMAT: &[BorrowedFormatItem<'_>] =
    fd!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// An [`OffsetDateTime`] that may be null.
///
/// JSON and plain text use RFC 3339 with the offset included. Plain-text parsing is strict: there are no fallback
/// layouts, so callers holding other formats must normalize them first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NullTime {
    value: OffsetDateTime,
    valid: bool,
}

impl NullTime {
    /// The zero timestamp, `0001-01-01T00:00:00Z`. Any timestamp denoting the same instant counts as zero.
    pub const ZERO: OffsetDateTime = datetime!(0001-01-01 0:00 UTC);

    pub const fn new(value: OffsetDateTime, valid: bool) -> Self {
        Self {
            value: if valid { value } else { Self::ZERO },
            valid,
        }
    }

    pub const fn null() -> Self {
        Self::new(Self::ZERO, false)
    }

    /// Null if `value` is the zero timestamp, valid otherwise.
    pub fn from_value(value: OffsetDateTime) -> Self {
        Self::new(value, !is_zero(value))
    }

    pub fn from_option(value: Option<OffsetDateTime>) -> Self {
        value.map_or(Self::null(), Self::from_value)
    }

    pub const fn is_valid(&self) -> bool {
        self.valid
    }

    pub const fn is_null(&self) -> bool {
        !self.valid
    }

    pub const fn value_or_zero(&self) -> OffsetDateTime {
        if self.valid { self.value } else { Self::ZERO }
    }

    pub const fn null_value(&self) -> Option<OffsetDateTime> {
        if self.valid { Some(self.value) } else { None }
    }
}

impl Default for NullTime {
    fn default() -> Self {
        Self::null()
    }
}

/// Returns `true` if `value` is the same instant as [`NullTime::ZERO`].
pub fn is_zero(value: OffsetDateTime) -> bool {
    value == NullTime::ZERO
}

fn parse_rfc3339(s: &str) -> Result<OffsetDateTime, time::error::Parse> {
    OffsetDateTime::parse(s, &Rfc3339)
}

impl Nullable for NullTime {
    type Value = OffsetDateTime;

    fn is_valid(&self) -> bool {
        self.valid
    }

    fn value_or_zero(&self) -> OffsetDateTime {
        NullTime::value_or_zero(self)
    }

    fn into_option(self) -> Option<OffsetDateTime> {
        self.null_value()
    }
}

impl From<OffsetDateTime> for NullTime {
    fn from(value: OffsetDateTime) -> Self {
        Self::from_value(value)
    }
}

impl From<Option<OffsetDateTime>> for NullTime {
    fn from(value: Option<OffsetDateTime>) -> Self {
        Self::from_option(value)
    }
}

impl From<NullTime> for Option<OffsetDateTime> {
    fn from(value: NullTime) -> Self {
        value.null_value()
    }
}

impl Serialize for NullTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if !serializer.is_human_readable() {
            return (self.value, self.valid).serialize(serializer);
        }
        match self.null_value() {
            Some(v) => {
                let formatted = v.format(&Rfc3339).map_err(ser::Error::custom)?;
                serializer.serialize_str(&formatted)
            }
            None => serializer.serialize_none(),
        }
    }
}

struct NullTimeVisitor;

impl<'de> de::Visitor<'de> for NullTimeVisitor {
    type Value = NullTime;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an RFC 3339 timestamp string or null")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<NullTime, E> {
        parse_rfc3339(v)
            .map(|t| NullTime::new(t, true))
            .map_err(|e| E::custom(format!("invalid timestamp {v:?}: {e}")))
    }

    fn visit_unit<E: de::Error>(self) -> Result<NullTime, E> {
        Ok(NullTime::null())
    }

    fn visit_none<E: de::Error>(self) -> Result<NullTime, E> {
        Ok(NullTime::null())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<NullTime, D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Deserialize<'de> for NullTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if !deserializer.is_human_readable() {
            let (value, valid) = <(OffsetDateTime, bool)>::deserialize(deserializer)?;
            return Ok(Self::new(value, valid));
        }
        deserializer.deserialize_any(NullTimeVisitor)
    }
}

impl Encode for NullTime {
    fn encode_text(&self) -> Result<String, EncodeError> {
        match self.null_value() {
            Some(v) => Ok(v.format(&Rfc3339)?),
            None => Ok(String::new()),
        }
    }

    fn encode_values(&self, key: &str, values: &mut QueryValues) -> Result<(), EncodeError> {
        match self.null_value() {
            Some(v) => values.set(key, v.format(QUERY_FORMAT)?),
            None => tracing::trace!(target: "nulled::query", key, "omitting null time"),
        }
        Ok(())
    }

    fn write_record<W: io::Write>(&self, writer: W) -> Result<(), EncodeError> {
        record::write(writer, &self.value, self.valid)
    }
}

impl Decode for NullTime {
    fn decode_text(text: &str) -> Result<Self, DecodeError> {
        if text.is_empty() || text == "null" {
            return Ok(Self::null());
        }
        Ok(Self::new(parse_rfc3339(text)?, true))
    }

    fn read_record<R: io::Read>(reader: R) -> Result<Self, DecodeError> {
        let (value, valid) = record::read(reader)?;
        Ok(Self::new(value, valid))
    }
}

impl FromStr for NullTime {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode_text(s)
    }
}
