use std::{fmt, io, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de, ser};

use crate::{
    decode::Decode,
    encode::Encode,
    error::{DecodeError, EncodeError},
    record,
    types::Nullable,
    values::QueryValues,
};

/// An `f64` that may be null.
///
/// Text and query forms use the shortest decimal that round-trips, never scientific notation. Non-finite values have
/// no JSON form and fail to encode.
///
/// JSON input may be a number, `null`, or a string holding a number; the empty string decodes to null. Integers
/// beyond 2^53 are rounded to the nearest `f64`.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct NullFloat {
    value: f64,
    valid: bool,
}

impl NullFloat {
    pub const fn new(value: f64, valid: bool) -> Self {
        Self {
            value: if valid { value } else { 0.0 },
            valid,
        }
    }

    pub const fn null() -> Self {
        Self::new(0.0, false)
    }

    pub const fn from_value(value: f64) -> Self {
        Self::new(value, true)
    }

    pub fn from_option(value: Option<f64>) -> Self {
        value.map_or(Self::null(), Self::from_value)
    }

    pub const fn is_valid(&self) -> bool {
        self.valid
    }

    pub const fn is_null(&self) -> bool {
        !self.valid
    }

    pub const fn value_or_zero(&self) -> f64 {
        if self.valid { self.value } else { 0.0 }
    }

    pub const fn null_value(&self) -> Option<f64> {
        if self.valid { Some(self.value) } else { None }
    }
}

impl Nullable for NullFloat {
    type Value = f64;

    fn is_valid(&self) -> bool {
        self.valid
    }

    fn value_or_zero(&self) -> f64 {
        NullFloat::value_or_zero(self)
    }

    fn into_option(self) -> Option<f64> {
        self.null_value()
    }
}

impl From<f64> for NullFloat {
    fn from(value: f64) -> Self {
        Self::from_value(value)
    }
}

impl From<Option<f64>> for NullFloat {
    fn from(value: Option<f64>) -> Self {
        Self::from_option(value)
    }
}

impl From<NullFloat> for Option<f64> {
    fn from(value: NullFloat) -> Self {
        value.null_value()
    }
}

impl Serialize for NullFloat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if !serializer.is_human_readable() {
            return (self.value, self.valid).serialize(serializer);
        }
        match self.null_value() {
            Some(v) if !v.is_finite() => Err(ser::Error::custom(format!(
                "unsupported float value: {v}"
            ))),
            Some(v) => serializer.serialize_f64(v),
            None => serializer.serialize_none(),
        }
    }
}

struct NullFloatVisitor;

impl<'de> de::Visitor<'de> for NullFloatVisitor {
    type Value = NullFloat;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number, a numeric string or null")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<NullFloat, E> {
        Ok(NullFloat::from_value(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<NullFloat, E> {
        Ok(NullFloat::from_value(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<NullFloat, E> {
        Ok(NullFloat::from_value(v as f64))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<NullFloat, E> {
        if v.is_empty() {
            return Ok(NullFloat::null());
        }
        v.parse()
            .map(NullFloat::from_value)
            .map_err(|e| E::custom(format!("invalid float {v:?}: {e}")))
    }

    fn visit_unit<E: de::Error>(self) -> Result<NullFloat, E> {
        Ok(NullFloat::null())
    }

    fn visit_none<E: de::Error>(self) -> Result<NullFloat, E> {
        Ok(NullFloat::null())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<NullFloat, D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Deserialize<'de> for NullFloat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if !deserializer.is_human_readable() {
            let (value, valid) = <(f64, bool)>::deserialize(deserializer)?;
            return Ok(Self::new(value, valid));
        }
        deserializer.deserialize_any(NullFloatVisitor)
    }
}

impl Encode for NullFloat {
    fn encode_text(&self) -> Result<String, EncodeError> {
        Ok(self.null_value().map(|v| v.to_string()).unwrap_or_default())
    }

    fn encode_values(&self, key: &str, values: &mut QueryValues) -> Result<(), EncodeError> {
        match self.null_value() {
            Some(v) => values.set(key, v.to_string()),
            None => tracing::trace!(target: "nulled::query", key, "omitting null float"),
        }
        Ok(())
    }

    fn write_record<W: io::Write>(&self, writer: W) -> Result<(), EncodeError> {
        record::write(writer, &self.value, self.valid)
    }
}

impl Decode for NullFloat {
    fn decode_text(text: &str) -> Result<Self, DecodeError> {
        if text.is_empty() || text == "null" {
            return Ok(Self::null());
        }
        Ok(Self::from_value(text.parse()?))
    }

    fn read_record<R: io::Read>(reader: R) -> Result<Self, DecodeError> {
        let (value, valid) = record::read(reader)?;
        Ok(Self::new(value, valid))
    }
}

impl FromStr for NullFloat {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode_text(s)
    }
}
