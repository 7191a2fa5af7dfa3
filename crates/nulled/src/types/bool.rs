use std::{fmt, io, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::{
    decode::Decode,
    encode::Encode,
    error::{DecodeError, EncodeError},
    record,
    types::Nullable,
    values::QueryValues,
};

const TRUE_LITERALS: &[&str] = &["1", "t", "T", "TRUE", "true", "True"];
const FALSE_LITERALS: &[&str] = &["0", "f", "F", "FALSE", "false", "False"];

/// A `bool` that may be null.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NullBool {
    value: bool,
    valid: bool,
}

impl NullBool {
    pub const fn new(value: bool, valid: bool) -> Self {
        Self {
            value: value && valid,
            valid,
        }
    }

    pub const fn null() -> Self {
        Self::new(false, false)
    }

    pub const fn from_value(value: bool) -> Self {
        Self::new(value, true)
    }

    pub fn from_option(value: Option<bool>) -> Self {
        value.map_or(Self::null(), Self::from_value)
    }

    pub const fn is_valid(&self) -> bool {
        self.valid
    }

    pub const fn is_null(&self) -> bool {
        !self.valid
    }

    pub const fn value_or_zero(&self) -> bool {
        self.valid && self.value
    }

    pub const fn null_value(&self) -> Option<bool> {
        if self.valid { Some(self.value) } else { None }
    }
}

fn parse_bool(s: &str) -> Result<bool, DecodeError> {
    if TRUE_LITERALS.contains(&s) {
        Ok(true)
    } else if FALSE_LITERALS.contains(&s) {
        Ok(false)
    } else {
        Err(DecodeError::Bool(s.to_string()))
    }
}

impl Nullable for NullBool {
    type Value = bool;

    fn is_valid(&self) -> bool {
        self.valid
    }

    fn value_or_zero(&self) -> bool {
        NullBool::value_or_zero(self)
    }

    fn into_option(self) -> Option<bool> {
        self.null_value()
    }
}

impl From<bool> for NullBool {
    fn from(value: bool) -> Self {
        Self::from_value(value)
    }
}

impl From<Option<bool>> for NullBool {
    fn from(value: Option<bool>) -> Self {
        Self::from_option(value)
    }
}

impl From<NullBool> for Option<bool> {
    fn from(value: NullBool) -> Self {
        value.null_value()
    }
}

impl Serialize for NullBool {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if !serializer.is_human_readable() {
            return (self.value, self.valid).serialize(serializer);
        }
        match self.null_value() {
            Some(v) => serializer.serialize_bool(v),
            None => serializer.serialize_none(),
        }
    }
}

struct NullBoolVisitor;

impl<'de> de::Visitor<'de> for NullBoolVisitor {
    type Value = NullBool;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a boolean or null")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<NullBool, E> {
        Ok(NullBool::from_value(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<NullBool, E> {
        Ok(NullBool::null())
    }

    fn visit_none<E: de::Error>(self) -> Result<NullBool, E> {
        Ok(NullBool::null())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<NullBool, D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Deserialize<'de> for NullBool {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if !deserializer.is_human_readable() {
            let (value, valid) = <(bool, bool)>::deserialize(deserializer)?;
            return Ok(Self::new(value, valid));
        }
        deserializer.deserialize_any(NullBoolVisitor)
    }
}

impl Encode for NullBool {
    fn encode_text(&self) -> Result<String, EncodeError> {
        Ok(self.null_value().map(|v| v.to_string()).unwrap_or_default())
    }

    fn encode_values(&self, key: &str, values: &mut QueryValues) -> Result<(), EncodeError> {
        match self.null_value() {
            Some(true) => values.set(key, "1"),
            Some(false) => values.set(key, "0"),
            None => tracing::trace!(target: "nulled::query", key, "omitting null bool"),
        }
        Ok(())
    }

    fn write_record<W: io::Write>(&self, writer: W) -> Result<(), EncodeError> {
        record::write(writer, &self.value, self.valid)
    }
}

impl Decode for NullBool {
    fn decode_text(text: &str) -> Result<Self, DecodeError> {
        if text.is_empty() || text == "null" {
            return Ok(Self::null());
        }
        parse_bool(text).map(Self::from_value)
    }

    fn read_record<R: io::Read>(reader: R) -> Result<Self, DecodeError> {
        let (value, valid) = record::read(reader)?;
        Ok(Self::new(value, valid))
    }
}

impl FromStr for NullBool {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode_text(s)
    }
}
