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

/// Bare token some producers emit for a missing integer. It is not JSON, so only [`NullInt::decode_json`] sees it.
const NIL_TOKEN: &[u8] = b"nil";

/// An `i64` that may be null.
///
/// In JSON, `null`, the empty string `""` and the bare token `nil` all decode to null. Any other token must be a JSON
/// integer; quoted digits such as `"123"` are rejected.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NullInt {
    value: i64,
    valid: bool,
}

impl NullInt {
    pub const fn new(value: i64, valid: bool) -> Self {
        Self {
            value: if valid { value } else { 0 },
            valid,
        }
    }

    pub const fn null() -> Self {
        Self::new(0, false)
    }

    pub const fn from_value(value: i64) -> Self {
        Self::new(value, true)
    }

    pub fn from_option(value: Option<i64>) -> Self {
        value.map_or(Self::null(), Self::from_value)
    }

    pub const fn is_valid(&self) -> bool {
        self.valid
    }

    pub const fn is_null(&self) -> bool {
        !self.valid
    }

    pub const fn value_or_zero(&self) -> i64 {
        if self.valid { self.value } else { 0 }
    }

    pub const fn null_value(&self) -> Option<i64> {
        if self.valid { Some(self.value) } else { None }
    }
}

impl Nullable for NullInt {
    type Value = i64;

    fn is_valid(&self) -> bool {
        self.valid
    }

    fn value_or_zero(&self) -> i64 {
        NullInt::value_or_zero(self)
    }

    fn into_option(self) -> Option<i64> {
        self.null_value()
    }
}

impl From<i64> for NullInt {
    fn from(value: i64) -> Self {
        Self::from_value(value)
    }
}

impl From<Option<i64>> for NullInt {
    fn from(value: Option<i64>) -> Self {
        Self::from_option(value)
    }
}

impl From<NullInt> for Option<i64> {
    fn from(value: NullInt) -> Self {
        value.null_value()
    }
}

impl Serialize for NullInt {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if !serializer.is_human_readable() {
            return (self.value, self.valid).serialize(serializer);
        }
        match self.null_value() {
            Some(v) => serializer.serialize_i64(v),
            None => serializer.serialize_none(),
        }
    }
}

struct NullIntVisitor;

impl<'de> de::Visitor<'de> for NullIntVisitor {
    type Value = NullInt;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer, null or an empty string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<NullInt, E> {
        Ok(NullInt::from_value(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<NullInt, E> {
        i64::try_from(v)
            .map(NullInt::from_value)
            .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<NullInt, E> {
        if v.is_empty() {
            Ok(NullInt::null())
        } else {
            Err(E::invalid_type(de::Unexpected::Str(v), &self))
        }
    }

    fn visit_unit<E: de::Error>(self) -> Result<NullInt, E> {
        Ok(NullInt::null())
    }

    fn visit_none<E: de::Error>(self) -> Result<NullInt, E> {
        Ok(NullInt::null())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<NullInt, D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Deserialize<'de> for NullInt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if !deserializer.is_human_readable() {
            let (value, valid) = <(i64, bool)>::deserialize(deserializer)?;
            return Ok(Self::new(value, valid));
        }
        deserializer.deserialize_any(NullIntVisitor)
    }
}

impl Encode for NullInt {
    fn encode_text(&self) -> Result<String, EncodeError> {
        Ok(self.null_value().map(|v| v.to_string()).unwrap_or_default())
    }

    fn encode_values(&self, key: &str, values: &mut QueryValues) -> Result<(), EncodeError> {
        match self.null_value() {
            Some(v) => values.set(key, v.to_string()),
            None => tracing::trace!(target: "nulled::query", key, "omitting null int"),
        }
        Ok(())
    }

    fn write_record<W: io::Write>(&self, writer: W) -> Result<(), EncodeError> {
        record::write(writer, &self.value, self.valid)
    }
}

impl Decode for NullInt {
    fn decode_json(data: &[u8]) -> Result<Self, DecodeError> {
        if data.trim_ascii() == NIL_TOKEN {
            return Ok(Self::null());
        }
        Ok(serde_json::from_slice(data)?)
    }

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

impl FromStr for NullInt {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode_text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert_eq!(NullInt::new(10, true).null_value(), Some(10));
        assert_eq!(NullInt::new(10, false), NullInt::null());
        assert_eq!(NullInt::from(42).value_or_zero(), 42);
        assert_eq!(NullInt::from(Some(0)), NullInt::from_value(0));
        assert!(NullInt::from(None).is_null());
        assert_eq!(Option::<i64>::from(NullInt::from_value(-3)), Some(-3));
    }

    #[test]
    fn test_json_null_tokens() {
        for token in ["null", r#""""#, "nil", " nil "] {
            let i = NullInt::decode_json(token.as_bytes()).unwrap();
            assert_eq!(i, NullInt::null(), "token {token}");
        }
    }

    #[test]
    fn test_json_strict_integers() {
        assert_eq!(NullInt::decode_json(b"0").unwrap(), NullInt::from_value(0));
        assert_eq!(NullInt::decode_json(b"-42").unwrap(), NullInt::from_value(-42));
        assert_eq!(
            NullInt::decode_json(i64::MIN.to_string().as_bytes()).unwrap(),
            NullInt::from_value(i64::MIN)
        );

        for token in [r#""123""#, r#""invalid""#, "invalid", "1.5", "9223372036854775808", "true"] {
            assert!(
                matches!(NullInt::decode_json(token.as_bytes()), Err(DecodeError::Json(_))),
                "token {token}"
            );
        }
    }

    #[test]
    fn test_unmarshal_json_resets_on_error() {
        let mut i = NullInt::from_value(7);
        assert!(i.unmarshal_json(br#""123""#).is_err());
        assert_eq!(i, NullInt::null());
        assert_eq!(i.value_or_zero(), 0);

        i.unmarshal_json(b"123").unwrap();
        assert_eq!(i, NullInt::from_value(123));
        i.unmarshal_json(b"nil").unwrap();
        assert!(i.is_null());
    }

    #[test]
    fn test_decode_text() {
        assert_eq!("123".parse::<NullInt>().unwrap(), NullInt::from_value(123));
        assert_eq!("+5".parse::<NullInt>().unwrap(), NullInt::from_value(5));
        assert!("".parse::<NullInt>().unwrap().is_null());
        assert!("null".parse::<NullInt>().unwrap().is_null());
        assert!(matches!("12a".parse::<NullInt>(), Err(DecodeError::Int(_))));
        assert!(matches!(" 1".parse::<NullInt>(), Err(DecodeError::Int(_))));
    }

    #[test]
    fn test_encode_text() {
        assert_eq!(NullInt::from_value(-9).encode_text().unwrap(), "-9");
        assert_eq!(NullInt::null().encode_text().unwrap(), "");
    }
}
