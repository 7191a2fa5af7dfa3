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

/// A [`String`] that may be null.
///
/// # Whitespace
///
/// - [`NullString::from_value`] and [`NullString::from_option`] trim their input. Blank input is null, and the
///   trimmed text is what gets stored.
/// - Decoders store their payload verbatim. Only the exactly empty string decodes to null, so every decoder undoes
///   its encoder, surrounding whitespace included.
/// - The query hook omits blank values even when they are valid.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct NullString {
    value: String,
    valid: bool,
}

impl NullString {
    /// Build from raw parts. The value is kept as given unless `valid` is false.
    pub fn new(value: impl Into<String>, valid: bool) -> Self {
        if !valid {
            return Self::null();
        }
        Self {
            value: value.into(),
            valid,
        }
    }

    pub const fn null() -> Self {
        Self {
            value: String::new(),
            valid: false,
        }
    }

    /// Trim `value`, returning null when nothing is left.
    pub fn from_value(value: impl AsRef<str>) -> Self {
        match value.as_ref().trim() {
            "" => Self::null(),
            trimmed => Self::new(trimmed, true),
        }
    }

    pub fn from_option<S: AsRef<str>>(value: Option<S>) -> Self {
        value.map_or_else(Self::null, Self::from_value)
    }

    pub const fn is_valid(&self) -> bool {
        self.valid
    }

    pub const fn is_null(&self) -> bool {
        !self.valid
    }

    pub fn value_or_zero(&self) -> &str {
        if self.valid { &self.value } else { "" }
    }

    /// Borrowing form of [`NullString::null_value`].
    pub fn as_deref(&self) -> Option<&str> {
        self.valid.then_some(self.value.as_str())
    }

    pub fn null_value(&self) -> Option<String> {
        self.as_deref().map(ToOwned::to_owned)
    }

    fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }
}

impl Nullable for NullString {
    type Value = String;

    fn is_valid(&self) -> bool {
        self.valid
    }

    fn value_or_zero(&self) -> String {
        NullString::value_or_zero(self).to_owned()
    }

    fn into_option(self) -> Option<String> {
        self.valid.then_some(self.value)
    }
}

impl From<&str> for NullString {
    fn from(value: &str) -> Self {
        Self::from_value(value)
    }
}

impl From<String> for NullString {
    fn from(value: String) -> Self {
        Self::from_value(value)
    }
}

impl From<Option<&str>> for NullString {
    fn from(value: Option<&str>) -> Self {
        Self::from_option(value)
    }
}

impl From<Option<String>> for NullString {
    fn from(value: Option<String>) -> Self {
        Self::from_option(value)
    }
}

impl From<NullString> for Option<String> {
    fn from(value: NullString) -> Self {
        value.into_option()
    }
}

impl Serialize for NullString {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if !serializer.is_human_readable() {
            return (self.value.as_str(), self.valid).serialize(serializer);
        }
        match self.as_deref() {
            Some(v) => serializer.serialize_str(v),
            None => serializer.serialize_none(),
        }
    }
}

struct NullStringVisitor;

impl NullStringVisitor {
    fn decoded(v: impl Into<String>) -> NullString {
        let v = v.into();
        let valid = !v.is_empty();
        NullString::new(v, valid)
    }
}

impl<'de> de::Visitor<'de> for NullStringVisitor {
    type Value = NullString;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string or null")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<NullString, E> {
        Ok(Self::decoded(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<NullString, E> {
        Ok(Self::decoded(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<NullString, E> {
        Ok(NullString::null())
    }

    fn visit_none<E: de::Error>(self) -> Result<NullString, E> {
        Ok(NullString::null())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<NullString, D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Deserialize<'de> for NullString {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if !deserializer.is_human_readable() {
            let (value, valid) = <(String, bool)>::deserialize(deserializer)?;
            return Ok(Self::new(value, valid));
        }
        deserializer.deserialize_any(NullStringVisitor)
    }
}

impl Encode for NullString {
    fn encode_text(&self) -> Result<String, EncodeError> {
        Ok(self.value_or_zero().to_owned())
    }

    fn encode_values(&self, key: &str, values: &mut QueryValues) -> Result<(), EncodeError> {
        if !self.valid || self.is_blank() {
            tracing::trace!(target: "nulled::query", key, "omitting null or blank string");
            return Ok(());
        }
        values.set(key, self.value.as_str());
        Ok(())
    }

    fn write_record<W: io::Write>(&self, writer: W) -> Result<(), EncodeError> {
        record::write(writer, self.value.as_str(), self.valid)
    }
}

impl Decode for NullString {
    fn decode_text(text: &str) -> Result<Self, DecodeError> {
        Ok(NullStringVisitor::decoded(text))
    }

    fn read_record<R: io::Read>(reader: R) -> Result<Self, DecodeError> {
        let (value, valid): (String, bool) = record::read(reader)?;
        Ok(Self::new(value, valid))
    }
}

impl FromStr for NullString {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode_text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_value_trims() {
        assert_eq!(NullString::from_value("world").as_deref(), Some("world"));
        assert_eq!(NullString::from_value(" hi ").as_deref(), Some("hi"));
        assert_eq!(NullString::from_value("\t a b \n").value_or_zero(), "a b");
    }

    #[test]
    fn test_from_value_blank_is_null() {
        assert!(NullString::from_value("").is_null());
        assert!(NullString::from_value("   ").is_null());
        assert!(NullString::from(Some(" ")).is_null());
        assert!(NullString::from(None::<String>).is_null());
    }

    #[test]
    fn test_new_keeps_raw_value() {
        let s = NullString::new(" padded ", true);
        assert_eq!(s.value_or_zero(), " padded ");
        assert_eq!(NullString::new("", true).as_deref(), Some(""));
        assert_eq!(NullString::new("stale", false), NullString::null());
    }

    #[test]
    fn test_null_value() {
        assert_eq!(NullString::new("test", true).null_value(), Some("test".to_string()));
        assert_eq!(NullString::null().null_value(), None);
        assert_eq!(Option::<String>::from(NullString::from("x")), Some("x".to_string()));
    }

    #[test]
    fn test_decode_text_is_verbatim() {
        assert_eq!(NullString::decode_text("hello").unwrap(), NullString::new("hello", true));
        assert_eq!(NullString::decode_text(" x ").unwrap(), NullString::new(" x ", true));
        assert_eq!(NullString::decode_text("   ").unwrap(), NullString::new("   ", true));
        assert_eq!(NullString::decode_text("null").unwrap(), NullString::new("null", true));
        assert!(NullString::decode_text("").unwrap().is_null());
    }

    #[test]
    fn test_json_empty_string_is_null() {
        assert!(NullString::decode_json(br#""""#).unwrap().is_null());
        assert!(NullString::decode_json(b"null").unwrap().is_null());
        assert_eq!(
            NullString::decode_json(br#"" spaced ""#).unwrap(),
            NullString::new(" spaced ", true)
        );
        assert!(NullString::decode_json(b"not a string").is_err());
        assert!(NullString::decode_json(b"12").is_err());
    }

    #[test]
    fn test_query_omits_blank() {
        let mut values = QueryValues::new();
        NullString::new(" ", true)
            .encode_values("s", &mut values)
            .unwrap();
        NullString::null().encode_values("n", &mut values).unwrap();
        assert!(values.is_empty());

        NullString::new(" keep ", true)
            .encode_values("s", &mut values)
            .unwrap();
        assert_eq!(values.get("s"), Some(" keep "));
    }
}
