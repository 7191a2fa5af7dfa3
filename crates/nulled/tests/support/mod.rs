//! Shared helpers for the integration tests.

/// Generates JSON round-trip, binary record round-trip and null accessor tests for a nullable type.
///
/// `zero` is the value type's zero. Each `"json" == value` pair asserts that the JSON decodes to `value`, that the
/// decoded value re-encodes to JSON that decodes back to itself, and that `value` survives a binary record round trip.
#[macro_export]
macro_rules! test_nullable {
    ($name:ident<$ty:ty>(zero: $zero:expr; $($json:literal == $value:expr),+ $(,)?)) => {
        paste::item! {
            #[test]
            fn [< test_json_roundtrip_ $name >] () -> anyhow::Result<()> {
                use nulled::{Decode, Encode};

                $(
                    let expected: $ty = $value;
                    let decoded = <$ty>::decode_json($json.as_bytes())?;
                    assert_eq!(decoded, expected, "decoding {}", $json);

                    let encoded = decoded.encode_json()?;
                    assert_eq!(<$ty>::decode_json(&encoded)?, expected, "re-decoding {}", $json);
                )+

                Ok(())
            }

            #[test]
            fn [< test_record_roundtrip_ $name >] () -> anyhow::Result<()> {
                use nulled::{Decode, Encode};

                $(
                    let expected: $ty = $value;
                    let bytes = expected.encode_record()?;
                    assert_eq!(<$ty>::decode_record(&bytes)?, expected, "record for {}", $json);
                )+

                Ok(())
            }

            #[test]
            fn [< test_null_is_zero_ $name >] () {
                use nulled::Nullable;

                let null = <$ty>::default();
                assert!(Nullable::is_null(&null));
                assert_eq!(Nullable::into_option(null.clone()), None);
                assert_eq!(Nullable::value_or_zero(&null), $zero);
            }
        }
    };
}
