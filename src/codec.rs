//! Conversions between native values and their `0x` prefixed hexadecimal
//! wire encoding.
//!
//! QUANTITY values are encoded with the minimal number of hex digits, while
//! DATA values always use two hex digits per byte. Quantities are backed by a
//! 256-bit unsigned integer, the word size of the chain, so balances and
//! hashes never lose precision.

use crate::error::ValueError;
use ethprim::{AsU256 as _, U256};
use serde_json::Value;

/// Number of bytes in a 256-bit word.
const WORD: usize = 32;

const DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Encodes a quantity as `0x` followed by its minimal lower-case hex digits.
/// Zero is encoded as `0x0`.
pub fn encode_quantity(value: U256) -> String {
    if value == U256::ZERO {
        return "0x0".to_owned();
    }

    let mut digits = String::with_capacity(2 * WORD);
    push_digits(&mut digits, &value.to_be_bytes());
    format!("0x{}", digits.trim_start_matches('0'))
}

/// Decodes a quantity.
///
/// Strings with a `0x` (or `0X`) prefix are parsed as hexadecimal, tolerating
/// leading zeros. Strings without a prefix are parsed as decimal.
pub fn decode_quantity(input: &str) -> Result<U256, ValueError> {
    let malformed = || ValueError::MalformedQuantity(input.to_owned());
    let too_large = || ValueError::ValueTooLarge {
        value: input.to_owned(),
        limit: WORD,
    };

    match strip_quantity_prefix(input) {
        Some(hex) => {
            if hex.is_empty() || !hex.bytes().all(|c| c.is_ascii_hexdigit()) {
                return Err(malformed());
            }
            let significant = hex.trim_start_matches('0');
            if significant.is_empty() {
                return Ok(U256::ZERO);
            }
            if significant.len() > 2 * WORD {
                return Err(too_large());
            }
            U256::from_str_radix(significant, 16).map_err(|_| malformed())
        }
        None => {
            if input.is_empty() || !input.bytes().all(|c| c.is_ascii_digit()) {
                return Err(malformed());
            }
            // All characters are digits, so the only possible failure left is
            // an overflow.
            U256::from_str_radix(input, 10).map_err(|_| too_large())
        }
    }
}

/// Decodes a quantity from an arbitrary JSON value.
///
/// Some nodes return plain JSON numbers (or even booleans) where a QUANTITY
/// string is expected, so those are accepted as well.
pub fn decode_quantity_value(value: &Value) -> Result<U256, ValueError> {
    match value {
        Value::Bool(value) => Ok(u8::from(*value).as_u256()),
        Value::Number(number) => number
            .as_u64()
            .map(|number| number.as_u256())
            .ok_or_else(|| ValueError::MalformedQuantity(number.to_string())),
        Value::String(string) => decode_quantity(string),
        other => Err(ValueError::MalformedQuantity(other.to_string())),
    }
}

fn strip_quantity_prefix(input: &str) -> Option<&str> {
    input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
}

/// Encodes bytes as a DATA string.
pub fn encode_data(bytes: &[u8]) -> String {
    let mut buffer = String::with_capacity(2 + bytes.len() * 2);
    buffer.push_str("0x");
    push_digits(&mut buffer, bytes);
    buffer
}

/// Decodes a variable length DATA string.
pub fn decode_data(hex: &str) -> Result<Vec<u8>, ValueError> {
    let digits = strip_data_prefix(hex)?;
    if digits.len() % 2 != 0 {
        return Err(ValueError::MalformedData(hex.to_owned()));
    }

    let mut bytes = vec![0; digits.len() / 2];
    decode_digits(hex, digits, &mut bytes)?;
    Ok(bytes)
}

/// Encodes the big-endian numeric value of `bytes` as a DATA string of exactly
/// `len` bytes, left-padding with zeros.
pub fn encode_fixed(bytes: &[u8], len: usize) -> Result<String, ValueError> {
    let significant = strip_leading_zeros(bytes);
    if significant.len() > len {
        return Err(ValueError::ValueTooLarge {
            value: encode_data(bytes),
            limit: len,
        });
    }

    let mut buffer = String::with_capacity(2 + len * 2);
    buffer.push_str("0x");
    for _ in significant.len()..len {
        buffer.push_str("00");
    }
    push_digits(&mut buffer, significant);
    Ok(buffer)
}

/// Decodes a DATA string of exactly `len` bytes.
pub fn decode_fixed(hex: &str, len: usize) -> Result<Vec<u8>, ValueError> {
    let mut bytes = vec![0; len];
    decode_fixed_into(hex, &mut bytes)?;
    Ok(bytes)
}

/// Decodes a DATA string of exactly `N` bytes into an array.
pub fn decode_fixed_array<const N: usize>(hex: &str) -> Result<[u8; N], ValueError> {
    let mut bytes = [0; N];
    decode_fixed_into(hex, &mut bytes)?;
    Ok(bytes)
}

fn decode_fixed_into(hex: &str, bytes: &mut [u8]) -> Result<(), ValueError> {
    let digits = strip_data_prefix(hex)?;
    if digits.len() != bytes.len() * 2 {
        return Err(ValueError::LengthMismatch {
            expected: bytes.len() * 2,
            actual: digits.len(),
        });
    }
    decode_digits(hex, digits, bytes)
}

/// Encodes the low `len` bytes of a word as a fixed length DATA string.
///
/// Callers must make sure that the value fits, higher bytes are dropped.
pub(crate) fn encode_word(value: U256, len: usize) -> String {
    let bytes = value.to_be_bytes();
    encode_data(&bytes[WORD.saturating_sub(len)..])
}

/// Interprets big-endian bytes as a 256-bit unsigned integer.
pub(crate) fn word_from_be(bytes: &[u8]) -> Result<U256, ValueError> {
    let significant = strip_leading_zeros(bytes);
    if significant.len() > WORD {
        return Err(ValueError::ValueTooLarge {
            value: encode_data(bytes),
            limit: WORD,
        });
    }

    let mut word = [0; WORD];
    word[WORD - significant.len()..].copy_from_slice(significant);
    Ok(U256::from_be_bytes(word))
}

fn strip_leading_zeros(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|byte| *byte != 0)
        .unwrap_or(bytes.len());
    &bytes[start..]
}

fn strip_data_prefix(hex: &str) -> Result<&str, ValueError> {
    hex.strip_prefix("0x")
        .ok_or_else(|| ValueError::MalformedData(hex.to_owned()))
}

fn push_digits(buffer: &mut String, bytes: &[u8]) {
    for byte in bytes {
        buffer.push(DIGITS[(byte >> 4) as usize] as char);
        buffer.push(DIGITS[(byte & 0xf) as usize] as char);
    }
}

fn decode_digits(input: &str, digits: &str, bytes: &mut [u8]) -> Result<(), ValueError> {
    let nibble = |x: u8| -> Result<u8, ValueError> {
        match x {
            b'0'..=b'9' => Ok(x - b'0'),
            b'a'..=b'f' => Ok(x - b'a' + 0xa),
            b'A'..=b'F' => Ok(x - b'A' + 0xa),
            _ => Err(ValueError::MalformedData(input.to_owned())),
        }
    };

    for (byte, chunk) in bytes.iter_mut().zip(digits.as_bytes().chunks_exact(2)) {
        *byte = (nibble(chunk[0])? << 4) | nibble(chunk[1])?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;
    use serde_json::json;

    #[test]
    fn quantity_roundtrip() {
        for value in [
            U256::ZERO,
            U256::ONE,
            100_u64.as_u256(),
            u64::MAX.as_u256(),
            U256::MAX,
        ] {
            assert_eq!(decode_quantity(&encode_quantity(value)).unwrap(), value);
        }
    }

    #[test]
    fn quantity_encoding_is_minimal() {
        assert_eq!(encode_quantity(U256::ZERO), "0x0");
        assert_eq!(encode_quantity(100_u64.as_u256()), "0x64");
        assert_eq!(encode_quantity(0x1000_u64.as_u256()), "0x1000");
        assert_eq!(encode_quantity(U256::MAX), format!("0x{}", "f".repeat(64)));

        for value in [1_u64, 0xf, 0x10, 0x100, 0xabcdef, u64::MAX] {
            let encoded = encode_quantity(value.as_u256());
            assert!(!encoded[2..].starts_with('0'), "{encoded}");
        }
    }

    #[test]
    fn decodes_quantities() {
        assert_eq!(decode_quantity("0x64").unwrap(), 100_u64.as_u256());
        assert_eq!(decode_quantity("0X64").unwrap(), 100_u64.as_u256());
        assert_eq!(decode_quantity("0x00000000064").unwrap(), 100_u64.as_u256());
        assert_eq!(decode_quantity("0xABCDEF").unwrap(), 0xabcdef_u64.as_u256());
        assert_eq!(decode_quantity("0x0").unwrap(), U256::ZERO);
        assert_eq!(decode_quantity("0x000").unwrap(), U256::ZERO);
        assert_eq!(decode_quantity("100").unwrap(), 100_u64.as_u256());
    }

    #[test]
    fn rejects_malformed_quantities() {
        for input in ["", "0x", "0xg", "0x 1", "1f", "-1", "not-hex"] {
            assert_eq!(
                decode_quantity(input),
                Err(ValueError::MalformedQuantity(input.to_owned())),
            );
        }
    }

    #[test]
    fn rejects_quantities_wider_than_a_word() {
        let input = format!("0x1{}", "0".repeat(64));
        assert!(matches!(
            decode_quantity(&input),
            Err(ValueError::ValueTooLarge { limit: 32, .. }),
        ));

        // 2^256
        let input = "115792089237316195423570985008687907853269984665640564039457584007913129639936";
        assert!(matches!(
            decode_quantity(input),
            Err(ValueError::ValueTooLarge { .. }),
        ));

        // Leading zeros do not count towards the width.
        let input = format!("0x{}{}", "0".repeat(10), "f".repeat(64));
        assert_eq!(decode_quantity(&input).unwrap(), U256::MAX);
    }

    #[test]
    fn decodes_json_quantities() {
        assert_eq!(decode_quantity_value(&json!("0x2a")).unwrap(), 42_u64.as_u256());
        assert_eq!(decode_quantity_value(&json!(42)).unwrap(), 42_u64.as_u256());
        assert_eq!(decode_quantity_value(&json!(true)).unwrap(), U256::ONE);
        assert!(decode_quantity_value(&json!(-1)).is_err());
        assert!(decode_quantity_value(&json!(1.5)).is_err());
        assert!(decode_quantity_value(&json!(null)).is_err());
    }

    #[test]
    fn fixed_roundtrip() {
        let address = hex!("f4c875ee7a70fae078c9a4b07dc4f6970a804f6f");
        let encoded = encode_fixed(&address, 20).unwrap();
        assert_eq!(encoded, "0xf4c875ee7a70fae078c9a4b07dc4f6970a804f6f");
        assert_eq!(decode_fixed(&encoded, 20).unwrap(), address);
    }

    #[test]
    fn fixed_encoding_pads_and_limits() {
        assert_eq!(encode_fixed(&[0x01, 0x02], 4).unwrap(), "0x00000102");
        // Leading zero bytes are not significant.
        assert_eq!(
            encode_fixed(&U256::ONE.to_be_bytes(), 20).unwrap(),
            format!("0x{}01", "00".repeat(19)),
        );
        assert!(matches!(
            encode_fixed(&[0xff; 21], 20),
            Err(ValueError::ValueTooLarge { limit: 20, .. }),
        ));
    }

    #[test]
    fn fixed_decoding_checks_length() {
        assert_eq!(
            decode_fixed(&format!("0x{}", "a".repeat(38)), 20),
            Err(ValueError::LengthMismatch {
                expected: 40,
                actual: 38
            }),
        );
        assert_eq!(
            decode_fixed("f4c875ee", 4),
            Err(ValueError::MalformedData("f4c875ee".to_owned())),
        );
        assert_eq!(
            decode_fixed("0xf4c875eg", 4),
            Err(ValueError::MalformedData("0xf4c875eg".to_owned())),
        );
        assert_eq!(
            decode_fixed_array::<4>("0xF4C875EE").unwrap(),
            hex!("f4c875ee"),
        );
    }

    #[test]
    fn data_encoding() {
        assert_eq!(encode_data(&[]), "0x");
        assert_eq!(encode_data(&hex!("68656c6c6f")), "0x68656c6c6f");
        assert_eq!(decode_data("0x").unwrap(), Vec::<u8>::new());
        assert_eq!(decode_data("0x68656C6C6F").unwrap(), b"hello");
        assert!(decode_data("0x123").is_err());
        assert!(decode_data("1234").is_err());
    }

    #[test]
    fn words() {
        let value = 0xf4c875ee_u64.as_u256();
        assert_eq!(encode_word(value, 4), "0xf4c875ee");
        assert_eq!(word_from_be(&hex!("00f4c875ee")).unwrap(), value);
        assert!(word_from_be(&[0xff; 33]).is_err());
        assert_eq!(word_from_be(&[]).unwrap(), U256::ZERO);
    }
}
