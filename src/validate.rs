//! Parameter validation.
//!
//! The `is_*` predicates are pure and never fail. The `ensure_*` variants are
//! used wherever a parameter must reach the transport in a guaranteed-valid
//! shape, and report the offending field and value instead of returning
//! `false`.

use crate::error::ValueError;

/// Literal block tags accepted as a default block parameter.
pub const BLOCK_TAGS: [&str; 3] = ["earliest", "latest", "pending"];

/// Number of hex digits in an address.
const ADDRESS_DIGITS: usize = 40;

/// Number of hex digits in a hash.
const HASH_DIGITS: usize = 64;

/// Returns the digits of a `0x` prefixed hex string.
fn hex_digits(s: &str) -> Option<&str> {
    let digits = s.strip_prefix("0x")?;
    digits
        .bytes()
        .all(|c| c.is_ascii_hexdigit())
        .then_some(digits)
}

/// Returns `true` if `s` is `0x` followed by an even number of hex digits.
/// The empty byte string `0x` is valid.
pub fn is_valid_data(s: &str) -> bool {
    matches!(hex_digits(s), Some(digits) if digits.len() % 2 == 0)
}

/// Returns `true` if `s` is `0x` followed by one or more hex digits.
pub fn is_valid_quantity(s: &str) -> bool {
    matches!(hex_digits(s), Some(digits) if !digits.is_empty())
}

/// Returns `true` if `s` is a valid 20-byte DATA string.
pub fn is_valid_address(s: &str) -> bool {
    is_valid_data(s) && s.len() == 2 + ADDRESS_DIGITS
}

/// Returns `true` if `s` is a valid 32-byte DATA string.
pub fn is_valid_hash(s: &str) -> bool {
    is_valid_data(s) && s.len() == 2 + HASH_DIGITS
}

/// Returns `true` if `s` is a valid default block parameter.
///
/// Besides the literal tags, any address shaped value is accepted as a block
/// identifier. Quantity shaped block numbers such as `0x10` are rejected.
pub fn is_block_param(s: &str) -> bool {
    BLOCK_TAGS.contains(&s) || is_valid_address(s)
}

fn ensure<'a>(
    field: &'static str,
    s: &'a str,
    valid: fn(&str) -> bool,
) -> Result<&'a str, ValueError> {
    if valid(s) {
        Ok(s)
    } else {
        Err(ValueError::invalid_argument(field, s))
    }
}

/// Checks that `s` is a valid DATA string.
pub fn ensure_data<'a>(field: &'static str, s: &'a str) -> Result<&'a str, ValueError> {
    ensure(field, s, is_valid_data)
}

/// Checks that `s` is a valid QUANTITY string.
pub fn ensure_quantity<'a>(field: &'static str, s: &'a str) -> Result<&'a str, ValueError> {
    ensure(field, s, is_valid_quantity)
}

/// Checks that `s` is a valid address.
pub fn ensure_address<'a>(field: &'static str, s: &'a str) -> Result<&'a str, ValueError> {
    ensure(field, s, is_valid_address)
}

/// Checks that `s` is a valid hash.
pub fn ensure_hash<'a>(field: &'static str, s: &'a str) -> Result<&'a str, ValueError> {
    ensure(field, s, is_valid_hash)
}

/// Checks that `s` is a valid default block parameter.
pub fn ensure_block_param<'a>(field: &'static str, s: &'a str) -> Result<&'a str, ValueError> {
    ensure(field, s, is_block_param)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data() {
        assert!(is_valid_data("0x"));
        assert!(is_valid_data("0x00"));
        assert!(is_valid_data("0xdeadBEEF"));
        assert!(!is_valid_data("0x0"));
        assert!(!is_valid_data("deadbeef"));
        assert!(!is_valid_data("0xzz"));
        assert!(!is_valid_data(""));
    }

    #[test]
    fn quantity() {
        assert!(is_valid_quantity("0x0"));
        assert!(is_valid_quantity("0x64"));
        assert!(is_valid_quantity("0x00000000064"));
        assert!(!is_valid_quantity("0x"));
        assert!(!is_valid_quantity("100"));
        assert!(!is_valid_quantity("0xg"));
    }

    #[test]
    fn address() {
        assert!(is_valid_address(&format!("0x{}", "a".repeat(40))));
        assert!(is_valid_address("0xf4c875ee7a70fae078c9a4b07dc4f6970a804f6f"));
        assert!(!is_valid_address(&format!("0x{}", "a".repeat(38))));
        assert!(!is_valid_address(&format!("0x{}", "a".repeat(64))));
        assert!(!is_valid_address("not-hex"));
    }

    #[test]
    fn hash() {
        assert!(is_valid_hash(
            "0x3d28f358c11302b9cccbb1ce2458f22ebbd199c3801b159fc27c0f549a5bad2c"
        ));
        assert!(!is_valid_hash("0xf4c875ee7a70fae078c9a4b07dc4f6970a804f6f"));
    }

    #[test]
    fn block_param() {
        assert!(is_block_param("earliest"));
        assert!(is_block_param("latest"));
        assert!(is_block_param("pending"));
        assert!(is_block_param(&format!("0x{}", "0".repeat(39) + "1")));
        assert!(!is_block_param("0x10"));
        assert!(!is_block_param("safe"));
        assert!(!is_block_param("Latest"));
    }

    #[test]
    fn strict_variants_report_field_and_value() {
        assert_eq!(
            ensure_address("address", "0x1234"),
            Err(ValueError::InvalidArgument {
                field: "address",
                value: "0x1234".to_owned(),
            }),
        );
        assert_eq!(ensure_block_param("block", "latest"), Ok("latest"));
        assert!(ensure_hash("hash", "0x").is_err());
        assert!(ensure_data("data", "0x").is_ok());
        assert!(ensure_quantity("value", "0x").is_err());
    }
}
