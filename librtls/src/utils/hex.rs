//! Hexadecimal helpers for device ids and log output.

use std::fmt::Write;

use crate::{Error, Result};

/// Convert a byte slice to a lowercase hex string without separators.
///
/// Example: `&[0xde, 0xad]` -> `"dead"`
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        // write! never fails writing to a String
        let _ = write!(&mut s, "{:02x}", b);
    }
    s
}

/// Lowercase hex with a single space between bytes, for frame dumps.
///
/// Example: `&[0xde, 0xad]` -> `"de ad"`
pub fn bytes_to_hex_spaced(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse a hex string into bytes. Whitespace, `:` and `-` separators are
/// ignored, so `"de:ad:be:ef"` and `"de ad be ef"` both parse.
pub fn parse_hex(s: &str) -> Result<Vec<u8>> {
    let digits: Vec<u8> = s
        .bytes()
        .filter(|c| !c.is_ascii_whitespace() && *c != b':' && *c != b'-')
        .collect();

    if digits.len() % 2 != 0 {
        return Err(Error::Parse(format!("odd number of hex digits in '{}'", s)));
    }

    digits
        .chunks(2)
        .map(|pair| {
            let text = std::str::from_utf8(pair)
                .map_err(|_| Error::Parse(format!("non-ascii input '{}'", s)))?;
            u8::from_str_radix(text, 16)
                .map_err(|e| Error::Parse(format!("invalid hex pair '{}': {}", text, e)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_to_hex_basic() {
        assert_eq!(bytes_to_hex(&[0xde, 0xad, 0xbe, 0xef]), "deadbeef");
        assert_eq!(bytes_to_hex_spaced(&[0xde, 0xab]), "de ab");
        assert_eq!(bytes_to_hex_spaced(&[]), "");
    }

    #[test]
    fn parse_hex_separators() {
        let expected = vec![0xde, 0xad, 0xbe, 0xef, 0x00, 0x11];
        assert_eq!(parse_hex("deadbeef0011").unwrap(), expected);
        assert_eq!(parse_hex("de:ad:be:ef:00:11").unwrap(), expected);
        assert_eq!(parse_hex("DE-AD-BE-EF-00-11").unwrap(), expected);
        assert_eq!(parse_hex("de ad be ef 00 11").unwrap(), expected);
    }

    #[test]
    fn parse_hex_err_cases() {
        assert!(matches!(parse_hex("abc"), Err(Error::Parse(_))));
        assert!(matches!(parse_hex("zz"), Err(Error::Parse(_))));
        assert!(parse_hex("éé").is_err());
    }
}
