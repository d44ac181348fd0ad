//! Colon delimited hex text, as used on the wire (`4F:84:21:00:04`).

use crate::error::{CecError, CecResult};

/// Separator between bytes in wire text.
pub const BYTE_DELIMITER: char = ':';

/// Format bytes as uppercase, colon separated hex pairs.
/// ```
/// # use cec_follower::hex::to_hex;
/// assert_eq!(to_hex(b"pi4"), "70:69:34");
/// assert_eq!(to_hex(&[]), "");
/// ```
pub fn to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 {
            out.push(BYTE_DELIMITER);
        }
        out.push(nibble_char(b >> 4));
        out.push(nibble_char(b & 0xf));
    }
    out
}

/// Uppercase hex digit for the low nibble of `n`.
pub(crate) fn nibble_char(n: u8) -> char {
    char::from_digit(u32::from(n & 0xf), 16)
        .unwrap_or('0')
        .to_ascii_uppercase()
}

/// Value of a single hex digit.
pub(crate) fn parse_nibble(c: char) -> Option<u8> {
    c.to_digit(16).map(|d| d as u8)
}

/// Parse a token of one or two hex digits.
///
/// `input` is the whole text being decoded and is only used for the error.
pub fn parse_hex_byte(token: &str, input: &str) -> CecResult<u8> {
    if token.is_empty() || token.len() > 2 {
        return Err(CecError::malformed(
            input,
            format!("`{token}` is not a one or two digit hex byte"),
        ));
    }
    token.chars().try_fold(0u8, |acc, c| match parse_nibble(c) {
        Some(n) => Ok(acc << 4 | n),
        None => Err(CecError::malformed(
            input,
            format!("invalid hex digit `{c}` in `{token}`"),
        )),
    })
}

/// Parse colon separated hex bytes.
/// ```
/// # use cec_follower::hex::parse_hex;
/// assert_eq!(parse_hex("48:65:6c").unwrap(), b"Hel");
/// assert!(parse_hex("48::6C").is_err());
/// ```
pub fn parse_hex(text: &str) -> CecResult<Vec<u8>> {
    if text.trim().is_empty() {
        return Err(CecError::MissingInput("hex bytes"));
    }
    text.split(BYTE_DELIMITER)
        .map(|token| parse_hex_byte(token, text))
        .collect()
}
