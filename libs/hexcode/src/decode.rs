//! Hex codes -> text

use crate::token::{accept_token, is_separator, CodeRange};

/// Decode whitespace-separated hex tokens into text (7-bit ASCII range)
///
/// Invalid or out-of-range tokens are skipped; processing continues with the
/// next token.
pub fn decode(codes: &str) -> String {
    decode_with(codes, CodeRange::Ascii)
}

/// Decode whitespace-separated hex tokens, accepting codes inside `range`
pub fn decode_with(codes: &str, range: CodeRange) -> String {
    let trimmed = codes.trim_matches(is_separator);
    if trimmed.is_empty() {
        return String::new();
    }

    let units = trimmed
        .split(is_separator)
        .filter(|token| !token.is_empty())
        .filter_map(|token| accept_token(token, range));

    match range {
        CodeRange::Ascii => units.map(|unit| char::from(unit as u8)).collect(),
        CodeRange::Utf16 => char::decode_utf16(units).filter_map(Result::ok).collect(),
    }
}
