//! Token parsing and range validation shared by the decoder

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Highest code accepted by the default (7-bit ASCII) decoder
pub const ASCII_MAX: i64 = 0x7F;

/// Highest UTF-16 code unit
pub const UTF16_MAX: i64 = 0xFFFF;

/// Range of codes the decoder accepts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeRange {
    /// [0, 7F]
    #[default]
    Ascii,
    /// [0, FFFF], reassembled as UTF-16 (unpaired surrogates are dropped)
    Utf16,
}

impl CodeRange {
    pub fn max(self) -> i64 {
        match self {
            CodeRange::Ascii => ASCII_MAX,
            CodeRange::Utf16 => UTF16_MAX,
        }
    }

    pub fn contains(self, value: i64) -> bool {
        (0..=self.max()).contains(&value)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CodeRange::Ascii => "ascii",
            CodeRange::Utf16 => "utf16",
        }
    }
}

impl fmt::Display for CodeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CodeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ascii" => Ok(CodeRange::Ascii),
            "utf16" | "utf-16" => Ok(CodeRange::Utf16),
            _ => Err(format!("Unknown code range '{}'. Use ascii or utf16", s)),
        }
    }
}

/// Token separator for code lists
///
/// Unicode whitespace, except NEL (U+0085), plus the byte order mark
/// (U+FEFF). A BOM at the start of piped input separates instead of
/// corrupting the first token.
pub fn is_separator(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{FEFF}'
}

/// Parse a token as a base-16 integer, leniently
///
/// Accepted shape: `[+|-][0x|0X]<hex digits>[anything]`. Parsing stops at
/// the first non-hex character, so `"41zz"` is `0x41`. A token without any
/// leading hex digit is not a number (`None`). Magnitude saturates at
/// `i64::MAX`.
pub fn parse_token(token: &str) -> Option<i64> {
    let (negative, unsigned) = if let Some(rest) = token.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = token.strip_prefix('+') {
        (false, rest)
    } else {
        (false, token)
    };

    let digits = unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
        .unwrap_or(unsigned);

    let mut value: i64 = 0;
    let mut seen_digit = false;
    for c in digits.chars() {
        match c.to_digit(16) {
            Some(d) => {
                value = value.saturating_mul(16).saturating_add(i64::from(d));
                seen_digit = true;
            },
            None => break,
        }
    }

    if !seen_digit {
        return None;
    }
    Some(if negative { -value } else { value })
}

/// Parse a token and keep it only if it falls inside `range`
pub(crate) fn accept_token(token: &str, range: CodeRange) -> Option<u16> {
    parse_token(token)
        .filter(|v| range.contains(*v))
        .and_then(|v| u16::try_from(v).ok())
}
