//! Hex code conversion library
//!
//! Converts text into space-separated uppercase hex codes (one token per
//! UTF-16 code unit) and converts such token lists back into text.
//!
//! - `encode` never rejects input
//! - `decode` never fails; malformed or out-of-range tokens are skipped
//!
//! ```
//! assert_eq!(hexcode::encode("ABC").hex, "41 42 43");
//! assert_eq!(hexcode::decode("41 zz 0x42 43"), "ABC");
//! ```

pub mod decode;
pub mod encode;
pub mod token;

pub use decode::{decode, decode_with};
pub use encode::{encode, encode_code, Encoded};
pub use token::{is_separator, parse_token, CodeRange, ASCII_MAX, UTF16_MAX};
