//! Integration tests for encode/decode behavior as seen by callers
//!
//! Covers the round-trip law on 7-bit text, the wide (UTF-16) decoder and
//! the JSON shape of the encode record.

#![allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable

use hexcode::{decode, decode_with, encode, CodeRange, Encoded};

/// Every 7-bit character, in order
fn all_ascii() -> String {
    (0u8..=0x7F).map(char::from).collect()
}

#[test]
fn test_round_trip_every_ascii_char() {
    for c in all_ascii().chars() {
        let text = c.to_string();
        assert_eq!(decode(&encode(&text).hex), text, "code {:#x}", c as u32);
    }
}

#[test]
fn test_round_trip_ascii_sentences() {
    let samples = [
        "",
        "A",
        "ABC",
        "Hello, World!",
        "  leading and trailing  ",
        "tabs\tand\nnewlines",
        "~!@#$%^&*()_+{}|:\"<>?",
    ];
    for sample in samples {
        assert_eq!(decode(&encode(sample).hex), sample);
    }
    let everything = all_ascii();
    assert_eq!(decode(&encode(&everything).hex), everything);
}

#[test]
fn test_non_ascii_does_not_round_trip_by_default() {
    let encoded = encode("café");
    assert_eq!(encoded.hex, "63 61 66 E9");
    assert_eq!(decode(&encoded.hex), "caf");
}

#[test]
fn test_wide_round_trip_any_text() {
    let samples = ["café", "한글 텍스트", "emoji 😀🎉", "mixed A\u{7f}\u{80}\u{ffff}"];
    for sample in samples {
        assert_eq!(decode_with(&encode(sample).hex, CodeRange::Utf16), sample);
    }
}

#[test]
fn test_decode_equivalent_spellings() {
    assert_eq!(decode("41"), "A");
    assert_eq!(decode("0x41"), decode("41"));
    assert_eq!(decode("0X41"), decode("41"));
}

#[test]
fn test_decode_never_truncates_after_bad_token() {
    assert_eq!(decode("41 zz 42"), "AB");
    assert_eq!(decode("zz 41 -1 80 42 0x"), "AB");
}

#[test]
fn test_decode_is_idempotent_across_calls() {
    let input = " 41   42\t43 ";
    assert_eq!(decode(input), "ABC");
    assert_eq!(decode(input), decode(input));
}

#[test]
fn test_encoded_json_shape() {
    let encoded = encode("ABC");
    let json = serde_json::to_value(&encoded).unwrap();
    assert_eq!(json, serde_json::json!({ "hex": "41 42 43" }));

    let back: Encoded = serde_json::from_value(json).unwrap();
    assert_eq!(back, encoded);
}

#[test]
fn test_code_range_serde_names() {
    let range: CodeRange = serde_json::from_str("\"utf16\"").unwrap();
    assert_eq!(range, CodeRange::Utf16);
    assert_eq!(serde_json::to_string(&CodeRange::Ascii).unwrap(), "\"ascii\"");
}
