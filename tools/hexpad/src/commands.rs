//! One-shot encode/decode/config commands

use std::io::{self, BufRead, Read};

use anyhow::{Context, Result};
use common::Settings;
use hexcode::{CodeRange, Encoded};
use tracing::debug;

/// Command input: the joined arguments, or stdin when there are none
///
/// A single trailing newline from stdin is dropped so `echo ABC | hexpad
/// encode` does not encode the `0A`.
pub fn read_input(args: &[String], mut stdin: impl BufRead) -> io::Result<String> {
    if !args.is_empty() {
        return Ok(args.join(" "));
    }

    let mut buf = String::new();
    stdin.read_to_string(&mut buf)?;
    if buf.ends_with('\n') {
        buf.pop();
        if buf.ends_with('\r') {
            buf.pop();
        }
    }
    Ok(buf)
}

/// Render an encode result as plain hex or as the JSON record
pub fn render_encoded(encoded: &Encoded, json: bool) -> Result<String> {
    if json {
        serde_json::to_string(encoded).context("Failed to serialize encode result")
    } else {
        Ok(encoded.hex.clone())
    }
}

pub fn handle_encode(text: &[String], json: bool) -> Result<()> {
    let input = read_input(text, io::stdin().lock()).context("Failed to read input")?;
    let encoded = hexcode::encode(&input);
    debug!("Encoded {} code units", encoded.len());
    println!("{}", render_encoded(&encoded, json)?);
    Ok(())
}

pub fn handle_decode(codes: &[String], range: CodeRange) -> Result<()> {
    let input = read_input(codes, io::stdin().lock()).context("Failed to read input")?;
    let decoded = hexcode::decode_with(&input, range);
    debug!("Decoded {} chars ({} range)", decoded.chars().count(), range);
    println!("{}", decoded);
    Ok(())
}

pub fn handle_config(settings: &Settings) -> Result<()> {
    print!("{}", settings.to_yaml()?);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_input_joins_args() {
        let args = vec!["41".to_string(), "42".to_string()];
        assert_eq!(read_input(&args, Cursor::new("ignored")).unwrap(), "41 42");
    }

    #[test]
    fn test_read_input_from_stdin() {
        assert_eq!(read_input(&[], Cursor::new("ABC\n")).unwrap(), "ABC");
        assert_eq!(read_input(&[], Cursor::new("ABC\r\n")).unwrap(), "ABC");
        assert_eq!(read_input(&[], Cursor::new("A\n\n")).unwrap(), "A\n");
        assert_eq!(read_input(&[], Cursor::new("")).unwrap(), "");
    }

    #[test]
    fn test_render_encoded() {
        let encoded = hexcode::encode("AB");
        assert_eq!(render_encoded(&encoded, false).unwrap(), "41 42");
        assert_eq!(
            render_encoded(&encoded, true).unwrap(),
            r#"{"hex":"41 42"}"#
        );
        assert_eq!(
            render_encoded(&Encoded::default(), true).unwrap(),
            r#"{"hex":""}"#
        );
    }
}
