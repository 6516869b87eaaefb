//! Clipboard sinks for copy-on-click
//!
//! The terminal has no clipboard API of its own; `Osc52Clipboard` asks the
//! terminal emulator to set the system clipboard via the OSC 52 escape.

use std::io::{self, Write};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use errors::{HexpadError, Result};

/// Largest text we hand to the terminal (many emulators cap OSC 52 payloads)
pub const MAX_CLIPBOARD_BYTES: usize = 74_994;

/// Destination for copied text
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// Build the OSC 52 "set clipboard" sequence for `text`
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text.as_bytes()))
}

/// Writes OSC 52 sequences to a terminal stream
pub struct Osc52Clipboard<W: Write> {
    out: W,
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl Osc52Clipboard<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn write_text(&mut self, text: &str) -> Result<()> {
        if text.len() > MAX_CLIPBOARD_BYTES {
            return Err(HexpadError::clipboard(format!(
                "{} bytes exceeds the {} byte limit",
                text.len(),
                MAX_CLIPBOARD_BYTES
            )));
        }

        self.out
            .write_all(osc52_sequence(text).as_bytes())
            .and_then(|_| self.out.flush())
            .map_err(|e| HexpadError::clipboard(e.to_string()))
    }
}

/// Used when copying is turned off in the settings
pub struct DisabledClipboard;

impl Clipboard for DisabledClipboard {
    fn write_text(&mut self, _text: &str) -> Result<()> {
        Err(HexpadError::ClipboardUnavailable(
            "disabled in settings (clipboard: false)".to_string(),
        ))
    }
}

/// Pick the clipboard sink for the current settings
pub fn from_settings(enabled: bool) -> Box<dyn Clipboard> {
    if enabled {
        Box::new(Osc52Clipboard::stdout())
    } else {
        Box::new(DisabledClipboard)
    }
}
