//! Text -> hex codes

use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};

/// Result of encoding a piece of text
///
/// Kept as a record so more renderings can sit next to `hex` later.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encoded {
    /// Uppercase hex codes joined by single spaces, e.g. `"41 42 43"`
    pub hex: String,
}

impl Encoded {
    pub fn is_empty(&self) -> bool {
        self.hex.is_empty()
    }

    /// Number of code tokens
    pub fn len(&self) -> usize {
        self.hex.split(' ').filter(|t| !t.is_empty()).count()
    }
}

impl fmt::Display for Encoded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex)
    }
}

/// Render a single code unit as unpadded uppercase hex
/// Example: 10 -> "A", 65 -> "41", 0 -> "0"
pub fn encode_code(unit: u16) -> String {
    format!("{:X}", unit)
}

/// Encode every UTF-16 code unit of `text` as a hex token
///
/// No range check is applied: characters outside ASCII produce tokens above
/// `7F` (surrogate pairs produce two tokens).
pub fn encode(text: &str) -> Encoded {
    let mut hex = String::with_capacity(text.len() * 3);
    for (i, unit) in text.encode_utf16().enumerate() {
        if i > 0 {
            hex.push(' ');
        }
        // Writing to String buffer is infallible
        let _ = write!(&mut hex, "{:X}", unit);
    }
    Encoded { hex }
}
