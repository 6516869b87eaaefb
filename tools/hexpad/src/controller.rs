//! Converter page state
//!
//! Owns the four fields of the converter page and the clipboard handle.
//! Front ends translate their events (keys, clicks) into calls on
//! `Converter` and render its fields back.
//!
//! ```text
//!  ascii_char  --encode-->  hex_value     (copyable)
//!  code_input  --decode-->  char_output   (copyable)
//! ```

use common::Settings;
use hexcode::CodeRange;
use tracing::{debug, error, warn, Level};

use crate::clipboard::Clipboard;

/// The four fields of the page, in focus order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    /// Text to encode (input)
    AsciiChar,
    /// Encoded hex codes (output)
    HexValue,
    /// Hex codes to decode (input)
    CodeInput,
    /// Decoded text (output)
    CharOutput,
}

impl FieldId {
    pub const ALL: [FieldId; 4] = [
        FieldId::AsciiChar,
        FieldId::HexValue,
        FieldId::CodeInput,
        FieldId::CharOutput,
    ];

    pub fn is_input(self) -> bool {
        matches!(self, FieldId::AsciiChar | FieldId::CodeInput)
    }

    pub fn label(self) -> &'static str {
        match self {
            FieldId::AsciiChar => "Text",
            FieldId::HexValue => "Hex codes",
            FieldId::CodeInput => "Hex codes",
            FieldId::CharOutput => "Text",
        }
    }

    fn index(self) -> usize {
        match self {
            FieldId::AsciiChar => 0,
            FieldId::HexValue => 1,
            FieldId::CodeInput => 2,
            FieldId::CharOutput => 3,
        }
    }

    pub fn next(self) -> FieldId {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> FieldId {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Keystroke-level change to an input field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEdit {
    Insert(char),
    Backspace,
    Clear,
    Replace(String),
}

/// What happened on a copy request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied { field: FieldId, chars: usize },
    /// Output field was empty; nothing handed to the clipboard
    Empty(FieldId),
    /// Input fields are not copy targets
    NotCopyable(FieldId),
    Failed { field: FieldId, reason: String },
}

/// Page controller; built once at startup and passed by `&mut` to handlers
pub struct Converter {
    ascii_char: String,
    hex_value: String,
    code_input: String,
    char_output: String,
    range: CodeRange,
    focus: FieldId,
    clipboard: Box<dyn Clipboard>,
    last_copy: Option<CopyOutcome>,
}

impl Converter {
    /// Create the page with its initial values already converted
    pub fn new(settings: &Settings, clipboard: Box<dyn Clipboard>) -> Self {
        let mut converter = Self {
            ascii_char: String::new(),
            hex_value: String::new(),
            code_input: String::new(),
            char_output: String::new(),
            range: settings.decode_range,
            focus: FieldId::AsciiChar,
            clipboard,
            last_copy: None,
        };
        converter.set_text(&settings.initial_text);
        converter.set_codes(&settings.initial_codes);
        converter
    }

    /// Input event on the text field
    pub fn set_text(&mut self, value: &str) {
        self.ascii_char = value.to_string();
        self.refresh_hex();
    }

    /// Input event on the codes field
    pub fn set_codes(&mut self, value: &str) {
        self.code_input = value.to_string();
        self.refresh_chars();
    }

    /// Apply an edit to an input field, then convert
    ///
    /// Edits aimed at output fields are ignored.
    pub fn edit(&mut self, field: FieldId, edit: FieldEdit) {
        let target = match field {
            FieldId::AsciiChar => &mut self.ascii_char,
            FieldId::CodeInput => &mut self.code_input,
            FieldId::HexValue | FieldId::CharOutput => return,
        };

        match edit {
            FieldEdit::Insert(c) => target.push(c),
            FieldEdit::Backspace => {
                target.pop();
            },
            FieldEdit::Clear => target.clear(),
            FieldEdit::Replace(value) => *target = value,
        }

        match field {
            FieldId::AsciiChar => self.refresh_hex(),
            _ => self.refresh_chars(),
        }
    }

    /// Click on a field: copy its value if it is a non-empty output
    pub fn copy(&mut self, field: FieldId) -> CopyOutcome {
        let outcome = if field.is_input() {
            CopyOutcome::NotCopyable(field)
        } else {
            let value = self.value(field).to_string();
            if value.is_empty() {
                CopyOutcome::Empty(field)
            } else {
                match self.clipboard.write_text(&value) {
                    Ok(()) => {
                        debug!("Copied {} chars from {:?}", value.chars().count(), field);
                        CopyOutcome::Copied {
                            field,
                            chars: value.chars().count(),
                        }
                    },
                    Err(e) => {
                        if e.log_level() == Level::WARN {
                            warn!("Clipboard write failed: {} ({})", e, e.error_code());
                        } else {
                            error!("Clipboard write failed: {} ({})", e, e.error_code());
                        }
                        CopyOutcome::Failed {
                            field,
                            reason: e.to_string(),
                        }
                    },
                }
            }
        };

        self.last_copy = Some(outcome.clone());
        outcome
    }

    pub fn value(&self, field: FieldId) -> &str {
        match field {
            FieldId::AsciiChar => &self.ascii_char,
            FieldId::HexValue => &self.hex_value,
            FieldId::CodeInput => &self.code_input,
            FieldId::CharOutput => &self.char_output,
        }
    }

    pub fn focus(&self) -> FieldId {
        self.focus
    }

    pub fn set_focus(&mut self, field: FieldId) {
        self.focus = field;
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn range(&self) -> CodeRange {
        self.range
    }

    /// Switch decoder range and re-decode the codes field
    pub fn set_range(&mut self, range: CodeRange) {
        self.range = range;
        self.refresh_chars();
    }

    pub fn last_copy(&self) -> Option<&CopyOutcome> {
        self.last_copy.as_ref()
    }

    fn refresh_hex(&mut self) {
        self.hex_value = if self.ascii_char.is_empty() {
            String::new()
        } else {
            hexcode::encode(&self.ascii_char).hex
        };
        debug!("encode {:?} -> {:?}", self.ascii_char, self.hex_value);
    }

    fn refresh_chars(&mut self) {
        self.char_output = if self.code_input.trim().is_empty() {
            String::new()
        } else {
            hexcode::decode_with(&self.code_input, self.range)
        };
        debug!("decode {:?} -> {:?}", self.code_input, self.char_output);
    }
}
