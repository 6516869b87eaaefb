//! Interactive REPL for hex conversion
//!
//! mysql-cli style prompt: one command per line, Tab completes command names.

use anyhow::Result;
use colored::*;
use errors::HexpadError;
use hexcode::CodeRange;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Editor, Helper};
use tracing::debug;

const COMMANDS: [&str; 8] = [
    "ENC", "ENCODE", "DEC", "DECODE", "RANGE", "HELP", "QUIT", "EXIT",
];

// ============================================================================
// Tab Completion Helper
// ============================================================================

/// REPL helper providing Tab completion for commands and range names
struct HexpadHelper;

impl Helper for HexpadHelper {}

impl Hinter for HexpadHelper {
    type Hint = String;

    fn hint(&self, _line: &str, _pos: usize, _ctx: &rustyline::Context<'_>) -> Option<String> {
        None
    }
}

impl Highlighter for HexpadHelper {}

impl Validator for HexpadHelper {}

impl Completer for HexpadHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if !line.contains(' ') {
            return Ok(complete_command(line));
        }

        // RANGE takes ascii|utf16
        if let Some((cmd, arg)) = line.split_once(' ') {
            if cmd.eq_ignore_ascii_case("RANGE") && !arg.contains(' ') {
                return Ok((cmd.len() + 1, complete_range(arg)));
            }
        }

        Ok((pos, vec![]))
    }
}

/// Complete command names
fn complete_command(prefix: &str) -> (usize, Vec<Pair>) {
    let prefix_upper = prefix.to_uppercase();

    let matches: Vec<Pair> = COMMANDS
        .iter()
        .filter(|cmd| cmd.starts_with(&prefix_upper))
        .map(|cmd| Pair {
            display: (*cmd).to_string(),
            replacement: (*cmd).to_string(),
        })
        .collect();

    (0, matches)
}

fn complete_range(prefix: &str) -> Vec<Pair> {
    let prefix_lower = prefix.to_lowercase();
    [CodeRange::Ascii, CodeRange::Utf16]
        .iter()
        .map(|r| r.as_str())
        .filter(|name| name.starts_with(&prefix_lower))
        .map(|name| Pair {
            display: name.to_string(),
            replacement: name.to_string(),
        })
        .collect()
}

// ============================================================================
// Command execution
// ============================================================================

/// Result of one REPL line
#[derive(Debug, PartialEq, Eq)]
pub enum ReplAction {
    /// Print a conversion result
    Output(String),
    /// Print an informational message
    Message(String),
    Help,
    Quit,
    Unknown(String),
    Nothing,
}

/// Session state carried between lines
pub struct ReplSession {
    range: CodeRange,
}

impl ReplSession {
    pub fn new(range: CodeRange) -> Self {
        Self { range }
    }

    pub fn range(&self) -> CodeRange {
        self.range
    }
}

/// Split `input` into the command word and everything after the first
/// separator (spaces inside the argument are kept)
fn split_command(input: &str) -> (&str, &str) {
    match input.split_once(|c: char| c.is_whitespace()) {
        Some((cmd, rest)) => (cmd, rest),
        None => (input, ""),
    }
}

/// Execute a single REPL line
pub fn execute_repl_command(session: &mut ReplSession, input: &str) -> ReplAction {
    let input = input.trim_start();
    if input.trim().is_empty() {
        return ReplAction::Nothing;
    }

    let (cmd, arg) = split_command(input);
    match cmd.to_uppercase().as_str() {
        "ENC" | "ENCODE" => {
            if arg.is_empty() {
                ReplAction::Message("Usage: ENC <text>".to_string())
            } else {
                ReplAction::Output(hexcode::encode(arg).hex)
            }
        },
        "DEC" | "DECODE" => {
            if arg.trim().is_empty() {
                ReplAction::Message("Usage: DEC <hex codes>".to_string())
            } else {
                ReplAction::Output(hexcode::decode_with(arg, session.range))
            }
        },
        "RANGE" => match arg.trim() {
            "" => ReplAction::Message(format!("Decode range: {}", session.range())),
            name => match name.parse::<CodeRange>() {
                Ok(range) => {
                    session.range = range;
                    debug!("REPL decode range -> {}", range);
                    ReplAction::Message(format!("Decode range: {}", range))
                },
                Err(e) => ReplAction::Message(e),
            },
        },
        "HELP" | "?" => ReplAction::Help,
        "QUIT" | "EXIT" | "Q" => ReplAction::Quit,
        _ => ReplAction::Unknown(cmd.to_string()),
    }
}

/// Outcome of one readline call
#[derive(Debug, PartialEq, Eq)]
enum LineEvent {
    Line(String),
    Interrupted,
    Eof,
}

/// Ctrl+C and Ctrl+D are session events; any other readline error ends the
/// REPL with an error
fn next_line(read: rustyline::Result<String>) -> errors::Result<LineEvent> {
    match read {
        Ok(line) => Ok(LineEvent::Line(line)),
        Err(ReadlineError::Interrupted) => Ok(LineEvent::Interrupted),
        Err(ReadlineError::Eof) => Ok(LineEvent::Eof),
        Err(e) => Err(HexpadError::Readline(e.to_string())),
    }
}

/// Interactive REPL loop
pub fn run_repl(range: CodeRange) -> Result<()> {
    let config = rustyline::Config::builder()
        .completion_type(rustyline::CompletionType::List)
        .build();
    let mut rl = Editor::with_config(config)
        .map_err(|e| HexpadError::Readline(format!("Failed to initialize readline: {}", e)))?;
    rl.set_helper(Some(HexpadHelper));

    let mut session = ReplSession::new(range);

    println!("{}", "hexpad - text <-> hex codes".bright_cyan().bold());
    println!(
        "Type '{}' for commands, {} for completion\n",
        "help".bright_yellow(),
        "Tab".bright_cyan()
    );

    loop {
        let line = match next_line(rl.readline("hexpad> "))? {
            LineEvent::Line(line) => line,
            LineEvent::Interrupted => {
                // Ctrl+C - ignore and continue
                println!("^C");
                continue;
            },
            LineEvent::Eof => break,
        };

        if line.trim().is_empty() {
            continue;
        }

        // Add to history (ignore errors)
        let _ = rl.add_history_entry(line.as_str());

        match execute_repl_command(&mut session, &line) {
            ReplAction::Output(text) => println!("{}", text),
            ReplAction::Message(msg) => println!("{}", msg.bright_black()),
            ReplAction::Help => print_help(),
            ReplAction::Quit => break,
            ReplAction::Unknown(cmd) => println!(
                "Unknown command '{}'. Type '{}' for available commands.",
                cmd.red(),
                "help".bright_yellow()
            ),
            ReplAction::Nothing => {},
        }
    }

    println!("Bye!");
    Ok(())
}

/// Print help message
fn print_help() {
    println!("{}", "=== Available Commands ===".bright_cyan());
    println!();
    println!(
        "  {}        Text to hex codes",
        "ENC <text>".bright_yellow()
    );
    println!(
        "  {}   Hex codes to text (invalid codes are skipped)",
        "DEC <codes>".bright_yellow()
    );
    println!(
        "  {} Show or set decode range (ascii, utf16)",
        "RANGE [name]".bright_yellow()
    );
    println!(
        "  {}              Show this help message",
        "HELP".bright_yellow()
    );
    println!("  {}              Exit", "QUIT".bright_yellow());
    println!();
    println!("{}", "=== Examples ===".bright_cyan());
    println!();
    println!("  ENC ABC                 -> 41 42 43");
    println!("  DEC 41 0x42 zz 43       -> ABC");
    println!("  RANGE utf16             accept codes up to FFFF");
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;

    fn session() -> ReplSession {
        ReplSession::new(CodeRange::Ascii)
    }

    #[test]
    fn test_encode_keeps_inner_spaces() {
        let mut s = session();
        assert_eq!(
            execute_repl_command(&mut s, "ENC a b"),
            ReplAction::Output("61 20 62".to_string())
        );
        assert_eq!(
            execute_repl_command(&mut s, "enc  x"),
            ReplAction::Output("20 78".to_string())
        );
    }

    #[test]
    fn test_decode() {
        let mut s = session();
        assert_eq!(
            execute_repl_command(&mut s, "DEC 41 zz 42"),
            ReplAction::Output("AB".to_string())
        );
        assert_eq!(
            execute_repl_command(&mut s, "decode 0x41\t0X42"),
            ReplAction::Output("AB".to_string())
        );
    }

    #[test]
    fn test_missing_argument_shows_usage() {
        let mut s = session();
        assert!(matches!(
            execute_repl_command(&mut s, "ENC"),
            ReplAction::Message(msg) if msg.starts_with("Usage")
        ));
        assert!(matches!(
            execute_repl_command(&mut s, "DEC   "),
            ReplAction::Message(msg) if msg.starts_with("Usage")
        ));
    }

    #[test]
    fn test_range_switch() {
        let mut s = session();
        assert_eq!(
            execute_repl_command(&mut s, "DEC E9"),
            ReplAction::Output(String::new())
        );
        execute_repl_command(&mut s, "RANGE utf16");
        assert_eq!(s.range(), CodeRange::Utf16);
        assert_eq!(
            execute_repl_command(&mut s, "DEC E9"),
            ReplAction::Output("é".to_string())
        );
        assert!(matches!(
            execute_repl_command(&mut s, "RANGE octal"),
            ReplAction::Message(_)
        ));
        assert_eq!(s.range(), CodeRange::Utf16);
    }

    #[test]
    fn test_control_commands() {
        let mut s = session();
        assert_eq!(execute_repl_command(&mut s, "help"), ReplAction::Help);
        assert_eq!(execute_repl_command(&mut s, "?"), ReplAction::Help);
        assert_eq!(execute_repl_command(&mut s, "q"), ReplAction::Quit);
        assert_eq!(execute_repl_command(&mut s, "   "), ReplAction::Nothing);
        assert_eq!(
            execute_repl_command(&mut s, "frobnicate 1"),
            ReplAction::Unknown("frobnicate".to_string())
        );
    }

    #[test]
    fn test_next_line_session_events() {
        assert_eq!(
            next_line(Ok("ENC A".to_string())).unwrap(),
            LineEvent::Line("ENC A".to_string())
        );
        assert_eq!(
            next_line(Err(ReadlineError::Interrupted)).unwrap(),
            LineEvent::Interrupted
        );
        assert_eq!(next_line(Err(ReadlineError::Eof)).unwrap(), LineEvent::Eof);
    }

    #[test]
    fn test_next_line_io_failure_is_error() {
        let err = next_line(Err(ReadlineError::Io(std::io::Error::other("tty closed"))))
            .unwrap_err();
        assert_eq!(err.error_code(), "READLINE_ERROR");
        assert!(err.to_string().contains("tty closed"));
    }

    #[test]
    fn test_complete_command() {
        let (start, pairs) = complete_command("de");
        assert_eq!(start, 0);
        let names: Vec<_> = pairs.iter().map(|p| p.replacement.as_str()).collect();
        assert_eq!(names, vec!["DEC", "DECODE"]);
    }

    #[test]
    fn test_complete_range() {
        let names: Vec<_> = complete_range("u").into_iter().map(|p| p.replacement).collect();
        assert_eq!(names, vec!["utf16"]);
        assert_eq!(complete_range("").len(), 2);
    }
}
