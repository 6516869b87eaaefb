//! Full-screen converter page
//!
//! Two blocks, each with an input field and an output field:
//!
//! ```text
//! ┌ Text → Hex ───────────────┐
//! │ [Text      ] [Hex codes ] │
//! └───────────────────────────┘
//! ┌ Hex → Text ───────────────┐
//! │ [Hex codes ] [Text      ] │
//! └───────────────────────────┘
//! ```
//!
//! Typing converts live. Clicking an output field (or Enter / Ctrl+Y while it
//! is focused) copies its value.

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use errors::HexpadError;
use hexcode::CodeRange;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Terminal;
use tracing::{error, info};

use crate::controller::{Converter, CopyOutcome, FieldEdit, FieldId};

/// What the event loop should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopAction {
    Continue,
    Quit,
}

/// Screen rectangles of the four fields from the last draw
#[derive(Debug, Clone, Default)]
pub struct FieldAreas {
    areas: Vec<(FieldId, Rect)>,
}

impl FieldAreas {
    pub fn set(&mut self, field: FieldId, area: Rect) {
        self.areas.retain(|(f, _)| *f != field);
        self.areas.push((field, area));
    }

    /// Field under the given terminal cell
    pub fn hit(&self, column: u16, row: u16) -> Option<FieldId> {
        self.areas
            .iter()
            .find(|(_, area)| area.contains(Position::new(column, row)))
            .map(|(field, _)| *field)
    }
}

/// Run the converter page until the user quits
pub fn run_ui(converter: &mut Converter, tick_rate: Duration) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    stdout
        .execute(EnterAlternateScreen)
        .context("Failed to enter alternate screen")?;
    stdout
        .execute(EnableMouseCapture)
        .context("Failed to enable mouse capture")?;
    stdout
        .execute(EnableBracketedPaste)
        .context("Failed to enable bracketed paste")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    info!("Converter page started");
    let result = run_ui_loop(&mut terminal, converter, tick_rate);

    let restored = restore_terminal(&mut terminal);
    info!("Converter page closed");

    // A loop failure outranks a restore failure
    result.and(restored.map_err(anyhow::Error::from))
}

/// Undo the page's terminal setup, attempting every step
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> errors::Result<()> {
    let steps = [
        ("disable raw mode", disable_raw_mode()),
        (
            "disable bracketed paste",
            terminal.backend_mut().execute(DisableBracketedPaste).map(|_| ()),
        ),
        (
            "disable mouse capture",
            terminal.backend_mut().execute(DisableMouseCapture).map(|_| ()),
        ),
        (
            "leave alternate screen",
            terminal.backend_mut().execute(LeaveAlternateScreen).map(|_| ()),
        ),
        ("show cursor", terminal.show_cursor()),
    ];
    first_restore_failure(steps)
}

/// Log every failed restore step and report the first one
fn first_restore_failure<I>(steps: I) -> errors::Result<()>
where
    I: IntoIterator<Item = (&'static str, io::Result<()>)>,
{
    let mut first = None;
    for (step, outcome) in steps {
        if let Err(e) = outcome {
            error!("Failed to {}: {}", step, e);
            first.get_or_insert_with(|| {
                HexpadError::Terminal(format!("Failed to {}: {}", step, e))
            });
        }
    }
    match first {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn run_ui_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    converter: &mut Converter,
    tick_rate: Duration,
) -> Result<()> {
    let mut areas = FieldAreas::default();

    loop {
        terminal.draw(|f| draw_page(f, converter, &mut areas))?;

        if !event::poll(tick_rate).context("Failed to poll events")? {
            continue;
        }

        let action = match event::read().context("Failed to read event")? {
            Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(converter, key),
            Event::Mouse(mouse) => handle_mouse(converter, &areas, mouse),
            Event::Paste(text) => {
                paste(converter, &text);
                LoopAction::Continue
            },
            _ => LoopAction::Continue,
        };

        if action == LoopAction::Quit {
            return Ok(());
        }
    }
}

/// Append pasted text to the focused input as a single edit
fn paste(converter: &mut Converter, text: &str) {
    let field = converter.focus();
    if !field.is_input() {
        return;
    }
    let mut value = converter.value(field).to_string();
    value.push_str(text);
    converter.edit(field, FieldEdit::Replace(value));
}

/// Translate a key press into controller calls
pub fn handle_key(converter: &mut Converter, key: KeyEvent) -> LoopAction {
    let focus = converter.focus();
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => return LoopAction::Quit,
        KeyCode::Char('c') if ctrl => return LoopAction::Quit,
        KeyCode::Tab => converter.focus_next(),
        KeyCode::BackTab => converter.focus_prev(),
        KeyCode::Up => converter.focus_prev(),
        KeyCode::Down => converter.focus_next(),
        KeyCode::Char('y') if ctrl => {
            converter.copy(focus);
        },
        KeyCode::Enter if !focus.is_input() => {
            converter.copy(focus);
        },
        KeyCode::Enter => converter.focus_next(),
        KeyCode::Char('u') if ctrl => converter.edit(focus, FieldEdit::Clear),
        KeyCode::Char('r') if ctrl => {
            let next = match converter.range() {
                CodeRange::Ascii => CodeRange::Utf16,
                CodeRange::Utf16 => CodeRange::Ascii,
            };
            converter.set_range(next);
        },
        KeyCode::Backspace => converter.edit(focus, FieldEdit::Backspace),
        KeyCode::Char(c) if !ctrl => converter.edit(focus, FieldEdit::Insert(c)),
        _ => {},
    }

    LoopAction::Continue
}

/// Left click: copy an output field, focus an input field
pub fn handle_mouse(
    converter: &mut Converter,
    areas: &FieldAreas,
    mouse: MouseEvent,
) -> LoopAction {
    if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
        if let Some(field) = areas.hit(mouse.column, mouse.row) {
            converter.set_focus(field);
            if !field.is_input() {
                converter.copy(field);
            }
        }
    }
    LoopAction::Continue
}

/// Status line text for the last copy attempt
fn copy_status(outcome: Option<&CopyOutcome>) -> (String, Style) {
    match outcome {
        None => (String::new(), Style::default()),
        Some(CopyOutcome::Copied { field, chars }) => (
            format!("Copied {} ({} chars)", field.label(), chars),
            Style::default().fg(Color::Green),
        ),
        Some(CopyOutcome::Empty(field)) => (
            format!("{} is empty, nothing copied", field.label()),
            Style::default().fg(Color::Yellow),
        ),
        Some(CopyOutcome::NotCopyable(_)) => (
            "Only result fields can be copied".to_string(),
            Style::default().fg(Color::Yellow),
        ),
        Some(CopyOutcome::Failed { reason, .. }) => {
            (format!("Copy failed: {}", reason), Style::default().fg(Color::Red))
        },
    }
}

/// Display columns taken by `c` (Hangul and most emoji take two)
fn char_width(c: char) -> usize {
    let mut buf = [0u8; 4];
    Span::raw(&*c.encode_utf8(&mut buf)).width()
}

/// Longest tail of `text` that fits in `width` display columns
fn visible_tail(text: &str, width: usize) -> &str {
    let mut used = 0;
    let mut start = text.len();
    for (idx, c) in text.char_indices().rev() {
        used += char_width(c);
        if used > width {
            break;
        }
        start = idx;
    }
    &text[start..]
}

fn field_widget<'a>(
    converter: &'a Converter,
    field: FieldId,
    inner_width: usize,
) -> Paragraph<'a> {
    let focused = converter.focus() == field;
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let title = if field.is_input() {
        format!(" {} ", field.label())
    } else {
        format!(" {} (click to copy) ", field.label())
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title);

    let value = converter.value(field);
    if field.is_input() {
        // Leave room for the cursor
        let shown = visible_tail(value, inner_width.saturating_sub(1));
        Paragraph::new(shown).block(block)
    } else {
        Paragraph::new(value)
            .style(Style::default().fg(Color::Cyan))
            .wrap(Wrap { trim: false })
            .block(block)
    }
}

fn draw_page(f: &mut ratatui::Frame, converter: &Converter, areas: &mut FieldAreas) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = Paragraph::new(format!(
        " Text ⇄ Hex codes   decode range: {}",
        converter.range()
    ))
    .style(Style::default().add_modifier(Modifier::BOLD))
    .block(Block::default().borders(Borders::ALL).title(" hexpad "));
    f.render_widget(title, rows[0]);

    let sections = [
        (" Text → Hex ", rows[1], FieldId::AsciiChar, FieldId::HexValue),
        (" Hex → Text ", rows[2], FieldId::CodeInput, FieldId::CharOutput),
    ];

    for (name, area, input, output) in sections {
        let outer = Block::default().borders(Borders::ALL).title(name);
        let inner = outer.inner(area);
        f.render_widget(outer, area);

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(inner);

        for (field, rect) in [(input, cols[0]), (output, cols[1])] {
            areas.set(field, rect);
            let inner_width = rect.width.saturating_sub(2) as usize;
            f.render_widget(field_widget(converter, field, inner_width), rect);

            if field.is_input() && converter.focus() == field && rect.height > 2 {
                let shown = visible_tail(converter.value(field), inner_width.saturating_sub(1));
                let shown_width = u16::try_from(Span::raw(shown).width()).unwrap_or(u16::MAX);
                let x = rect.x.saturating_add(1).saturating_add(shown_width);
                let x = x.min(rect.right().saturating_sub(2));
                f.set_cursor_position(Position::new(x, rect.y + 1));
            }
        }
    }

    let (status_text, status_style) = copy_status(converter.last_copy());
    let help = Line::from(vec![
        Span::styled(status_text, status_style),
        Span::raw("  │  "),
        Span::styled(
            "[Tab] focus  [Enter/Ctrl+Y/click] copy  [Ctrl+U] clear  [Ctrl+R] range  [Esc] quit",
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    f.render_widget(
        Paragraph::new(help).block(Block::default().borders(Borders::ALL)),
        rows[3],
    );
}
