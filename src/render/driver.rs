//! Crossterm terminal output backend.
//!
//! The `Driver` wraps a buffered writer and provides methods for entering and
//! leaving the interactive terminal mode (alternate screen, raw mode, mouse
//! capture) and for writing compositor cell updates. Color strings are parsed as
//! named colors or `#rrggbb` hex values.

use std::io::{self, BufWriter, Stdout, Write};

use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute, queue,
    style::{Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};

use super::compositor::CellUpdate;
use super::strip::CellStyle;

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Terminal output backend using crossterm.
///
/// Does not enter the alternate screen on creation; call [`Driver::start`].
pub struct Driver<W: Write = Stdout> {
    writer: BufWriter<W>,
}

impl Driver<Stdout> {
    /// Create a new driver wrapping stdout.
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Get the terminal size (columns, rows).
    pub fn terminal_size() -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// Enter the alternate screen, enable raw mode and mouse capture, hide the cursor.
    ///
    /// Raw mode is switched back off if the screen setup fails.
    pub fn start(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(self.writer, EnterAlternateScreen, EnableMouseCapture, cursor::Hide)
            .inspect_err(|_| {
                let _ = terminal::disable_raw_mode();
            })
    }

    /// Undo [`Driver::start`].
    pub fn stop(&mut self) -> io::Result<()> {
        execute!(self.writer, cursor::Show, DisableMouseCapture, LeaveAlternateScreen)?;
        terminal::disable_raw_mode()
    }
}

impl Default for Driver<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> Driver<W> {
    /// Create a driver writing to `writer`.
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
        }
    }

    /// Write a batch of cell updates and flush.
    pub fn draw(&mut self, updates: &[CellUpdate]) -> io::Result<()> {
        for update in updates {
            queue!(self.writer, cursor::MoveTo(update.x, update.y))?;
            self.queue_cell_style(&update.cell.style)?;
            queue!(
                self.writer,
                Print(update.cell.ch),
                SetAttribute(Attribute::Reset)
            )?;
        }
        self.writer.flush()
    }

    /// Unwrap the underlying writer, flushing pending output.
    pub fn into_inner(self) -> io::Result<W> {
        self.writer.into_inner().map_err(|e| e.into_error())
    }

    fn queue_cell_style(&mut self, style: &CellStyle) -> io::Result<()> {
        if let Some(color) = style.fg.as_deref().and_then(parse_color) {
            queue!(self.writer, SetForegroundColor(color))?;
        }
        if let Some(color) = style.bg.as_deref().and_then(parse_color) {
            queue!(self.writer, SetBackgroundColor(color))?;
        }
        let attributes = [
            (style.bold, Attribute::Bold),
            (style.dim, Attribute::Dim),
            (style.italic, Attribute::Italic),
            (style.underline, Attribute::Underlined),
            (style.reverse, Attribute::Reverse),
        ];
        for (_, attribute) in attributes.into_iter().filter(|(on, _)| *on) {
            queue!(self.writer, SetAttribute(attribute))?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Color parsing
// ---------------------------------------------------------------------------

/// Parse a color string into a crossterm `Color`.
///
/// Supports `#rrggbb`, `#rgb`, and the named terminal colors (case-insensitive,
/// `dark_` prefix with or without the underscore).
pub fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();

    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex_color(hex);
    }

    match s.to_ascii_lowercase().replace('_', "").as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "darkred" => Some(Color::DarkRed),
        "darkgreen" => Some(Color::DarkGreen),
        "darkyellow" => Some(Color::DarkYellow),
        "darkblue" => Some(Color::DarkBlue),
        "darkmagenta" => Some(Color::DarkMagenta),
        "darkcyan" => Some(Color::DarkCyan),
        "darkgrey" | "darkgray" => Some(Color::DarkGrey),
        "grey" | "gray" => Some(Color::Grey),
        _ => None,
    }
}

fn parse_hex_color(hex: &str) -> Option<Color> {
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(hex.get(range)?, 16).ok();
    match hex.len() {
        6 => Some(Color::Rgb {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        }),
        3 => {
            let (r, g, b) = (channel(0..1)?, channel(1..2)?, channel(2..3)?);
            Some(Color::Rgb {
                r: r * 17,
                g: g * 17,
                b: b * 17,
            })
        }
        _ => None,
    }
}

// ===========================================================================
// Tests
// ===========================================================================
