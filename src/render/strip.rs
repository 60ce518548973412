//! Strip: a horizontal line of styled terminal cells.
//!
//! A `Strip` is the rendering primitive. Widgets produce `Vec<Strip>` from their
//! `render()` method and the compositor places them into the screen buffer.

use crate::css::styles::Styles;

// ---------------------------------------------------------------------------
// CellStyle
// ---------------------------------------------------------------------------

/// Visual style for a single terminal cell.
///
/// Colors are stored as optional strings, parsed as named colors or `#rrggbb`
/// hex values by the driver.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CellStyle {
    pub fg: Option<String>,
    pub bg: Option<String>,
    pub bold: bool,
    pub dim: bool,
    pub italic: bool,
    pub underline: bool,
    pub reverse: bool,
}

impl CellStyle {
    /// Create a new `CellStyle` with all attributes unset/false.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert computed CSS `Styles` into a `CellStyle`.
    pub fn from_styles(styles: &Styles) -> Self {
        let flags = styles.text_style.unwrap_or_default();
        CellStyle {
            fg: styles.color.clone(),
            bg: styles.background.clone(),
            bold: flags.bold.unwrap_or(false),
            dim: flags.dim.unwrap_or(false),
            italic: flags.italic.unwrap_or(false),
            underline: flags.underline.unwrap_or(false),
            reverse: flags.reverse.unwrap_or(false),
        }
    }
}

// ---------------------------------------------------------------------------
// StyledCell
// ---------------------------------------------------------------------------

/// A single terminal cell: one character with associated style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledCell {
    pub ch: char,
    pub style: CellStyle,
}

impl StyledCell {
    /// Create a new styled cell.
    pub fn new(ch: char, style: CellStyle) -> Self {
        Self { ch, style }
    }

    /// A blank (space) cell with default style.
    pub fn blank() -> Self {
        Self::blank_styled(CellStyle::default())
    }

    /// A blank (space) cell with the given style.
    pub fn blank_styled(style: CellStyle) -> Self {
        Self { ch: ' ', style }
    }
}

impl Default for StyledCell {
    fn default() -> Self {
        Self::blank()
    }
}

// ---------------------------------------------------------------------------
// Strip
// ---------------------------------------------------------------------------

/// A horizontal line of styled terminal cells at absolute row `y`, starting at
/// column `x_offset`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strip {
    pub y: i32,
    pub x_offset: i32,
    pub cells: Vec<StyledCell>,
}

impl Strip {
    /// Create a new empty strip at the given row and x offset.
    pub fn new(y: i32, x_offset: i32) -> Self {
        Self {
            y,
            x_offset,
            cells: Vec::new(),
        }
    }

    /// A strip of `width` blank cells in `style`.
    pub fn blank(y: i32, x_offset: i32, width: i32, style: CellStyle) -> Self {
        let mut strip = Self::new(y, x_offset);
        strip.fill(width, style);
        strip
    }

    /// Push a single character with the given style.
    pub fn push(&mut self, ch: char, style: CellStyle) {
        self.cells.push(StyledCell::new(ch, style));
    }

    /// Push every character of `text` with the same style.
    pub fn push_str(&mut self, text: &str, style: CellStyle) {
        self.cells
            .extend(text.chars().map(|ch| StyledCell::new(ch, style.clone())));
    }

    /// The width of this strip in cells.
    pub fn width(&self) -> i32 {
        self.cells.len() as i32
    }

    /// Pad the strip to exactly `width` cells using spaces with the given style,
    /// or truncate it if it is wider.
    pub fn fill(&mut self, width: i32, style: CellStyle) {
        let w = width.max(0) as usize;
        self.cells.resize(w, StyledCell::blank_styled(style));
    }

    /// The rightmost x position (exclusive) of this strip.
    pub fn right(&self) -> i32 {
        self.x_offset + self.width()
    }

    /// The characters of this strip as a string.
    pub fn text(&self) -> String {
        self.cells.iter().map(|c| c.ch).collect()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
