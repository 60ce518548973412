//! Screen buffer assembly and frame diffing.
//!
//! The `Compositor` maintains a 2D grid of `StyledCell`s representing the full
//! terminal screen. Rendered strips are placed into it with `place_strips`; `diff`
//! compares two frames and produces only the `CellUpdate`s needed to transition
//! between them.

use super::strip::{Strip, StyledCell};
use crate::geometry::Region;

/// A single cell that changed between frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellUpdate {
    pub x: u16,
    pub y: u16,
    pub cell: StyledCell,
}

/// A full-screen cell buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compositor {
    /// `screen[y][x]` is the cell at column x, row y.
    screen: Vec<Vec<StyledCell>>,
    pub width: u16,
    pub height: u16,
}

impl Compositor {
    /// Create a new compositor with a blank screen of the given dimensions.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            screen: Self::blank_screen(width, height),
            width,
            height,
        }
    }

    /// Resize the screen buffer. All cells are reset to blank.
    pub fn resize(&mut self, width: u16, height: u16) {
        *self = Self::new(width, height);
    }

    /// Reset every cell to blank.
    pub fn clear(&mut self) {
        self.screen = Self::blank_screen(self.width, self.height);
    }

    /// The whole screen as a region.
    pub fn bounds(&self) -> Region {
        Region::new(0, 0, i32::from(self.width), i32::from(self.height))
    }

    /// Place rendered strips into the screen buffer, clipped to `clip` and the
    /// screen bounds.
    pub fn place_strips(&mut self, strips: &[Strip], clip: &Region) {
        let clip = clip.intersection(self.bounds());
        if clip.width <= 0 || clip.height <= 0 {
            return;
        }

        for strip in strips {
            if strip.y < clip.y || strip.y >= clip.bottom() {
                continue;
            }
            let row = &mut self.screen[strip.y as usize];
            for (i, cell) in strip.cells.iter().enumerate() {
                let x = strip.x_offset + i as i32;
                if x >= clip.x && x < clip.right() {
                    row[x as usize] = cell.clone();
                }
            }
        }
    }

    /// Compare this frame against a previous frame and return the changed cells.
    ///
    /// Cells outside the previous frame's bounds always count as changed.
    pub fn diff(&self, previous: &Compositor) -> Vec<CellUpdate> {
        let mut updates = Vec::new();
        for (y, row) in self.screen.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let before = previous.screen.get(y).and_then(|r| r.get(x));
                if before != Some(cell) {
                    updates.push(CellUpdate {
                        x: x as u16,
                        y: y as u16,
                        cell: cell.clone(),
                    });
                }
            }
        }
        updates
    }

    /// Every cell as an update, for the first frame.
    pub fn full_frame(&self) -> Vec<CellUpdate> {
        self.diff(&Compositor::new(0, 0))
    }

    /// Get a reference to the screen buffer cell at (x, y).
    pub fn get_cell(&self, x: u16, y: u16) -> Option<&StyledCell> {
        self.screen.get(y as usize).and_then(|row| row.get(x as usize))
    }

    /// The characters of row `y`, trailing spaces included.
    pub fn row_text(&self, y: u16) -> Option<String> {
        self.screen
            .get(y as usize)
            .map(|row| row.iter().map(|c| c.ch).collect())
    }

    fn blank_screen(width: u16, height: u16) -> Vec<Vec<StyledCell>> {
        vec![vec![StyledCell::blank(); width as usize]; height as usize]
    }
}

// ===========================================================================
// Tests
// ===========================================================================
