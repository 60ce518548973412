//! Snapshot rendering helpers.
//!
//! Convert rendered output (a single widget's strips, or a whole compositor
//! frame) into plain text for assertions and inline snapshots. Every row is
//! right-trimmed and rows are joined with `'\n'`; the last row gets no trailing
//! newline.

use crate::css::styles::Styles;
use crate::geometry::Region;
use crate::render::compositor::Compositor;
use crate::render::strip::Strip;
use crate::widget::Widget;

/// Render a widget on its own, with default styles, into a `width` x `height`
/// region at the origin.
///
/// ```ignore
/// use counter_element::testing::render_to_string;
/// use counter_element::widgets::Static;
///
/// assert_eq!(render_to_string(&Static::new("-3"), 5, 1), "-3");
/// ```
pub fn render_to_string(widget: &dyn Widget, width: i32, height: i32) -> String {
    render_to_styled_string(widget, width, height, &Styles::new())
}

/// Same as [`render_to_string`] with explicit styles.
pub fn render_to_styled_string(
    widget: &dyn Widget,
    width: i32,
    height: i32,
    styles: &Styles,
) -> String {
    let strips = widget.render(&widget.node_data(), Region::new(0, 0, width, height), styles);
    strips_to_string(&strips, width, height)
}

/// Overlay `strips` on a blank `width` x `height` grid and print it.
///
/// Cells outside the grid are dropped.
pub fn strips_to_string(strips: &[Strip], width: i32, height: i32) -> String {
    if width <= 0 || height <= 0 {
        return String::new();
    }

    let mut grid = vec![vec![' '; width as usize]; height as usize];
    for strip in strips.iter().filter(|s| (0..height).contains(&s.y)) {
        let row = &mut grid[strip.y as usize];
        for (i, cell) in strip.cells.iter().enumerate() {
            let x = strip.x_offset + i as i32;
            if (0..width).contains(&x) {
                row[x as usize] = cell.ch;
            }
        }
    }

    grid.into_iter()
        .map(|row| row.into_iter().collect::<String>().trim_end().to_owned())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Print a full compositor frame.
pub fn compositor_to_string(compositor: &Compositor) -> String {
    (0..compositor.height)
        .filter_map(|y| compositor.row_text(y))
        .map(|row| row.trim_end().to_owned())
        .collect::<Vec<_>>()
        .join("\n")
}

// ===========================================================================
// Tests
// ===========================================================================
