//! Static widget: displays text content.
//!
//! The simplest widget. It renders its node's text, line by line, within the
//! given region. The text itself lives on the DOM node and may be replaced
//! after mounting.

use std::any::Any;

use crate::css::styles::Styles;
use crate::dom::node::NodeData;
use crate::geometry::Region;
use crate::render::strip::{CellStyle, Strip};
use crate::widget::traits::Widget;

/// A widget that displays non-interactive text.
///
/// Lines are split on `'\n'`. Each line is rendered as one [`Strip`], truncated
/// to the region width and limited to the region height.
pub struct Static {
    text: String,
}

impl Static {
    /// Create a new `Static` widget with the given initial text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Return the initial text.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Widget for Static {
    fn widget_type(&self) -> &str {
        "Static"
    }

    fn content(&self) -> Option<&str> {
        Some(&self.text)
    }

    fn render(&self, node: &NodeData, region: Region, styles: &Styles) -> Vec<Strip> {
        if region.width <= 0 || region.height <= 0 {
            return Vec::new();
        }

        let style = CellStyle::from_styles(styles);
        let max_width = region.width as usize;

        node.text
            .as_deref()
            .unwrap_or_default()
            .split('\n')
            .take(region.height as usize)
            .enumerate()
            .map(|(i, line)| {
                let mut strip = Strip::new(region.y + i as i32, region.x);
                let truncated: String = line.chars().take(max_width).collect();
                strip.push_str(&truncated, style.clone());
                strip.fill(region.width, style.clone());
                strip
            })
            .collect()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn region(w: i32, h: i32) -> Region {
        Region::new(0, 0, w, h)
    }

    fn render(text: &str, region: Region, styles: &Styles) -> Vec<Strip> {
        let widget = Static::new(text);
        widget.render(&widget.node_data(), region, styles)
    }

    #[test]
    fn node_data() {
        let data = Static::new("0").node_data();
        assert_eq!(data.widget_type, "Static");
        assert_eq!(data.text.as_deref(), Some("0"));
    }

    #[test]
    fn render_single_line() {
        let strips = render("Hello", region(10, 1), &Styles::new());
        assert_eq!(strips.len(), 1);
        assert_eq!(strips[0].width(), 10);
        assert_eq!(strips[0].cells[0].ch, 'H');
        assert_eq!(strips[0].cells[4].ch, 'o');
    }

    #[test]
    fn render_truncates_to_width() {
        let strips = render("Hello, world!", region(5, 1), &Styles::new());
        assert_eq!(strips[0].width(), 5);
        assert_eq!(strips[0].cells[4].ch, 'o');
    }

    #[test]
    fn render_multiline_limited_to_height() {
        let strips = render("A\nB\nC\nD", region(10, 3), &Styles::new());
        assert_eq!(strips.len(), 3);
        assert_eq!(strips[0].cells[0].ch, 'A');
        assert_eq!(strips[2].cells[0].ch, 'C');
    }

    #[test]
    fn render_negative_number() {
        let strips = render("-12", region(3, 1), &Styles::new());
        let text: String = strips[0].cells.iter().map(|c| c.ch).collect();
        assert_eq!(text, "-12");
    }

    #[test]
    fn render_reads_replaced_text() {
        let widget = Static::new("0");
        let mut node = widget.node_data();
        node.text = Some("41".into());
        let strips = widget.render(&node, region(2, 1), &Styles::new());
        assert_eq!(strips[0].cells[0].ch, '4');
        assert_eq!(widget.text(), "0");
    }

    #[test]
    fn render_empty_region() {
        assert!(render("Hello", region(0, 5), &Styles::new()).is_empty());
        assert!(render("Hello", region(10, 0), &Styles::new()).is_empty());
    }

    #[test]
    fn render_applies_styles_and_offsets() {
        let mut styles = Styles::new();
        styles.color = Some("red".into());
        let strips = render("A\nB", Region::new(5, 10, 20, 5), &styles);
        assert_eq!(strips[0].cells[0].style.fg, Some("red".into()));
        assert_eq!(strips[0].x_offset, 5);
        assert_eq!(strips[1].y, 11);
    }
}
