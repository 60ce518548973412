//! Button widget: a clickable label.
//!
//! Renders its node's text centered within the content region. Clicks reach
//! it through the document's `click` event.

use std::any::Any;

use crate::css::styles::{Styles, TextAlign};
use crate::dom::node::NodeData;
use crate::geometry::Region;
use crate::render::strip::{CellStyle, Strip};
use crate::widget::traits::Widget;

/// An interactive button widget with a centered label.
///
/// # Examples
///
/// ```ignore
/// let btn = Button::new("+").with_id("increment");
/// ```
pub struct Button {
    label: String,
}

impl Button {
    /// Create a new button with the given label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    /// Return the initial label.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Widget for Button {
    fn widget_type(&self) -> &str {
        "Button"
    }

    fn content(&self) -> Option<&str> {
        Some(&self.label)
    }

    fn render(&self, node: &NodeData, region: Region, styles: &Styles) -> Vec<Strip> {
        if region.width <= 0 || region.height <= 0 {
            return Vec::new();
        }

        let style = CellStyle::from_styles(styles);
        let width = region.width as usize;
        let label_row = if region.height >= 3 { 1 } else { 0 };

        let label: String = node
            .text
            .as_deref()
            .unwrap_or_default()
            .chars()
            .take(width)
            .collect();
        let label_len = label.chars().count();
        let pad_left = match styles.text_align.unwrap_or(TextAlign::Center) {
            TextAlign::Left => 0,
            TextAlign::Center => (width - label_len) / 2,
            TextAlign::Right => width - label_len,
        };

        (0..region.height)
            .map(|row| {
                let mut strip = Strip::new(region.y + row, region.x);
                if row == label_row {
                    strip.push_str(&" ".repeat(pad_left), style.clone());
                    strip.push_str(&label, style.clone());
                }
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

    fn node(text: &str) -> NodeData {
        Button::new(text).node_data()
    }

    #[test]
    fn node_data_carries_label() {
        let data = Button::new("+").node_data();
        assert_eq!(data.widget_type, "Button");
        assert_eq!(data.text.as_deref(), Some("+"));
        assert_eq!(Button::new("-").label(), "-");
    }

    #[test]
    fn render_label_centered() {
        let b = Button::new("OK");
        let strips = b.render(&node("OK"), region(10, 1), &Styles::new());
        assert_eq!(strips.len(), 1);
        assert_eq!(strips[0].width(), 10);
        assert_eq!(strips[0].cells[4].ch, 'O');
        assert_eq!(strips[0].cells[5].ch, 'K');
    }

    #[test]
    fn render_label_on_middle_row_when_tall() {
        let b = Button::new("X");
        let strips = b.render(&node("X"), region(5, 3), &Styles::new());
        assert_eq!(strips.len(), 3);
        assert_eq!(strips[1].cells[2].ch, 'X');
        assert!(strips[0].cells.iter().all(|c| c.ch == ' '));
        assert!(strips[2].cells.iter().all(|c| c.ch == ' '));
    }

    #[test]
    fn render_uses_live_node_text() {
        let b = Button::new("old");
        let strips = b.render(&node("new"), region(3, 1), &Styles::new());
        let text: String = strips[0].cells.iter().map(|c| c.ch).collect();
        assert_eq!(text, "new");
    }

    #[test]
    fn render_truncates_long_label() {
        let b = Button::new("Very Long Label");
        let strips = b.render(&node("Very Long Label"), region(5, 1), &Styles::new());
        assert_eq!(strips[0].width(), 5);
        assert_eq!(strips[0].cells[0].ch, 'V');
    }

    #[test]
    fn render_left_aligned() {
        let mut styles = Styles::new();
        styles.text_align = Some(TextAlign::Left);
        let strips = Button::new("X").render(&node("X"), region(5, 1), &styles);
        assert_eq!(strips[0].cells[0].ch, 'X');
    }

    #[test]
    fn render_zero_region() {
        let b = Button::new("OK");
        assert!(b.render(&node("OK"), region(0, 3), &Styles::new()).is_empty());
        assert!(b.render(&node("OK"), region(10, 0), &Styles::new()).is_empty());
    }

    #[test]
    fn render_applies_styles_and_positions() {
        let mut styles = Styles::new();
        styles.color = Some("white".into());
        let strips = Button::new("X").render(&node("X"), Region::new(5, 10, 3, 1), &styles);
        assert_eq!(strips[0].y, 10);
        assert_eq!(strips[0].x_offset, 5);
        assert_eq!(strips[0].cells[1].style.fg, Some("white".into()));
    }
}
