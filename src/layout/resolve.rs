//! Computed styles -> taffy Style conversion.
//!
//! Maps the cascade's [`Styles`] (cell sizes, [`Spacing`] boxes, layout
//! direction) onto taffy's flexbox [`taffy::Style`].

use taffy::prelude::*;

use crate::css::styles::{LayoutDirection, Styles};
use crate::geometry::{Size as CellSize, Spacing};

/// Measure the intrinsic size of a text node in cells: the widest line by char
/// count, and the number of lines. Empty text still occupies one row.
pub fn measure_text(text: &str) -> CellSize {
    let width = text.split('\n').map(|line| line.chars().count()).max().unwrap_or(0);
    let height = text.split('\n').count().max(1);
    CellSize::new(width as i32, height as i32)
}

/// Convert a [`Spacing`] box to taffy margins.
pub fn resolve_margin(spacing: Spacing) -> taffy::geometry::Rect<LengthPercentageAuto> {
    taffy::geometry::Rect {
        top: LengthPercentageAuto::from_length(spacing.top as f32),
        right: LengthPercentageAuto::from_length(spacing.right as f32),
        bottom: LengthPercentageAuto::from_length(spacing.bottom as f32),
        left: LengthPercentageAuto::from_length(spacing.left as f32),
    }
}

/// Convert a [`Spacing`] box to taffy padding.
pub fn resolve_padding(spacing: Spacing) -> taffy::geometry::Rect<LengthPercentage> {
    taffy::geometry::Rect {
        top: LengthPercentage::from_length(spacing.top as f32),
        right: LengthPercentage::from_length(spacing.right as f32),
        bottom: LengthPercentage::from_length(spacing.bottom as f32),
        left: LengthPercentage::from_length(spacing.left as f32),
    }
}

/// Convert computed [`Styles`] into a taffy [`taffy::Style`].
///
/// `content` is the measured text size of a leaf node. When given, any unset
/// width or height becomes the content size plus padding, and the node refuses
/// to shrink below it.
pub fn resolve_styles(styles: &Styles, content: Option<CellSize>) -> taffy::Style {
    let mut style = taffy::Style::default();

    style.display = if styles.is_hidden() {
        taffy::style::Display::None
    } else {
        taffy::style::Display::Flex
    };

    style.flex_direction = match styles.layout {
        Some(LayoutDirection::Horizontal) => FlexDirection::Row,
        Some(LayoutDirection::Vertical) | None => FlexDirection::Column,
    };

    let padding = styles.padding.unwrap_or(Spacing::ZERO);
    style.padding = resolve_padding(padding);
    style.margin = resolve_margin(styles.margin.unwrap_or(Spacing::ZERO));

    let auto_width = content.map(|c| c.width + padding.width());
    let auto_height = content.map(|c| c.height + padding.height());

    style.size = taffy::geometry::Size {
        width: match (styles.width, auto_width) {
            (Some(w), _) => Dimension::from_length(f32::from(w)),
            (None, Some(w)) => Dimension::from_length(w as f32),
            (None, None) => Dimension::AUTO,
        },
        height: match (styles.height, auto_height) {
            (Some(h), _) => Dimension::from_length(f32::from(h)),
            (None, Some(h)) => Dimension::from_length(h as f32),
            (None, None) => Dimension::AUTO,
        },
    };

    if content.is_some() {
        style.flex_shrink = 0.0;
    }

    style
}
