//! Styles struct with typed Option<T> fields for the supported CSS properties.
//!
//! `None` means "not set": the property either inherits from the composed parent
//! (color, text-style) or falls back to its initial value.

use crate::geometry::Spacing;

/// CSS-wide keyword accepted by the `all` property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllKeyword {
    /// Reset every property to its initial value and stop inheritance.
    Initial,
    /// Inherit every inheritable property from the parent.
    Inherit,
    /// Same as not setting `all`.
    Unset,
}

/// Text alignment options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Display property options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    Block,
    None,
}

/// Layout direction for a node's composed children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutDirection {
    Vertical,
    Horizontal,
}

/// Text style flags (bold, italic, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStyleFlags {
    pub bold: Option<bool>,
    pub dim: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub reverse: Option<bool>,
}

impl TextStyleFlags {
    /// Flags set in `other` win; unset flags keep `self`'s value.
    pub fn merge(&self, other: &TextStyleFlags) -> TextStyleFlags {
        TextStyleFlags {
            bold: other.bold.or(self.bold),
            dim: other.dim.or(self.dim),
            italic: other.italic.or(self.italic),
            underline: other.underline.or(self.underline),
            reverse: other.reverse.or(self.reverse),
        }
    }
}

/// All CSS properties for a node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Styles {
    pub all: Option<AllKeyword>,

    // Display & Layout
    pub display: Option<Display>,
    pub layout: Option<LayoutDirection>,

    // Sizing, in cells
    pub width: Option<u16>,
    pub height: Option<u16>,

    // Spacing
    pub margin: Option<Spacing>,
    pub padding: Option<Spacing>,

    // Colors
    pub color: Option<String>,
    pub background: Option<String>,

    // Text
    pub text_align: Option<TextAlign>,
    pub text_style: Option<TextStyleFlags>,
}

impl Styles {
    /// Create a new `Styles` with all fields set to `None`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `other` on top of `self`: fields set in `other` win.
    ///
    /// Lower-priority styles are `self`, higher-priority styles are `other`.
    /// `all: initial` in `other` discards everything `self` set before it.
    pub fn merge(&self, other: &Styles) -> Styles {
        fn merge_opt<T: Clone>(base: &Option<T>, other: &Option<T>) -> Option<T> {
            other.clone().or_else(|| base.clone())
        }

        let base = if other.all == Some(AllKeyword::Initial) {
            &Styles::default()
        } else {
            self
        };

        Styles {
            all: merge_opt(&base.all, &other.all),
            display: merge_opt(&base.display, &other.display),
            layout: merge_opt(&base.layout, &other.layout),
            width: merge_opt(&base.width, &other.width),
            height: merge_opt(&base.height, &other.height),
            margin: merge_opt(&base.margin, &other.margin),
            padding: merge_opt(&base.padding, &other.padding),
            color: merge_opt(&base.color, &other.color),
            background: merge_opt(&base.background, &other.background),
            text_align: merge_opt(&base.text_align, &other.text_align),
            text_style: match (&base.text_style, &other.text_style) {
                (Some(a), Some(b)) => Some(a.merge(b)),
                (a, b) => merge_opt(a, b),
            },
        }
    }

    /// Fill unset inheritable properties (color, text-style) from `parent`.
    ///
    /// A node whose computed `all` is `initial` inherits nothing.
    pub fn inherit_from(&self, parent: &Styles) -> Styles {
        if self.all == Some(AllKeyword::Initial) {
            return self.clone();
        }
        let mut styles = self.clone();
        if styles.color.is_none() {
            styles.color = parent.color.clone();
        }
        styles.text_style = match (&parent.text_style, &self.text_style) {
            (Some(p), Some(s)) => Some(p.merge(s)),
            (p, s) => s.or(*p),
        };
        styles
    }

    /// Whether `display: none` is in effect.
    pub fn is_hidden(&self) -> bool {
        self.display == Some(Display::None)
    }

    /// Returns `true` if all fields are `None` (no properties set).
    pub fn is_empty(&self) -> bool {
        *self == Styles::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_empty() {
        assert!(Styles::new().is_empty());
        assert!(Styles::default().is_empty());
    }

    #[test]
    fn not_empty_when_field_set() {
        let mut s = Styles::new();
        s.color = Some("red".into());
        assert!(!s.is_empty());
    }

    #[test]
    fn merge_other_overrides_base() {
        let mut base = Styles::new();
        base.color = Some("red".into());
        base.background = Some("white".into());

        let mut other = Styles::new();
        other.color = Some("blue".into());

        let merged = base.merge(&other);
        assert_eq!(merged.color, Some("blue".into()));
        assert_eq!(merged.background, Some("white".into()));
    }

    #[test]
    fn merge_partial_override() {
        let mut base = Styles::new();
        base.display = Some(Display::Block);
        base.width = Some(10);
        base.text_align = Some(TextAlign::Left);

        let mut other = Styles::new();
        other.text_align = Some(TextAlign::Center);
        other.padding = Some(Spacing::symmetric(0, 2));

        let merged = base.merge(&other);
        assert_eq!(merged.display, Some(Display::Block));
        assert_eq!(merged.width, Some(10));
        assert_eq!(merged.text_align, Some(TextAlign::Center));
        assert_eq!(merged.padding, Some(Spacing::symmetric(0, 2)));
        assert!(merged.background.is_none());
    }

    #[test]
    fn merge_is_not_commutative() {
        let mut a = Styles::new();
        a.color = Some("red".into());
        let mut b = Styles::new();
        b.color = Some("blue".into());

        assert_eq!(a.merge(&b).color, Some("blue".into()));
        assert_eq!(b.merge(&a).color, Some("red".into()));
    }

    #[test]
    fn merge_combines_text_style_flags() {
        let mut a = Styles::new();
        a.text_style = Some(TextStyleFlags {
            bold: Some(true),
            ..Default::default()
        });
        let mut b = Styles::new();
        b.text_style = Some(TextStyleFlags {
            italic: Some(true),
            ..Default::default()
        });

        let flags = a.merge(&b).text_style.unwrap();
        assert_eq!(flags.bold, Some(true));
        assert_eq!(flags.italic, Some(true));
    }

    #[test]
    fn all_initial_resets_earlier_layers() {
        let mut base = Styles::new();
        base.color = Some("red".into());
        base.layout = Some(LayoutDirection::Vertical);

        let mut reset = Styles::new();
        reset.all = Some(AllKeyword::Initial);
        reset.layout = Some(LayoutDirection::Horizontal);

        let merged = base.merge(&reset);
        assert!(merged.color.is_none());
        assert_eq!(merged.layout, Some(LayoutDirection::Horizontal));
        assert_eq!(merged.all, Some(AllKeyword::Initial));
    }

    #[test]
    fn inherit_fills_color_and_text_style() {
        let mut parent = Styles::new();
        parent.color = Some("red".into());
        parent.background = Some("blue".into());
        parent.text_style = Some(TextStyleFlags {
            underline: Some(true),
            ..Default::default()
        });

        let child = Styles::new().inherit_from(&parent);
        assert_eq!(child.color, Some("red".into()));
        assert_eq!(child.text_style.unwrap().underline, Some(true));
        assert!(child.background.is_none(), "background is not inherited");
    }

    #[test]
    fn own_color_beats_inherited() {
        let mut parent = Styles::new();
        parent.color = Some("red".into());
        let mut child = Styles::new();
        child.color = Some("white".into());

        assert_eq!(child.inherit_from(&parent).color, Some("white".into()));
    }

    #[test]
    fn all_initial_blocks_inheritance() {
        let mut parent = Styles::new();
        parent.color = Some("red".into());
        parent.text_style = Some(TextStyleFlags {
            bold: Some(true),
            ..Default::default()
        });
        let mut host = Styles::new();
        host.all = Some(AllKeyword::Initial);

        let computed = host.inherit_from(&parent);
        assert!(computed.color.is_none());
        assert!(computed.text_style.is_none());
    }

    #[test]
    fn hidden_display() {
        let mut s = Styles::new();
        assert!(!s.is_hidden());
        s.display = Some(Display::None);
        assert!(s.is_hidden());
    }
}
