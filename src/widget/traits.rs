//! Widget and Element traits.
//!
//! A [`Widget`] describes a built-in node: its CSS type name, initial content,
//! and how it paints itself. Mounting a widget turns it into a DOM node; the
//! widget stays with the document as that node's renderer. The `WidgetExt` trait
//! adds builder-style convenience methods for attaching CSS ids and classes.
//!
//! An [`Element`] is the instance state of a custom element, owned by the
//! document and keyed by its host node.

use std::any::Any;

use crate::css::styles::Styles;
use crate::dom::node::{NodeData, NodeId};
use crate::geometry::Region;
use crate::render::strip::Strip;

// ---------------------------------------------------------------------------
// Widget trait
// ---------------------------------------------------------------------------

/// Core trait implemented by all built-in widgets.
///
/// Object-safe: methods that require `Self: Sized` are on `WidgetExt`.
pub trait Widget {
    /// The CSS type name for this widget (e.g. "Button", "Static").
    fn widget_type(&self) -> &str;

    /// Initial text content of the node.
    fn content(&self) -> Option<&str> {
        None
    }

    /// CSS id to give the node.
    fn id(&self) -> Option<&str> {
        None
    }

    /// CSS classes to give the node.
    fn classes(&self) -> &[String] {
        &[]
    }

    /// Paint the node's current content into `region` (its content box, with
    /// padding already removed).
    fn render(&self, node: &NodeData, region: Region, styles: &Styles) -> Vec<Strip>;

    /// Downcast to `&dyn Any` for runtime type inspection.
    fn as_any(&self) -> &dyn Any;

    /// The DOM node this widget mounts as.
    fn node_data(&self) -> NodeData {
        let mut data = NodeData::new(self.widget_type())
            .with_classes(self.classes().iter().map(String::as_str));
        if let Some(id) = self.id() {
            data = data.with_id(id);
        }
        if let Some(content) = self.content() {
            data = data.with_text(content);
        }
        data
    }
}

// ---------------------------------------------------------------------------
// WidgetExt
// ---------------------------------------------------------------------------

/// Extension trait providing builder-style convenience methods for widgets.
///
/// Automatically implemented for all types that implement `Widget`.
pub trait WidgetExt: Widget {
    /// Wrap this widget with a CSS id.
    fn with_id(self, id: &str) -> WidgetBuilder<Self>
    where
        Self: Sized,
    {
        WidgetBuilder {
            widget: self,
            id: Some(id.to_owned()),
            classes: Vec::new(),
        }
    }

    /// Wrap this widget with a single CSS class.
    fn with_class(self, class: &str) -> WidgetBuilder<Self>
    where
        Self: Sized,
    {
        WidgetBuilder {
            widget: self,
            id: None,
            classes: vec![class.to_owned()],
        }
    }
}

impl<T: Widget> WidgetExt for T {}

// ---------------------------------------------------------------------------
// WidgetBuilder
// ---------------------------------------------------------------------------

/// A wrapper around a widget that adds id and class metadata.
///
/// Delegates everything else to the inner widget.
#[derive(Debug)]
pub struct WidgetBuilder<W: Widget> {
    /// The wrapped widget.
    pub widget: W,
    /// Optional CSS id.
    pub id: Option<String>,
    /// CSS classes.
    pub classes: Vec<String>,
}

impl<W: Widget> WidgetBuilder<W> {
    /// Set the CSS id (chainable).
    pub fn set_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_owned());
        self
    }

    /// Add a CSS class (chainable).
    pub fn add_class(mut self, class: &str) -> Self {
        if !self.classes.iter().any(|c| c == class) {
            self.classes.push(class.to_owned());
        }
        self
    }
}

impl<W: Widget + 'static> Widget for WidgetBuilder<W> {
    fn widget_type(&self) -> &str {
        self.widget.widget_type()
    }

    fn content(&self) -> Option<&str> {
        self.widget.content()
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn render(&self, node: &NodeData, region: Region, styles: &Styles) -> Vec<Strip> {
        self.widget.render(node, region, styles)
    }

    fn as_any(&self) -> &dyn Any {
        self.widget.as_any()
    }
}

// ---------------------------------------------------------------------------
// Element trait
// ---------------------------------------------------------------------------

/// Instance state of a custom element.
pub trait Element: 'static {
    /// The registered tag name, e.g. `"my-counter"`.
    fn tag_name(&self) -> &str;

    /// The host node this instance is attached to.
    fn host(&self) -> NodeId;

    /// Downcast to `&dyn Any`.
    fn as_any(&self) -> &dyn Any;

    /// Downcast to `&mut dyn Any`.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl dyn Element {
    /// Downcast to a concrete element type.
    pub fn downcast_ref<T: Element>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Mutably downcast to a concrete element type.
    pub fn downcast_mut<T: Element>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

impl std::fmt::Debug for dyn Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Element")
            .field("tag_name", &self.tag_name())
            .field("host", &self.host())
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
