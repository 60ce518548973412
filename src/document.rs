//! Document: the DOM and everything that brings it to life.
//!
//! [`Document`] owns the node tree, the custom element instances living on host
//! nodes, the renderers of mounted widgets, the event listeners, the document
//! and shadow-scoped stylesheets, the layout engine and the compositor. It is
//! the only entry point for mutating any of them, so an element can never
//! outlive its host node and a listener can never fire on a removed node.
//!
//! Rendering is a three-pass pipeline run by [`Document::render`]: compute
//! styles along the composed tree, lay it out with taffy, then paint every
//! node's strips into the compositor in tree order.

use std::any::type_name;
use std::collections::HashMap;
use std::fmt;

use slotmap::SecondaryMap;
use tracing::{debug, info, trace};

use crate::css::parser::parse_css;
use crate::css::styles::Styles;
use crate::css::stylesheet::{cascade, CompiledStylesheet, MatchContext};
use crate::dom::node::{NodeData, NodeId};
use crate::dom::tree::Dom;
use crate::error::{Error, Result};
use crate::event::handler::{EventDispatcher, Listener, ListenerId};
use crate::event::input::InputEvent;
use crate::event::message::{Click, Envelope, Message};
use crate::geometry::{Region, Spacing};
use crate::layout::LayoutEngine;
use crate::registry::{ElementConstructor, ElementRegistry};
use crate::render::compositor::Compositor;
use crate::render::strip::{CellStyle, Strip};
use crate::widget::lifecycle::{LifecycleEvent, LifecycleTracker};
use crate::widget::traits::{Element, Widget};
use crate::widgets::counter::OverflowPolicy;

/// Widget type of the document's top node.
pub const BODY_TYPE: &str = "Body";

// ---------------------------------------------------------------------------
// DocumentConfig
// ---------------------------------------------------------------------------

/// Configuration for a document.
#[derive(Debug, Clone)]
pub struct DocumentConfig {
    /// Viewport width in cells.
    pub width: u16,
    /// Viewport height in cells.
    pub height: u16,
    /// Optional document stylesheet.
    pub css: Option<String>,
    /// Bounds behavior of counter elements.
    pub overflow: OverflowPolicy,
    /// Element definitions to start from instead of the global registry.
    pub registry: Option<ElementRegistry>,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 24,
            css: None,
            overflow: OverflowPolicy::Saturate,
            registry: None,
        }
    }
}

impl DocumentConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the viewport size (builder).
    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the document stylesheet (builder).
    pub fn with_css(mut self, css: impl Into<String>) -> Self {
        self.css = Some(css.into());
        self
    }

    /// Set the counter overflow policy (builder).
    pub fn with_overflow(mut self, overflow: OverflowPolicy) -> Self {
        self.overflow = overflow;
        self
    }

    /// Start from `registry` instead of the global one (builder).
    pub fn with_registry(mut self, registry: ElementRegistry) -> Self {
        self.registry = Some(registry);
        self
    }
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// A live document.
///
/// Single-threaded: listeners are `Rc` closures that receive `&mut Document`.
pub struct Document {
    dom: Dom,
    body: NodeId,
    registry: ElementRegistry,
    dispatcher: EventDispatcher,
    /// Custom element instances by host node.
    elements: SecondaryMap<NodeId, Box<dyn Element>>,
    /// Renderers of mounted widgets.
    widgets: SecondaryMap<NodeId, Box<dyn Widget>>,
    lifecycle: LifecycleTracker,
    /// The document stylesheet; never matches inside shadow trees.
    stylesheet: CompiledStylesheet,
    /// Shadow-scoped stylesheets by host node.
    scoped: SecondaryMap<NodeId, CompiledStylesheet>,
    /// Computed styles from the last styling pass.
    styles: HashMap<NodeId, Styles>,
    layout: LayoutEngine,
    compositor: Compositor,
    config: DocumentConfig,
}

impl Document {
    /// Create a document holding only its body.
    ///
    /// Fails if the configured stylesheet does not parse.
    pub fn new(mut config: DocumentConfig) -> Result<Self> {
        let stylesheet = match &config.css {
            Some(css) => CompiledStylesheet::compile(&parse_css(css)?, false),
            None => CompiledStylesheet::default(),
        };
        let registry = config
            .registry
            .take()
            .unwrap_or_else(|| ElementRegistry::global().clone());

        let mut dom = Dom::new();
        let body = dom.insert(NodeData::new(BODY_TYPE));

        info!(
            width = config.width,
            height = config.height,
            rules = stylesheet.len(),
            elements = registry.len(),
            "document created"
        );

        Ok(Self {
            dom,
            body,
            registry,
            dispatcher: EventDispatcher::new(),
            elements: SecondaryMap::new(),
            widgets: SecondaryMap::new(),
            lifecycle: LifecycleTracker::new(),
            stylesheet,
            scoped: SecondaryMap::new(),
            styles: HashMap::new(),
            layout: LayoutEngine::new(),
            compositor: Compositor::new(config.width, config.height),
            config,
        })
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    pub fn config(&self) -> &DocumentConfig {
        &self.config
    }

    pub fn registry(&self) -> &ElementRegistry {
        &self.registry
    }

    /// Define a custom element for this document only.
    pub fn define(&mut self, name: &str, constructor: ElementConstructor) -> Result<()> {
        self.registry.define(name, constructor)
    }

    // ── Tree mutation ────────────────────────────────────────────────────

    /// Create a detached host node for `tag` and run its element constructor.
    ///
    /// The element is connected once the node is appended under the body.
    pub fn create_element(&mut self, tag: &str) -> Result<NodeId> {
        let constructor = self
            .registry
            .get(tag)
            .ok_or_else(|| Error::UnknownElement(tag.to_owned()))?;
        let host = self.dom.insert(NodeData::new(tag));
        match constructor(self, host) {
            Ok(element) => {
                self.elements.insert(host, element);
                debug!(?host, tag, "element created");
                Ok(host)
            }
            Err(err) => {
                self.drop_subtree(host);
                Err(err)
            }
        }
    }

    /// Append a widget under `parent` and keep it as the new node's renderer.
    pub fn mount(&mut self, parent: NodeId, widget: impl Widget + 'static) -> Result<NodeId> {
        self.ensure_exists(parent)?;
        let node = self.dom.insert_child(parent, widget.node_data());
        self.widgets.insert(node, Box::new(widget));
        Ok(node)
    }

    /// Move `child` (and its subtree) to the end of `parent`'s children.
    ///
    /// Elements entering the document are connected; elements leaving it are
    /// disconnected.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.ensure_exists(parent)?;
        self.ensure_exists(child)?;
        let refuse = |reason| Err(Error::HierarchyRequest(format!("{child:?}"), reason));
        if child == self.body {
            return refuse("the body cannot be moved");
        }
        if self.dom.is_shadow_root(child) {
            return refuse("shadow roots cannot be moved");
        }
        if parent == child || self.dom.ancestors(parent).contains(&child) {
            return refuse("a node cannot be appended inside itself");
        }

        let was_connected = self.is_in_document(child);
        self.dom.reparent(child, parent);
        let connected = self.is_in_document(child);

        for node in self.subtree(child) {
            let Some(element) = self.elements.get(node) else {
                continue;
            };
            if connected && !self.lifecycle.is_connected(node) {
                self.lifecycle.on_connected(node, element.tag_name());
                debug!(host = ?node, tag = element.tag_name(), "element connected");
            } else if was_connected && !connected {
                self.lifecycle.on_disconnected(node, element.tag_name());
                debug!(host = ?node, tag = element.tag_name(), "element disconnected");
            }
        }
        Ok(())
    }

    /// Remove `node` with its subtree and shadow trees.
    ///
    /// Element instances, widget renderers, scoped stylesheets and listeners of
    /// every removed node are dropped.
    pub fn remove(&mut self, node: NodeId) -> Result<()> {
        self.ensure_exists(node)?;
        if node == self.body {
            return Err(Error::HierarchyRequest(format!("{node:?}"), "the body cannot be removed"));
        }
        if self.dom.is_shadow_root(node) {
            return Err(Error::HierarchyRequest(
                format!("{node:?}"),
                "shadow roots cannot be removed",
            ));
        }
        self.drop_subtree(node);
        Ok(())
    }

    /// Attach a shadow root with a scoped stylesheet to `host`.
    ///
    /// The stylesheet is parsed first, so a bad stylesheet leaves no shadow root.
    pub fn attach_shadow(&mut self, host: NodeId, css: &str) -> Result<NodeId> {
        let sheet = CompiledStylesheet::compile(&parse_css(css)?, true);
        let shadow = self.dom.attach_shadow(host)?;
        self.scoped.insert(host, sheet);
        Ok(shadow)
    }

    fn drop_subtree(&mut self, node: NodeId) {
        for n in self.subtree(node) {
            if let Some(element) = self.elements.remove(n) {
                self.lifecycle.on_disconnected(n, element.tag_name());
                debug!(host = ?n, tag = element.tag_name(), "element removed");
            }
            self.widgets.remove(n);
            self.scoped.remove(n);
            self.styles.remove(&n);
            self.dispatcher.clear_node(n);
        }
        self.dom.remove(node);
    }

    /// Every node under `root`: light children and shadow trees alike.
    fn subtree(&self, root: NodeId) -> Vec<NodeId> {
        let mut nodes = Vec::new();
        let mut stack = vec![root];
        while let Some(current) = stack.pop() {
            if !self.dom.contains(current) {
                continue;
            }
            nodes.push(current);
            stack.extend(self.dom.children(current).iter().rev().copied());
            stack.extend(self.dom.shadow_root(current));
        }
        nodes
    }

    fn is_in_document(&self, node: NodeId) -> bool {
        node == self.body || self.dom.ancestors(node).contains(&self.body)
    }

    fn ensure_exists(&self, node: NodeId) -> Result<()> {
        if self.dom.contains(node) {
            Ok(())
        } else {
            Err(Error::node_not_found(node))
        }
    }

    // ── Elements and text ────────────────────────────────────────────────

    /// The element instance at `host`, as a `T`.
    pub fn element<T: Element>(&self, host: NodeId) -> Result<&T> {
        self.ensure_exists(host)?;
        self.elements
            .get(host)
            .and_then(|element| element.downcast_ref::<T>())
            .ok_or_else(|| element_mismatch::<T>(host))
    }

    /// Run `f` on the element instance at `host`.
    pub fn with_element_mut<T: Element, R>(
        &mut self,
        host: NodeId,
        f: impl FnOnce(&mut T) -> R,
    ) -> Result<R> {
        self.ensure_exists(host)?;
        let element = self
            .elements
            .get_mut(host)
            .and_then(|element| element.downcast_mut::<T>())
            .ok_or_else(|| element_mismatch::<T>(host))?;
        Ok(f(element))
    }

    /// The element instance at `host`, whatever its type.
    pub fn element_at(&self, host: NodeId) -> Option<&dyn Element> {
        self.elements.get(host).map(Box::as_ref)
    }

    pub fn text_content(&self, node: NodeId) -> Option<&str> {
        self.dom.text(node)
    }

    pub fn set_text_content(&mut self, node: NodeId, text: impl Into<String>) -> Result<()> {
        self.dom.set_text(node, text)
    }

    /// Whether the element at `host` is connected to the document.
    pub fn is_connected(&self, host: NodeId) -> bool {
        self.lifecycle.is_connected(host)
    }

    /// Lifecycle events recorded since the last drain, oldest first.
    pub fn drain_lifecycle_events(&mut self) -> Vec<LifecycleEvent> {
        self.lifecycle.drain()
    }

    // ── Events ───────────────────────────────────────────────────────────

    pub fn add_event_listener(&mut self, node: NodeId, event: &str, listener: Listener) -> ListenerId {
        self.dispatcher.add(node, event, listener)
    }

    pub fn remove_event_listener(&mut self, id: ListenerId) -> bool {
        self.dispatcher.remove(id)
    }

    /// Dispatch `message` on `target` and run the listeners along its path.
    ///
    /// Returns whether a listener marked the event handled.
    pub fn dispatch_event(&mut self, target: NodeId, message: impl Message) -> Result<bool> {
        self.ensure_exists(target)?;
        let mut envelope = Envelope::new(message, target);
        let path = EventDispatcher::propagation_path(&self.dom, target, &*envelope.message);
        trace!(event = envelope.name(), ?target, hops = path.len(), "dispatching event");

        for (node, seen_target) in path {
            if !self.dom.contains(node) {
                break;
            }
            envelope.current = node;
            envelope.target = seen_target;
            for (id, listener) in self.dispatcher.listeners_for(node, envelope.name()) {
                // Earlier listeners may have removed this one or its node.
                if !self.dispatcher.contains(id) {
                    continue;
                }
                listener(self, &mut envelope);
            }
            if envelope.handled {
                break;
            }
        }
        Ok(envelope.handled)
    }

    /// Dispatch a [`Click`] on `node`.
    pub fn click(&mut self, node: NodeId) -> Result<()> {
        self.dispatch_event(node, Click).map(|_| ())
    }

    /// Feed a terminal input event to the document.
    ///
    /// A left mouse press clicks the deepest node under the pointer; a resize
    /// changes the viewport. Everything else is ignored.
    pub fn handle_input(&mut self, event: &InputEvent) -> Result<()> {
        match event {
            InputEvent::Mouse(mouse) if mouse.is_left_press() => {
                self.update_layout()?;
                if let Some(node) = self.node_at(i32::from(mouse.x), i32::from(mouse.y)) {
                    self.click(node)?;
                }
            }
            InputEvent::Resize { width, height } => self.resize(*width, *height),
            _ => {}
        }
        Ok(())
    }

    // ── Styling, layout, paint ───────────────────────────────────────────

    /// Change the viewport size.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.config.width = width;
        self.config.height = height;
        self.compositor.resize(width, height);
    }

    /// Computed styles of `node` from the last styling pass.
    pub fn computed_styles(&self, node: NodeId) -> Option<&Styles> {
        self.styles.get(&node)
    }

    /// Recompute styles and layout for the current tree.
    pub fn update_layout(&mut self) -> Result<()> {
        self.compute_styles();
        self.layout.layout(
            &self.dom,
            self.body,
            &self.styles,
            (self.compositor.width, self.compositor.height),
        )
    }

    fn compute_styles(&mut self) {
        let mut computed: HashMap<NodeId, Styles> = HashMap::new();
        for node in self.dom.walk_composed(self.body) {
            let mut matches = self.stylesheet.matching(node, &self.dom, MatchContext::document());
            if let Some(host) = self.dom.scope_host(node) {
                if let Some(sheet) = self.scoped.get(host) {
                    matches.extend(sheet.matching(node, &self.dom, MatchContext::shadow(host)));
                }
            }
            if let Some(sheet) = self.scoped.get(node) {
                matches.extend(sheet.matching(node, &self.dom, MatchContext::shadow(node)));
            }

            let own = cascade(matches);
            let styles = match self.composed_parent(node).and_then(|p| computed.get(&p)) {
                Some(parent) => own.inherit_from(parent),
                None => own,
            };
            computed.insert(node, styles);
        }
        self.styles = computed;
    }

    /// Parent in the composed tree: shadow tree children hang off the host.
    fn composed_parent(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.dom.parent(node)?;
        if self.dom.is_shadow_root(parent) {
            self.dom.shadow_host(parent)
        } else {
            Some(parent)
        }
    }

    /// Style, lay out and paint the document into the compositor.
    pub fn render(&mut self) -> Result<&Compositor> {
        self.update_layout()?;
        self.compositor.clear();
        let screen = self.compositor.bounds();
        let defaults = Styles::default();

        for &node in self.layout.paint_order() {
            let Some(region) = self.layout.region(node) else {
                continue;
            };
            if region.size().is_empty() {
                continue;
            }
            let styles = self.styles.get(&node).unwrap_or(&defaults);
            let clip = region.intersection(screen);

            if styles.background.is_some() {
                let style = CellStyle::from_styles(styles);
                let fill: Vec<Strip> = (region.y..region.bottom())
                    .map(|y| Strip::blank(y, region.x, region.width, style.clone()))
                    .collect();
                self.compositor.place_strips(&fill, &clip);
            }

            if let (Some(widget), Some(data)) = (self.widgets.get(node), self.dom.get(node)) {
                let content = region.shrink(styles.padding.unwrap_or(Spacing::ZERO));
                let strips = widget.render(data, content, styles);
                self.compositor.place_strips(&strips, &clip);
            }
        }
        Ok(&self.compositor)
    }

    /// The last rendered frame.
    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    /// The deepest node at cell (x, y) in the last layout.
    pub fn node_at(&self, x: i32, y: i32) -> Option<NodeId> {
        self.layout.node_at(x, y)
    }

    /// The absolute region of `node` in the last layout.
    pub fn region(&self, node: NodeId) -> Option<Region> {
        self.layout.region(node)
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.dom.len())
            .field("elements", &self.elements.len())
            .field("listeners", &self.dispatcher.len())
            .field("size", &(self.compositor.width, self.compositor.height))
            .finish()
    }
}

fn element_mismatch<T: Element>(host: NodeId) -> Error {
    Error::ElementTypeMismatch {
        node: format!("{host:?}"),
        expected: type_name::<T>(),
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::input::MouseEvent;
    use crate::event::message::CountChanged;
    use crate::testing::snapshot::compositor_to_string;
    use crate::widget::traits::WidgetExt;
    use crate::widgets::button::Button;
    use crate::widgets::counter::{Counter, COUNTER_TAG};
    use crate::widgets::static_widget::Static;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn doc() -> Document {
        Document::new(DocumentConfig::default()).unwrap()
    }

    fn counter(doc: &mut Document) -> NodeId {
        let host = doc.create_element(COUNTER_TAG).unwrap();
        doc.append_child(doc.body(), host).unwrap();
        host
    }

    fn part(doc: &Document, host: NodeId, id: &str) -> NodeId {
        let shadow = doc.dom().shadow_root(host).unwrap();
        doc.dom().query_by_id(shadow, id).unwrap()
    }

    fn log() -> (Rc<RefCell<Vec<String>>>, impl Fn(&str) -> Listener) {
        let entries = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&entries);
        let make = move |label: &str| -> Listener {
            let sink = Rc::clone(&sink);
            let label = label.to_owned();
            Rc::new(move |_: &mut Document, _: &mut Envelope| sink.borrow_mut().push(label.clone()))
        };
        (entries, make)
    }

    #[test]
    fn config_builder() {
        let config = DocumentConfig::new()
            .with_size(40, 10)
            .with_css("Body { color: red; }")
            .with_overflow(OverflowPolicy::Wrap);
        assert_eq!((config.width, config.height), (40, 10));
        assert_eq!(config.css.as_deref(), Some("Body { color: red; }"));
        assert_eq!(config.overflow, OverflowPolicy::Wrap);
        assert!(config.registry.is_none());
    }

    #[test]
    fn new_document_has_only_a_body() {
        let doc = doc();
        assert_eq!(doc.dom().len(), 1);
        assert_eq!(doc.dom().get(doc.body()).map(|n| n.widget_type.as_str()), Some(BODY_TYPE));
        assert!(doc.registry().is_defined(COUNTER_TAG));
    }

    #[test]
    fn bad_document_css_fails() {
        let err = Document::new(DocumentConfig::new().with_css("Body {")).unwrap_err();
        assert!(matches!(err, Error::Css(_)));
    }

    #[test]
    fn unknown_tag_fails() {
        let mut doc = doc();
        let err = doc.create_element("x-missing").unwrap_err();
        assert!(matches!(err, Error::UnknownElement(ref t) if t == "x-missing"));
        assert_eq!(doc.dom().len(), 1);
    }

    #[test]
    fn failed_constructor_leaves_nothing_behind() {
        fn broken(doc: &mut Document, host: NodeId) -> Result<Box<dyn Element>> {
            doc.attach_shadow(host, "")?;
            doc.attach_shadow(host, "")?;
            unreachable!()
        }
        let mut doc = doc();
        doc.define("x-broken", broken).unwrap();
        assert!(matches!(doc.create_element("x-broken"), Err(Error::ShadowRootExists(_))));
        assert_eq!(doc.dom().len(), 1);
    }

    #[test]
    fn connect_on_append_and_disconnect_on_remove() {
        let mut doc = doc();
        let host = doc.create_element(COUNTER_TAG).unwrap();
        assert!(!doc.is_connected(host));
        assert!(doc.drain_lifecycle_events().is_empty());

        doc.append_child(doc.body(), host).unwrap();
        assert!(doc.is_connected(host));
        doc.remove(host).unwrap();
        assert!(!doc.is_connected(host));
        assert_eq!(
            doc.drain_lifecycle_events(),
            vec![
                LifecycleEvent::Connected { host, tag: COUNTER_TAG.into() },
                LifecycleEvent::Disconnected { host, tag: COUNTER_TAG.into() },
            ]
        );
    }

    #[test]
    fn remove_drops_everything_under_the_host() {
        let mut doc = doc();
        let host = counter(&mut doc);
        let inc = part(&doc, host, "increment");
        doc.add_event_listener(host, CountChanged::NAME, Rc::new(|_: &mut Document, _: &mut Envelope| {}));
        let nodes_before = doc.dom().len();
        assert_eq!(nodes_before, 6);

        doc.remove(host).unwrap();
        assert_eq!(doc.dom().len(), 1);
        assert!(doc.element_at(host).is_none());
        assert!(matches!(doc.click(inc), Err(Error::NodeNotFound(_))));
        assert_eq!(doc.dispatcher.len(), 0);
        assert!(doc.widgets.is_empty());
        assert!(doc.scoped.is_empty());
    }

    #[test]
    fn hierarchy_rules() {
        let mut doc = doc();
        let host = counter(&mut doc);
        let shadow = doc.dom().shadow_root(host).unwrap();
        let body = doc.body();
        assert!(matches!(doc.append_child(host, body), Err(Error::HierarchyRequest(..))));
        assert!(matches!(doc.append_child(host, host), Err(Error::HierarchyRequest(..))));
        assert!(matches!(doc.append_child(body, shadow), Err(Error::HierarchyRequest(..))));
        assert!(matches!(doc.remove(body), Err(Error::HierarchyRequest(..))));
        assert!(matches!(doc.remove(shadow), Err(Error::HierarchyRequest(..))));
    }

    #[test]
    fn moving_out_of_the_document_disconnects() {
        let mut doc = doc();
        let holder = doc.mount(doc.body(), Static::new("")).unwrap();
        let host = doc.create_element(COUNTER_TAG).unwrap();
        doc.append_child(holder, host).unwrap();
        assert!(doc.is_connected(host));

        let detached = doc.create_element(COUNTER_TAG).unwrap();
        doc.append_child(detached, holder).unwrap();
        assert!(!doc.is_connected(host));
    }

    #[test]
    fn attach_shadow_validates_css_first() {
        let mut doc = doc();
        let node = doc.mount(doc.body(), Static::new("x")).unwrap();
        assert!(matches!(doc.attach_shadow(node, "Button {"), Err(Error::Css(_))));
        assert!(doc.dom().shadow_root(node).is_none());
        doc.attach_shadow(node, "").unwrap();
        assert!(matches!(doc.attach_shadow(node, ""), Err(Error::ShadowRootExists(_))));
    }

    #[test]
    fn element_type_is_checked() {
        let mut doc = doc();
        let host = counter(&mut doc);
        let plain = doc.mount(doc.body(), Static::new("x")).unwrap();
        assert!(doc.element::<Counter>(host).is_ok());
        assert!(matches!(
            doc.element::<Counter>(plain),
            Err(Error::ElementTypeMismatch { .. })
        ));
        assert_eq!(doc.element_at(host).map(|e| e.tag_name()), Some(COUNTER_TAG));
    }

    #[test]
    fn click_bubbles_out_of_the_shadow_tree_retargeted() {
        let mut doc = doc();
        let host = counter(&mut doc);
        let inc = part(&doc, host, "increment");
        let targets = Rc::new(RefCell::new(Vec::new()));
        for node in [inc, host, doc.body()] {
            let sink = Rc::clone(&targets);
            doc.add_event_listener(
                node,
                Click::NAME,
                Rc::new(move |_: &mut Document, env: &mut Envelope| sink.borrow_mut().push((env.current, env.target))),
            );
        }
        doc.click(inc).unwrap();
        let body = doc.body();
        assert_eq!(*targets.borrow(), vec![(inc, inc), (host, host), (body, host)]);
    }

    #[test]
    fn handled_events_stop_after_current_node() {
        let mut doc = doc();
        let button = doc.mount(doc.body(), Button::new("ok")).unwrap();
        let (entries, listener) = log();
        doc.add_event_listener(
            button,
            Click::NAME,
            Rc::new(|_: &mut Document, env: &mut Envelope| env.mark_handled()),
        );
        doc.add_event_listener(button, Click::NAME, listener("button"));
        doc.add_event_listener(doc.body(), Click::NAME, listener("body"));

        assert!(doc.dispatch_event(button, Click).unwrap());
        assert_eq!(*entries.borrow(), vec!["button".to_owned()]);
    }

    #[test]
    fn removed_listener_does_not_fire() {
        let mut doc = doc();
        let button = doc.mount(doc.body(), Button::new("ok")).unwrap();
        let (entries, listener) = log();
        let id = doc.add_event_listener(button, Click::NAME, listener("a"));
        assert!(doc.remove_event_listener(id));
        assert!(!doc.remove_event_listener(id));
        doc.click(button).unwrap();
        assert!(entries.borrow().is_empty());
    }

    #[test]
    fn listener_removed_during_dispatch_is_skipped() {
        let mut doc = doc();
        let host = counter(&mut doc);
        let (entries, listener) = log();
        let victim = Rc::new(std::cell::Cell::new(None));
        let slot = Rc::clone(&victim);
        doc.add_event_listener(
            host,
            CountChanged::NAME,
            Rc::new(move |doc: &mut Document, _: &mut Envelope| {
                if let Some(id) = slot.get() {
                    doc.remove_event_listener(id);
                }
            }),
        );
        victim.set(Some(doc.add_event_listener(host, CountChanged::NAME, listener("second"))));

        Counter::increment(&mut doc, host).unwrap();
        Counter::increment(&mut doc, host).unwrap();
        assert!(entries.borrow().is_empty());
    }

    #[test]
    fn listeners_of_a_host_removed_during_dispatch_are_skipped() {
        let mut doc = doc();
        let host = counter(&mut doc);
        let inc = part(&doc, host, "increment");
        let (entries, listener) = log();
        doc.add_event_listener(
            inc,
            Click::NAME,
            Rc::new(move |doc: &mut Document, _: &mut Envelope| doc.remove(host).unwrap()),
        );
        doc.add_event_listener(inc, Click::NAME, listener("button"));
        doc.add_event_listener(host, Click::NAME, listener("host"));
        doc.add_event_listener(doc.body(), Click::NAME, listener("body"));

        doc.click(inc).unwrap();
        assert!(!doc.dom().contains(host));
        assert!(entries.borrow().is_empty());
    }

    #[test]
    fn document_css_does_not_reach_into_shadow_trees() {
        let css = "Button { background: red; } #count { color: red; } my-counter { color: green; }";
        let mut doc = Document::new(DocumentConfig::new().with_css(css)).unwrap();
        let host = counter(&mut doc);
        let mine = doc.mount(doc.body(), Button::new("mine")).unwrap();
        doc.update_layout().unwrap();

        let inc = part(&doc, host, "increment");
        let count = part(&doc, host, "count");
        assert_eq!(
            doc.computed_styles(inc).and_then(|s| s.background.clone()).as_deref(),
            Some("#3498db")
        );
        assert_eq!(
            doc.computed_styles(mine).and_then(|s| s.background.clone()).as_deref(),
            Some("red")
        );
        assert_eq!(doc.computed_styles(count).and_then(|s| s.color.clone()), None);
        assert_eq!(
            doc.computed_styles(host).and_then(|s| s.color.clone()).as_deref(),
            Some("green")
        );
    }

    #[test]
    fn host_does_not_inherit_from_the_document() {
        let css = "Body { color: red; text-style: italic; }";
        let mut doc = Document::new(DocumentConfig::new().with_css(css)).unwrap();
        let host = counter(&mut doc);
        let outside = doc.mount(doc.body(), Static::new("x")).unwrap();
        doc.update_layout().unwrap();

        let count = part(&doc, host, "count");
        assert_eq!(
            doc.computed_styles(outside).and_then(|s| s.color.clone()).as_deref(),
            Some("red")
        );
        let host_styles = doc.computed_styles(host).unwrap();
        assert_eq!(host_styles.color, None);
        assert_eq!(host_styles.text_style, None);
        let count_styles = doc.computed_styles(count).unwrap();
        assert_eq!(count_styles.color, None);
        assert_eq!(count_styles.text_style.and_then(|t| t.italic), None);
        assert_eq!(count_styles.text_style.and_then(|t| t.bold), Some(true));
    }

    #[test]
    fn render_counter_row() {
        let mut doc = Document::new(DocumentConfig::new().with_size(20, 2)).unwrap();
        let host = counter(&mut doc);
        let text = compositor_to_string(doc.render().unwrap());
        assert_eq!(text, "  -   0   +\n");

        Counter::decrement(&mut doc, host).unwrap();
        let text = compositor_to_string(doc.render().unwrap());
        assert_eq!(text, "  -   -1   +\n");
    }

    #[test]
    fn render_paints_button_background_over_padding() {
        let mut doc = Document::new(DocumentConfig::new().with_size(20, 1)).unwrap();
        counter(&mut doc);
        let frame = doc.render().unwrap();
        for x in 0..5 {
            assert_eq!(
                frame.get_cell(x, 0).and_then(|c| c.style.bg.clone()).as_deref(),
                Some("#3498db")
            );
        }
        assert_eq!(frame.get_cell(6, 0).map(|c| c.style.bold), Some(true));
        assert_eq!(frame.get_cell(5, 0).and_then(|c| c.style.bg.clone()), None);
    }

    #[test]
    fn mouse_press_clicks_the_button_under_it() {
        let mut doc = doc();
        let host = counter(&mut doc);
        doc.handle_input(&InputEvent::Mouse(MouseEvent::left_press(11, 0))).unwrap();
        doc.handle_input(&InputEvent::Mouse(MouseEvent::left_press(9, 0))).unwrap();
        assert_eq!(doc.element::<Counter>(host).unwrap().count(), 2);

        doc.handle_input(&InputEvent::Mouse(MouseEvent::left_press(0, 0))).unwrap();
        assert_eq!(doc.element::<Counter>(host).unwrap().count(), 1);

        doc.handle_input(&InputEvent::Mouse(MouseEvent::left_press(6, 0))).unwrap();
        doc.handle_input(&InputEvent::Mouse(MouseEvent::left_press(40, 5))).unwrap();
        assert_eq!(doc.element::<Counter>(host).unwrap().count(), 1);
    }

    #[test]
    fn node_at_and_region_after_layout() {
        let mut doc = doc();
        let host = counter(&mut doc);
        doc.update_layout().unwrap();
        let dec = part(&doc, host, "decrement");
        assert_eq!(doc.region(dec), Some(Region::new(0, 0, 5, 1)));
        assert_eq!(doc.node_at(3, 0), Some(dec));
        assert_eq!(doc.region(host).map(|r| r.width), Some(80));
    }

    #[test]
    fn resize_input_changes_viewport() {
        let mut doc = doc();
        doc.handle_input(&InputEvent::Resize { width: 30, height: 5 }).unwrap();
        let frame = doc.render().unwrap();
        assert_eq!((frame.width, frame.height), (30, 5));
        assert_eq!((doc.config().width, doc.config().height), (30, 5));
    }

    #[test]
    fn mounted_widget_keeps_builder_id() {
        let mut doc = doc();
        let node = doc.mount(doc.body(), Button::new("go").with_id("go")).unwrap();
        assert_eq!(doc.dom().query_by_id(doc.body(), "go"), Some(node));
        assert_eq!(doc.text_content(node), Some("go"));
        doc.set_text_content(node, "went").unwrap();
        assert_eq!(doc.text_content(node), Some("went"));
    }

    #[test]
    fn debug_is_summary() {
        let out = format!("{:?}", doc());
        assert!(out.contains("Document"));
        assert!(out.contains("nodes: 1"));
    }
}
