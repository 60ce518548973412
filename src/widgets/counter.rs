//! The `my-counter` custom element.
//!
//! A counter owns a single signed count. Its shadow root holds a decrement
//! button, a readout and an increment button; clicking a button steps the
//! count, rewrites the readout, and then dispatches [`CountChanged`] on the
//! host. Listeners therefore always observe a readout that matches the payload.
//!
//! ```ignore
//! let mut doc = Document::new(DocumentConfig::default())?;
//! let counter = CounterHandle::create(&mut doc)?;
//! counter.increment(&mut doc)?;
//! assert_eq!(counter.display_text(&doc)?, "1");
//! ```

use std::any::Any;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::document::Document;
use crate::dom::node::NodeId;
use crate::error::{Error, Result};
use crate::event::handler::ListenerId;
use crate::event::message::{Click, CountChanged, Envelope};
use crate::widget::traits::{Element, WidgetExt};
use crate::widgets::button::Button;
use crate::widgets::static_widget::Static;

/// Tag name the counter is registered under.
pub const COUNTER_TAG: &str = "my-counter";

/// Scoped stylesheet of every counter's shadow root.
pub const COUNTER_CSS: &str = "
:host {
    all: initial;
    layout: horizontal;
}

Button {
    padding: 0 2;
    background: #3498db;
    color: white;
}

Static {
    margin: 0 1;
    text-style: bold;
}
";

// ---------------------------------------------------------------------------
// OverflowPolicy
// ---------------------------------------------------------------------------

/// What a step does at the bounds of `i64`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Stay at `i64::MAX` / `i64::MIN`.
    #[default]
    Saturate,
    /// Wrap around to the opposite bound.
    Wrap,
}

impl OverflowPolicy {
    /// `count + 1` under this policy.
    pub fn increment(self, count: i64) -> i64 {
        match self {
            OverflowPolicy::Saturate => count.saturating_add(1),
            OverflowPolicy::Wrap => count.wrapping_add(1),
        }
    }

    /// `count - 1` under this policy.
    pub fn decrement(self, count: i64) -> i64 {
        match self {
            OverflowPolicy::Saturate => count.saturating_sub(1),
            OverflowPolicy::Wrap => count.wrapping_sub(1),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Step {
    Increment,
    Decrement,
}

// ---------------------------------------------------------------------------
// Counter
// ---------------------------------------------------------------------------

/// Instance state of one `my-counter` element.
#[derive(Debug)]
pub struct Counter {
    host: NodeId,
    count: i64,
    display: NodeId,
    increment_button: NodeId,
    decrement_button: NodeId,
    overflow: OverflowPolicy,
}

impl Counter {
    /// Build a counter for `host`: attach its shadow root, fill it, and bind the
    /// button listeners to this host.
    pub fn construct(doc: &mut Document, host: NodeId) -> Result<Box<dyn Element>> {
        let shadow = doc.attach_shadow(host, COUNTER_CSS)?;
        let decrement_button = doc.mount(shadow, Button::new("-").with_id("decrement"))?;
        let display = doc.mount(shadow, Static::new("0").with_id("count"))?;
        let increment_button = doc.mount(shadow, Button::new("+").with_id("increment"))?;

        doc.add_event_listener(
            decrement_button,
            Click::NAME,
            Rc::new(move |doc: &mut Document, _: &mut Envelope| {
                if let Err(err) = Counter::step(doc, host, Step::Decrement) {
                    warn!(?host, %err, "decrement failed");
                }
            }),
        );
        doc.add_event_listener(
            increment_button,
            Click::NAME,
            Rc::new(move |doc: &mut Document, _: &mut Envelope| {
                if let Err(err) = Counter::step(doc, host, Step::Increment) {
                    warn!(?host, %err, "increment failed");
                }
            }),
        );

        debug!(?host, "counter constructed");
        Ok(Box::new(Counter {
            host,
            count: 0,
            display,
            increment_button,
            decrement_button,
            overflow: doc.config().overflow,
        }))
    }

    pub fn count(&self) -> i64 {
        self.count
    }

    /// The `#count` readout node.
    pub fn display(&self) -> NodeId {
        self.display
    }

    pub fn increment_button(&self) -> NodeId {
        self.increment_button
    }

    pub fn decrement_button(&self) -> NodeId {
        self.decrement_button
    }

    /// Add one to the counter at `host`, re-render it and notify.
    pub fn increment(doc: &mut Document, host: NodeId) -> Result<i64> {
        Self::step(doc, host, Step::Increment)
    }

    /// Subtract one from the counter at `host`, re-render it and notify.
    pub fn decrement(doc: &mut Document, host: NodeId) -> Result<i64> {
        Self::step(doc, host, Step::Decrement)
    }

    fn step(doc: &mut Document, host: NodeId, step: Step) -> Result<i64> {
        let (display, count) = doc.with_element_mut(host, |counter: &mut Counter| {
            counter.count = match step {
                Step::Increment => counter.overflow.increment(counter.count),
                Step::Decrement => counter.overflow.decrement(counter.count),
            };
            (counter.display, counter.count)
        })?;
        doc.set_text_content(display, count.to_string())?;
        debug!(?host, count, "count changed");
        doc.dispatch_event(host, CountChanged(count))?;
        Ok(count)
    }
}

impl Element for Counter {
    fn tag_name(&self) -> &str {
        COUNTER_TAG
    }

    fn host(&self) -> NodeId {
        self.host
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ---------------------------------------------------------------------------
// CounterHandle
// ---------------------------------------------------------------------------

/// A typed reference to a counter in a document.
///
/// Holds only the host id; every call goes through the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CounterHandle {
    host: NodeId,
}

impl CounterHandle {
    /// Create a counter and append it to the document body.
    pub fn create(doc: &mut Document) -> Result<Self> {
        let host = doc.create_element(COUNTER_TAG)?;
        doc.append_child(doc.body(), host)?;
        Ok(Self { host })
    }

    /// Wrap an existing host node, checking it holds a counter.
    pub fn from_host(doc: &Document, host: NodeId) -> Result<Self> {
        doc.element::<Counter>(host)?;
        Ok(Self { host })
    }

    pub fn host(&self) -> NodeId {
        self.host
    }

    pub fn count(&self, doc: &Document) -> Result<i64> {
        Ok(doc.element::<Counter>(self.host)?.count())
    }

    /// Current text of the `#count` readout.
    pub fn display_text(&self, doc: &Document) -> Result<String> {
        let display = doc.element::<Counter>(self.host)?.display();
        doc.text_content(display)
            .map(str::to_owned)
            .ok_or_else(|| Error::node_not_found(display))
    }

    pub fn increment(&self, doc: &mut Document) -> Result<i64> {
        Counter::increment(doc, self.host)
    }

    pub fn decrement(&self, doc: &mut Document) -> Result<i64> {
        Counter::decrement(doc, self.host)
    }

    /// Call `f` with the payload of every `count-changed` on this counter.
    pub fn on_count_changed(&self, doc: &mut Document, f: impl Fn(i64) + 'static) -> ListenerId {
        doc.add_event_listener(
            self.host,
            CountChanged::NAME,
            Rc::new(move |_: &mut Document, env: &mut Envelope| {
                if let Some(changed) = env.downcast_ref::<CountChanged>() {
                    f(changed.count());
                }
            }),
        )
    }
}

// ===========================================================================
// Tests
// ===========================================================================
