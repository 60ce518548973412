//! Pilot: programmatic interaction with a headless App.
//!
//! The `Pilot` wraps an [`App`](crate::app::App) in headless mode and provides
//! methods to simulate user input (mouse clicks, key presses, resize), reach
//! into counters' shadow trees, record `count-changed` payloads, and render the
//! document to text for snapshot testing.

use std::cell::RefCell;
use std::rc::Rc;

use crate::app::App;
use crate::document::{Document, DocumentConfig};
use crate::dom::node::NodeId;
use crate::error::{Error, Result};
use crate::event::handler::ListenerId;
use crate::event::input::{InputEvent, Key, KeyEvent, Modifiers, MouseEvent};
use crate::widgets::counter::CounterHandle;

use super::snapshot::compositor_to_string;

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless app driver for testing.
///
/// # Examples
///
/// ```ignore
/// use counter_element::testing::Pilot;
///
/// let mut pilot = Pilot::new(40, 2)?;
/// let counter = pilot.add_counter()?;
/// let seen = pilot.record(counter);
/// pilot.click(11, 0)?;
/// assert_eq!(pilot.render_text()?, "  -   1   +\n");
/// assert_eq!(*seen.borrow(), vec![1]);
/// ```
pub struct Pilot {
    app: App,
}

impl Pilot {
    /// Create a headless app with the given terminal size.
    pub fn new(width: u16, height: u16) -> Result<Self> {
        Self::with_config(DocumentConfig::new().with_size(width, height))
    }

    /// Create a headless app from a full document config.
    pub fn with_config(config: DocumentConfig) -> Result<Self> {
        Ok(Self {
            app: App::new_headless(config)?,
        })
    }

    // ── Setup ────────────────────────────────────────────────────────

    /// Create a counter and append it to the body.
    pub fn add_counter(&mut self) -> Result<CounterHandle> {
        CounterHandle::create(self.app.document_mut())
    }

    /// The node with `id` inside `host`'s shadow root.
    pub fn part(&self, host: NodeId, id: &str) -> Result<NodeId> {
        let dom = self.app.document().dom();
        dom.shadow_root(host)
            .and_then(|shadow| dom.query_by_id(shadow, id))
            .ok_or_else(|| Error::node_not_found(format!("{host:?} #{id}")))
    }

    /// Collect every `count-changed` payload delivered to `counter` from now on.
    pub fn record(&mut self, counter: CounterHandle) -> Rc<RefCell<Vec<i64>>> {
        self.record_with_id(counter).0
    }

    /// Like [`record`](Self::record), also returning the listener id so the
    /// recording can be stopped.
    pub fn record_with_id(
        &mut self,
        counter: CounterHandle,
    ) -> (Rc<RefCell<Vec<i64>>>, ListenerId) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let id = counter.on_count_changed(self.app.document_mut(), move |n| {
            sink.borrow_mut().push(n);
        });
        (seen, id)
    }

    // ── Input simulation ─────────────────────────────────────────────

    /// Simulate a left-button mouse press at (x, y).
    pub fn click(&mut self, x: u16, y: u16) -> Result<()> {
        self.app
            .handle_input(InputEvent::Mouse(MouseEvent::left_press(x, y)))
    }

    /// Click a node directly, without hit testing.
    pub fn click_node(&mut self, node: NodeId) -> Result<()> {
        self.app.document_mut().click(node)
    }

    /// Click the node with `id` inside `host`'s shadow root.
    pub fn click_part(&mut self, host: NodeId, id: &str) -> Result<()> {
        let node = self.part(host, id)?;
        self.click_node(node)
    }

    /// Simulate a key press with no modifiers.
    pub fn press_key(&mut self, key: Key) -> Result<()> {
        self.press_key_with(key, Modifiers::NONE)
    }

    /// Simulate a key press with the given modifiers.
    pub fn press_key_with(&mut self, key: Key, modifiers: Modifiers) -> Result<()> {
        self.app
            .handle_input(InputEvent::Key(KeyEvent::new(key, modifiers)))
    }

    /// Simulate a terminal resize.
    pub fn resize(&mut self, width: u16, height: u16) -> Result<()> {
        self.app.handle_input(InputEvent::Resize { width, height })
    }

    // ── Query ────────────────────────────────────────────────────────

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn document(&self) -> &Document {
        self.app.document()
    }

    pub fn document_mut(&mut self) -> &mut Document {
        self.app.document_mut()
    }

    /// Whether the app is still running (has not quit).
    pub fn is_running(&self) -> bool {
        !self.app.should_quit()
    }

    /// Render the document and return the frame as text.
    pub fn render_text(&mut self) -> Result<String> {
        let frame = self.app.document_mut().render()?;
        Ok(compositor_to_string(frame))
    }
}

// ===========================================================================
// Tests
// ===========================================================================
