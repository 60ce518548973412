//! # counter-element
//!
//! A counter custom element for a CSS-styled terminal DOM.
//!
//! The `my-counter` element renders a decrement button, a count readout and an
//! increment button inside a shadow root, and dispatches a `count-changed` event on
//! its host every time the count moves. Everything around it (a slotmap DOM with
//! shadow roots, a scoped CSS cascade, taffy layout, a strip compositor and a
//! crossterm driver) is the host environment the element is rendered in.
//!
//! ## Core Systems
//!
//! - **[`document`]**: Document: element table, listeners, styling, layout, paint
//! - **[`registry`]**: Process-wide tag name to constructor registry
//! - **[`widgets`]**: Built-in widgets: Button, Static, and the Counter element
//! - **[`css`]**: CSS engine: tokenizer, parser, specificity, scoped cascade
//! - **[`dom`]**: Slotmap-backed DOM arena with shadow roots and scoped queries
//! - **[`event`]**: Messages, listeners, composed dispatch, input events
//! - **[`layout`]**: Taffy-powered layout of the composed tree
//! - **[`render`]**: Strip compositor and crossterm driver
//! - **[`app`]**: Interactive terminal host
//! - **[`testing`]**: Headless Pilot and snapshot helpers
//! - **[`geometry`]**: Offset, Size, Region, Spacing primitives

// Foundation
pub mod error;
pub mod geometry;

// Core systems
pub mod css;
pub mod dom;
pub mod layout;

// Elements
pub mod registry;
pub mod widget;
pub mod widgets;

// Events
pub mod event;

// Rendering
pub mod render;

// Hosting
pub mod app;
pub mod document;
pub mod testing;

pub use document::{Document, DocumentConfig};
pub use error::{Error, Result};
pub use widgets::counter::{Counter, CounterHandle, OverflowPolicy, COUNTER_TAG};
