//! Custom element registry.
//!
//! Maps tag names to element constructors. [`ElementRegistry::global`] holds the
//! built-in elements and is initialized once per process; every [`Document`]
//! starts from a copy of it and may define more tags of its own.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use tracing::info;

use crate::document::Document;
use crate::dom::node::NodeId;
use crate::error::{Error, Result};
use crate::widget::traits::Element;
use crate::widgets::counter::{Counter, COUNTER_TAG};

/// Builds the element instance for a freshly created host node.
pub type ElementConstructor = fn(&mut Document, NodeId) -> Result<Box<dyn Element>>;

/// Hyphenated names that are taken by the platform.
const RESERVED_NAMES: &[&str] = &[
    "annotation-xml",
    "color-profile",
    "font-face",
    "font-face-src",
    "font-face-uri",
    "font-face-format",
    "font-face-name",
    "missing-glyph",
];

/// Tag name -> constructor table.
#[derive(Debug, Clone, Default)]
pub struct ElementRegistry {
    definitions: BTreeMap<String, ElementConstructor>,
}

impl ElementRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry with the built-in elements defined.
    pub fn global() -> &'static ElementRegistry {
        static GLOBAL: OnceLock<ElementRegistry> = OnceLock::new();
        GLOBAL.get_or_init(|| {
            let mut registry = ElementRegistry::new();
            registry.definitions.insert(COUNTER_TAG.to_owned(), Counter::construct);
            registry
        })
    }

    /// Register `constructor` under `name`.
    ///
    /// Fails if the name is not a valid custom element name or is already taken.
    pub fn define(&mut self, name: &str, constructor: ElementConstructor) -> Result<()> {
        validate_name(name)?;
        if self.definitions.contains_key(name) {
            return Err(Error::AlreadyDefined(name.to_owned()));
        }
        self.definitions.insert(name.to_owned(), constructor);
        info!(tag = name, "custom element defined");
        Ok(())
    }

    /// The constructor registered under `name`.
    pub fn get(&self, name: &str) -> Option<ElementConstructor> {
        self.definitions.get(name).copied()
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    /// Defined tag names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.definitions.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// Check the custom element naming rules.
pub fn validate_name(name: &str) -> Result<()> {
    let invalid = |reason| Error::InvalidTagName {
        name: name.to_owned(),
        reason,
    };
    match name.chars().next() {
        None => return Err(invalid("name is empty")),
        Some(c) if !c.is_ascii_lowercase() => {
            return Err(invalid("must start with a lowercase ASCII letter"))
        }
        Some(_) => {}
    }
    if !name.contains('-') {
        return Err(invalid("must contain a hyphen"));
    }
    if name.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(invalid("must not contain uppercase letters"));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain whitespace"));
    }
    if RESERVED_NAMES.contains(&name) {
        return Err(invalid("name is reserved"));
    }
    Ok(())
}

// ===========================================================================
// Tests
// ===========================================================================
