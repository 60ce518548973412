//! Crate error type.

use crate::css::parser::ParseError;

/// Errors raised by the document, the element registry and the terminal host.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no element is registered under the tag name `{0}`")]
    UnknownElement(String),
    #[error("`{name}` is not a valid custom element name: {reason}")]
    InvalidTagName { name: String, reason: &'static str },
    #[error("the tag name `{0}` has already been defined")]
    AlreadyDefined(String),
    #[error("node {0} does not exist in the document")]
    NodeNotFound(String),
    #[error("cannot move node {0} there: {1}")]
    HierarchyRequest(String, &'static str),
    #[error("node {0} already has a shadow root")]
    ShadowRootExists(String),
    #[error("element at node {node} is not a `{expected}`")]
    ElementTypeMismatch { node: String, expected: &'static str },
    #[error("invalid stylesheet: {0}")]
    Css(#[from] ParseError),
    #[error("layout failed: {0}")]
    Layout(#[from] taffy::TaffyError),
    #[error("terminal i/o failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Build a [`Error::NodeNotFound`] from any debuggable node key.
    pub(crate) fn node_not_found(node: impl std::fmt::Debug) -> Self {
        Self::NodeNotFound(format!("{node:?}"))
    }
}
