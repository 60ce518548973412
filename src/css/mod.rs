//! CSS engine: tokenizer, parser, styles, specificity, scoped cascade.

pub mod tokenizer;
pub mod model;
pub mod parser;
pub mod styles;
pub mod properties;
pub mod specificity;
pub mod stylesheet;

pub use parser::{parse_css, ParseError};
pub use styles::Styles;
pub use stylesheet::{CompiledStylesheet, MatchContext};
