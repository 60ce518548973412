//! Layout engine: taffy integration, style resolution, hit testing.

pub mod engine;
pub mod resolve;
pub mod spatial;

pub use engine::LayoutEngine;
pub use spatial::SpatialMap;
