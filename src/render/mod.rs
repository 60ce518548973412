//! Rendering pipeline: strips, compositor, terminal driver.

pub mod compositor;
pub mod strip;
pub mod driver;

pub use strip::{Strip, StyledCell, CellStyle};
pub use compositor::{Compositor, CellUpdate};
pub use driver::{parse_color, Driver};
