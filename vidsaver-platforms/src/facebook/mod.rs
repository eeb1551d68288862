//! Facebook platform implementation.
//!
//! A single page strategy: inline player sources, Open Graph tags, then the
//! newer `browser_native_*` fields.

mod descriptor;
pub(crate) mod parser;
mod strategies;

pub use descriptor::facebook_descriptor;
pub use strategies::FacebookPageStrategy;
