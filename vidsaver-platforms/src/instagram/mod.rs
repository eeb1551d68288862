//! Instagram platform implementation.
//!
//! Three strategies, tried in order: the structured JSON endpoint, the
//! embed page, then the full post page. Media is served from
//! `cdninstagram.com` and `fbcdn.net`.

mod descriptor;
pub(crate) mod page;
pub(crate) mod parser;
mod strategies;

pub use descriptor::instagram_descriptor;
pub use page::PageMatch;
pub use parser::{MediaNode, PostPayload};
pub use strategies::{InstagramEmbedStrategy, InstagramJsonStrategy, InstagramPageStrategy};
