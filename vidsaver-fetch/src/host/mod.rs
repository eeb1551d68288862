//! Host APIs for VidSaver extraction strategies.
//!
//! - [`http`] - Page fetcher trait and the reqwest-backed HTTP client
//! - [`identity`] - Client identity (user agent) rotation
//! - [`fixture`] - Canned-response fetcher for offline runs

pub mod fixture;
pub mod http;
pub mod identity;

pub use fixture::FixtureFetcher;
pub use http::{FetchedPage, HttpClient, PageFetcher, PageRequest};
pub use identity::{ClientIdentity, DeviceClass, IdentityPool};
