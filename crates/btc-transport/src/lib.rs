//! Upstream transport layer.
//!
//! Network access for the three free-tier data sources:
//! - [`source`]: the [`UpstreamSource`] seam and its `ureq`-backed [`HttpSource`]
//! - [`endpoints`]: default base URLs and environment overrides
//! - [`stub`]: an in-memory source with call counting, used by tests
//!
//! # Example
//!
//! ```ignore
//! use btc_transport::{Endpoints, HttpSource, UpstreamSource};
//!
//! let endpoints = Endpoints::from_env();
//! let source = HttpSource::from_env();
//! let tip = source.get_json(&format!("{}/block/0", endpoints.explorer)).await?;
//! ```

pub mod endpoints;
pub mod error;
pub mod source;
pub mod stub;

pub use endpoints::Endpoints;
pub use error::TransportError;
pub use source::{HttpSource, UpstreamSource};
pub use stub::StubSource;
