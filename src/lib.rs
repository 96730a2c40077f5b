//! # Paper Search
//!
//! A search box for a JSON paper search API: a submitted query is sent to
//! `GET /api/0.1/search/{query}`, the response is decoded into typed records,
//! projected into display lines and handed to a renderer.
//!
//! ## Architecture
//!
//! - [`models`]: `SearchResult`, `DisplayResult` and payload decoding
//! - [`render`]: the projector (title/author/snippet lines) and result sinks
//! - [`client`]: the `SearchApi` trait with HTTP and mock implementations
//! - [`session`]: the search box loop tying API, projector and sink together
//! - [`utils`]: character-budget truncation and the shared HTTP client
//! - [`config`]: configuration management
//! - [`ui`]: terminal chrome for the CLI

pub mod client;
pub mod config;
pub mod models;
pub mod render;
pub mod session;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use models::{DisplayResult, SearchResult};
pub use render::{project, Projector};
pub use utils::truncate;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
