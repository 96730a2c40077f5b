//! Core data models for search results and their display form.

mod display;
mod result;

pub use display::DisplayResult;
pub use result::{decode_results, decode_value, DecodeError, SearchResult};
