//! Local persistence of Spotify API responses.

mod cache;

pub use cache::{DiskCache, ResponseCache};
