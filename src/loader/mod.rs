//! Source document loading.

pub mod fetcher;

pub use fetcher::{load_session, LoadOptions, Source};
