//! Analysis modules.
//!
//! Derives chart-ready counts from the loaded roster.

pub mod aggregator;

pub use aggregator::*;
