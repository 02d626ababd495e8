//! Configuration types
//!
//! Board-agnostic configuration structures, serializable with the
//! `serde` feature.

pub mod hardware;

pub use hardware::*;
