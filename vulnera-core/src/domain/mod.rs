//! Domain values shared across Vulnera crates

pub mod severity;

pub use severity::*;
