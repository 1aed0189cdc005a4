//! Application layer for API fuzzing

pub mod use_cases;

pub use use_cases::*;
