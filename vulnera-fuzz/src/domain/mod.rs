//! Domain layer for API fuzzing

pub mod entities;
pub mod value_objects;

pub use entities::{Finding, FindingCategory, FindingSeverity};
pub use value_objects::*;
