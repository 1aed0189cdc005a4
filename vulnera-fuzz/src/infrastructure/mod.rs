//! Infrastructure layer for API fuzzing

pub mod catalog;
pub mod classifier;
pub mod client;
pub mod discovery;
pub mod dispatcher;
pub mod generator;
pub mod report;

pub use catalog::*;
pub use classifier::*;
pub use client::*;
pub use discovery::*;
pub use dispatcher::*;
pub use generator::*;
pub use report::*;
