//! Vulnera FuzzGate - pre-merge API fuzzing module
//!
//! This crate discovers the endpoints of a running HTTP service, sends a fixed
//! catalog of boundary and malicious values to every parameter, classifies the
//! responses into findings and reduces them to a pass/fail gate verdict.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod module;

pub use module::*;
