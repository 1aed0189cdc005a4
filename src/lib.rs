//! Vulnera FuzzGate - command-line front end
//!
//! Wires configuration, logging and the fuzz engine into the `fuzzgate` binary.

pub mod cli;

pub use vulnera_core::{Config, init_tracing};

// Re-export for convenience
pub use vulnera_core;
pub use vulnera_fuzz;
