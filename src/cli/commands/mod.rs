//! CLI Commands Module
//!
//! This module contains all CLI subcommand implementations.

pub mod scan;
