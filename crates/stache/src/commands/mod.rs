//! Command implementations for the stache CLI
//!
//! Each command module handles the CLI interface and delegates to
//! stache-engine for the actual work.

pub mod render;
pub mod tags;
