//! cityroute CLI library.
//!
//! Subcommand handlers and output formatting for the `cityroute` binary.

pub mod commands;
pub mod output;
