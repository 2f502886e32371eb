//! CLI module for freqsched - command-line interface and subcommands.
//!
//! Operates on a session file so successive invocations build up one set of
//! run-frequency rules.

pub mod commands;

pub use commands::Cli;
