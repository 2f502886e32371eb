//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - expand: print the run times of a schedule draft
//! - check: test a draft against the session without adding it
//! - add / update / remove: edit the session's schedules
//! - list: show the session's schedules
//! - clear: reset the session

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// freqsched - run-frequency scheduling for batch job requests
#[derive(Parser, Debug)]
#[command(name = "freqsched")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Session file (overrides the configured path)
    #[arg(short, long, global = true)]
    pub session: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the run times a schedule draft expands to
    Expand {
        /// YAML or JSON schedule draft
        file: PathBuf,
    },

    /// Check a draft against the session without adding it
    Check {
        /// YAML or JSON schedule draft
        file: PathBuf,
    },

    /// Add a schedule draft to the session
    Add {
        /// YAML or JSON schedule draft
        file: PathBuf,
    },

    /// Replace an existing schedule
    Update {
        /// Schedule id or prefix id
        id: String,

        /// YAML or JSON schedule draft
        file: PathBuf,
    },

    /// Remove a schedule
    Remove {
        /// Schedule id or prefix id
        id: String,
    },

    /// List schedules in the session
    List {
        /// Only show this frequency class (daily, weekly, monthly, annually, holiday)
        #[arg(short = 'k', long)]
        class: Option<String>,
    },

    /// Reset the session
    Clear,
}
