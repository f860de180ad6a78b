//! Command-line interface for the flowlog admin binary.

use clap::{Parser, Subcommand};

/// flowlog - append-only event log
#[derive(Parser, Debug)]
#[command(name = "flowlog")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Record an entry
    #[command(alias = "l")]
    Log {
        /// Entry category, e.g. "auth"
        category: String,

        /// printf-style message template
        template: String,

        /// Values substituted into the template, in order
        args: Vec<String>,

        /// Subject the entry belongs to
        #[arg(long, default_value_t = 0)]
        subject: i64,

        /// One of warning, notice, info, debug (default notice)
        #[arg(long)]
        severity: Option<String>,
    },

    /// List entries for a subject, newest first
    #[command(alias = "s")]
    Show {
        /// Subject id
        subject_id: i64,
    },
}
