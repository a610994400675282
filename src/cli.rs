//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// NewsDaemon - conversational news briefing scheduler
#[derive(Parser)]
#[command(
    name = "nd",
    about = "Schedule daily news briefings and weekly digests from a chat",
    version,
    after_help = "Logs are written to: ~/.local/share/newsdaemon/logs/newsdaemon.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Start an interactive chat session (the default)
    Chat,

    /// Print today's summary for a subject and exit
    Summary {
        /// Company or topic to look up
        subject: String,
    },

    /// Print a weekly digest for a subject and exit
    Digest {
        /// Company or topic to look up
        subject: String,
    },
}
