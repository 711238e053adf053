//! CLI module for Concierge.

mod chat;
mod output;

pub use chat::{build_agent, is_exit_command, run_chat, run_session};
pub use output::Output;

use clap::Parser;

/// Concierge - a terminal assistant
///
/// Ask about your resume, the weather, or your meetings. Type 'exit' or
/// 'quit' to leave.
#[derive(Parser, Debug)]
#[command(name = "concierge")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Chat model to use instead of the configured one
    #[arg(short, long)]
    pub model: Option<String>,
}
