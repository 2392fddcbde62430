//! Defines the command-line interface for the application.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "cmd-ai-resolver",
    version,
    about = "Processes a shell command file with AI instructions.",
    long_about = "Processes a shell command file with AI instructions.\n\n\
The file should contain a shell command, possibly with an AI instruction tag \
like <AI>your ai prompt</AI>. The first tag is sent to a language model and \
replaced with the shell segment it returns; the modified command is saved \
back to the file. Files without a tag can be handed to a pass-through command."
)]
pub struct Cli {
    /// The shell command file to process.
    #[arg(value_name = "FILE_PATH")]
    pub file: PathBuf,

    /// Enable debug output.
    #[arg(short, long)]
    pub debug: bool,

    /// Command to run with the file path if no AI tag is found.
    #[arg(short, long, value_name = "COMMAND", allow_hyphen_values = true)]
    pub pass_through: Option<String>,

    /// Timeout for the completion request, in seconds.
    #[arg(
        long,
        value_name = "SECS",
        default_value_t = 60,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: u64,

    /// Print the resolved command instead of writing it back.
    #[arg(long, conflicts_with = "diff")]
    pub dry_run: bool,

    /// Show a diff of the pending change instead of writing it back.
    #[arg(long)]
    pub diff: bool,
}
