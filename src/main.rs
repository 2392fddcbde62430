//! The cmd-ai-resolver command-line executable.

use std::process::ExitCode;

mod app;
mod cli;

fn main() -> anyhow::Result<ExitCode> {
    app::run()
}
