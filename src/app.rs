use crate::cli::Cli;
use anyhow::Context;
use clap::Parser;
use cmd_ai_resolver_lib::completion::OpenAiClient;
use cmd_ai_resolver_lib::config::CompletionConfig;
use cmd_ai_resolver_lib::fallback::{CommandFallback, FallbackExecutor};
use cmd_ai_resolver_lib::gateway::{self, FileContent};
use cmd_ai_resolver_lib::{resolve_document, Resolution};
use similar::TextDiff;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;

pub fn run() -> anyhow::Result<ExitCode> {
    let Cli {
        file,
        debug,
        pass_through,
        timeout,
        dry_run,
        diff,
    } = Cli::parse();

    init_logger(debug);

    let mode = if dry_run {
        OutputMode::DryRun
    } else if diff {
        OutputMode::Diff
    } else {
        OutputMode::Write
    };

    // Reject a malformed pass-through command before touching anything.
    let fallback = pass_through
        .as_deref()
        .map(CommandFallback::parse)
        .transpose()?;

    log::debug!("Processing file: {}", file.display());
    let input_content = match gateway::read_document(&file).context("reading file")? {
        FileContent::Text(text) => text,
        FileContent::Untagged => {
            log::debug!("File is not valid UTF-8 and has no AI tag");
            return run_fallback(fallback.as_ref(), &file);
        }
    };
    log::debug!("Original content:\n{input_content}");

    let config = CompletionConfig::from_env().with_timeout(Duration::from_secs(timeout));
    let client = OpenAiClient::new(config);

    let resolution = resolve_document(&input_content, &client)
        .with_context(|| format!("Failed to resolve AI instruction in {}", file.display()))?;

    match resolution {
        Resolution::NoTag => run_fallback(fallback.as_ref(), &file),
        Resolution::EmptyInstruction(_) => {
            log::debug!("No changes made to the file.");
            Ok(ExitCode::SUCCESS)
        }
        Resolution::Spliced { content, .. } => {
            finalize_output(mode, &file, &input_content, &content)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn init_logger(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
    log::debug!("Debug logging enabled");
}

fn run_fallback(fallback: Option<&CommandFallback>, file: &Path) -> anyhow::Result<ExitCode> {
    let Some(fallback) = fallback else {
        log::debug!("No pass-through command provided. Skipping execution.");
        return Ok(ExitCode::SUCCESS);
    };

    let outcome = fallback
        .run(file)
        .with_context(|| format!("Pass-through failed for {}", file.display()))?;

    match outcome.code {
        Some(0) => Ok(ExitCode::SUCCESS),
        Some(code) => {
            log::warn!(
                "Pass-through command '{}' exited with status {code}",
                fallback.program()
            );
            Ok(ExitCode::from(u8::try_from(code).unwrap_or(1)))
        }
        None => {
            log::warn!(
                "Pass-through command '{}' was terminated by a signal",
                fallback.program()
            );
            Ok(ExitCode::FAILURE)
        }
    }
}

fn finalize_output(
    mode: OutputMode,
    file: &Path,
    original_content: &str,
    resolved_content: &str,
) -> anyhow::Result<()> {
    match mode {
        OutputMode::DryRun => {
            io::stdout().write_all(resolved_content.as_bytes())?;
        }
        OutputMode::Diff => {
            let diff_output = TextDiff::from_lines(original_content, resolved_content)
                .unified_diff()
                .header("original", "modified")
                .to_string();

            io::stdout().write_all(diff_output.as_bytes())?;
        }
        OutputMode::Write => {
            gateway::write_document(file, resolved_content).context("writing modified file")?;
        }
    }

    Ok(())
}

#[derive(Clone, Copy)]
enum OutputMode {
    Write,
    DryRun,
    Diff,
}
