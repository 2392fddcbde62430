//! Runs the pass-through command when a document carries no instruction tag.

use crate::error::ResolveError;
use std::path::Path;
use std::process::{Command, Stdio};

/// Exit information of a finished pass-through command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackOutcome {
    /// `None` when the child was terminated by a signal.
    pub code: Option<i32>,
}

impl FallbackOutcome {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Hands a file path to an external program.
pub trait FallbackExecutor {
    fn run(&self, path: &Path) -> Result<FallbackOutcome, ResolveError>;
}

/// A program plus leading arguments, invoked as `<program> <args…> <path>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFallback {
    program: String,
    args: Vec<String>,
}

impl CommandFallback {
    /// Splits `command_line` with shell quoting rules, e.g. `shellcheck -x`.
    pub fn parse(command_line: &str) -> Result<Self, ResolveError> {
        let mut words = shell_words::split(command_line)
            .map_err(|e| ResolveError::InvalidFallback(format!("{command_line}: {e}")))?
            .into_iter();

        let program = words
            .next()
            .ok_or_else(|| ResolveError::InvalidFallback("command is empty".to_string()))?;

        Ok(Self {
            program,
            args: words.collect(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl FallbackExecutor for CommandFallback {
    fn run(&self, path: &Path) -> Result<FallbackOutcome, ResolveError> {
        log::debug!(
            "Running pass-through command: {} {} {}",
            self.program,
            self.args.join(" "),
            path.display()
        );

        // Inherited stdio keeps interactive commands usable.
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| ResolveError::FallbackSpawn {
                program: self.program.clone(),
                source,
            })?;

        Ok(FallbackOutcome {
            code: status.code(),
        })
    }
}
