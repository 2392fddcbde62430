//! Defines custom error types for the library.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
/// Error type returned when resolving an instruction tag fails.
pub enum ResolveError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid UTF-8 and contains an AI tag", path.display())]
    InvalidEncoding { path: PathBuf },

    #[error("{var} environment variable not set")]
    MissingCredential { var: String },

    #[error("Invalid pass-through command: {0}")]
    InvalidFallback(String),

    #[error("Completion request failed: {0}")]
    Transport(String),

    #[error("Received an empty response or no choices from the model")]
    EmptyResponse,

    #[error("Failed to run pass-through command '{program}': {source}")]
    FallbackSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}
