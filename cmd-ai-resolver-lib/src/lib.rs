//! `cmd-ai-resolver-lib` exposes the tag-extraction and splice primitives that
//! power the `cmd-ai-resolver` CLI.
//!
//! A command document may embed one `<AI>…</AI>` instruction. The library
//! finds the first such tag, asks a [`CompletionClient`] for the shell
//! fragment that satisfies it, and splices the fragment into the document in
//! place of the tag. Documents without a tag are left for a
//! [`FallbackExecutor`] to handle.
//!
//! # Example
//!
//! ```rust
//! use cmd_ai_resolver_lib::completion::CompletionClient;
//! use cmd_ai_resolver_lib::error::ResolveError;
//! use cmd_ai_resolver_lib::{resolve_document, Resolution};
//!
//! struct Upper;
//!
//! impl CompletionClient for Upper {
//!     fn complete(&self, _document: &str, _instruction: &str) -> Result<String, ResolveError> {
//!         Ok("tr a-z A-Z".to_string())
//!     }
//! }
//!
//! # fn demo() -> Result<(), ResolveError> {
//! let resolution = resolve_document("echo hi | <AI>uppercase the output</AI>", &Upper)?;
//! assert_eq!(resolution.content(), Some("echo hi | tr a-z A-Z"));
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

pub mod completion;
pub mod config;
pub mod error;
pub mod fallback;
pub mod gateway;
pub mod splicer;
pub mod tag;

pub use crate::completion::CompletionClient;
pub use crate::fallback::FallbackExecutor;

use crate::error::ResolveError;
use crate::splicer::splice;
use crate::tag::{extract, InstructionSpan};

/// What resolving a document produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The document contains no instruction tag.
    NoTag,
    /// The first tag is `<AI></AI>`; the document stays as it is.
    EmptyInstruction(InstructionSpan),
    /// The first tag was replaced by the model's fragment.
    Spliced {
        tag: InstructionSpan,
        fragment: String,
        content: String,
    },
}

impl Resolution {
    /// The new document content, if a replacement took place.
    pub fn content(&self) -> Option<&str> {
        match self {
            Resolution::Spliced { content, .. } => Some(content),
            _ => None,
        }
    }
}

/// Resolves the first instruction tag in `document`.
///
/// The client is only consulted for a non-empty instruction, and at most
/// once. Any client error is returned as-is so that callers never write a
/// partially processed document. The returned fragment is spliced verbatim;
/// tags it may itself contain are not resolved again.
pub fn resolve_document(
    document: &str,
    client: &dyn CompletionClient,
) -> Result<Resolution, ResolveError> {
    let Some(tag) = extract(document) else {
        log::debug!("No AI tag found");
        return Ok(Resolution::NoTag);
    };

    if tag.is_empty() {
        log::debug!("AI tag is empty; content remains unchanged");
        return Ok(Resolution::EmptyInstruction(tag));
    }

    log::debug!("Extracted AI prompt: {}", tag.instruction);
    let fragment = client.complete(document, &tag.instruction)?;

    let content = splice(document, &tag.span, &fragment);
    log::debug!("Modified content:\n{content}");

    Ok(Resolution::Spliced {
        tag,
        fragment,
        content,
    })
}
