//! Locates the inline `<AI>…</AI>` instruction tag inside a command document.

use regex::bytes::Regex as BytesRegex;
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

/// Opening delimiter of an instruction tag.
pub const OPEN_TAG: &str = "<AI>";
/// Closing delimiter of an instruction tag.
pub const CLOSE_TAG: &str = "</AI>";

// `.` does not match line breaks, so a tag opens and closes on one line.
static TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<AI>(.*?)</AI>").expect("tag pattern is valid"));

// Byte-oriented twin for content that is not valid UTF-8; `.` matches any byte.
static TAG_BYTES_REGEX: LazyLock<BytesRegex> =
    LazyLock::new(|| BytesRegex::new(r"(?-u)<AI>(.*?)</AI>").expect("tag pattern is valid"));

/// The first instruction tag found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionSpan {
    /// The full matched text, delimiters included.
    pub span: String,
    /// The text strictly between the delimiters. May be empty.
    pub instruction: String,
    /// Byte range of `span` within the document it was extracted from.
    pub range: Range<usize>,
}

impl InstructionSpan {
    /// Returns `true` for `<AI></AI>`, which callers treat as "nothing to do".
    pub fn is_empty(&self) -> bool {
        self.instruction.is_empty()
    }
}

/// Finds the first `<AI>…</AI>` tag in `document`.
///
/// The capture is non-greedy, so `<AI>a</AI> <AI>b</AI>` yields `a`. Returns
/// `None` when the document contains no complete tag on a single line.
pub fn extract(document: &str) -> Option<InstructionSpan> {
    let captures = TAG_REGEX.captures(document)?;
    let whole = captures.get(0)?;
    let inner = captures.get(1)?;

    Some(InstructionSpan {
        span: whole.as_str().to_string(),
        instruction: inner.as_str().to_string(),
        range: whole.range(),
    })
}

/// Reports whether raw, possibly non-UTF-8 bytes contain a complete tag.
pub fn contains_tag_bytes(bytes: &[u8]) -> bool {
    TAG_BYTES_REGEX.is_match(bytes)
}
