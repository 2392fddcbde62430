//! Contains the logic for substituting a model fragment into the document.

/// Replaces the first literal occurrence of `span` in `document` with `fragment`.
///
/// # Arguments
///
/// * `document`: The full document text.
/// * `span`: The exact instruction tag text, delimiters included.
/// * `fragment`: The replacement text returned by the model.
///
/// An empty `fragment` leaves the document unchanged, as does a `span` that
/// does not occur in `document`. Later identical spans are never touched.
pub fn splice(document: &str, span: &str, fragment: &str) -> String {
    if fragment.is_empty() || span.is_empty() {
        return document.to_string();
    }

    document.replacen(span, fragment, 1)
}
