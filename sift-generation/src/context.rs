//! Rendering retrieved documents into a numbered prompt context.

use sift_core::RetrievedDocument;

/// Context text used when there are no documents.
pub const EMPTY_CONTEXT: &str = "No relevant documents were found.";

/// Number each document as `[Source N] (from: <source>)` and join them with
/// separators. Content longer than `max_chars` characters is cut.
pub fn format_context(documents: &[RetrievedDocument], max_chars: usize) -> String {
    if documents.is_empty() {
        return EMPTY_CONTEXT.to_string();
    }

    documents
        .iter()
        .enumerate()
        .map(|(idx, doc)| {
            format!(
                "[Source {}] (from: {})\n{}\n",
                idx + 1,
                doc.source(),
                truncate_chars(&doc.content, max_chars)
            )
        })
        .collect::<Vec<_>>()
        .join("\n---\n")
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}…", &text[..cut]),
        None => text.to_string(),
    }
}
