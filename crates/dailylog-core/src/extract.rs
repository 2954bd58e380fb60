//! Title/content extraction from a free-text assistant reply.
//!
//! The system prompt asks the model to wrap the finished entry in literal
//! markers. Model output is not guaranteed to follow instructions, so the
//! whole function is best-effort: a reply with no markers at all is treated
//! as plain diary content, never as an error.

/// Opening marker for the title span.
pub const TITLE_START: &str = "[TITLE_START]";
/// Closing marker for the title span.
pub const TITLE_END: &str = "[TITLE_END]";
/// Opening marker for the content span.
pub const CONTENT_START: &str = "[CONTENT_START]";
/// Closing marker for the content span.
pub const CONTENT_END: &str = "[CONTENT_END]";

/// Result of extracting a diary from an assistant reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    pub title: Option<String>,
    pub content: String,
}

/// Extract a (title, content) pair from an assistant reply.
///
/// Takes the first occurrence of each marker pair; spans may cross line
/// breaks. The inner text is trimmed. When the content markers are absent
/// the entire input is returned unchanged as the content.
pub fn extract(text: &str) -> Extracted {
    let title = span_between(text, TITLE_START, TITLE_END).map(|s| s.trim().to_string());

    let content = match span_between(text, CONTENT_START, CONTENT_END) {
        Some(inner) => inner.trim().to_string(),
        None => text.to_string(),
    };

    Extracted { title, content }
}

/// Inner text of the first `start`..`end` marker pair, if both markers are
/// present in that order.
fn span_between<'a>(text: &'a str, start: &str, end: &str) -> Option<&'a str> {
    let from = text.find(start)? + start.len();
    let len = text[from..].find(end)?;
    Some(&text[from..from + len])
}
