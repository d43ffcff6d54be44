//! Line normalization & continuation joining
//!
//! First stage of the pipeline: raw export text in, logical lines out.
//! Comment handling runs before continuation joining, so a full-line
//! comment inside a continued command does not terminate the join.
//!
//! Comment truncation does not know about quotes; a `#` inside a quoted
//! value truncates the line. That matches the exporting firmware's own
//! tooling and downstream consumers rely on it.

/// Comment marker in export scripts.
const COMMENT_MARKER: char = '#';

/// Continuation marker at the end of a physical line.
const CONTINUATION_MARKER: char = '\\';

/// Normalize raw export text into logical lines.
///
/// - Line endings are normalized to `\n`.
/// - A line whose first non-space character is `#` is dropped entirely.
/// - A later `#` truncates the line at that point.
/// - A trailing backslash joins the next physical line, with the marker
///   replaced by a single space.
/// - Blank logical lines are dropped.
pub fn normalize(text: &str) -> Vec<String> {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");

    let mut logical = Vec::new();
    let mut current = String::new();

    for raw_line in text.split('\n') {
        let line = match strip_comment(raw_line) {
            Some(stripped) => stripped,
            // Full-line comment: skip without breaking a pending continuation.
            None => continue,
        };
        let line = line.trim_end();

        if let Some(body) = line.strip_suffix(CONTINUATION_MARKER) {
            current.push_str(body);
            current.push(' ');
        } else {
            current.push_str(line);
            let logical_line = current.trim();
            if !logical_line.is_empty() {
                logical.push(logical_line.to_string());
            }
            current.clear();
        }
    }

    // A continuation marker on the final physical line still emits whatever
    // accumulated.
    let tail = current.trim();
    if !tail.is_empty() {
        logical.push(tail.to_string());
    }

    logical
}

/// Strip comments from one physical line.
///
/// Returns `None` when the whole line is a comment, otherwise the line
/// truncated at the first marker (if any).
fn strip_comment(line: &str) -> Option<&str> {
    if line.trim_start().starts_with(COMMENT_MARKER) {
        return None;
    }
    match line.find(COMMENT_MARKER) {
        Some(pos) => Some(&line[..pos]),
        None => Some(line),
    }
}
