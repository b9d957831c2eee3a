//! Tool-result content envelope, mirrored across every binding.

use serde_json::{json, Value};

/// Wrap plain text in the result envelope: one text content item plus the
/// error flag. Failures travel inside this envelope, not as protocol errors.
pub fn text_result(text: &str, is_error: bool) -> Value {
    json!({
        "content": [{ "type": "text", "text": text }],
        "isError": is_error,
    })
}
