//! Recovers a JSON value from a model completion.
//!
//! Stages run in order and each one only runs when the cheaper fix before
//! it was not enough:
//!
//! 1. direct parse of the trimmed text
//! 2. markdown fence stripping
//! 3. boundary extraction (`{`…`}`, else `[`…`]`)
//! 4. trailing-garbage trim
//! 5. final parse, or [`ParseFailure`]
//!
//! Every stage works on the evolving cleaned string, never on offsets into
//! the original.

use log::{debug, error};
use serde_json::Value;

use crate::error::{preview, ParseFailure};
use crate::fence::strip_fence;

/// A JSON value recovered from a completion.
pub type NormalizedJson = Value;

/// Run the full fallback chain over `raw`.
pub fn normalize_with_limit(raw: &str, preview_chars: usize) -> Result<NormalizedJson, ParseFailure> {
    /*──────── 1. direct parse ────────*/
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ParseFailure::new("empty completion", raw, trimmed, preview_chars));
    }
    match serde_json::from_str::<Value>(trimmed) {
        Ok(value) => return Ok(value),
        Err(e) => debug!("[normalize] direct parse failed: {}", e),
    }

    /*──────── 2. fence ───────────────*/
    let cleaned = strip_fence(trimmed).unwrap_or(trimmed);

    /*──────── 3. boundaries ──────────*/
    let cleaned = extract_boundaries(cleaned);

    /*──────── 4. trailing garbage ────*/
    let cleaned = trim_trailing_garbage(cleaned);

    /*──────── 5. final parse ─────────*/
    serde_json::from_str::<Value>(cleaned).map_err(|e| {
        error!("Failed to parse JSON after cleaning: {}", e);
        error!("Original response: {}", preview(raw, preview_chars));
        error!("Cleaned response: {}", preview(cleaned, preview_chars));
        ParseFailure::new(e.to_string(), raw, cleaned, preview_chars)
    })
}

/// Slice to the outermost object span, or to the array span when the text
/// holds no `{` at all. Text without a usable span is returned unchanged.
pub fn extract_boundaries(text: &str) -> &str {
    match text.find('{') {
        Some(start) => match text.rfind('}') {
            Some(end) if end > start => &text[start..=end],
            _ => text,
        },
        None => match (text.find('['), text.rfind(']')) {
            (Some(start), Some(end)) if end > start => &text[start..=end],
            _ => text,
        },
    }
}

/// Byte offset just past the closer that balances the first opener.
///
/// Brackets inside string literals don't count. `None` when the text never
/// balances (truncated output) or closes something it never opened.
fn balanced_end(text: &str) -> Option<usize> {
    let start = text.find(|c: char| c == '{' || c == '[')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' | '[' => depth += 1,
            '}' | ']' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(start + i + c.len_utf8());
                }
            }
            _ => {}
        }
    }
    None
}

/// How much of the dropped tail a debug line echoes.
const TRAIL_PREVIEW_CHARS: usize = 80;

fn trailing_note(tail: &str) -> String {
    preview(tail.trim(), TRAIL_PREVIEW_CHARS)
}

/// Cut commentary the model appended after the JSON value.
pub fn trim_trailing_garbage(text: &str) -> &str {
    match balanced_end(text) {
        Some(end) if !text[end..].trim().is_empty() => {
            debug!("[normalize] dropping trailing text: {:?}", trailing_note(&text[end..]));
            &text[..end]
        }
        _ => text,
    }
}
