//! Placeholder-cell handling.
//!
//! Ad platform exports write `--` where a value is absent. Binding maps that
//! sentinel to empty once, so nothing downstream compares against it.

/// Returns `""` when `value` is the sentinel (ignoring surrounding whitespace),
/// otherwise `value` unchanged.
pub fn strip_sentinel<'a>(value: &'a str, sentinel: &str) -> &'a str {
    if value.trim() == sentinel {
        ""
    } else {
        value
    }
}

/// True when a cell carries real text: non-blank and not the sentinel.
pub fn has_content(value: &str, sentinel: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty() && trimmed != sentinel
}
