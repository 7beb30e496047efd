//! Rough input budgeting so oversized resumes and job descriptions do not blow
//! past the model's prompt window. Approximation: ~4 characters per token.

const CHARS_PER_TOKEN: usize = 4;

/// Appended to any value cut by `truncate_by_tokens`.
pub const TRUNCATION_MARKER: &str = "\n…[truncated]";

/// Estimated token count of `text`. Never returns less than 1.
pub fn estimate_tokens(text: &str) -> usize {
    (text.chars().count() / CHARS_PER_TOKEN).max(1)
}

/// Cuts `text` to roughly `max_tokens` tokens, marking the cut.
pub fn truncate_by_tokens(text: &str, max_tokens: usize) -> String {
    if text.is_empty() {
        return String::new();
    }
    if estimate_tokens(text) <= max_tokens {
        return text.to_string();
    }

    let char_budget = max_tokens * CHARS_PER_TOKEN;
    let mut truncated: String = text.chars().take(char_budget).collect();
    truncated.push_str(TRUNCATION_MARKER);
    truncated
}
