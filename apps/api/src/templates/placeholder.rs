//! Placeholder token scanning.
//!
//! A placeholder is written `{{name}}`. Inner whitespace is tolerated
//! (`{{ name }}`) and `name` must match `[A-Za-z_][A-Za-z0-9_]*`.
//! Scanning works on bytes: every byte it matches is ASCII, so the
//! returned offsets always fall on `char` boundaries.

use std::collections::BTreeSet;

/// One placeholder-shaped token found in a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// Byte offset of the opening `{{`.
    pub start: usize,
    /// Byte offset one past the closing `}}`.
    pub end: usize,
    /// The trimmed placeholder name.
    pub name: &'a str,
}

impl<'a> Token<'a> {
    /// The token exactly as it appears in the scanned text.
    pub fn raw<'t>(&self, text: &'t str) -> &'t str {
        &text[self.start..self.end]
    }
}

/// Returns every placeholder-shaped token in `text`, in order of appearance.
pub fn scan(text: &str) -> Vec<Token<'_>> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i + 1 < bytes.len() {
        if bytes[i] == b'{' && bytes[i + 1] == b'{' {
            if let Some(token) = match_token(text, i) {
                i = token.end;
                tokens.push(token);
                continue;
            }
        }
        i += 1;
    }

    tokens
}

/// Distinct placeholder names used in `text`.
pub fn placeholder_names(text: &str) -> BTreeSet<String> {
    scan(text).into_iter().map(|t| t.name.to_string()).collect()
}

/// Tries to match a full token whose `{{` starts at `start`.
fn match_token(text: &str, start: usize) -> Option<Token<'_>> {
    let bytes = text.as_bytes();
    let mut i = start + 2;

    while i < bytes.len() && is_inline_space(bytes[i]) {
        i += 1;
    }

    let name_start = i;
    if i >= bytes.len() || !(bytes[i].is_ascii_alphabetic() || bytes[i] == b'_') {
        return None;
    }
    while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
        i += 1;
    }
    let name_end = i;

    while i < bytes.len() && is_inline_space(bytes[i]) {
        i += 1;
    }

    if i + 1 < bytes.len() && bytes[i] == b'}' && bytes[i + 1] == b'}' {
        Some(Token {
            start,
            end: i + 2,
            name: &text[name_start..name_end],
        })
    } else {
        None
    }
}

fn is_inline_space(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_finds_all_tokens_in_order() {
        let text = "Hello {{name}}, you applied for {{job_title}}. {{name}}";
        let names: Vec<&str> = scan(text).iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["name", "job_title", "name"]);
    }

    #[test]
    fn test_scan_tolerates_inner_whitespace() {
        let text = "Role: {{ job_title }}";
        let tokens = scan(text);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].name, "job_title");
        assert_eq!(tokens[0].raw(text), "{{ job_title }}");
    }

    #[test]
    fn test_single_braces_are_not_tokens() {
        // The fit template embeds an example JSON object.
        let text = r#"{"fit_score": 7.5, "reason": "ok"}"#;
        assert!(scan(text).is_empty());
    }

    #[test]
    fn test_triple_braces_match_inner_token() {
        let text = "{{{resume_text}}}";
        let tokens = scan(text);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].name, "resume_text");
        assert_eq!(tokens[0].start, 1);
    }

    #[test]
    fn test_non_identifier_content_is_ignored() {
        assert!(scan("{{}}").is_empty());
        assert!(scan("{{1abc}}").is_empty());
        assert!(scan("{{job title}}").is_empty());
        assert!(scan("{{unclosed").is_empty());
    }

    #[test]
    fn test_scan_handles_multibyte_text() {
        let text = "Résumé — {{resume_text}} …";
        let tokens = scan(text);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].raw(text), "{{resume_text}}");
    }

    #[test]
    fn test_placeholder_names_deduplicates() {
        let names = placeholder_names("{{a}} {{b}} {{a}}");
        assert_eq!(names.into_iter().collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
