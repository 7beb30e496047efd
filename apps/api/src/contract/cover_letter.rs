//! Plain-text contract for `cover_letter` replies.
//!
//! # Contract rules
//! - 250 to 350 words
//! - Exactly three bullet highlights
//! - No code fences, no YAML front matter, no JSON
//! - The closing carries a call to action

use serde::{Deserialize, Serialize};

use crate::renderer::sanitize::{has_front_matter, is_fence_line};

pub const MIN_WORDS: usize = 250;
pub const MAX_WORDS: usize = 350;
pub const REQUIRED_BULLETS: usize = 3;

const BULLET_MARKERS: &[&str] = &["- ", "* ", "+ ", "• "];

const CALL_TO_ACTION_PHRASES: &[&str] = &[
    "look forward",
    "looking forward",
    "would welcome",
    "would love",
    "happy to discuss",
    "glad to discuss",
    "let's talk",
    "let's discuss",
    "schedule",
    "conversation",
    "interview",
    "reach out",
    "contact me",
    "get in touch",
    "chat",
];

/// Outcome of checking a cover-letter reply against its contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverLetterReport {
    pub word_count: usize,
    pub bullet_count: usize,
    pub has_call_to_action: bool,
    pub issues: Vec<String>,
    pub passed: bool,
}

/// Checks every cover-letter rule and collects the failures.
pub fn review_cover_letter(text: &str) -> CoverLetterReport {
    let word_count = count_words(text);
    let bullet_count = text.lines().filter(|l| is_bullet_line(l)).count();
    let has_call_to_action = closing_has_call_to_action(text);

    let mut issues = Vec::new();

    if text.lines().any(is_fence_line) {
        issues.push("Contains a code fence".to_string());
    }
    if has_front_matter(text) {
        issues.push("Starts with YAML front matter".to_string());
    }
    if looks_like_json(text) {
        issues.push("Reply is JSON, expected plain text".to_string());
    }
    if !(MIN_WORDS..=MAX_WORDS).contains(&word_count) {
        issues.push(format!(
            "Word count {word_count} is outside {MIN_WORDS}-{MAX_WORDS}"
        ));
    }
    if bullet_count != REQUIRED_BULLETS {
        issues.push(format!(
            "Expected {REQUIRED_BULLETS} bullet highlights, found {bullet_count}"
        ));
    }
    if !has_call_to_action {
        issues.push("Closing paragraph has no call to action".to_string());
    }

    CoverLetterReport {
        word_count,
        bullet_count,
        has_call_to_action,
        passed: issues.is_empty(),
        issues,
    }
}

/// Words are whitespace-separated runs containing at least one alphanumeric char,
/// so bullet markers and stray punctuation are not counted.
fn count_words(text: &str) -> usize {
    text.split_whitespace()
        .filter(|w| w.chars().any(char::is_alphanumeric))
        .count()
}

fn is_bullet_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    BULLET_MARKERS.iter().any(|m| trimmed.starts_with(m))
}

fn looks_like_json(text: &str) -> bool {
    let trimmed = text.trim();
    (trimmed.starts_with('{') || trimmed.starts_with('['))
        && serde_json::from_str::<serde_json::Value>(trimmed).is_ok()
}

/// Looks at the last two prose paragraphs, since the final one is often a sign-off.
fn closing_has_call_to_action(text: &str) -> bool {
    let prose: Vec<Vec<&str>> = paragraphs(text)
        .into_iter()
        .filter(|p| !p.iter().all(|l| is_bullet_line(l)))
        .collect();

    prose.iter().rev().take(2).any(|lines| {
        let joined = lines.join(" ").to_lowercase();
        let words = words(&joined);
        joined.trim_end().ends_with('?')
            || CALL_TO_ACTION_PHRASES
                .iter()
                .any(|phrase| contains_phrase(&words, phrase))
    })
}

/// Groups lines into paragraphs separated by blank lines. `lines()` drops the
/// `\r` of CRLF endings, so both line-ending styles split the same way.
fn paragraphs(text: &str) -> Vec<Vec<&str>> {
    let mut paragraphs = Vec::new();
    let mut current = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line.trim());
        }
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }
    paragraphs
}

/// Alphanumeric runs, keeping apostrophes so "let's" stays one word.
fn words(text: &str) -> Vec<&str> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .filter(|w| !w.is_empty())
        .collect()
}

/// True when the words of `phrase` appear consecutively in `words`.
fn contains_phrase(words: &[&str], phrase: &str) -> bool {
    let needle: Vec<&str> = phrase.split_whitespace().collect();
    words.windows(needle.len()).any(|w| w == needle.as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a letter with `filler_words` words of body prose plus the given closing.
    fn letter(filler_words: usize, bullets: usize, closing: &str) -> String {
        let mut text = String::from("Dear hiring team,\n\n");
        text.push_str(&vec!["experience"; filler_words].join(" "));
        text.push_str("\n\n");
        for i in 0..bullets {
            text.push_str(&format!("- Highlight number {i}\n"));
        }
        text.push('\n');
        text.push_str(closing);
        text
    }

    const CLOSING: &str = "I would welcome a conversation about the role.\n\nBest regards,\nAlex";

    #[test]
    fn test_well_formed_letter_passes() {
        let report = review_cover_letter(&letter(260, 3, CLOSING));
        assert!(report.passed, "issues: {:?}", report.issues);
        assert_eq!(report.bullet_count, 3);
        assert!(report.has_call_to_action);
    }

    #[test]
    fn test_short_letter_fails_word_count() {
        let report = review_cover_letter(&letter(50, 3, CLOSING));
        assert!(!report.passed);
        assert!(report.issues.iter().any(|i| i.starts_with("Word count")));
    }

    #[test]
    fn test_long_letter_fails_word_count() {
        let report = review_cover_letter(&letter(400, 3, CLOSING));
        assert!(report.word_count > MAX_WORDS);
        assert!(!report.passed);
    }

    #[test]
    fn test_wrong_bullet_count_fails() {
        let report = review_cover_letter(&letter(260, 2, CLOSING));
        assert_eq!(report.bullet_count, 2);
        assert!(report
            .issues
            .iter()
            .any(|i| i == "Expected 3 bullet highlights, found 2"));
    }

    #[test]
    fn test_missing_call_to_action_fails() {
        let report = review_cover_letter(&letter(260, 3, "Thank you.\n\nBest regards,\nAlex"));
        assert!(!report.has_call_to_action);
        assert!(!report.passed);
    }

    #[test]
    fn test_question_closing_counts_as_call_to_action() {
        let report = review_cover_letter(&letter(260, 3, "Could we find time next week?"));
        assert!(report.has_call_to_action);
    }

    #[test]
    fn test_code_fence_fails() {
        let text = format!("```\n{}\n```", letter(260, 3, CLOSING));
        let report = review_cover_letter(&text);
        assert!(report.issues.iter().any(|i| i == "Contains a code fence"));
    }

    #[test]
    fn test_front_matter_fails() {
        let text = format!("---\ntitle: Letter\n---\n{}", letter(260, 3, CLOSING));
        let report = review_cover_letter(&text);
        assert!(report.issues.iter().any(|i| i.contains("front matter")));
    }

    #[test]
    fn test_json_reply_fails() {
        let report = review_cover_letter(r#"{"letter": "Dear team"}"#);
        assert!(report.issues.iter().any(|i| i.contains("JSON")));
    }

    #[test]
    fn test_crlf_closing_without_call_to_action_fails() {
        // The only call-to-action word sits in the opening paragraph.
        let lf = letter(260, 3, "Thank you for reading.\n\nBest regards,\nAlex").replacen(
            "Dear hiring team,",
            "Dear hiring team, I am keen to interview.",
            1,
        );
        let crlf = lf.replace('\n', "\r\n");

        let lf_report = review_cover_letter(&lf);
        let crlf_report = review_cover_letter(&crlf);
        assert!(!lf_report.has_call_to_action);
        assert!(!crlf_report.has_call_to_action);
        assert!(!crlf_report.passed);
    }

    #[test]
    fn test_crlf_letter_with_call_to_action_passes() {
        let text = letter(260, 3, CLOSING).replace('\n', "\r\n");
        let report = review_cover_letter(&text);
        assert!(report.passed, "issues: {:?}", report.issues);
    }

    #[test]
    fn test_phrases_match_whole_words_only() {
        let chatbot = letter(260, 3, "I built a chatbot and a job scheduler.\n\nBest regards,\nAlex");
        assert!(!review_cover_letter(&chatbot).has_call_to_action);

        let chat = letter(260, 3, "Happy to chat next week.\n\nBest regards,\nAlex");
        assert!(review_cover_letter(&chat).has_call_to_action);
    }

    #[test]
    fn test_multi_word_phrase_spans_line_breaks() {
        let text = letter(260, 3, "I look\nforward to hearing from you.");
        assert!(review_cover_letter(&text).has_call_to_action);
    }

    #[test]
    fn test_bullet_markers_are_not_words() {
        assert_eq!(count_words("- one\n- two\n* three"), 3);
    }
}
