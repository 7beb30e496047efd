//! Plain-text cleanup: guarantees rendered Markdown body text carries no code
//! fences and no YAML front matter.

const FENCE_MARKERS: &[&str] = &["```", "~~~"];

/// Strips a leading front-matter block and every code-fence marker line.
/// Text between fences is kept.
pub fn sanitize_plain_text(text: &str) -> String {
    let body = strip_front_matter(text);
    body.split_inclusive('\n')
        .filter(|line| !is_fence_line(line))
        .collect()
}

/// True when `line` opens or closes a fenced code block.
pub fn is_fence_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    FENCE_MARKERS.iter().any(|m| trimmed.starts_with(m))
}

/// True when `text` opens with a closed `---` front-matter block.
pub fn has_front_matter(text: &str) -> bool {
    front_matter_len(text).is_some()
}

fn strip_front_matter(text: &str) -> &str {
    match front_matter_len(text) {
        Some(len) => text[len..].trim_start_matches(['\r', '\n']),
        None => text,
    }
}

/// Byte length of a leading front-matter block, closing delimiter line included.
fn front_matter_len(text: &str) -> Option<usize> {
    let mut lines = text.split_inclusive('\n');
    let first = lines.next()?;
    if first.trim_end() != "---" {
        return None;
    }

    let mut offset = first.len();
    for line in lines {
        offset += line.len();
        let delimiter = line.trim_end();
        if delimiter == "---" || delimiter == "..." {
            return Some(offset);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_is_unchanged() {
        let text = "Dear team,\n\n- one\n- two\n- three\n\nLet's talk soon.";
        assert_eq!(sanitize_plain_text(text), text);
    }

    #[test]
    fn test_fence_markers_are_removed_content_kept() {
        let text = "Intro\n```markdown\nBody line\n```\nOutro";
        assert_eq!(sanitize_plain_text(text), "Intro\nBody line\nOutro");
    }

    #[test]
    fn test_tilde_and_indented_fences_are_removed() {
        let text = "A\n  ~~~\nB\n   ```\n";
        assert_eq!(sanitize_plain_text(text), "A\nB\n");
    }

    #[test]
    fn test_front_matter_is_stripped() {
        let text = "---\ntitle: Cover letter\nrole: Engineer\n---\n\nDear team,";
        assert!(has_front_matter(text));
        assert_eq!(sanitize_plain_text(text), "Dear team,");
    }

    #[test]
    fn test_unclosed_front_matter_is_left_alone() {
        let text = "---\nnot really front matter";
        assert!(!has_front_matter(text));
        assert_eq!(sanitize_plain_text(text), text);
    }

    #[test]
    fn test_horizontal_rule_mid_text_is_kept() {
        let text = "Para one\n---\nPara two";
        assert_eq!(sanitize_plain_text(text), text);
    }
}
