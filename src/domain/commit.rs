/// Window scanned after each newline for the breaking-change marker. The
/// 15-character needle must start directly after the line break to fit.
const BREAKING_CHANGE_WINDOW: usize = 16;

/// Classification of a commit against the conventional-commit taxonomy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommit {
    /// Summary text before the first `(`, e.g. "feat" in "feat(api): ...".
    /// Summaries without a parenthesized scope yield the whole summary,
    /// which no keyword matches.
    pub r#type: String,
    pub is_breaking_change: bool,
}

impl ParsedCommit {
    /// Classify a commit from its summary line and full message body.
    pub fn parse(summary: &str, message: &str) -> Self {
        let type_end = summary.find('(').unwrap_or(summary.len());
        ParsedCommit {
            r#type: summary[..type_end].to_string(),
            is_breaking_change: has_breaking_change(message),
        }
    }
}

/// A commit declares a breaking change when "breaking change" appears,
/// case-insensitively, within the first characters of a body line.
fn has_breaking_change(message: &str) -> bool {
    let bytes = message.as_bytes();
    for (i, byte) in bytes.iter().enumerate() {
        if *byte != b'\n' {
            continue;
        }
        let end = (i + BREAKING_CHANGE_WINDOW).min(bytes.len());
        // the needle is pure ASCII, so a lossy view of the window is exact
        let window = String::from_utf8_lossy(&bytes[i..end]).to_lowercase();
        if window.contains("breaking change") {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_type_with_scope() {
        let commit = ParsedCommit::parse("feat(auth): add login", "feat(auth): add login\n");
        assert_eq!(commit.r#type, "feat");
        assert!(!commit.is_breaking_change);
    }

    #[test]
    fn test_parse_type_without_scope() {
        let commit = ParsedCommit::parse("update readme", "update readme\n");
        assert_eq!(commit.r#type, "update readme");
    }

    #[test]
    fn test_breaking_change_footer() {
        let commit = ParsedCommit::parse(
            "docs(...):change",
            "docs(...):change\nBREAKING CHANGE: change\n",
        );
        assert!(commit.is_breaking_change);
    }

    #[test]
    fn test_breaking_change_case_insensitive() {
        let commit = ParsedCommit::parse("fix(x): y", "fix(x): y\nBreaking Change: api\n");
        assert!(commit.is_breaking_change);
    }

    #[test]
    fn test_breaking_change_must_lead_the_line() {
        // marker buried later in a line falls outside the scan window
        let commit = ParsedCommit::parse(
            "fix(x): y",
            "fix(x): y\nthis commit is not a breaking change\n",
        );
        assert!(!commit.is_breaking_change);
    }

    #[test]
    fn test_breaking_change_needs_a_newline_before_it() {
        // the scan covers body lines, not the summary itself
        let commit = ParsedCommit::parse("BREAKING CHANGE: x", "BREAKING CHANGE: x");
        assert!(!commit.is_breaking_change);
    }

    #[test]
    fn test_breaking_change_on_later_line() {
        let message = "feat(core): rework\n\nlonger explanation\nBREAKING CHANGE: renamed\n";
        let commit = ParsedCommit::parse("feat(core): rework", message);
        assert!(commit.is_breaking_change);
    }

    #[test]
    fn test_non_ascii_body_is_scanned_safely() {
        let commit = ParsedCommit::parse("fix(ü): ä", "fix(ü): ä\nnichts kaputt, alles schön\n");
        assert!(!commit.is_breaking_change);
    }
}
