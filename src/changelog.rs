use crate::git::CommitInfo;

/// Render changelog lines for a relevant-commit range.
///
/// Input is the collection order (newest first); output is one line per
/// commit, oldest first, as `"<summary> (<short hash>)"`. Pure and
/// infallible.
pub fn build_changelog(relevant_commits: &[CommitInfo]) -> Vec<String> {
    relevant_commits
        .iter()
        .rev()
        .map(|commit| format!("{} ({})", commit.summary, commit.short_hash()))
        .collect()
}
