use crate::config::ConventionalCommitsConfig;
use crate::domain::{ParsedCommit, Version};
use crate::git::CommitInfo;
use crate::warnings::ResolutionWarning;

/// Result of classifying a relevant-commit range against a base version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncrementOutcome {
    pub version: Version,
    pub warnings: Vec<ResolutionWarning>,
}

/// Classifies commits and computes the size of the next release increment.
pub struct VersionIncrementer {
    config: ConventionalCommitsConfig,
}

impl VersionIncrementer {
    pub fn new(config: ConventionalCommitsConfig) -> Self {
        VersionIncrementer { config }
    }

    /// Fold the relevant commits (supplied newest-first, processed
    /// oldest-first) onto `base`.
    ///
    /// At most one of major/minor/patch increments per resolution: a
    /// breaking change wins over everything, a feature commit over patch
    /// types, and each category fires once. The exception is the fallback
    /// for commit types outside the taxonomy, which increments patch and
    /// records a warning for every such commit, even after the one-shot
    /// patch flag is set.
    pub fn increment(&self, commits: &[CommitInfo], base: &Version) -> IncrementOutcome {
        let mut major = base.major;
        let mut minor = base.minor;
        let mut patch = base.patch;

        let mut major_done = false;
        let mut minor_done = false;
        let mut patch_done = false;
        let mut warnings = Vec::new();

        for commit in commits.iter().rev() {
            let parsed = ParsedCommit::parse(&commit.summary, &commit.message);

            if parsed.is_breaking_change && !major_done {
                major += 1;
                minor = 0;
                patch = 0;
                major_done = true;
            } else if self.is_minor_type(&parsed.r#type) && !minor_done && !major_done {
                minor += 1;
                patch = 0;
                minor_done = true;
            } else if !major_done && !minor_done {
                if self.is_patch_type(&parsed.r#type) {
                    if !patch_done {
                        patch += 1;
                        patch_done = true;
                    }
                } else {
                    patch += 1;
                    patch_done = true;
                    warnings.push(ResolutionWarning::NonConventionalCommit);
                }
            }
        }

        IncrementOutcome {
            version: Version::new(major, minor, patch),
            warnings,
        }
    }

    fn is_minor_type(&self, commit_type: &str) -> bool {
        self.config
            .minor_types
            .iter()
            .any(|t| t.eq_ignore_ascii_case(commit_type))
    }

    fn is_patch_type(&self, commit_type: &str) -> bool {
        self.config.patch_types.iter().any(|t| t == commit_type)
    }
}
