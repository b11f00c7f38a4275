use std::fmt;

/// Non-fatal conditions surfaced to the user on stderr while resolution
/// proceeds. Collected on the resolution state; the CLI layer prints them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionWarning {
    /// A relevant commit's type matched no conventional-commit keyword;
    /// the patch fallback was applied.
    NonConventionalCommit,
    /// A tag name contains the pre-release label but no parseable number.
    UnparsablePreReleaseTag { tag: String },
}

impl fmt::Display for ResolutionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionWarning::NonConventionalCommit => {
                write!(
                    f,
                    "The commits do not correspond to the conventional-commit format"
                )
            }
            ResolutionWarning::UnparsablePreReleaseTag { tag } => {
                write!(f, "Ignoring tag '{}': no pre-release number", tag)
            }
        }
    }
}
