use thiserror::Error;

/// Unified error type for nextver operations.
///
/// Every fatal condition of a resolution run is a variant here; the engine
/// never terminates the process itself. Only `main` inspects the variant and
/// chooses an exit status.
#[derive(Error, Debug)]
pub enum NextverError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("No Git repository detected")]
    NoRepository,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Branch error: {0}")]
    Branch(String),

    #[error("There are no Version Tags in {branch}")]
    NoVersionTags { branch: String },

    #[error("There are no new commits")]
    NoNewCommits,

    #[error("There is already a version tag")]
    InitialTagExists,

    #[error("Branches not synced ({summary} missing in HEAD). Please rebase onto {branch}")]
    BranchesNotSynced { summary: String, branch: String },

    #[error("Pre-Release-Versions not synced ({summary} missing in HEAD). Please rebase onto {branch}")]
    PreReleaseNotSynced { summary: String, branch: String },

    #[error("Branches not synced ({summary} missing in HEAD)")]
    UnsyncedEverywhere { summary: String },

    #[error("Last version is a Pre-Release. Use -r \"{label}\" option to perform a pre-release-increase")]
    LastVersionIsPreRelease { label: String },

    #[error("Tag creation failed: {message}")]
    TagCreation { status: i32, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in nextver.
pub type Result<T> = std::result::Result<T, NextverError>;

impl NextverError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        NextverError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        NextverError::Version(msg.into())
    }

    /// Create a branch error with context
    pub fn branch(msg: impl Into<String>) -> Self {
        NextverError::Branch(msg.into())
    }

    /// Process exit status for this error.
    ///
    /// Tag-creation failures pass the collaborator's numeric status through
    /// (magnitude, since libgit2 codes are negative), mapping a reported `0`
    /// to `1`. Everything else exits `1`.
    pub fn exit_code(&self) -> i32 {
        match self {
            NextverError::TagCreation { status, .. } => {
                if *status == 0 {
                    1
                } else {
                    status.unsigned_abs() as i32
                }
            }
            _ => 1,
        }
    }
}
