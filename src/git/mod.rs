//! Git operations abstraction layer
//!
//! The engine consumes a version-control collaborator through the
//! [Repository] trait rather than touching libgit2 directly. Two
//! implementations exist:
//!
//! - [repository::Git2Repository]: the real implementation using `git2`
//! - [mock::MockRepository]: an in-memory implementation for tests

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;

/// Commit data supplied by the collaborator's history iterator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    /// Full commit hash
    pub hash: String,
    /// First line of the commit message
    pub summary: String,
    /// Full commit message
    pub message: String,
}

impl CommitInfo {
    /// First 7 characters of the hash, as used in changelog entries
    pub fn short_hash(&self) -> &str {
        if self.hash.len() > 7 {
            &self.hash[..7]
        } else {
            &self.hash
        }
    }
}

/// Tag data supplied by the collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagInfo {
    pub name: String,
    /// Hash of the tagged commit
    pub target: String,
    /// Summary line of the tagged commit (used in desync messages)
    pub target_summary: String,
    /// Annotation message, when the tag is annotated
    pub message: Option<String>,
}

/// Version-control collaborator consumed by the resolution engine.
///
/// The engine only ever reads tags, walks histories and (rarely) creates a
/// tag; everything else git can do is out of scope. Implementations map
/// their underlying errors to [crate::error::NextverError].
pub trait Repository: Send + Sync {
    /// All tags in the repository. Iteration order is not semantically
    /// significant; the resolver normalizes via max-selection.
    fn tags(&self) -> Result<Vec<TagInfo>>;

    /// Commits reachable from a reference, newest first. `reference` is
    /// either `"HEAD"` or a local branch name.
    fn commits_reachable_from(&self, reference: &str) -> Result<Vec<CommitInfo>>;

    /// Names of all local branch heads.
    fn branch_heads(&self) -> Result<Vec<String>>;

    /// Name of the checked-out branch, `None` when HEAD is detached.
    fn active_branch(&self) -> Result<Option<String>>;

    /// Create a tag at the current HEAD, annotated when a message is given.
    fn create_tag(&self, name: &str, message: Option<&str>) -> Result<TagInfo>;
}
