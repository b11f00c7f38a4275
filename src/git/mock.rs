use crate::error::{NextverError, Result};
use crate::git::{CommitInfo, Repository, TagInfo};
use std::sync::Mutex;

/// Mock repository for testing without actual git operations.
///
/// Histories are stored oldest-first (the order scenarios are written in)
/// and served newest-first like a real history walk. Tags live behind a
/// mutex so `create_tag(&self)` can record what the engine created.
pub struct MockRepository {
    head: Vec<CommitInfo>,
    branches: Vec<(String, Vec<CommitInfo>)>,
    tags: Mutex<Vec<TagInfo>>,
    active_branch: Option<String>,
    next_hash: u64,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            head: Vec::new(),
            branches: Vec::new(),
            tags: Mutex::new(Vec::new()),
            active_branch: None,
            next_hash: 0x100000,
        }
    }

    /// Append a commit to the HEAD history and return it.
    pub fn add_commit(&mut self, summary: &str, message: &str) -> CommitInfo {
        let commit = self.detached_commit(summary, message);
        self.head.push(commit.clone());
        commit
    }

    /// Mint a commit that is not part of the HEAD history, for building
    /// diverged branches. Hashes stay unique within the repository.
    pub fn detached_commit(&mut self, summary: &str, message: &str) -> CommitInfo {
        self.next_hash += 1;
        CommitInfo {
            hash: format!("{:040x}", self.next_hash),
            summary: summary.to_string(),
            message: message.to_string(),
        }
    }

    /// Add a lightweight tag pointing at a commit.
    pub fn tag(&mut self, name: &str, commit: &CommitInfo) {
        self.tags.lock().expect("tags lock").push(TagInfo {
            name: name.to_string(),
            target: commit.hash.clone(),
            target_summary: commit.summary.clone(),
            message: None,
        });
    }

    /// Add a branch with its own history, oldest first.
    pub fn add_branch(&mut self, name: &str, commits: Vec<CommitInfo>) {
        self.branches.push((name.to_string(), commits));
    }

    pub fn set_active_branch(&mut self, name: &str) {
        self.active_branch = Some(name.to_string());
    }

    /// Snapshot of all tags, including ones created through the trait.
    pub fn recorded_tags(&self) -> Vec<TagInfo> {
        self.tags.lock().expect("tags lock").clone()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn tags(&self) -> Result<Vec<TagInfo>> {
        Ok(self.tags.lock().expect("tags lock").clone())
    }

    fn commits_reachable_from(&self, reference: &str) -> Result<Vec<CommitInfo>> {
        if reference == "HEAD" {
            return Ok(self.head.iter().rev().cloned().collect());
        }
        self.branches
            .iter()
            .find(|(name, _)| name == reference)
            .map(|(_, commits)| commits.iter().rev().cloned().collect())
            .ok_or_else(|| NextverError::branch(format!("Cannot find branch '{}'", reference)))
    }

    fn branch_heads(&self) -> Result<Vec<String>> {
        Ok(self.branches.iter().map(|(name, _)| name.clone()).collect())
    }

    fn active_branch(&self) -> Result<Option<String>> {
        Ok(self.active_branch.clone())
    }

    fn create_tag(&self, name: &str, message: Option<&str>) -> Result<TagInfo> {
        let head = self.head.last().ok_or_else(|| {
            NextverError::branch("Cannot tag an empty repository".to_string())
        })?;
        let tag = TagInfo {
            name: name.to_string(),
            target: head.hash.clone(),
            target_summary: head.summary.clone(),
            message: message.map(String::from),
        };
        self.tags.lock().expect("tags lock").push(tag.clone());
        Ok(tag)
    }
}
