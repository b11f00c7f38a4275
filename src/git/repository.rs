use crate::error::{NextverError, Result};
use crate::git::{CommitInfo, TagInfo};
use git2::{BranchType, Repository as Git2Repo};
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open the repository at `path`, searching parent directories.
    pub fn discover<P: AsRef<Path>>(path: P) -> Result<Self> {
        match Git2Repo::discover(path) {
            Ok(repo) => Ok(Git2Repository { repo }),
            Err(e) if e.code() == git2::ErrorCode::NotFound => Err(NextverError::NoRepository),
            Err(e) => Err(e.into()),
        }
    }

    fn head_commit(&self) -> Result<git2::Commit<'_>> {
        Ok(self.repo.head()?.peel_to_commit()?)
    }
}

impl super::Repository for Git2Repository {
    fn tags(&self) -> Result<Vec<TagInfo>> {
        let names = self.repo.tag_names(None)?;
        let mut tags = Vec::new();

        for name in names.iter().flatten() {
            let reference = match self.repo.find_reference(&format!("refs/tags/{}", name)) {
                Ok(r) => r,
                Err(_) => continue,
            };
            // tags pointing at non-commit objects are not resolvable history
            let commit = match reference.peel_to_commit() {
                Ok(c) => c,
                Err(_) => continue,
            };
            let message = reference
                .peel_to_tag()
                .ok()
                .and_then(|t| t.message().map(|m| m.to_string()));

            tags.push(TagInfo {
                name: name.to_string(),
                target: commit.id().to_string(),
                target_summary: commit.summary().unwrap_or("").to_string(),
                message,
            });
        }

        Ok(tags)
    }

    fn commits_reachable_from(&self, reference: &str) -> Result<Vec<CommitInfo>> {
        let oid = if reference == "HEAD" {
            self.head_commit()?.id()
        } else {
            self.repo
                .find_branch(reference, BranchType::Local)
                .map_err(|e| {
                    NextverError::branch(format!("Cannot find branch '{}': {}", reference, e))
                })?
                .into_reference()
                .peel_to_commit()?
                .id()
        };

        let mut revwalk = self.repo.revwalk()?;
        revwalk.push(oid)?;

        let mut commits = Vec::new();
        for oid_result in revwalk {
            let oid = oid_result?;
            let commit = self.repo.find_commit(oid)?;
            commits.push(CommitInfo {
                hash: oid.to_string(),
                summary: commit.summary().unwrap_or("").to_string(),
                message: commit.message().unwrap_or("").to_string(),
            });
        }

        Ok(commits)
    }

    fn branch_heads(&self) -> Result<Vec<String>> {
        let mut heads = Vec::new();
        for branch_result in self.repo.branches(Some(BranchType::Local))? {
            let (branch, _) = branch_result?;
            if let Some(name) = branch.name()? {
                heads.push(name.to_string());
            }
        }
        Ok(heads)
    }

    fn active_branch(&self) -> Result<Option<String>> {
        let head = match self.repo.head() {
            Ok(head) => head,
            Err(_) => return Ok(None),
        };
        if head.is_branch() {
            Ok(head.shorthand().map(|s| s.to_string()))
        } else {
            Ok(None)
        }
    }

    fn create_tag(&self, name: &str, message: Option<&str>) -> Result<TagInfo> {
        let head = self.head_commit()?;

        let created = match message {
            Some(msg) => {
                let signature = self.repo.signature()?;
                self.repo
                    .tag(name, head.as_object(), &signature, msg, false)
                    .map(|_| ())
            }
            None => self
                .repo
                .tag_lightweight(name, head.as_object(), false)
                .map(|_| ()),
        };

        created.map_err(|e| NextverError::TagCreation {
            status: e.raw_code(),
            message: e.message().to_string(),
        })?;

        Ok(TagInfo {
            name: name.to_string(),
            target: head.id().to_string(),
            target_summary: head.summary().unwrap_or("").to_string(),
            message: message.map(String::from),
        })
    }
}

// SAFETY: Git2Repository wraps git2::Repository which is Send but not Sync.
// All trait methods take &self and perform only read operations or tag
// creation through libgit2, which is thread-safe for these by design.
unsafe impl Sync for Git2Repository {}
