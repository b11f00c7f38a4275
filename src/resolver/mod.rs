//! Version-resolution engine
//!
//! A [ResolutionSession] drives one invocation: locate the last relevant
//! version tag, collect the commits since it, derive the next version (or a
//! pre-release increment) and optionally create the tag. All failure modes
//! surface as [crate::error::NextverError] values; nothing here terminates
//! the process.

mod prerelease;

use crate::analyzer::VersionIncrementer;
use crate::changelog::build_changelog;
use crate::config::ConventionalCommitsConfig;
use crate::domain::Version;
use crate::error::{NextverError, Result};
use crate::git::{CommitInfo, Repository, TagInfo};
use crate::warnings::ResolutionWarning;

/// Mutable state of one resolution run. Created once per invocation,
/// mutated in place by each step, discarded afterwards.
#[derive(Debug, Default)]
pub struct ResolutionState {
    pub last_tag: Option<TagInfo>,
    pub base_version: Option<Version>,
    /// Commits since the last tag, newest first
    pub relevant_commits: Vec<CommitInfo>,
    pub not_synced: bool,
    /// Rendered next version. Pre-release tracks compose version strings
    /// from tag-name stems, so the resolved value is carried as text.
    pub new_version: Option<String>,
    pub warnings: Vec<ResolutionWarning>,
}

/// Outcome of the initial-tag mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitialRelease {
    pub tag_name: String,
    pub changelog: Vec<String>,
}

/// What the tag scan remembered beyond the state it fills in.
struct TagScan {
    unsynced_tag: Option<TagInfo>,
    /// Pre-release label of the most recently scanned version-shaped tag,
    /// `None` when that tag was a plain release.
    last_seen_pre_label: Option<String>,
}

pub struct ResolutionSession<'a, R: Repository> {
    repo: &'a R,
    incrementer: VersionIncrementer,
    pub state: ResolutionState,
}

impl<'a, R: Repository> ResolutionSession<'a, R> {
    pub fn new(repo: &'a R, config: ConventionalCommitsConfig) -> Self {
        ResolutionSession {
            repo,
            incrementer: VersionIncrementer::new(config),
            state: ResolutionState::default(),
        }
    }

    /// Establish `last_tag` and the base version from the repository's tags.
    ///
    /// Pre-release tags are invisible unless `include_pre_releases` is set.
    /// Fails when no version tag applies to the current history line, or
    /// when the relevant tag only exists on a diverged branch.
    pub fn resolve_last_tag(&mut self, include_pre_releases: bool) -> Result<()> {
        let scan = self.scan_tags(include_pre_releases)?;
        let pre_release_seen = scan.last_seen_pre_label.is_some();

        if self.state.not_synced && !pre_release_seen {
            if let Some(unsynced) = &scan.unsynced_tag {
                if let Some(branch) = self.branch_reaching(&unsynced.target)? {
                    return Err(NextverError::BranchesNotSynced {
                        summary: unsynced.target_summary.clone(),
                        branch,
                    });
                }
            }
        }

        if self.state.last_tag.is_none() && !pre_release_seen {
            let branch = self
                .repo
                .active_branch()?
                .unwrap_or_else(|| "HEAD".to_string());
            return Err(NextverError::NoVersionTags { branch });
        }

        if pre_release_seen && !include_pre_releases && self.state.not_synced {
            let label = scan.last_seen_pre_label.unwrap_or_default();
            return Err(NextverError::LastVersionIsPreRelease { label });
        }

        Ok(())
    }

    /// Initial-tag mode: create `name` as the first version tag, annotated
    /// with the changelog of the entire reachable history unless
    /// suppressed, then re-resolve. Fails when a version tag already
    /// exists.
    pub fn create_initial_tag(
        &mut self,
        name: &str,
        no_changelog: bool,
        include_pre_releases: bool,
    ) -> Result<InitialRelease> {
        self.scan_tags(include_pre_releases)?;
        if self.state.last_tag.is_some() {
            return Err(NextverError::InitialTagExists);
        }

        let changelog = if no_changelog {
            self.repo.create_tag(name, None)?;
            Vec::new()
        } else {
            self.state.relevant_commits = self.repo.commits_reachable_from("HEAD")?;
            let changelog = build_changelog(&self.state.relevant_commits);
            self.repo.create_tag(name, Some(&changelog.join("\n")))?;
            changelog
        };

        self.resolve_last_tag(false)?;
        let tag_name = self
            .state
            .last_tag
            .as_ref()
            .map(|tag| tag.name.clone())
            .unwrap_or_else(|| name.to_string());

        Ok(InitialRelease {
            tag_name,
            changelog,
        })
    }

    /// Collect the commits strictly newer than the last tag's commit.
    /// Fails with "There are no new commits" when the tag sits at HEAD.
    pub fn collect_relevant_commits(&mut self) -> Result<()> {
        let last_tag = self
            .state
            .last_tag
            .as_ref()
            .ok_or_else(|| NextverError::version("no last version tag resolved"))?;

        let history = self.repo.commits_reachable_from("HEAD")?;
        let tagged_index = history
            .iter()
            .position(|commit| commit.hash == last_tag.target)
            .ok_or_else(|| {
                NextverError::version("last version tag is no longer reachable from HEAD")
            })?;

        self.state.relevant_commits = history[..tagged_index].to_vec();
        if self.state.relevant_commits.is_empty() {
            return Err(NextverError::NoNewCommits);
        }
        Ok(())
    }

    /// Derive the next version from the relevant commits.
    pub fn increase_version(&mut self) -> Result<()> {
        let base = self.base_version()?;
        let outcome = self
            .incrementer
            .increment(&self.state.relevant_commits, &base);
        self.state.warnings.extend(outcome.warnings);
        self.state.new_version = Some(outcome.version.to_string());
        Ok(())
    }

    /// Manually raise the major increment, bypassing classification.
    pub fn increase_major(&mut self) -> Result<()> {
        let next = self.base_version()?.bump_major();
        self.state.new_version = Some(next.to_string());
        Ok(())
    }

    /// Manually raise the minor increment, bypassing classification.
    pub fn increase_minor(&mut self) -> Result<()> {
        let next = self.base_version()?.bump_minor();
        self.state.new_version = Some(next.to_string());
        Ok(())
    }

    /// Manually raise the patch increment, bypassing classification.
    pub fn increase_patch(&mut self) -> Result<()> {
        let next = self.base_version()?.bump_patch();
        self.state.new_version = Some(next.to_string());
        Ok(())
    }

    /// Continue or open the pre-release track for `label`. See
    /// [prerelease] for the track rules.
    pub fn increase_pre_release(&mut self, label: &str) -> Result<()> {
        prerelease::increase_pre_release(self, label)
    }

    /// Changelog lines for the current relevant-commit range.
    pub fn changelog(&self) -> Vec<String> {
        build_changelog(&self.state.relevant_commits)
    }

    /// Create a tag named after the resolved version.
    pub fn add_tag(&self, message: Option<&str>) -> Result<TagInfo> {
        let name = self
            .state
            .new_version
            .as_deref()
            .ok_or_else(|| NextverError::version("no version resolved"))?;
        self.repo.create_tag(name, message)
    }

    fn base_version(&self) -> Result<Version> {
        self.state
            .base_version
            .clone()
            .ok_or_else(|| NextverError::version("no base version resolved"))
    }

    /// One pass over all tags: parse each as a version, pick the maximum
    /// reachable candidate, remember desynchronization.
    ///
    /// Tags are scanned in reverse collaborator order; when several
    /// unsynced tags exist only the most recently scanned one is kept, and
    /// equal maxima keep the first-seen tag.
    fn scan_tags(&mut self, include_pre_releases: bool) -> Result<TagScan> {
        let tags = self.repo.tags()?;
        let head = self.repo.commits_reachable_from("HEAD")?;

        let mut best: Option<(Version, TagInfo)> = None;
        let mut unsynced_tag: Option<TagInfo> = None;
        let mut last_seen_pre_label: Option<String> = None;
        self.state.not_synced = false;

        for tag in tags.iter().rev() {
            let version = match Version::from_tag(&tag.name) {
                Some(version) => version,
                None => continue,
            };
            last_seen_pre_label = version.pre.as_ref().map(|pre| pre.label.clone());

            if version.is_pre_release() && !include_pre_releases {
                continue;
            }

            if head.iter().any(|commit| commit.hash == tag.target) {
                let better = best
                    .as_ref()
                    .map_or(true, |(best_version, _)| version > *best_version);
                if better {
                    best = Some((version, tag.clone()));
                }
            } else {
                if include_pre_releases {
                    continue;
                }
                self.state.not_synced = true;
                unsynced_tag = Some(tag.clone());
            }
        }

        if let Some((version, tag)) = best {
            self.state.base_version = Some(version);
            self.state.last_tag = Some(tag);
        }

        Ok(TagScan {
            unsynced_tag,
            last_seen_pre_label,
        })
    }

    /// First branch head whose history reaches `target`, if any.
    pub(crate) fn branch_reaching(&self, target: &str) -> Result<Option<String>> {
        for branch in self.repo.branch_heads()? {
            let reaches = self
                .repo
                .commits_reachable_from(&branch)?
                .iter()
                .any(|commit| commit.hash == target);
            if reaches {
                return Ok(Some(branch));
            }
        }
        Ok(None)
    }
}
