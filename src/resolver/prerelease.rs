//! Pre-release track resolution
//!
//! A pre-release track is the sequence of tags sharing a `<label><number>`
//! suffix (rc1, rc2, ...). Resolution finds the highest number on the track
//! and either continues it or opens a new track from an already-resolved
//! final version. Versions are composed from the winning tag's name stem,
//! so whatever precedes the label in the tag (including a hyphen) is
//! preserved.

use super::ResolutionSession;
use crate::error::{NextverError, Result};
use crate::git::{Repository, TagInfo};
use crate::warnings::ResolutionWarning;

pub(super) fn increase_pre_release<R: Repository>(
    session: &mut ResolutionSession<'_, R>,
    label: &str,
) -> Result<()> {
    let tags = session.repo.tags()?;

    // highest pre-release number among tags carrying the label; ties keep
    // the first hit in reverse scan order
    let mut winner: Option<(u32, TagInfo)> = None;
    for tag in tags.iter().rev() {
        let label_start = match tag.name.find(label) {
            Some(index) => index,
            None => continue,
        };
        let trailing = &tag.name[label_start + label.len()..];
        let digits: String = trailing.chars().take_while(|c| c.is_ascii_digit()).collect();
        let number = match digits.parse::<u32>() {
            Ok(number) => number,
            Err(_) => {
                session
                    .state
                    .warnings
                    .push(ResolutionWarning::UnparsablePreReleaseTag {
                        tag: tag.name.clone(),
                    });
                continue;
            }
        };
        let higher = winner.as_ref().map_or(true, |(best, _)| number > *best);
        if higher {
            winner = Some((number, tag.clone()));
        }
    }

    match winner {
        Some((max_number, tag)) => {
            let label_start = tag.name.find(label).unwrap_or(tag.name.len());
            let stem = &tag.name[..label_start];

            let next = match session.state.new_version.as_deref() {
                // a final version was already resolved and the track does
                // not belong to it: open a new track
                Some(current) if current != stem => format!("{}{}1", current, label),
                _ => format!("{}{}{}", stem, label, max_number + 1),
            };
            session.state.new_version = Some(next);
            session.state.last_tag = Some(tag.clone());

            let head = session.repo.commits_reachable_from("HEAD")?;
            if !head.iter().any(|commit| commit.hash == tag.target) {
                session.state.not_synced = true;
                if let Some(branch) = session.branch_reaching(&tag.target)? {
                    return Err(NextverError::PreReleaseNotSynced {
                        summary: tag.target_summary.clone(),
                        branch,
                    });
                }
                return Err(NextverError::UnsyncedEverywhere {
                    summary: tag.target_summary.clone(),
                });
            }
            Ok(())
        }
        None => {
            // no track yet: derive the final version first if nothing
            // resolved one, then open the track at 1
            if session.state.new_version.is_none() {
                session.increase_version()?;
            }
            let current = session
                .state
                .new_version
                .take()
                .ok_or_else(|| NextverError::version("no version resolved"))?;
            session.state.new_version = Some(format!("{}{}1", current, label));
            Ok(())
        }
    }
}
