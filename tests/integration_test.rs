//! End-to-end tests against real temporary git repositories.

use git2::{Oid, Repository};
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

use nextver::config::ConventionalCommitsConfig;
use nextver::git::{Git2Repository, Repository as _};
use nextver::resolver::ResolutionSession;

/// Initialize a repository with a configured test user.
fn init_repo() -> (TempDir, Repository) {
    let temp_dir = TempDir::new().expect("Could not create temp dir");
    let repo = Repository::init(temp_dir.path()).expect("Could not init git repo");
    {
        let mut config = repo.config().expect("Could not get config");
        config
            .set_str("user.name", "Test User")
            .expect("Could not set user.name");
        config
            .set_str("user.email", "test@example.com")
            .expect("Could not set user.email");
    }
    (temp_dir, repo)
}

/// Write a file and commit it on HEAD, returning the commit id.
fn commit_file(repo: &Repository, file_name: &str, content: &str, message: &str) -> Oid {
    let workdir = repo.workdir().expect("workdir");
    fs::write(workdir.join(file_name), content).expect("Could not write file");

    let mut index = repo.index().expect("Could not get index");
    index
        .add_path(Path::new(file_name))
        .expect("Could not add file to index");
    index.write().expect("Could not write index");

    let tree_id = index.write_tree().expect("Could not write tree");
    let tree = repo.find_tree(tree_id).expect("Could not find tree");
    let signature = repo.signature().expect("Could not get signature");

    let parent = repo.head().ok().and_then(|head| head.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();

    repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
        .expect("Could not create commit")
}

fn tag_lightweight(repo: &Repository, name: &str, oid: Oid) {
    repo.tag_lightweight(name, &repo.find_object(oid, None).expect("object"), false)
        .expect("Could not create tag");
}

fn session(repo: &Git2Repository) -> ResolutionSession<'_, Git2Repository> {
    ResolutionSession::new(repo, ConventionalCommitsConfig::default())
}

#[test]
fn resolves_minor_from_real_history() {
    let (dir, repo) = init_repo();
    let first = commit_file(&repo, "README.md", "one\n", "chore(init): initial commit");
    tag_lightweight(&repo, "1.0.0", first);
    commit_file(&repo, "README.md", "two\n", "feat(api): add endpoint");

    let collab = Git2Repository::discover(dir.path()).expect("discover");
    let mut session = session(&collab);
    session.resolve_last_tag(false).expect("resolve");
    session.collect_relevant_commits().expect("collect");
    session.increase_version().expect("increment");

    assert_eq!(session.state.new_version.as_deref(), Some("1.1.0"));
}

#[test]
fn resolves_major_across_mixed_commits() {
    let (dir, repo) = init_repo();
    let first = commit_file(&repo, "a.txt", "1", "chore(init): initial commit");
    tag_lightweight(&repo, "4.6.3", first);
    commit_file(&repo, "a.txt", "2", "feat(core): new feature");
    commit_file(
        &repo,
        "a.txt",
        "3",
        "docs(core): change\n\nBREAKING CHANGE: renamed the api\n",
    );

    let collab = Git2Repository::discover(dir.path()).expect("discover");
    let mut session = session(&collab);
    session.resolve_last_tag(false).expect("resolve");
    session.collect_relevant_commits().expect("collect");
    session.increase_version().expect("increment");

    assert_eq!(session.state.new_version.as_deref(), Some("5.0.0"));
}

#[test]
fn annotated_tag_round_trip_via_add_tag() {
    let (dir, repo) = init_repo();
    let first = commit_file(&repo, "a.txt", "1", "chore(init): initial commit");
    tag_lightweight(&repo, "0.1.0", first);
    commit_file(&repo, "a.txt", "2", "fix(core): null handling");

    let collab = Git2Repository::discover(dir.path()).expect("discover");
    let mut session = session(&collab);
    session.resolve_last_tag(false).expect("resolve");
    session.collect_relevant_commits().expect("collect");
    session.increase_version().expect("increment");
    assert_eq!(session.state.new_version.as_deref(), Some("0.1.1"));

    let changelog = session.changelog();
    session
        .add_tag(Some(&changelog.join("\n")))
        .expect("tag creation");

    let tags = collab.tags().expect("tags");
    let created = tags.iter().find(|t| t.name == "0.1.1").expect("created tag");
    assert!(created
        .message
        .as_deref()
        .expect("annotation")
        .contains("fix(core): null handling"));

    // the created tag becomes the next base
    let mut second = ResolutionSession::new(&collab, ConventionalCommitsConfig::default());
    second.resolve_last_tag(false).expect("re-resolve");
    assert_eq!(second.state.last_tag.as_ref().expect("tag").name, "0.1.1");
}

#[test]
fn initial_tag_mode_tags_whole_history() {
    let (dir, repo) = init_repo();
    commit_file(&repo, "a.txt", "1", "feat(core): first");
    commit_file(&repo, "a.txt", "2", "docs(core): second");

    let collab = Git2Repository::discover(dir.path()).expect("discover");
    let mut session = session(&collab);
    let release = session
        .create_initial_tag("0.0.1", false, false)
        .expect("init");

    assert_eq!(release.tag_name, "0.0.1");
    assert_eq!(release.changelog.len(), 2);
    assert!(release.changelog[0].starts_with("feat(core): first ("));

    let tags = collab.tags().expect("tags");
    assert_eq!(tags.len(), 1);
    assert!(tags[0]
        .message
        .as_deref()
        .expect("annotation")
        .contains("docs(core): second"));
}

#[test]
fn duplicate_tag_creation_reports_collaborator_status() {
    let (dir, repo) = init_repo();
    let first = commit_file(&repo, "a.txt", "1", "chore(init): initial commit");
    tag_lightweight(&repo, "1.0.0", first);

    let collab = Git2Repository::discover(dir.path()).expect("discover");
    let err = collab.create_tag("1.0.0", None).unwrap_err();
    match err {
        nextver::NextverError::TagCreation { status, message } => {
            assert_ne!(status, 0);
            assert!(!message.is_empty());
        }
        other => panic!("expected TagCreation error, got {other}"),
    }
}

#[test]
fn branch_heads_and_active_branch_are_visible() {
    let (dir, repo) = init_repo();
    let first = commit_file(&repo, "a.txt", "1", "chore(init): initial commit");
    let commit = repo.find_commit(first).expect("commit");
    repo.branch("develop", &commit, false).expect("branch");

    let collab = Git2Repository::discover(dir.path()).expect("discover");
    let heads = collab.branch_heads().expect("heads");
    assert!(heads.iter().any(|h| h == "develop"));

    let active = collab.active_branch().expect("active");
    // freshly initialized repositories check out master or main
    assert!(active.is_some());

    let history = collab.commits_reachable_from("develop").expect("history");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].summary, "chore(init): initial commit");
}

#[test]
#[serial_test::serial]
fn discovers_repository_from_working_directory() {
    let (dir, repo) = init_repo();
    let first = commit_file(&repo, "a.txt", "1", "chore(init): initial commit");
    tag_lightweight(&repo, "1.0.0", first);

    let original_dir = std::env::current_dir().expect("cwd");
    std::env::set_current_dir(dir.path()).expect("chdir");

    let result = Git2Repository::discover(".");

    std::env::set_current_dir(original_dir).expect("chdir back");
    assert!(result.is_ok());
}

#[test]
fn cli_help_describes_the_tool() {
    let output = Command::new("cargo")
        .args(["run", "--bin", "nextver", "--", "--help"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("nextver"));
    assert!(stdout.contains("--pre-release"));
    assert!(stdout.contains("--init"));
}
