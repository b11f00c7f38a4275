use clap::Parser;

use nextver::config;
use nextver::error::{NextverError, Result};
use nextver::git::Git2Repository;
use nextver::resolver::ResolutionSession;
use nextver::ui;

#[derive(clap::Parser)]
#[command(
    name = "nextver",
    about = "Compute the next semantic version from conventional commit history"
)]
struct Args {
    #[arg(short = 'P', long, help = "Path of the repository")]
    path: Option<String>,

    #[arg(short = 'M', long, help = "Raise current major version")]
    major: bool,

    #[arg(short = 'm', long, help = "Raise current minor version")]
    minor: bool,

    #[arg(short = 'p', long, help = "Raise current patch version")]
    patch: bool,

    #[arg(short = 't', long, help = "Add version tag with changelog")]
    tag: bool,

    #[arg(
        short = 'c',
        long = "no-changelog",
        help = "Exclude changelog when adding a git tag"
    )]
    no_changelog: bool,

    #[arg(
        short = 'r',
        long = "pre-release",
        value_name = "LABEL",
        help = "Raise pre-release version"
    )]
    pre_release: Option<String>,

    #[arg(
        short = 'i',
        long,
        value_name = "VERSION",
        num_args = 0..=1,
        default_missing_value = "0.0.1",
        help = "Add initial version tag"
    )]
    init: Option<String>,

    #[arg(long, help = "Print the raw git error instead of a translated status")]
    debug: bool,

    #[arg(short = 'C', long, help = "Custom configuration file path")]
    config: Option<String>,
}

fn main() {
    let args = Args::parse();

    if let Err(err) = run(&args) {
        if args.debug {
            // raw error with its source chain, untranslated
            eprintln!("{:?}", anyhow::Error::new(err));
            std::process::exit(1);
        }

        let code = err.exit_code();
        match &err {
            NextverError::TagCreation { message, .. } => {
                let message = message.strip_prefix("error: ").unwrap_or(message.as_str());
                eprintln!("{}", message);
            }
            _ => ui::display_error(&err.to_string()),
        }
        std::process::exit(code);
    }
}

fn run(args: &Args) -> Result<()> {
    let config = config::load_config(args.config.as_deref())?;
    let no_changelog = args.no_changelog || config.behavior.no_changelog;

    let path = args.path.clone().unwrap_or_else(|| ".".to_string());
    let repo = Git2Repository::discover(&path)?;
    let mut session = ResolutionSession::new(&repo, config.conventional_commits);

    if let Some(initial) = args.init.as_deref() {
        let release =
            session.create_initial_tag(initial, no_changelog, args.pre_release.is_some())?;
        println!("{}", release.tag_name);
        if !release.changelog.is_empty() {
            ui::display_changelog_with_header(&release.changelog);
        }
        return Ok(());
    }

    session.resolve_last_tag(args.pre_release.is_some())?;
    session.collect_relevant_commits()?;

    if args.major {
        session.increase_major()?;
    } else if args.minor {
        session.increase_minor()?;
    } else if args.patch {
        session.increase_patch()?;
    } else if args.pre_release.is_none() {
        session.increase_version()?;
    }

    if let Some(label) = args.pre_release.as_deref() {
        session.increase_pre_release(label)?;
    }

    for warning in &session.state.warnings {
        ui::display_warning(&warning.to_string());
    }

    let new_version = session
        .state
        .new_version
        .clone()
        .ok_or_else(|| NextverError::version("no version resolved"))?;
    println!("{}", new_version);

    if args.tag {
        if no_changelog {
            session.add_tag(None)?;
        } else {
            let changelog = session.changelog();
            session.add_tag(Some(&changelog.join("\n")))?;
            for line in &changelog {
                println!("{}", line);
            }
        }
    }

    Ok(())
}
