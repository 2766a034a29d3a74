use anyhow::Result;
use clap::Parser;

use git_release::cli::{exit_code, run_release, ReleaseArgs};
use git_release::config;
use git_release::process::SystemRunner;
use git_release::ui;

#[derive(clap::Parser)]
#[command(
    name = "git-release",
    about = "Release a version: bump, tag and push, then move on to the next snapshot"
)]
struct Args {
    #[arg(value_name = "release-version", help = "The release version (as semver)")]
    release_version: Option<String>,

    #[arg(value_name = "next-version", help = "The next snapshot version (as semver)")]
    next_version: Option<String>,

    #[arg(long, help = "Does not release, but only simulates the steps")]
    dry_run: bool,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Print version information")]
    version: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.version {
        println!("git-release {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let (Some(release_version), Some(next_version)) = (args.release_version, args.next_version)
    else {
        ui::display_error("Both <release-version> and <next-version> are required");
        std::process::exit(1);
    };

    // Load configuration
    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    if args.dry_run {
        ui::display_status("Dry run: no command will be executed");
    }

    let workflow_args = ReleaseArgs {
        release_version,
        next_version,
        dry_run: args.dry_run,
    };
    let workdir = std::env::current_dir()?;
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();

    let result = run_release(
        &workflow_args,
        &config,
        &SystemRunner::new(),
        &workdir,
        &mut input,
        &mut output,
    );

    if let Err(e) = &result {
        ui::display_release_error(e);
    }
    std::process::exit(exit_code(&result));
}
