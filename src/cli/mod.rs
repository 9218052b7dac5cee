pub mod routines;
pub mod status;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};
use routines::Journal;
use status::StatusCommand;
use tokio::io::{self, BufReader};
use tracing::{level_filters::LevelFilter, warn};

use crate::{
    config::{Config, ProjectSettings, CONFIG_FILE},
    utils::{
        clock::{Clock, DefaultClock},
        console,
        dir::resolve_project_root,
        logging::{default_log_dir, enable_logging, CLI_PREFIX},
        prompt::Prompter,
    },
    vcs::git::GitCli,
};

#[derive(Parser, Debug)]
#[command(name = "daybook", version, long_about = None)]
#[command(about = "Daily routines for a long running research project", long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Option<Commands>,
    #[arg(
        long,
        global = true,
        help = "Project directory. By default the current directory is used"
    )]
    dir: Option<PathBuf>,
    #[arg(long, global = true, help = "Enable logging")]
    log: bool,
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(about = "Pull the latest changes and prepare today's contexts")]
    Morning,
    #[command(about = "Record today's session, commit it and optionally push")]
    Evening,
    #[command(about = "Regenerate the project master and the daily context")]
    Update,
    #[command(about = "Print the project status without writing anything")]
    Status {
        #[command(flatten)]
        command: StatusCommand,
    },
}

/// Never fails on user mistakes: unknown commands print the usage and step failures are reported as
/// warnings.
pub async fn run_cli() -> Result<()> {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            e.print()?;
            if !matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                println!();
                Args::command().print_help()?;
            }
            return Ok(());
        }
    };

    let Some(command) = args.commands else {
        Args::command().print_help()?;
        return Ok(());
    };

    let root = match resolve_project_root(args.dir) {
        Ok(root) => root,
        Err(e) => {
            console::warning(&format!("{e:#}"));
            return Ok(());
        }
    };

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    let read_only = matches!(command, Commands::Status { .. });
    let log_dir = (!read_only).then(default_log_dir).flatten();
    enable_logging(CLI_PREFIX, log_dir.as_deref(), logging_level, args.log);

    let config = load_config(&root, !read_only);
    let settings = ProjectSettings::new(root.clone(), config);
    let vcs = Box::new(GitCli::new(root));

    match command {
        Commands::Morning => {
            Journal::new(settings, vcs, Box::new(DefaultClock))
                .morning()
                .await
        }
        Commands::Evening => {
            let mut prompter = Prompter::new(BufReader::new(io::stdin()), io::stdout());
            Journal::new(settings, vcs, Box::new(DefaultClock))
                .evening(&mut prompter)
                .await
        }
        Commands::Update => {
            Journal::new(settings, vcs, Box::new(DefaultClock))
                .update()
                .await
        }
        Commands::Status { command } => {
            let clock: Box<dyn Clock> = match command.clock() {
                Ok(clock) => clock,
                Err(e) => {
                    console::warning(&format!("{e:#}"));
                    return Ok(());
                }
            };
            Journal::new(settings, vcs, clock).status().await
        }
    }
    Ok(())
}

/// A broken config never stops a routine, the defaults are used instead.
fn load_config(root: &Path, create_missing: bool) -> Config {
    let path = root.join(CONFIG_FILE);
    let loaded = if create_missing {
        Config::load_or_create(&path)
    } else {
        Config::load(&path).map(Option::unwrap_or_default)
    };
    loaded.unwrap_or_else(|e| {
        warn!("Failed to load config {e:?}");
        console::warning(&format!("{e:#}, using default settings"));
        Config::default()
    })
}
