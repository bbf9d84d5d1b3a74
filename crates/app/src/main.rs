mod config;
mod page;
mod terminal;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use lesson_core::model::SettingsOverrides;
use services::{
    CommandEffect, HttpSubmitter, RecordingSubmitter, SubmissionCollaborator, SubmitOutcome,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::page::Page;
use crate::terminal::{HELP, LineCommand, TerminalPresenter, parse_line};

#[derive(Parser)]
#[command(
    name = "lesson",
    about = "Play lesson activities (quizzes, ordering boards, topic pages) in the terminal",
    version
)]
struct Cli {
    /// JSON config file with `settings` and `submitter` sections
    #[arg(long, global = true, env = "LESSON_CONFIG")]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an activity file
    Run {
        file: PathBuf,

        /// Lesson server to record completions on
        #[arg(long, env = "LESSON_API_BASE_URL")]
        base_url: Option<String>,

        /// Keep submissions in memory instead of posting them
        #[arg(long)]
        dry_run: bool,
    },
    /// Validate an activity file without playing it
    Check { file: PathBuf },
}

/// `RUST_LOG` wins when it parses; otherwise log at info, or debug with `--verbose`.
fn env_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    let default_level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    rust_log
        .filter(|raw| !raw.trim().is_empty())
        .and_then(|raw| EnvFilter::try_new(raw).ok())
        .unwrap_or_else(|| EnvFilter::default().add_directive(default_level.into()))
}

fn init_tracing(verbose: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose, rust_log.as_deref()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let app_config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    match cli.command {
        Commands::Check { file } => {
            let page = Page::load(&file)?;
            let controller =
                page.controller(&app_config.settings, Arc::new(RecordingSubmitter::new()))?;
            println!(
                "{}: {} step(s), ok",
                page.title(),
                controller.state().total_steps()
            );
            Ok(())
        }
        Commands::Run {
            file,
            base_url,
            dry_run,
        } => {
            let page = Page::load(&file)?;
            let submitter: Arc<dyn SubmissionCollaborator> = if dry_run {
                tracing::info!("dry run: submissions stay in memory");
                Arc::new(RecordingSubmitter::new())
            } else {
                Arc::new(HttpSubmitter::new(app_config.submitter_config(base_url)?)?)
            };
            play(&page, &app_config.settings, submitter).await
        }
    }
}

async fn play(
    page: &Page,
    settings: &SettingsOverrides,
    submitter: Arc<dyn SubmissionCollaborator>,
) -> Result<()> {
    let mut controller = page
        .controller(settings, submitter)?
        .with_presenter(Arc::new(TerminalPresenter::default()));

    println!("{HELP}\n");
    println!("{}", page.render(&controller));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let Some(command) = parse_line(&line) else {
            println!("unrecognised input, type `help` for commands");
            continue;
        };
        let effect = match command {
            LineCommand::Quit => break,
            LineCommand::Help => {
                println!("{HELP}");
                continue;
            }
            LineCommand::Open(topic) => controller.open_topic(&topic).map(CommandEffect::Moved),
            LineCommand::Key(key) => controller.dispatch(key).await,
        };

        match effect {
            Ok(CommandEffect::Submitted(SubmitOutcome::Completed { .. })) => return Ok(()),
            Ok(CommandEffect::Submitted(_)) => {}
            Ok(_) => println!("{}", page.render(&controller)),
            Err(err) => println!("{err}"),
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("{err:#}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn rust_log_replaces_default_level() {
        let filter = env_filter(true, Some("warn"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn default_level_follows_verbose_flag() {
        assert_eq!(env_filter(false, None).max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(env_filter(true, Some("  ")).max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn unparsable_rust_log_falls_back() {
        let filter = env_filter(false, Some("lesson=loud"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
    }
}
