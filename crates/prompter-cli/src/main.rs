use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use prompter_core::{source::TextSource, AppConfig};

mod commands;

#[derive(Parser)]
#[command(name = "notch-prompter")]
#[command(author, version, about = "An auto-scrolling prompter pinned to the top of the terminal")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    run: RunArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the prompter (the default)
    Run(RunArgs),
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the configuration file path
    Path,
    /// Print the effective configuration
    Show,
    /// Write a configuration file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args, Default)]
struct RunArgs {
    /// Text to scroll
    #[arg(short, long, conflicts_with = "file")]
    text: Option<String>,
    /// Read the text from a file (`-` for stdin)
    #[arg(short, long)]
    file: Option<PathBuf>,
    /// Reload the text whenever the file changes
    #[arg(short, long, requires = "file")]
    watch: bool,
    /// Scroll speed in points per second
    #[arg(long)]
    speed: Option<f64>,
    /// Text size in points
    #[arg(long)]
    font_size: Option<f64>,
    /// Prompter width in pixels
    #[arg(long)]
    width: Option<f64>,
    /// Prompter height in pixels
    #[arg(long)]
    height: Option<f64>,
    /// Start paused
    #[arg(long)]
    paused: bool,
    /// Keep scrolling while the mouse is over the prompter
    #[arg(long)]
    no_pause_on_hover: bool,
}

impl RunArgs {
    /// Apply command-line overrides on top of the configured prompter settings
    fn apply(&self, config: &mut AppConfig) {
        let prompter = &mut config.prompter;
        if let Some(speed) = self.speed {
            prompter.speed = speed;
        }
        if let Some(font_size) = self.font_size {
            prompter.font_size = font_size;
        }
        if let Some(width) = self.width {
            prompter.width = width;
        }
        if let Some(height) = self.height {
            prompter.height = height;
        }
        if self.paused {
            prompter.autoplay = false;
        }
        if self.no_pause_on_hover {
            prompter.pause_on_hover = false;
        }
        config.prompter = config.prompter.clone().normalized();
    }
}

/// Where log output goes
enum LogTarget {
    /// Append to the log file; the terminal belongs to the TUI
    File(PathBuf),
    Stderr,
}

fn init_logging(config: &AppConfig, target: LogTarget) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    match target {
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .init();
        }
        LogTarget::Stderr => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = AppConfig::load()
        .with_context(|| format!("loading {}", AppConfig::config_path().display()))?;

    match cli.command {
        Some(Commands::Config { action }) => {
            init_logging(&config, LogTarget::Stderr)?;
            match action {
                ConfigAction::Path => commands::config::path(),
                ConfigAction::Show => commands::config::show(&config),
                ConfigAction::Init { force } => commands::config::init(force),
            }
        }
        Some(Commands::Run(args)) => start(&mut config, args).await,
        None => start(&mut config, cli.run).await,
    }
}

async fn start(config: &mut AppConfig, args: RunArgs) -> Result<()> {
    init_logging(config, LogTarget::File(config.log_path()))?;
    args.apply(config);

    let source = TextSource::from_args(args.text, args.file, &config.prompter.text);
    // Text from a file or stdin is not written back when settings are saved
    let saved_text = match &source {
        TextSource::Inline(_) => None,
        TextSource::File(_) | TextSource::Stdin => Some(config.prompter.text.clone()),
    };
    let text = source.load().context("loading prompter text")?;
    config.prompter.text = text;

    commands::run::run(Arc::new(config.clone()), source, args.watch, saved_text).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_flags_run_the_prompter() {
        let cli = Cli::try_parse_from(["notch-prompter", "--text", "hi", "--speed", "20"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.run.text.as_deref(), Some("hi"));
        assert_eq!(cli.run.speed, Some(20.0));
    }

    #[test]
    fn test_watch_requires_file() {
        assert!(Cli::try_parse_from(["notch-prompter", "run", "--watch"]).is_err());
        let args = ["notch-prompter", "run", "--file", "talk.txt", "--watch"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Some(Commands::Run(args)) => {
                assert!(args.watch);
                assert_eq!(args.file, Some(PathBuf::from("talk.txt")));
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_text_conflicts_with_file() {
        assert!(Cli::try_parse_from(["notch-prompter", "-t", "a", "-f", "b.txt"]).is_err());
    }

    #[test]
    fn test_overrides_are_clamped() {
        let mut config = AppConfig::default();
        let args = RunArgs {
            speed: Some(500.0),
            width: Some(250.0),
            paused: true,
            no_pause_on_hover: true,
            ..Default::default()
        };
        args.apply(&mut config);
        assert_eq!(config.prompter.speed, 40.0);
        assert_eq!(config.prompter.width, 250.0);
        assert!(!config.prompter.autoplay);
        assert!(!config.prompter.pause_on_hover);
    }

    #[test]
    fn test_config_subcommand() {
        let cli = Cli::try_parse_from(["notch-prompter", "config", "init", "--force"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                action: ConfigAction::Init { force: true }
            })
        ));
    }
}
