//! Process entry point and shell command definitions
//!
//! The binary takes a handful of flags, loads the configuration, connects the
//! storage client and hands control to the interactive loop. Every shell
//! command lives in one of the submodules and registers itself into the
//! [`CommandRegistry`] built by [`build_registry`].

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use rsh_core::{ColorMode, ConfigManager, DEFAULT_CONFIG_FILE};
use rsh_s3::S3Client;
use tokio_util::sync::CancellationToken;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};
use crate::shell::{CommandRegistry, Repl, ReplExit, Session, spawn_termination_watcher};

mod bucket;
mod builtin;
mod objects;

/// rsh - Interactive shell for S3-compatible object storage
///
/// Reads commands from stdin: ls, mk, rm, count, clear, h and q.
#[derive(Parser, Debug)]
#[command(name = "rsh")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, env = "RSH_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Disable colored output
    #[arg(long, default_value = "false")]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, default_value = "false")]
    pub debug: bool,
}

/// Build the registry holding every shell command
pub fn build_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    objects::register(&mut registry);
    bucket::register(&mut registry);
    builtin::register(&mut registry);
    registry
}

/// Run the shell and return the process exit code
pub async fn execute(cli: Cli) -> ExitCode {
    match run(cli).await {
        Ok(ReplExit::Cancelled) => ExitCode::Interrupted,
        Ok(ReplExit::Quit | ReplExit::EndOfInput) => ExitCode::Success,
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("Error: {e:#}");
            e.downcast_ref::<rsh_core::Error>()
                .map(ExitCode::from)
                .unwrap_or(ExitCode::GeneralError)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ReplExit> {
    let manager = ConfigManager::discover(&cli.config);
    let config = manager.load().with_context(|| {
        format!(
            "failed to load configuration from {}",
            manager.config_path().display()
        )
    })?;
    tracing::debug!("Loaded configuration from {}", manager.config_path().display());

    let client = S3Client::new(&config.storage)
        .await
        .context("failed to create storage client")?;

    let no_color = cli.no_color
        || match config.shell.color {
            ColorMode::Always => false,
            ColorMode::Never => true,
            ColorMode::Auto => !console::colors_enabled(),
        };

    let cancel = CancellationToken::new();
    let watcher = spawn_termination_watcher(cancel.clone());

    let session = Session::new(Arc::new(client), Arc::new(build_registry()), cancel.clone())
        .with_settings(config.shell)
        .with_output(Formatter::stdout(OutputConfig { no_color }));

    let result = Repl::new(session).run().await;

    // Stops the watcher when the loop ended for any other reason.
    cancel.cancel();
    if let Err(e) = watcher.await {
        tracing::warn!("Signal watcher failed: {e}");
    }

    Ok(result?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_contains_every_command() {
        let registry = build_registry();
        let names: Vec<&str> = registry.list_all().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["clear", "count", "h", "ls", "mk", "q", "rm"]);
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["rsh"]).unwrap();
        assert!(!cli.no_color);
        assert!(!cli.debug);
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from(["rsh", "-c", "/tmp/rsh.toml", "--no-color", "--debug"])
            .unwrap();
        assert_eq!(cli.config, PathBuf::from("/tmp/rsh.toml"));
        assert!(cli.no_color);
        assert!(cli.debug);
    }

    #[tokio::test]
    async fn test_missing_config_is_usage_error() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli {
            config: dir.path().join("absent.toml"),
            no_color: true,
            debug: false,
        };
        assert_eq!(execute(cli).await, ExitCode::UsageError);
    }
}
