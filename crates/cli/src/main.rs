//! rsh - Interactive shell for S3-compatible object storage
//!
//! Logs go to stderr so the shell's own output on stdout stays clean.

use clap::Parser;
use rustfs_shell::commands::{self, Cli};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter used by `--debug`
const DEBUG_FILTER: &str = "rustfs_shell=debug,rsh_core=debug,rsh_s3=debug";

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new(DEBUG_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let exit_code = commands::execute(cli).await;

    std::process::exit(exit_code.as_i32());
}
