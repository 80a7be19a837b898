///
/// This module implements the CLI interface for leanix-publish: argument parsing, the
/// async `run` entrypoint, and mapping of failures to process exit codes.
///
/// All pipeline logic (steps, error taxonomy, GraphQL payloads) lives in the
/// [`leanix-publish-core`] crate. This module is strictly CLI glue.
///
/// ## How To Use
/// - From a shell: run `leanix-publish` in the directory holding `leanix.yaml`.
/// - Programmatically / in integration tests: call [`run`] with a constructed [`Cli`].
///
/// [`leanix-publish-core`]: ../../leanix-publish-core/
use crate::client::LeanixClient;
use crate::load_config::load_config;
use anyhow::Result;
use clap::Parser;
use leanix_publish_core::publish::{publish, PublishReport};
use leanix_publish_core::PublishError;

/// CLI for leanix-publish: upload `leanix.yaml` and attach `architecture-overview.pdf`.
#[derive(Parser, Debug, Default)]
#[clap(
    name = "leanix-publish",
    version,
    about = "Publish a LeanIX fact sheet manifest and attach its architecture document"
)]
pub struct Cli {
    /// Do not log response bodies (status codes and identifiers are still logged)
    #[clap(short, long)]
    pub quiet: bool,

    /// Enable debug-level logging
    #[clap(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<PublishReport> {
    tracing::info!("trace_initialised");

    let config = load_config(!cli.quiet)?;
    let client = LeanixClient::new(&config);

    match publish(&client, &config).await {
        Ok(report) => {
            tracing::info!(command = "publish", ?report, "Publish complete");
            Ok(report)
        }
        Err(e) => {
            tracing::error!(command = "publish", error = %e, "Publish failed");
            Err(e.into())
        }
    }
}

/// Exit code for command-line usage errors (unknown flag, stray argument).
/// clap defaults to 2, which is already the configuration-error code.
pub const USAGE_EXIT_CODE: i32 = 64;

/// Parses the process arguments. `--help`/`--version` print and exit 0; usage
/// errors print and exit with [`USAGE_EXIT_CODE`].
pub fn parse_args() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            std::process::exit(USAGE_EXIT_CODE);
        }
    }
}

/// Process exit code for an error returned by [`run`].
pub fn exit_code(error: &anyhow::Error) -> i32 {
    error
        .downcast_ref::<PublishError>()
        .map(|e| e.kind().exit_code())
        .unwrap_or(1)
}
