//! # vcc CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use vcc_core::{build_app_error, ConsoleConfig};

/// Credentials console CLI: schema identifiers, attribute trees, and
/// credential value overlays.
#[derive(Parser, Debug)]
#[command(name = "vcc", version, about)]
struct Cli {
    /// Emit logs as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Compute the schema hash and BigInt of a JSON-LD type id.
    Hash(vcc_cli::hash::HashArgs),
    /// Print the attribute tree of a JSON Schema.
    Attributes(vcc_cli::attributes::AttributesArgs),
    /// Validate credential data and overlay it on a schema.
    Values(vcc_cli::values::ValuesArgs),
    /// List the credential types declared by a JSON-LD context.
    Types(vcc_cli::types::TypesArgs),
    /// Fetch a remote schema, context or JSON document.
    Fetch(vcc_cli::fetch::FetchArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr);
    if cli.json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    match dispatch(cli.command).await {
        Ok(value) => match serde_json::to_string_pretty(&value) {
            Ok(rendered) => {
                println!("{rendered}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("general-error: {e}");
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            let error = build_app_error(e);
            if error.is_cancellation() {
                tracing::debug!("request cancelled");
                return ExitCode::from(130);
            }
            tracing::warn!(kind = %error.kind(), "command failed");
            eprintln!("{}: {error}", error.kind());
            ExitCode::FAILURE
        }
    }
}

async fn dispatch(command: Commands) -> anyhow::Result<serde_json::Value> {
    match command {
        Commands::Hash(args) => vcc_cli::hash::run(&args),
        Commands::Attributes(args) => vcc_cli::attributes::run(&args),
        Commands::Values(args) => vcc_cli::values::run(&args),
        Commands::Types(args) => vcc_cli::types::run(&args),
        Commands::Fetch(args) => {
            let config = ConsoleConfig::from_env()?;
            vcc_cli::fetch::run(&args, &config).await
        }
    }
}
