//! # Fetch Subcommand
//!
//! Fetches a remote document through the console client. The request runs
//! in a task slot and is aborted on Ctrl-C.

use clap::{Args, ValueEnum};
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use vcc_client::ConsoleClient;
use vcc_core::{AppError, ConsoleConfig};
use vcc_state::{ApiResult, AsyncTask, TaskSlot};

/// What to make of the fetched document.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FetchKind {
    /// Raw JSON.
    #[default]
    Json,
    /// JSON Schema, printed as an attribute tree.
    Schema,
    /// JSON-LD context, printed as its declared types.
    Types,
}

/// Arguments for the fetch subcommand.
#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Document URL (`https://` or `ipfs://`).
    pub url: String,

    /// How to interpret the document.
    #[arg(long, value_enum, default_value_t = FetchKind::Json)]
    pub kind: FetchKind,
}

/// Fetch the document described by `args`.
pub async fn run(args: &FetchArgs, config: &ConsoleConfig) -> anyhow::Result<Value> {
    let client = ConsoleClient::new(config)?;
    let mut slot: TaskSlot<Value> = TaskSlot::new(args.url.as_str());
    let ticket = slot.begin();
    let token = ticket.token();

    let result = tokio::select! {
        result = fetch(&client, args, &token) => result,
        _ = tokio::signal::ctrl_c() => {
            token.cancel();
            Err(AppError::Cancel)
        }
    };
    slot.resolve(ticket, result)?;

    match slot.into_task() {
        AsyncTask::Successful { data } => Ok(data),
        AsyncTask::Failed { error } => Err(error.into()),
        _ => Err(AppError::Cancel.into()),
    }
}

async fn fetch(client: &ConsoleClient, args: &FetchArgs, token: &CancellationToken) -> ApiResult<Value> {
    let value = match args.kind {
        FetchKind::Json => client.fetch_json(&args.url, token).await?,
        FetchKind::Schema => to_value(client.fetch_schema(&args.url, token).await?)?,
        FetchKind::Types => to_value(client.fetch_json_ld_types(&args.url, token).await?)?,
    };
    Ok(value)
}

fn to_value(value: impl serde::Serialize) -> ApiResult<Value> {
    serde_json::to_value(value).map_err(|e| AppError::General {
        message: e.to_string(),
    })
}
