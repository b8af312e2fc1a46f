// ABOUTME: `request` subcommand: sends one API call and prints the shaped JSON result
// ABOUTME: Query pairs and the JSON body come from the command line
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Asana Client Contributors

use anyhow::{anyhow, Context, Result};
use asana_client::client::AsanaClient;
use asana_client::config::ClientConfig;
use asana_client::http_client::RequestOptions;
use asana_client::models::{HttpMethod, ResponseShape};
use clap::{Args, ValueEnum};
use serde_json::Value;
use tracing::info;

#[derive(Clone, Copy, ValueEnum)]
pub enum ShapeArg {
    Data,
    Normal,
    Full,
}

impl From<ShapeArg> for ResponseShape {
    fn from(shape: ShapeArg) -> Self {
        match shape {
            ShapeArg::Data => Self::Data,
            ShapeArg::Normal => Self::Normal,
            ShapeArg::Full => Self::Full,
        }
    }
}

#[derive(Args)]
pub struct RequestArgs {
    /// HTTP method: GET, POST, PUT or DELETE
    method: String,

    /// Path relative to the API base URL, e.g. `users/me`
    path: String,

    /// Query parameter as `key=value`, repeatable
    #[arg(long = "query", short = 'q')]
    query: Vec<String>,

    /// JSON request body
    #[arg(long)]
    data: Option<String>,

    /// Part of the response to print
    #[arg(long, value_enum, default_value = "data")]
    shape: ShapeArg,
}

pub async fn run(args: RequestArgs) -> Result<()> {
    let method: HttpMethod = args.method.parse()?;
    let options = build_options(&args.query, args.data.as_deref())?;

    let config = ClientConfig::from_env()?;
    let client = AsanaClient::new(&config)?;
    info!(%method, path = %args.path, "Sending request");

    let output = client
        .pipeline()
        .execute(method, &args.path, options, args.shape.into())
        .await?;

    println!("{}", serde_json::to_string_pretty(&output.into_json())?);
    Ok(())
}

fn build_options(query: &[String], data: Option<&str>) -> Result<RequestOptions> {
    let mut options = RequestOptions::new();
    for pair in query {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| anyhow!("query parameter `{pair}` must be key=value"))?;
        options = options.query(key, value);
    }
    if let Some(raw) = data {
        let body: Value = serde_json::from_str(raw).context("--data must be valid JSON")?;
        options = options.json(body);
    }
    Ok(options)
}
