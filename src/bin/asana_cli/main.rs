// ABOUTME: Command-line entry point for asana-cli
// ABOUTME: Issues raw API requests and encrypts or decrypts stored tokens
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Asana Client Contributors

//! # Asana CLI
//!
//! Small operator tool over the client library.
//!
//! ## Usage
//!
//! ```bash
//! # Authenticated user
//! asana-cli request GET users/me --query opt_fields=name,email
//!
//! # Create a task, printing the whole response
//! asana-cli request POST tasks --data '{"data":{"name":"x","workspace":"1"}}' --shape full
//!
//! # Encrypt a token read from stdin with ASANA_TOKEN_SALT
//! echo -n "$REFRESH_TOKEN" | asana-cli encrypt-token
//! ```

mod commands;

use anyhow::Result;
use asana_client::logging::{init_logging, LoggingConfig};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "asana-cli",
    about = "Asana API client",
    long_about = "Send requests to the Asana REST API and manage encrypted tokens"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Send one request through the retrying pipeline
    Request(commands::request::RequestArgs),
    /// Encrypt a token read from stdin
    EncryptToken(commands::token::TokenArgs),
    /// Decrypt a token blob read from stdin
    DecryptToken(commands::token::TokenArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env()?;
    if cli.verbose {
        "debug".clone_into(&mut logging.filter);
    }
    init_logging(&logging)?;

    match cli.command {
        Command::Request(args) => commands::request::run(args).await,
        Command::EncryptToken(args) => commands::token::encrypt(&args).await,
        Command::DecryptToken(args) => commands::token::decrypt(&args).await,
    }
}
