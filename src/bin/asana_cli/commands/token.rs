// ABOUTME: `encrypt-token` and `decrypt-token` subcommands
// ABOUTME: Value comes from stdin, the salt from ASANA_TOKEN_SALT
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Asana Client Contributors

use std::env;

use anyhow::{bail, Context, Result};
use asana_client::config::key_derivation_from_env;
use asana_client::constants::env_vars;
use asana_client::crypto::{KeyDerivation, TokenCipher};
use clap::Args;
use tokio::io::{self, AsyncReadExt};
use zeroize::Zeroizing;

#[derive(Args)]
pub struct TokenArgs {
    /// Key derivation: `hkdf` or `legacy`; defaults to ASANA_TOKEN_KDF, then `hkdf`
    #[arg(long)]
    kdf: Option<KeyDerivation>,
}

impl TokenArgs {
    fn cipher(&self) -> Result<TokenCipher> {
        let derivation = match self.kdf {
            Some(mode) => mode,
            None => key_derivation_from_env()?,
        };
        Ok(TokenCipher::new(derivation))
    }
}

pub async fn encrypt(args: &TokenArgs) -> Result<()> {
    let cipher = args.cipher()?;
    let salt = salt()?;
    let plaintext = read_stdin().await?;

    println!("{}", cipher.encrypt(plaintext.trim_end().as_bytes(), salt.as_bytes())?);
    Ok(())
}

pub async fn decrypt(args: &TokenArgs) -> Result<()> {
    let cipher = args.cipher()?;
    let salt = salt()?;
    let blob = read_stdin().await?;

    let plaintext = Zeroizing::new(cipher.decrypt_to_string(blob.trim(), salt.as_bytes())?);
    println!("{}", plaintext.as_str());
    Ok(())
}

fn salt() -> Result<Zeroizing<String>> {
    let salt = env::var(env_vars::TOKEN_SALT)
        .with_context(|| format!("{} must be set", env_vars::TOKEN_SALT))?;
    if salt.is_empty() {
        bail!("{} must not be empty", env_vars::TOKEN_SALT);
    }
    Ok(Zeroizing::new(salt))
}

async fn read_stdin() -> Result<Zeroizing<String>> {
    let mut input = Zeroizing::new(String::new());
    io::stdin()
        .read_to_string(&mut *input)
        .await
        .context("failed to read stdin")?;
    Ok(input)
}
