// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # idcore
//!
//! Entry point for the `idcore` binary. Parses CLI arguments, initializes
//! logging, loads the registry, runs one command and prints its JSON result.
//!
//! - `id inspect` / `id from-state`  — identifier decoding and derivation
//! - `did parse` / `did resolve`     — DID syntax and DID → identifier
//! - `claim build` / `claim inspect` — claim assembly and decoding
//! - `version`                       — build version information

mod cli;
mod commands;
mod logging;
mod registry_file;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use cli::{ClaimCommand, Commands, DidCommand, IdCommand, IdcoreCli};

/// Library warnings (unsupported-DID fallbacks) show by default.
const DEFAULT_LOG_LEVEL: &str = "warn";

fn main() -> Result<()> {
    let cli = IdcoreCli::parse();
    logging::init_logging(DEFAULT_LOG_LEVEL, cli.log_format);

    if let Commands::Version = cli.command {
        print_version();
        return Ok(());
    }

    let registry = registry_file::load_registry(cli.registry.as_deref())?;

    match &cli.command {
        Commands::Id(IdCommand::Inspect { id }) => print(&commands::id_inspect(&registry, id)?),
        Commands::Id(IdCommand::FromState(args)) => {
            print(&commands::id_from_state(&registry, args)?)
        }
        Commands::Did(DidCommand::Parse { did }) => print(&commands::did_parse(did)?),
        Commands::Did(DidCommand::Resolve { did }) => {
            print(&commands::did_resolve(&registry, did)?)
        }
        Commands::Claim(ClaimCommand::Build(args)) => print(&commands::claim_build(args)?),
        Commands::Claim(ClaimCommand::Inspect { json }) => {
            print(&commands::claim_inspect(json)?)
        }
        Commands::Version => Ok(()),
    }
}

/// Prints a command result as pretty JSON on stdout.
fn print<T: Serialize>(output: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(output).context("failed to render output")?;
    println!("{text}");
    Ok(())
}

/// Prints version information to stdout.
fn print_version() {
    println!("idcore {}", env!("CARGO_PKG_VERSION"));
    println!("rustc  {}", rustc_version());
}

/// Returns the Rust compiler version used to build this binary.
fn rustc_version() -> &'static str {
    option_env!("RUSTC_VERSION").unwrap_or("unknown")
}
