//! # CLI Interface
//!
//! Defines the command-line argument structure for `idcore` using `clap`
//! derive. Three command groups (`id`, `did`, `claim`) plus `version`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::logging::LogFormat;

/// Inspect and build identity claims, identifiers and DIDs.
///
/// Every command prints a JSON document on stdout. Logs go to stderr.
#[derive(Parser, Debug)]
#[command(name = "idcore", version, propagate_version = true)]
pub struct IdcoreCli {
    /// JSON file with extra method/network registrations, applied on top
    /// of the builtin registry.
    #[arg(long, global = true, env = "IDCORE_REGISTRY")]
    pub registry: Option<PathBuf>,

    /// Log output format.
    #[arg(long, global = true, env = "IDCORE_LOG_FORMAT", value_enum, default_value_t)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Identifier operations.
    #[command(subcommand)]
    Id(IdCommand),
    /// DID operations.
    #[command(subcommand)]
    Did(DidCommand),
    /// Claim operations.
    #[command(subcommand)]
    Claim(ClaimCommand),
    /// Print version information and exit.
    Version,
}

#[derive(Subcommand, Debug)]
pub enum IdCommand {
    /// Decode a Base58 identifier into its parts.
    Inspect {
        /// Base58 identifier.
        id: String,
    },
    /// Derive the genesis identifier of an identity state.
    FromState(FromStateArgs),
}

#[derive(Args, Debug)]
pub struct FromStateArgs {
    /// DID method, e.g. `iden3` or `polygonid`.
    #[arg(long)]
    pub method: String,

    /// Blockchain name. Omit for the no-chain type.
    #[arg(long, default_value = "")]
    pub blockchain: String,

    /// Network name. Omit for the no-chain type.
    #[arg(long, default_value = "")]
    pub network: String,

    /// Identity state as a decimal integer.
    pub state: String,
}

#[derive(Subcommand, Debug)]
pub enum DidCommand {
    /// Split a DID or DID URL into its components.
    Parse {
        did: String,
    },
    /// Resolve a DID to its identifier and chain id.
    Resolve {
        did: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ClaimCommand {
    /// Build a claim and print its slots, binary form and hashes.
    Build(BuildArgs),
    /// Decode a claim given as a JSON array of eight decimal strings.
    Inspect {
        json: String,
    },
}

/// Side of the claim a value goes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Side {
    Index,
    Value,
}

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Schema hash, 32 hex characters.
    #[arg(long)]
    pub schema: String,

    /// Mark the claim updatable.
    #[arg(long)]
    pub updatable: bool,

    /// Claim version.
    #[arg(long = "claim-version")]
    pub claim_version: Option<u32>,

    #[arg(long)]
    pub revocation_nonce: Option<u64>,

    /// Expiration as an RFC 3339 timestamp.
    #[arg(long)]
    pub expiration: Option<String>,

    /// Subject identifier (Base58).
    #[arg(long, requires = "id_position")]
    pub id: Option<String>,

    #[arg(long, value_enum)]
    pub id_position: Option<Side>,

    /// Index data slots as decimal integers.
    #[arg(long)]
    pub index_a: Option<String>,
    #[arg(long)]
    pub index_b: Option<String>,

    /// Value data slots as decimal integers.
    #[arg(long)]
    pub value_a: Option<String>,
    #[arg(long)]
    pub value_b: Option<String>,

    /// Merklized root as a decimal integer.
    #[arg(long, requires = "merklized_position")]
    pub merklized_root: Option<String>,

    #[arg(long, value_enum)]
    pub merklized_position: Option<Side>,
}
