// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # idcore — Identity Core Primitives
//!
//! The data primitives every other identity layer is built on: fixed-size
//! claims embedded in a Merkle-tree identity, checksummed identifiers, and
//! DIDs that resolve to and from those identifiers.
//!
//! Everything here is byte-exact. A claim encoded by this crate must hash to
//! the same field elements as one encoded by any other implementation, and
//! an identifier must print the same Base58 string everywhere. There is no
//! wiggle room, so there is no cleverness either.
//!
//! ## Architecture
//!
//! - **primitives** — Field elements over the BN254 scalar field, schema
//!   hashes, and the byte-level helpers (checksums, endianness, Base58).
//! - **identity** — The 31-byte [`Identifier`]: type, genesis, checksum.
//! - **claim** — The eight-slot [`Claim`] with its bit-packed control word.
//! - **did** — DID URI parsing and the DID ↔ identifier codec.
//! - **registry** — The method/blockchain/network tables behind the
//!   identifier type bytes.
//! - **crypto** — Hash collaborators (Poseidon for claims, SHA-256 for
//!   fallback identifiers).
//! - **config** — Protocol constants and byte offsets.
//!
//! ## Design Philosophy
//!
//! 1. Byte layouts are defined once, in one place, and tested against
//!    published vectors.
//! 2. Every fallible operation returns a typed error. Nothing panics on
//!    caller input.
//! 3. No hidden global state: the registry is a value you own and pass in.

pub mod claim;
pub mod config;
pub mod crypto;
pub mod did;
pub mod identity;
pub mod primitives;
pub mod registry;

pub use claim::{Claim, ClaimBuilder, ClaimError, ClaimOption, IdPosition, MerklizedPosition};
pub use did::{Did, DidCodec, DidError, DidParseError, Param};
pub use identity::{IdError, Identifier};
pub use primitives::{FieldElement, FieldError, SchemaHash, SchemaHashError};
pub use registry::{DidMethodNetworkRequest, Registry, RegistryError};
