//! # Hash Collaborators
//!
//! The claim and identifier encodings lean on two hash functions and own
//! neither of them:
//!
//! - **Poseidon** over BN254 — hashes claim slots into `hIndex` / `hValue`
//!   and derives profile identifiers. Must match circom's parameters, or
//!   the resulting tree leaves will not verify in any circuit.
//! - **SHA-256** — derives fallback identifiers for DIDs whose method is not
//!   in the registry.
//!
//! Callers who need a different field hash implement [`FieldHasher`].

pub mod hash;

pub use hash::{sha256, FieldHasher, HashError, PoseidonHasher};
