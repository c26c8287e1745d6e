//! # Primitives
//!
//! Fixed-width building blocks shared by claims and identifiers.
//!
//! - [`FieldElement`] — a 32-byte little-endian integer below the BN254
//!   scalar modulus. Every claim slot is one of these.
//! - [`SchemaHash`] — the 16-byte schema tag at the start of a claim.
//! - [`bytes`] — checksums, little-endian integer conversion and Base58.

pub mod bytes;
pub mod field;
pub mod schema_hash;

pub use field::{FieldElement, FieldError};
pub use schema_hash::{SchemaHash, SchemaHashError, AUTH_SCHEMA_HASH};
