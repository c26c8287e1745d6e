//! # Identity
//!
//! The 31-byte identifier that names an identity: a two-byte type (method
//! and network), a 27-byte genesis commitment, and a two-byte checksum.
//! DID conversion lives in [`crate::did`]; this module only knows bytes.

pub mod id;

pub use id::{IdError, Identifier};
