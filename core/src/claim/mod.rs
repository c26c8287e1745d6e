//! # Claim Module
//!
//! Fixed-size attestation records stored as leaves of an identity's
//! Merkle trees. A claim is eight field-element slots; a handful of bits in
//! the first slot are repurposed as control flags.
//!
//! ## Architecture
//!
//! ```text
//! control.rs       — The bit-packed control word (subject, flags, version)
//! slots.rs         — The Claim value and its typed accessors
//! builder.rs       — ClaimOption list and the fluent ClaimBuilder
//! serialization.rs — 256-byte binary and 8-entry decimal encodings
//! types.rs         — Position enums, slot names, ClaimError
//! ```
//!
//! ## Invariants
//!
//! - Every slot is a member of the BN254 scalar field. Writes that would
//!   break this are rejected and leave the claim untouched.
//! - At most one of `index[1]` / `value[1]` carries the subject identifier.
//! - At most one of `index[2]` / `value[2]` carries the merklized root.

pub mod builder;
pub mod control;
pub mod serialization;
pub mod slots;
pub mod types;

pub use builder::{ClaimBuilder, ClaimOption};
pub use control::{ControlWord, MerklizedTag, SubjectTag};
pub use slots::Claim;
pub use types::{ClaimError, IdPosition, MerklizedPosition, SlotName};
