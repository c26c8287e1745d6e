//! # Decentralized Identifiers
//!
//! Two layers:
//!
//! - **Syntax**: [`parse`] turns `did:method:id[;params][/path][?query][#fragment]`
//!   into a [`Did`] with an explicit state machine, reporting the character
//!   index of the first error. [`Did::to_did_string`] is the inverse.
//! - **Semantics**: [`DidCodec`] maps a parsed DID to the 31-byte
//!   [`Identifier`](crate::Identifier) it names, and back, using a
//!   [`Registry`](crate::Registry).

mod chars;
pub mod codec;
pub mod parser;
pub mod uri;

pub use codec::{DidCodec, DidError, IdParts};
pub use parser::{parse, DidParseError};
pub use uri::{Did, Param};
