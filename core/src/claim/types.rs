//! Position enums, slot names and the claim error type.

use std::fmt;

use thiserror::Error;

use crate::crypto::HashError;
use crate::identity::IdError;

/// Where a claim's subject identifier lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdPosition {
    /// Self-claim: no identifier stored.
    None,
    /// In `index[1]`.
    Index,
    /// In `value[1]`.
    Value,
}

/// Where a claim's merklized root lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MerklizedPosition {
    None,
    /// In `index[2]`.
    Index,
    /// In `value[2]`.
    Value,
}

/// The four free data slots, used to name the slot that failed a range
/// check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotName {
    IndexA,
    IndexB,
    ValueA,
    ValueB,
}

impl fmt::Display for SlotName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SlotName::IndexA => "IndexA",
            SlotName::IndexB => "IndexB",
            SlotName::ValueA => "ValueA",
            SlotName::ValueB => "ValueB",
        };
        f.write_str(name)
    }
}

fn slot_suffix(slot: &Option<SlotName>) -> String {
    slot.map(|s| format!(" (slot {s})")).unwrap_or_default()
}

/// Errors produced by claim construction, mutation and decoding.
#[derive(Debug, Error)]
pub enum ClaimError {
    /// A slot value is not a member of the field. `slot` names the data
    /// slot when a setter rejected it; decoders leave it empty.
    #[error("data does not fit in the SNARK field{}", slot_suffix(.slot))]
    DataOverflow { slot: Option<SlotName> },

    /// The subject tag is Invalid or one of the unassigned values.
    #[error("invalid subject position")]
    InvalidSubjectPosition,

    /// The merklized tag is not one of none/index/value, or a root was
    /// requested at position none.
    #[error("incorrect merklized position")]
    IncorrectMerklizedPosition,

    /// An identifier was requested at position none.
    #[error("incorrect identifier position")]
    IncorrectIdPosition,

    /// The claim carries no subject identifier.
    #[error("claim has no identifier")]
    NoId,

    /// The claim carries no merklized root.
    #[error("claim has no merklized root")]
    NoMerklizedRoot,

    /// Binary input was not 256 bytes.
    #[error("invalid claim binary length: expected 256 bytes, got {0}")]
    InvalidBinaryLength(usize),

    /// JSON input did not have exactly 8 entries.
    #[error("invalid claim slot count: expected 8, got {0}")]
    InvalidSlotCount(usize),

    /// A JSON entry was not a decimal integer.
    #[error("invalid decimal slot value: {0:?}")]
    InvalidDecimal(String),

    /// The bytes in an identifier slot are not a valid identifier.
    #[error("invalid identifier in claim: {0}")]
    InvalidId(#[from] IdError),

    /// The expiration timestamp is outside the representable range.
    #[error("invalid expiration timestamp: {0}")]
    InvalidTimestamp(i64),

    /// The flag is set but the stored seconds have no UTC datetime.
    #[error("stored expiration {0} is outside the datetime range")]
    UnrepresentableExpiration(u64),

    /// The hash collaborator failed.
    #[error(transparent)]
    Hash(#[from] HashError),
}
