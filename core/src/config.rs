//! # Protocol Constants
//!
//! Every byte offset, length and sentinel value the encodings depend on.
//! These are wire-format facts, not tunables: changing any of them breaks
//! compatibility with every identifier and claim already issued.

// ---------------------------------------------------------------------------
// Field
// ---------------------------------------------------------------------------

/// The BN254 scalar field modulus Q, in decimal. Every claim slot must hold
/// an integer strictly below this value.
pub const FIELD_MODULUS_DECIMAL: &str =
    "21888242871839275222246405745257275088548364400416034343698204186575808495617";

/// Width of a serialized field element (little-endian).
pub const FIELD_ELEMENT_LENGTH: usize = 32;

// ---------------------------------------------------------------------------
// Claim layout
// ---------------------------------------------------------------------------

/// Number of slots in each half (index, value) of a claim.
pub const SLOTS_PER_HALF: usize = 4;

/// Total number of slots in a claim.
pub const CLAIM_SLOT_COUNT: usize = 2 * SLOTS_PER_HALF;

/// Length of the binary claim encoding: 2 halves × 4 slots × 32 bytes.
pub const CLAIM_BINARY_LENGTH: usize = CLAIM_SLOT_COUNT * FIELD_ELEMENT_LENGTH;

/// Schema hash length, stored in bytes 0..16 of `index[0]`.
pub const SCHEMA_HASH_LENGTH: usize = 16;

/// Byte of `index[0]` holding the subject, expiration, updatable and
/// merklized bits.
pub const FLAGS_BYTE_INDEX: usize = 16;

/// Bit (within the flags byte) of the has-expiration flag.
pub const EXPIRATION_BIT_INDEX: u8 = 3;

/// Bit (within the flags byte) of the updatable flag.
pub const UPDATABLE_BIT_INDEX: u8 = 4;

/// Offset of the little-endian u32 version inside `index[0]`.
pub const VERSION_OFFSET: usize = 20;

/// Revocation nonce width, stored in bytes 0..8 of `value[0]`.
pub const NONCE_LENGTH: usize = 8;

/// Offset of the little-endian u64 expiration timestamp inside `value[0]`.
pub const EXPIRATION_OFFSET: usize = NONCE_LENGTH;

// ---------------------------------------------------------------------------
// Identifier layout
// ---------------------------------------------------------------------------

/// Identifier length: `type(2) || genesis(27) || checksum(2)`.
pub const ID_LENGTH: usize = 31;

/// Identifier type prefix length.
pub const ID_TYPE_LENGTH: usize = 2;

/// Genesis payload length.
pub const GENESIS_LENGTH: usize = 27;

/// Trailing checksum length.
pub const CHECKSUM_LENGTH: usize = 2;

/// Ethereum address width embedded in on-chain identifiers.
pub const ETH_ADDRESS_LENGTH: usize = 20;

// ---------------------------------------------------------------------------
// DID
// ---------------------------------------------------------------------------

/// URI scheme of every DID.
pub const DID_SCHEME: &str = "did";

/// Shortest input the DID parser accepts (`did:a:b` is 7 characters).
pub const MIN_DID_LENGTH: usize = 7;

/// Method byte reserved for identifiers minted outside the registry. No
/// registered method may use it or anything above it.
pub const UNSUPPORTED_METHOD_BYTE: u8 = 0xFF;

/// Network flag paired with [`UNSUPPORTED_METHOD_BYTE`].
pub const UNSUPPORTED_NETWORK_FLAG: u8 = 0xFF;

/// Highest value a blockchain or network nibble of a network flag can take.
pub const MAX_FLAG_NIBBLE: u8 = 0b1111;
