//! # Identifiers
//!
//! ```text
//! +--------+-------------------------------+----------+
//! | type   | genesis                       | checksum |
//! | 2 B    | 27 B                          | 2 B      |
//! +--------+-------------------------------+----------+
//! ```
//!
//! - **type** — byte 0 is the DID method, byte 1 the blockchain/network
//!   flag (see [`crate::registry`]).
//! - **genesis** — bytes 5..32 of the little-endian identity state, or an
//!   Ethereum address left-padded with seven zero bytes.
//! - **checksum** — the 16-bit byte sum of type and genesis, little-endian.
//!
//! The textual form is Base58 (Bitcoin alphabet) of all 31 bytes.

use std::fmt;
use std::str::FromStr;

use ark_bn254::Fr;
use num_bigint::BigUint;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::config::{
    CHECKSUM_LENGTH, ETH_ADDRESS_LENGTH, FIELD_ELEMENT_LENGTH, GENESIS_LENGTH, ID_LENGTH,
    ID_TYPE_LENGTH,
};
use crate::crypto::{FieldHasher, HashError};
use crate::primitives::bytes::{
    checksum, checksum_is_valid, decompose, from_base58, int_to_le_bytes, le_bytes_to_int,
    to_base58,
};
use crate::primitives::FieldElement;

/// Errors from identifier construction and decoding.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdError {
    /// Input was not exactly 31 bytes.
    #[error("invalid identifier length: expected 31 bytes, got {0}")]
    InvalidLength(usize),

    /// Input was 31 zero bytes.
    #[error("identifier is empty")]
    EmptyIdentifier,

    /// The trailing two bytes do not match the content.
    #[error("identifier checksum mismatch")]
    ChecksumMismatch,

    /// The Base58 text could not be decoded.
    #[error("invalid base58 identifier: {0}")]
    Base58Decode(String),

    /// The genesis does not carry an Ethereum address (first seven bytes
    /// are not zero).
    #[error("identifier does not embed an ethereum address")]
    NotAnAddressIdentifier,

    /// Profile derivation failed in the hash collaborator.
    #[error(transparent)]
    Hash(#[from] HashError),
}

/// A checksummed 31-byte identity identifier.
///
/// # Example
///
/// ```
/// use idcore::Identifier;
///
/// let id: Identifier = "wyFiV4w71QgWPn6bYLsZoysFay66gKtVa9kfu6yMZ".parse().unwrap();
/// assert_eq!(id.id_type(), [0x01, 0x12]);
/// assert_eq!(id.to_string(), "wyFiV4w71QgWPn6bYLsZoysFay66gKtVa9kfu6yMZ");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identifier([u8; ID_LENGTH]);

impl Identifier {
    /// Assemble an identifier from its type and genesis, computing the
    /// checksum. All-zero content is rejected, the same as on decode.
    pub fn new(
        id_type: [u8; ID_TYPE_LENGTH],
        genesis: [u8; GENESIS_LENGTH],
    ) -> Result<Self, IdError> {
        let check = checksum(&id_type, &genesis);
        // 29 bytes cannot sum past u16, so a zero sum means zero content.
        if check == [0, 0] {
            return Err(IdError::EmptyIdentifier);
        }
        let mut bytes = [0u8; ID_LENGTH];
        bytes[..ID_TYPE_LENGTH].copy_from_slice(&id_type);
        bytes[ID_TYPE_LENGTH..ID_TYPE_LENGTH + GENESIS_LENGTH].copy_from_slice(&genesis);
        bytes[ID_LENGTH - CHECKSUM_LENGTH..].copy_from_slice(&check);
        Ok(Self(bytes))
    }

    /// Decode a raw identifier, validating length, emptiness and checksum.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, IdError> {
        let raw: [u8; ID_LENGTH] = bytes
            .try_into()
            .map_err(|_| IdError::InvalidLength(bytes.len()))?;
        if raw.iter().all(|b| *b == 0) {
            return Err(IdError::EmptyIdentifier);
        }
        if !checksum_is_valid(&raw) {
            return Err(IdError::ChecksumMismatch);
        }
        Ok(Self(raw))
    }

    /// Decode the Base58 text form.
    pub fn from_base58(s: &str) -> Result<Self, IdError> {
        let bytes = from_base58(s).map_err(|e| IdError::Base58Decode(e.to_string()))?;
        Self::from_bytes(&bytes)
    }

    /// Decode from the integer form (31 little-endian bytes).
    pub fn from_int(n: &BigUint) -> Result<Self, IdError> {
        let bytes: [u8; ID_LENGTH] = int_to_le_bytes(n);
        Self::from_bytes(&bytes)
    }

    /// The genesis of an identity whose first state is `state`: bytes 5..32
    /// of the state's little-endian encoding.
    pub fn genesis_from_identity_state(state: &FieldElement) -> [u8; GENESIS_LENGTH] {
        let mut genesis = [0u8; GENESIS_LENGTH];
        genesis.copy_from_slice(&state.as_bytes()[FIELD_ELEMENT_LENGTH - GENESIS_LENGTH..]);
        genesis
    }

    /// The genesis identifier of an identity whose first state is `state`.
    ///
    /// Fails with [`IdError::EmptyIdentifier`] for the zero type when the
    /// state has no bits in the genesis window.
    pub fn from_identity_state(
        id_type: [u8; ID_TYPE_LENGTH],
        state: &FieldElement,
    ) -> Result<Self, IdError> {
        Self::new(id_type, Self::genesis_from_identity_state(state))
    }

    /// Whether `state` is the genesis state of this identifier.
    pub fn is_genesis_state(&self, state: &FieldElement) -> bool {
        matches!(Self::from_identity_state(self.id_type(), state), Ok(id) if id == *self)
    }

    /// An on-chain identifier embedding an Ethereum address.
    pub fn from_eth_address(
        id_type: [u8; ID_TYPE_LENGTH],
        address: [u8; ETH_ADDRESS_LENGTH],
    ) -> Result<Self, IdError> {
        let mut genesis = [0u8; GENESIS_LENGTH];
        genesis[GENESIS_LENGTH - ETH_ADDRESS_LENGTH..].copy_from_slice(&address);
        Self::new(id_type, genesis)
    }

    /// The Ethereum address embedded by [`Identifier::from_eth_address`].
    pub fn eth_address(&self) -> Result<[u8; ETH_ADDRESS_LENGTH], IdError> {
        let genesis = self.genesis();
        let (padding, address) = genesis.split_at(GENESIS_LENGTH - ETH_ADDRESS_LENGTH);
        if padding.iter().any(|b| *b != 0) {
            return Err(IdError::NotAnAddressIdentifier);
        }
        let mut out = [0u8; ETH_ADDRESS_LENGTH];
        out.copy_from_slice(address);
        Ok(out)
    }

    /// Derive a profile identifier: the genesis becomes the low 27
    /// little-endian bytes of `hash(id, nonce)`, the type is kept.
    pub fn profile<H: FieldHasher>(&self, nonce: &BigUint, hasher: &H) -> Result<Self, IdError> {
        let inputs = [Fr::from(self.to_int()), Fr::from(nonce.clone())];
        let digest = FieldElement::from_fr(hasher.hash(&inputs)?);
        let mut genesis = [0u8; GENESIS_LENGTH];
        genesis.copy_from_slice(&digest.as_bytes()[..GENESIS_LENGTH]);
        Self::new(self.id_type(), genesis)
    }

    pub fn id_type(&self) -> [u8; ID_TYPE_LENGTH] {
        decompose(&self.0).0
    }

    pub fn genesis(&self) -> [u8; GENESIS_LENGTH] {
        decompose(&self.0).1
    }

    pub fn checksum(&self) -> [u8; CHECKSUM_LENGTH] {
        decompose(&self.0).2
    }

    /// Method byte (first type byte).
    pub fn method_byte(&self) -> u8 {
        self.0[0]
    }

    /// Blockchain/network flag (second type byte).
    pub fn network_flag(&self) -> u8 {
        self.0[1]
    }

    pub fn as_bytes(&self) -> &[u8; ID_LENGTH] {
        &self.0
    }

    /// The bytes read as a little-endian integer.
    pub fn to_int(&self) -> BigUint {
        le_bytes_to_int(&self.0)
    }

    pub fn to_base58(&self) -> String {
        to_base58(&self.0)
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identifier({})", self.to_base58())
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl FromStr for Identifier {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_base58(s)
    }
}

impl Serialize for Identifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base58())
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_base58(&s).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{sha256, PoseidonHasher};

    fn genesis_test_bytes() -> [u8; GENESIS_LENGTH] {
        let mut genesis = [0u8; GENESIS_LENGTH];
        genesis.copy_from_slice(&sha256(b"genesistest")[..GENESIS_LENGTH]);
        genesis
    }

    #[test]
    fn new_id_known_vectors() {
        let id0 = Identifier::new([0x00, 0x00], genesis_test_bytes()).unwrap();
        assert_eq!(id0.to_base58(), "114vgnnCupQMX4wqUBjg5kUya3zMXfPmKc9HNH4m2E");

        let id1 = Identifier::new([0x00, 0x01], genesis_test_bytes()).unwrap();
        assert_eq!(id1.to_base58(), "1GYjyJKqdDyzo927FqJkAdLWB64kV2NVAjaQFHtq4");
    }

    #[test]
    fn base58_round_trip() {
        let s = "wyFiV4w71QgWPn6bYLsZoysFay66gKtVa9kfu6yMZ";
        let id = Identifier::from_base58(s).unwrap();
        assert_eq!(
            hex::encode(id.as_bytes()),
            "011256791df9964673d9965def42a56e49c9b89964b7b4c2c5a897fcbf0a10"
        );
        assert_eq!(id.to_string(), s);
        assert_eq!(Identifier::from_bytes(id.as_bytes()).unwrap(), id);
    }

    #[test]
    fn int_round_trip() {
        let id = Identifier::from_base58("11AVZrKNJVqDJoyKrdyaAgEynyBEjksV5z2NjZogFv").unwrap();
        assert_eq!(Identifier::from_int(&id.to_int()).unwrap(), id);
    }

    #[test]
    fn from_bytes_errors() {
        assert!(matches!(
            Identifier::from_bytes(&[1u8; 30]),
            Err(IdError::InvalidLength(30))
        ));
        assert!(matches!(
            Identifier::from_bytes(&[0u8; 31]),
            Err(IdError::EmptyIdentifier)
        ));

        let mut raw = *Identifier::new([0x01, 0x12], genesis_test_bytes())
            .unwrap()
            .as_bytes();
        raw[29] ^= 0xff;
        assert!(matches!(
            Identifier::from_bytes(&raw),
            Err(IdError::ChecksumMismatch)
        ));
    }

    #[test]
    fn base58_rejects_garbage() {
        assert!(matches!(
            Identifier::from_base58("0OIl"),
            Err(IdError::Base58Decode(_))
        ));
    }

    #[test]
    fn from_identity_state_one() {
        let state = FieldElement::from_u64(1);
        // LE(1) has its only set byte at offset 0, below the genesis window.
        let id = Identifier::from_identity_state([0x01, 0x00], &state).unwrap();
        assert_eq!(id.genesis(), [0u8; GENESIS_LENGTH]);
        assert_eq!(id.to_base58(), "tJ93RwaVfE1PEMxd5rpZZuPtLCwbEaDCrNBhAy8HM");
        assert!(id.is_genesis_state(&state));
        assert!(!id.is_genesis_state(&FieldElement::from_int(&(BigUint::from(1u8) << 100)).unwrap()));
    }

    #[test]
    fn zero_content_is_never_minted() {
        assert_eq!(
            Identifier::new([0x00, 0x00], [0u8; GENESIS_LENGTH]),
            Err(IdError::EmptyIdentifier)
        );

        // LE(1) leaves bytes 5..32 zero, so the zero type has nothing left.
        let state = FieldElement::from_u64(1);
        assert_eq!(
            Identifier::from_identity_state([0x00, 0x00], &state),
            Err(IdError::EmptyIdentifier)
        );

        // One set type byte is enough.
        let id = Identifier::from_identity_state([0x00, 0x01], &state).unwrap();
        assert_eq!(Identifier::from_bytes(id.as_bytes()).unwrap(), id);
    }

    #[test]
    fn from_identity_state_large() {
        let state = FieldElement::from_decimal(
            "12345678901234567890123456789012345678901234567890",
        )
        .unwrap();
        let id = Identifier::from_identity_state([0x01, 0x12], &state).unwrap();
        assert_eq!(id.to_base58(), "x6JeSBgUacvbqBeECyR75jjaMPEQEBb4DJSJ3XoFu");
    }

    #[test]
    fn eth_address_round_trip() {
        let mut address = [0u8; ETH_ADDRESS_LENGTH];
        address.copy_from_slice(&hex::decode("6d3f1ed9d0d8e6ec1eb7e8e3d04e9b63b6d8b9af").unwrap());
        let id = Identifier::from_eth_address([0x01, 0x21], address).unwrap();
        assert_eq!(id.to_base58(), "zuerR5X7JKmftU333HE7JerQDG7eBStNy4cs5hyPq");
        assert_eq!(id.eth_address().unwrap(), address);

        let other = Identifier::new([0x01, 0x21], genesis_test_bytes()).unwrap();
        assert!(matches!(
            other.eth_address(),
            Err(IdError::NotAnAddressIdentifier)
        ));
    }

    #[test]
    fn profile_keeps_type_and_changes_genesis() {
        let id = Identifier::from_base58("wyFiV4w71QgWPn6bYLsZoysFay66gKtVa9kfu6yMZ").unwrap();
        let p1 = id.profile(&BigUint::from(10u8), &PoseidonHasher).unwrap();
        let p2 = id.profile(&BigUint::from(11u8), &PoseidonHasher).unwrap();
        assert_eq!(p1.id_type(), id.id_type());
        assert_ne!(p1, id);
        assert_ne!(p1, p2);
        // Deterministic.
        assert_eq!(id.profile(&BigUint::from(10u8), &PoseidonHasher).unwrap(), p1);
        // Valid checksum, so it survives a decode.
        assert_eq!(Identifier::from_base58(&p1.to_base58()).unwrap(), p1);
    }

    #[test]
    fn serde_as_base58_string() {
        let id = Identifier::from_base58("wyFiV4w71QgWPn6bYLsZoysFay66gKtVa9kfu6yMZ").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"wyFiV4w71QgWPn6bYLsZoysFay66gKtVa9kfu6yMZ\"");
        let back: Identifier = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
