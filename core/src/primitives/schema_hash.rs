//! The 16-byte schema tag stored at the start of every claim.

use std::fmt;
use std::str::FromStr;

use num_bigint::BigUint;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::config::SCHEMA_HASH_LENGTH;
use crate::primitives::bytes::{int_to_le_bytes, le_bytes_to_int};

/// Schema hash of the authorization claim (`auth.json-ld#AuthBJJCredential`).
pub const AUTH_SCHEMA_HASH: SchemaHash = SchemaHash([
    0xcc, 0xa3, 0x37, 0x1a, 0x6c, 0xb1, 0xb7, 0x15, 0x00, 0x44, 0x07, 0xe3, 0x25, 0xbd, 0x99, 0x3c,
]);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaHashError {
    #[error("invalid schema hash length: expected 16 bytes, got {0}")]
    InvalidLength(usize),

    #[error("invalid schema hash hex: {0}")]
    InvalidHex(String),
}

/// Opaque 16-byte schema identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SchemaHash([u8; SCHEMA_HASH_LENGTH]);

impl SchemaHash {
    pub const fn new(bytes: [u8; SCHEMA_HASH_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, SchemaHashError> {
        let raw: [u8; SCHEMA_HASH_LENGTH] = bytes
            .try_into()
            .map_err(|_| SchemaHashError::InvalidLength(bytes.len()))?;
        Ok(Self(raw))
    }

    pub fn from_hex(s: &str) -> Result<Self, SchemaHashError> {
        let bytes = hex::decode(s).map_err(|e| SchemaHashError::InvalidHex(e.to_string()))?;
        Self::from_slice(&bytes)
    }

    /// Low 16 little-endian bytes of `n`. Higher bytes are dropped.
    pub fn from_int(n: &BigUint) -> Self {
        Self(int_to_le_bytes(n))
    }

    /// The bytes read as a little-endian integer.
    pub fn to_int(&self) -> BigUint {
        le_bytes_to_int(&self.0)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn as_bytes(&self) -> &[u8; SCHEMA_HASH_LENGTH] {
        &self.0
    }
}

impl fmt::Debug for SchemaHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SchemaHash({})", self.to_hex())
    }
}

impl fmt::Display for SchemaHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for SchemaHash {
    type Err = SchemaHashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for SchemaHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for SchemaHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
