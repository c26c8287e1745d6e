//! # Field Elements
//!
//! A [`FieldElement`] is 32 little-endian bytes whose integer value is
//! strictly below the BN254 scalar modulus Q. The invariant is enforced at
//! every public constructor, so anything holding a `FieldElement` can hash
//! it without a range check.

use std::fmt;

use ark_bn254::Fr;
use ark_ff::{BigInteger, PrimeField};
use num_bigint::BigUint;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::config::FIELD_ELEMENT_LENGTH;
use crate::primitives::bytes::{int_to_le_bytes, le_bytes_to_int};

/// Errors from constructing a [`FieldElement`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// The value is greater than or equal to the field modulus.
    #[error("value is not a member of the BN254 scalar field")]
    Overflow,

    /// The byte input was not exactly 32 bytes.
    #[error("invalid field element length: expected {expected} bytes, got {got}")]
    InvalidLength { expected: usize, got: usize },

    /// Hex input could not be decoded.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// Decimal input could not be parsed.
    #[error("invalid decimal integer: {0:?}")]
    InvalidDecimal(String),
}

/// The BN254 scalar field modulus Q.
pub fn modulus() -> BigUint {
    BigUint::from(Fr::MODULUS)
}

/// Whether `n` is a member of the field, i.e. `n < Q`.
pub fn in_field(n: &BigUint) -> bool {
    *n < modulus()
}

/// A 32-byte little-endian integer in `[0, Q)`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FieldElement([u8; FIELD_ELEMENT_LENGTH]);

impl FieldElement {
    /// The zero element.
    pub const ZERO: Self = Self([0u8; FIELD_ELEMENT_LENGTH]);

    /// Build from an integer, failing if it is not below Q.
    pub fn from_int(n: &BigUint) -> Result<Self, FieldError> {
        if !in_field(n) {
            return Err(FieldError::Overflow);
        }
        Ok(Self(int_to_le_bytes(n)))
    }

    /// Build from a small integer. Always in range.
    pub fn from_u64(n: u64) -> Self {
        let mut bytes = [0u8; FIELD_ELEMENT_LENGTH];
        bytes[..8].copy_from_slice(&n.to_le_bytes());
        Self(bytes)
    }

    /// Build from exactly 32 little-endian bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FieldError> {
        let raw: [u8; FIELD_ELEMENT_LENGTH] =
            bytes.try_into().map_err(|_| FieldError::InvalidLength {
                expected: FIELD_ELEMENT_LENGTH,
                got: bytes.len(),
            })?;
        let element = Self(raw);
        if !element.is_in_field() {
            return Err(FieldError::Overflow);
        }
        Ok(element)
    }

    /// Build from a hex string of 32 little-endian bytes.
    pub fn from_hex(s: &str) -> Result<Self, FieldError> {
        let bytes = hex::decode(s).map_err(|e| FieldError::InvalidHex(e.to_string()))?;
        Self::from_bytes(&bytes)
    }

    /// Build from a decimal string.
    pub fn from_decimal(s: &str) -> Result<Self, FieldError> {
        let n = BigUint::parse_bytes(s.as_bytes(), 10)
            .ok_or_else(|| FieldError::InvalidDecimal(s.to_string()))?;
        Self::from_int(&n)
    }

    /// Wrap raw bytes without a range check. Only for callers that write
    /// into bytes known to keep the value far below Q.
    pub(crate) const fn from_raw(bytes: [u8; FIELD_ELEMENT_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Convert an arkworks scalar.
    pub fn from_fr(fr: Fr) -> Self {
        let le = fr.into_bigint().to_bytes_le();
        let mut bytes = [0u8; FIELD_ELEMENT_LENGTH];
        bytes[..le.len()].copy_from_slice(&le);
        Self(bytes)
    }

    /// Convert to an arkworks scalar.
    pub fn to_fr(&self) -> Fr {
        Fr::from_le_bytes_mod_order(&self.0)
    }

    /// The integer value.
    pub fn to_int(&self) -> BigUint {
        le_bytes_to_int(&self.0)
    }

    /// Lowercase hex of the little-endian bytes.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn as_bytes(&self) -> &[u8; FIELD_ELEMENT_LENGTH] {
        &self.0
    }

    pub(crate) fn bytes_mut(&mut self) -> &mut [u8; FIELD_ELEMENT_LENGTH] {
        &mut self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    /// Re-check the field invariant. Always true for values built through
    /// the public constructors.
    pub fn is_in_field(&self) -> bool {
        in_field(&self.to_int())
    }
}

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement({})", self.to_int())
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_int())
    }
}

// Serialized as a decimal string, matching the claim JSON form.
impl Serialize for FieldElement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_int().to_string())
    }
}

impl<'de> Deserialize<'de> for FieldElement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_decimal(&s).map_err(serde::de::Error::custom)
    }
}
