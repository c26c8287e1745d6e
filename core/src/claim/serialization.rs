//! Binary (256 bytes) and decimal-string (8 entries) claim encodings.

use num_bigint::BigUint;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::slots::Claim;
use super::types::ClaimError;
use crate::config::{CLAIM_BINARY_LENGTH, CLAIM_SLOT_COUNT, FIELD_ELEMENT_LENGTH, SLOTS_PER_HALF};
use crate::primitives::{FieldElement, FieldError};

impl Claim {
    /// Index slots then value slots, each 32 little-endian bytes.
    pub fn to_binary(&self) -> [u8; CLAIM_BINARY_LENGTH] {
        let mut out = [0u8; CLAIM_BINARY_LENGTH];
        for (chunk, slot) in out
            .chunks_exact_mut(FIELD_ELEMENT_LENGTH)
            .zip(self.index.iter().chain(self.value.iter()))
        {
            chunk.copy_from_slice(slot.as_bytes());
        }
        out
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, ClaimError> {
        if bytes.len() != CLAIM_BINARY_LENGTH {
            return Err(ClaimError::InvalidBinaryLength(bytes.len()));
        }
        let mut slots = [FieldElement::ZERO; CLAIM_SLOT_COUNT];
        for (slot, chunk) in slots
            .iter_mut()
            .zip(bytes.chunks_exact(FIELD_ELEMENT_LENGTH))
        {
            *slot = FieldElement::from_bytes(chunk)
                .map_err(|_| ClaimError::DataOverflow { slot: None })?;
        }
        Ok(from_flat(slots))
    }

    /// The eight slot integers as decimal strings.
    pub fn to_decimal_strings(&self) -> Vec<String> {
        self.raw_slots_as_ints()
            .iter()
            .map(BigUint::to_string)
            .collect()
    }

    pub fn from_decimal_strings<S: AsRef<str>>(entries: &[S]) -> Result<Self, ClaimError> {
        if entries.len() != CLAIM_SLOT_COUNT {
            return Err(ClaimError::InvalidSlotCount(entries.len()));
        }
        let mut slots = [FieldElement::ZERO; CLAIM_SLOT_COUNT];
        for (slot, entry) in slots.iter_mut().zip(entries) {
            *slot = FieldElement::from_decimal(entry.as_ref()).map_err(|e| match e {
                FieldError::Overflow => ClaimError::DataOverflow { slot: None },
                _ => ClaimError::InvalidDecimal(entry.as_ref().to_string()),
            })?;
        }
        Ok(from_flat(slots))
    }

    /// JSON array of eight decimal strings.
    pub fn to_json(&self) -> String {
        serde_json::Value::from(self.to_decimal_strings()).to_string()
    }

    pub fn from_json(json: &str) -> Result<Self, ClaimError> {
        let entries: Vec<String> = serde_json::from_str(json)
            .map_err(|e| ClaimError::InvalidDecimal(e.to_string()))?;
        Self::from_decimal_strings(&entries)
    }
}

fn from_flat(slots: [FieldElement; CLAIM_SLOT_COUNT]) -> Claim {
    let mut index = [FieldElement::ZERO; SLOTS_PER_HALF];
    let mut value = [FieldElement::ZERO; SLOTS_PER_HALF];
    index.copy_from_slice(&slots[..SLOTS_PER_HALF]);
    value.copy_from_slice(&slots[SLOTS_PER_HALF..]);
    Claim::from_slots(index, value)
}

impl Serialize for Claim {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_decimal_strings().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Claim {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Vec::<String>::deserialize(deserializer)?;
        Self::from_decimal_strings(&entries).map_err(serde::de::Error::custom)
    }
}
