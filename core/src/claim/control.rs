//! The bit-packed control word inside `index[0]`.
//!
//! ```text
//! byte 16:  7 6 5 | 4         | 3          | 2 1 0
//!           merkl.| updatable | expiration | subject
//! bytes 20..24: version (u32, little-endian)
//! ```
//!
//! All bit twiddling for claims happens here. Callers decode a
//! [`ControlWord`], change fields, and encode it back.

use crate::config::{EXPIRATION_BIT_INDEX, FLAGS_BYTE_INDEX, UPDATABLE_BIT_INDEX, VERSION_OFFSET};
use crate::primitives::FieldElement;

const SUBJECT_MASK: u8 = 0b0000_0111;
const MERKLIZED_MASK: u8 = 0b1110_0000;

/// Raw 3-bit subject tag. Only the first four values have a meaning; the
/// rest are carried through unchanged so a decode/encode cycle is lossless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SubjectTag(u8);

impl SubjectTag {
    /// The claim is about the identity holding it.
    pub const SELF: Self = Self(0b000);
    /// Reserved; never produced by a well-formed claim.
    pub const INVALID: Self = Self(0b001);
    /// The subject identifier is in `index[1]`.
    pub const OTHER_IDEN_INDEX: Self = Self(0b010);
    /// The subject identifier is in `value[1]`.
    pub const OTHER_IDEN_VALUE: Self = Self(0b011);

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & SUBJECT_MASK)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }
}

/// Raw 3-bit merklized tag, stored in the top bits of the flags byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MerklizedTag(u8);

impl MerklizedTag {
    pub const NONE: Self = Self(0b000);
    /// Root in `index[2]`.
    pub const INDEX: Self = Self(0b001);
    /// Root in `value[2]`.
    pub const VALUE: Self = Self(0b010);

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & (MERKLIZED_MASK >> 5))
    }

    pub const fn bits(self) -> u8 {
        self.0
    }
}

/// Decoded view of the control fields of `index[0]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlWord {
    pub subject: SubjectTag,
    pub has_expiration: bool,
    pub updatable: bool,
    pub merklized: MerklizedTag,
    pub version: u32,
}

impl ControlWord {
    pub fn decode(slot: &FieldElement) -> Self {
        let bytes = slot.as_bytes();
        let flags = bytes[FLAGS_BYTE_INDEX];
        let mut version = [0u8; 4];
        version.copy_from_slice(&bytes[VERSION_OFFSET..VERSION_OFFSET + 4]);
        Self {
            subject: SubjectTag::from_bits(flags),
            has_expiration: flags & (1 << EXPIRATION_BIT_INDEX) != 0,
            updatable: flags & (1 << UPDATABLE_BIT_INDEX) != 0,
            merklized: MerklizedTag::from_bits(flags >> 5),
            version: u32::from_le_bytes(version),
        }
    }

    /// Write the control fields into `slot`, leaving every other byte
    /// untouched. Bytes 16..24 sit far below the field modulus, so the
    /// slot stays a valid field element.
    pub fn encode_into(&self, slot: &mut FieldElement) {
        let mut flags = self.subject.bits() | (self.merklized.bits() << 5);
        if self.has_expiration {
            flags |= 1 << EXPIRATION_BIT_INDEX;
        }
        if self.updatable {
            flags |= 1 << UPDATABLE_BIT_INDEX;
        }
        let bytes = slot.bytes_mut();
        bytes[FLAGS_BYTE_INDEX] = flags;
        bytes[VERSION_OFFSET..VERSION_OFFSET + 4].copy_from_slice(&self.version.to_le_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_encode_is_lossless() {
        let mut slot = FieldElement::ZERO;
        slot.bytes_mut()[FLAGS_BYTE_INDEX] = 0b0101_1110;
        slot.bytes_mut()[0] = 0xAB;
        slot.bytes_mut()[17] = 0x77;

        let word = ControlWord::decode(&slot);
        assert_eq!(word.subject.bits(), 0b110);
        assert!(word.has_expiration);
        assert!(word.updatable);
        assert_eq!(word.merklized, MerklizedTag::VALUE);

        let mut out = slot;
        word.encode_into(&mut out);
        assert_eq!(out, slot);
    }

    #[test]
    fn flag_bit_positions() {
        let mut slot = FieldElement::ZERO;
        ControlWord {
            updatable: true,
            ..Default::default()
        }
        .encode_into(&mut slot);
        assert_eq!(slot.as_bytes()[FLAGS_BYTE_INDEX], 0b0001_0000);

        ControlWord {
            has_expiration: true,
            subject: SubjectTag::OTHER_IDEN_VALUE,
            merklized: MerklizedTag::INDEX,
            ..Default::default()
        }
        .encode_into(&mut slot);
        assert_eq!(slot.as_bytes()[FLAGS_BYTE_INDEX], 0b0010_1011);
    }

    #[test]
    fn version_is_little_endian_at_offset_20() {
        let mut slot = FieldElement::ZERO;
        ControlWord {
            version: 0x0403_0201,
            ..Default::default()
        }
        .encode_into(&mut slot);
        assert_eq!(&slot.as_bytes()[20..24], &[1, 2, 3, 4]);
        assert_eq!(ControlWord::decode(&slot).version, 0x0403_0201);
    }
}
