//! # The Claim
//!
//! Eight field-element slots: `index[0..4]` then `value[0..4]`.
//!
//! ```text
//! index[0]  schema hash (0..16) | flags (16) | version (20..24)
//! index[1]  subject identifier when the subject tag says "index"
//! index[2]  data slot IndexA, or the merklized root
//! index[3]  data slot IndexB
//! value[0]  revocation nonce (0..8) | expiration, unix seconds (8..16)
//! value[1]  subject identifier when the subject tag says "value"
//! value[2]  data slot ValueA, or the merklized root
//! value[3]  data slot ValueB
//! ```
//!
//! Setters are all-or-nothing: every input is range-checked before the
//! first byte is written.

use chrono::{DateTime, Utc};
use num_bigint::BigUint;

use super::control::{ControlWord, MerklizedTag, SubjectTag};
use super::types::{ClaimError, IdPosition, MerklizedPosition, SlotName};
use crate::config::{
    EXPIRATION_OFFSET, FIELD_ELEMENT_LENGTH, ID_LENGTH, NONCE_LENGTH, SCHEMA_HASH_LENGTH,
    SLOTS_PER_HALF,
};
use crate::crypto::{FieldHasher, PoseidonHasher};
use crate::identity::Identifier;
use crate::primitives::{FieldElement, SchemaHash};

/// A claim: four index slots and four value slots.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Claim {
    pub(crate) index: [FieldElement; SLOTS_PER_HALF],
    pub(crate) value: [FieldElement; SLOTS_PER_HALF],
}

impl Claim {
    /// An empty claim carrying only `schema`.
    pub fn new(schema: SchemaHash) -> Self {
        let mut claim = Self::default();
        claim.set_schema_hash(schema);
        claim
    }

    /// Build directly from slots.
    pub fn from_slots(
        index: [FieldElement; SLOTS_PER_HALF],
        value: [FieldElement; SLOTS_PER_HALF],
    ) -> Self {
        Self { index, value }
    }

    fn control(&self) -> ControlWord {
        ControlWord::decode(&self.index[0])
    }

    fn update_control(&mut self, f: impl FnOnce(&mut ControlWord)) {
        let mut word = self.control();
        f(&mut word);
        word.encode_into(&mut self.index[0]);
    }

    // -----------------------------------------------------------------------
    // Schema, flags, version
    // -----------------------------------------------------------------------

    pub fn schema_hash(&self) -> SchemaHash {
        let mut bytes = [0u8; SCHEMA_HASH_LENGTH];
        bytes.copy_from_slice(&self.index[0].as_bytes()[..SCHEMA_HASH_LENGTH]);
        SchemaHash::new(bytes)
    }

    pub fn set_schema_hash(&mut self, schema: SchemaHash) {
        self.index[0].bytes_mut()[..SCHEMA_HASH_LENGTH].copy_from_slice(schema.as_bytes());
    }

    /// The raw subject tag.
    pub fn subject(&self) -> SubjectTag {
        self.control().subject
    }

    /// Overwrite the raw subject tag. Does not touch the identifier slots.
    pub fn set_subject(&mut self, subject: SubjectTag) {
        self.update_control(|w| w.subject = subject);
    }

    pub fn flag_updatable(&self) -> bool {
        self.control().updatable
    }

    pub fn set_flag_updatable(&mut self, updatable: bool) {
        self.update_control(|w| w.updatable = updatable);
    }

    pub fn version(&self) -> u32 {
        self.control().version
    }

    pub fn set_version(&mut self, version: u32) {
        self.update_control(|w| w.version = version);
    }

    // -----------------------------------------------------------------------
    // Revocation and expiration
    // -----------------------------------------------------------------------

    pub fn revocation_nonce(&self) -> u64 {
        read_u64(&self.value[0], 0)
    }

    pub fn set_revocation_nonce(&mut self, nonce: u64) {
        write_u64(&mut self.value[0], 0, nonce);
    }

    /// Raw expiration in unix seconds, present only when the
    /// has-expiration flag is set.
    pub fn expiration_timestamp(&self) -> Option<u64> {
        self.control()
            .has_expiration
            .then(|| read_u64(&self.value[0], EXPIRATION_OFFSET))
    }

    pub fn set_expiration_timestamp(&mut self, seconds: u64) {
        self.update_control(|w| w.has_expiration = true);
        write_u64(&mut self.value[0], EXPIRATION_OFFSET, seconds);
    }

    /// Expiration as a UTC datetime, `None` when the flag is unset. Raw
    /// seconds chrono cannot represent are an error, not `None`; use
    /// [`expiration_timestamp`](Self::expiration_timestamp) to read them.
    pub fn expiration_date(&self) -> Result<Option<DateTime<Utc>>, ClaimError> {
        let Some(seconds) = self.expiration_timestamp() else {
            return Ok(None);
        };
        i64::try_from(seconds)
            .ok()
            .and_then(|s| DateTime::from_timestamp(s, 0))
            .map(Some)
            .ok_or(ClaimError::UnrepresentableExpiration(seconds))
    }

    /// Set the expiration to `date`, truncated to whole seconds. Dates
    /// before the unix epoch are rejected.
    pub fn set_expiration_date(&mut self, date: DateTime<Utc>) -> Result<(), ClaimError> {
        let seconds = date.timestamp();
        let seconds = u64::try_from(seconds).map_err(|_| ClaimError::InvalidTimestamp(seconds))?;
        self.set_expiration_timestamp(seconds);
        Ok(())
    }

    pub fn reset_expiration_date(&mut self) {
        self.update_control(|w| w.has_expiration = false);
        write_u64(&mut self.value[0], EXPIRATION_OFFSET, 0);
    }

    // -----------------------------------------------------------------------
    // Subject identifier
    // -----------------------------------------------------------------------

    pub fn id_position(&self) -> Result<IdPosition, ClaimError> {
        match self.subject() {
            SubjectTag::SELF => Ok(IdPosition::None),
            SubjectTag::OTHER_IDEN_INDEX => Ok(IdPosition::Index),
            SubjectTag::OTHER_IDEN_VALUE => Ok(IdPosition::Value),
            _ => Err(ClaimError::InvalidSubjectPosition),
        }
    }

    /// Store `id` in `index[1]`, clearing `value[1]`.
    pub fn set_index_id(&mut self, id: &Identifier) {
        self.value[1] = FieldElement::ZERO;
        self.set_subject(SubjectTag::OTHER_IDEN_INDEX);
        self.index[1] = id_slot(id);
    }

    /// Store `id` in `value[1]`, clearing `index[1]`.
    pub fn set_value_id(&mut self, id: &Identifier) {
        self.index[1] = FieldElement::ZERO;
        self.set_subject(SubjectTag::OTHER_IDEN_VALUE);
        self.value[1] = id_slot(id);
    }

    pub fn set_id(&mut self, id: &Identifier, position: IdPosition) -> Result<(), ClaimError> {
        match position {
            IdPosition::Index => self.set_index_id(id),
            IdPosition::Value => self.set_value_id(id),
            IdPosition::None => return Err(ClaimError::IncorrectIdPosition),
        }
        Ok(())
    }

    /// Clear both identifier slots and mark the claim a self-claim.
    pub fn reset_id(&mut self) {
        self.index[1] = FieldElement::ZERO;
        self.value[1] = FieldElement::ZERO;
        self.set_subject(SubjectTag::SELF);
    }

    /// Decode `index[1]` as an identifier, whatever the subject tag says.
    pub fn index_id(&self) -> Result<Identifier, ClaimError> {
        Ok(Identifier::from_bytes(&self.index[1].as_bytes()[..ID_LENGTH])?)
    }

    /// Decode `value[1]` as an identifier, whatever the subject tag says.
    pub fn value_id(&self) -> Result<Identifier, ClaimError> {
        Ok(Identifier::from_bytes(&self.value[1].as_bytes()[..ID_LENGTH])?)
    }

    /// The subject identifier at the position named by the subject tag.
    pub fn id(&self) -> Result<Identifier, ClaimError> {
        match self.subject() {
            SubjectTag::OTHER_IDEN_INDEX => self.index_id(),
            SubjectTag::OTHER_IDEN_VALUE => self.value_id(),
            _ => Err(ClaimError::NoId),
        }
    }

    // -----------------------------------------------------------------------
    // Data slots
    // -----------------------------------------------------------------------

    /// Field elements are already below Q, so this cannot fail. The
    /// integer and byte variants below do the range check.
    pub fn set_index_data(&mut self, a: FieldElement, b: FieldElement) {
        self.index[2] = a;
        self.index[3] = b;
    }

    pub fn set_value_data(&mut self, a: FieldElement, b: FieldElement) {
        self.value[2] = a;
        self.value[3] = b;
    }

    /// `None` writes zero.
    pub fn set_index_data_ints(
        &mut self,
        a: Option<&BigUint>,
        b: Option<&BigUint>,
    ) -> Result<(), ClaimError> {
        let a = slot_from_int(a, SlotName::IndexA)?;
        let b = slot_from_int(b, SlotName::IndexB)?;
        self.set_index_data(a, b);
        Ok(())
    }

    pub fn set_value_data_ints(
        &mut self,
        a: Option<&BigUint>,
        b: Option<&BigUint>,
    ) -> Result<(), ClaimError> {
        let a = slot_from_int(a, SlotName::ValueA)?;
        let b = slot_from_int(b, SlotName::ValueB)?;
        self.set_value_data(a, b);
        Ok(())
    }

    /// `None` writes zero.
    pub fn set_index_data_bytes(
        &mut self,
        a: Option<&[u8; FIELD_ELEMENT_LENGTH]>,
        b: Option<&[u8; FIELD_ELEMENT_LENGTH]>,
    ) -> Result<(), ClaimError> {
        let a = slot_from_bytes(a, SlotName::IndexA)?;
        let b = slot_from_bytes(b, SlotName::IndexB)?;
        self.set_index_data(a, b);
        Ok(())
    }

    pub fn set_value_data_bytes(
        &mut self,
        a: Option<&[u8; FIELD_ELEMENT_LENGTH]>,
        b: Option<&[u8; FIELD_ELEMENT_LENGTH]>,
    ) -> Result<(), ClaimError> {
        let a = slot_from_bytes(a, SlotName::ValueA)?;
        let b = slot_from_bytes(b, SlotName::ValueB)?;
        self.set_value_data(a, b);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Merklized root
    // -----------------------------------------------------------------------

    pub fn merklized_position(&self) -> Result<MerklizedPosition, ClaimError> {
        match self.control().merklized {
            MerklizedTag::NONE => Ok(MerklizedPosition::None),
            MerklizedTag::INDEX => Ok(MerklizedPosition::Index),
            MerklizedTag::VALUE => Ok(MerklizedPosition::Value),
            _ => Err(ClaimError::IncorrectMerklizedPosition),
        }
    }

    /// Set only the position tag; the root slots are left as they are.
    pub fn set_flag_merklized(&mut self, position: MerklizedPosition) {
        let tag = match position {
            MerklizedPosition::None => MerklizedTag::NONE,
            MerklizedPosition::Index => MerklizedTag::INDEX,
            MerklizedPosition::Value => MerklizedTag::VALUE,
        };
        self.update_control(|w| w.merklized = tag);
    }

    /// Store `root` in `index[2]`, clearing `value[2]`.
    pub fn set_index_merklized_root(&mut self, root: &BigUint) -> Result<(), ClaimError> {
        let root = slot_from_int(Some(root), SlotName::IndexA)?;
        self.value[2] = FieldElement::ZERO;
        self.set_flag_merklized(MerklizedPosition::Index);
        self.index[2] = root;
        Ok(())
    }

    /// Store `root` in `value[2]`, clearing `index[2]`.
    pub fn set_value_merklized_root(&mut self, root: &BigUint) -> Result<(), ClaimError> {
        let root = slot_from_int(Some(root), SlotName::ValueA)?;
        self.index[2] = FieldElement::ZERO;
        self.set_flag_merklized(MerklizedPosition::Value);
        self.value[2] = root;
        Ok(())
    }

    pub fn set_merklized_root(
        &mut self,
        root: &BigUint,
        position: MerklizedPosition,
    ) -> Result<(), ClaimError> {
        match position {
            MerklizedPosition::Index => self.set_index_merklized_root(root),
            MerklizedPosition::Value => self.set_value_merklized_root(root),
            MerklizedPosition::None => Err(ClaimError::IncorrectMerklizedPosition),
        }
    }

    pub fn merklized_root(&self) -> Result<BigUint, ClaimError> {
        match self.merklized_position()? {
            MerklizedPosition::Index => Ok(self.index[2].to_int()),
            MerklizedPosition::Value => Ok(self.value[2].to_int()),
            MerklizedPosition::None => Err(ClaimError::NoMerklizedRoot),
        }
    }

    // -----------------------------------------------------------------------
    // Slots and hashing
    // -----------------------------------------------------------------------

    pub fn raw_slots(&self) -> (&[FieldElement; SLOTS_PER_HALF], &[FieldElement; SLOTS_PER_HALF]) {
        (&self.index, &self.value)
    }

    /// All eight slot integers, index half first.
    pub fn raw_slots_as_ints(&self) -> Vec<BigUint> {
        self.index
            .iter()
            .chain(self.value.iter())
            .map(FieldElement::to_int)
            .collect()
    }

    /// Poseidon hash of the index slots.
    pub fn h_index(&self) -> Result<FieldElement, ClaimError> {
        self.h_index_with(&PoseidonHasher)
    }

    /// Poseidon hash of the value slots.
    pub fn h_value(&self) -> Result<FieldElement, ClaimError> {
        self.h_value_with(&PoseidonHasher)
    }

    /// `(hIndex, hValue)` with Poseidon.
    pub fn hi_hv(&self) -> Result<(FieldElement, FieldElement), ClaimError> {
        self.hi_hv_with(&PoseidonHasher)
    }

    pub fn h_index_with<H: FieldHasher>(&self, hasher: &H) -> Result<FieldElement, ClaimError> {
        hash_half(&self.index, hasher)
    }

    pub fn h_value_with<H: FieldHasher>(&self, hasher: &H) -> Result<FieldElement, ClaimError> {
        hash_half(&self.value, hasher)
    }

    pub fn hi_hv_with<H: FieldHasher>(
        &self,
        hasher: &H,
    ) -> Result<(FieldElement, FieldElement), ClaimError> {
        Ok((self.h_index_with(hasher)?, self.h_value_with(hasher)?))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn hash_half<H: FieldHasher>(
    half: &[FieldElement; SLOTS_PER_HALF],
    hasher: &H,
) -> Result<FieldElement, ClaimError> {
    let inputs = half.map(|slot| slot.to_fr());
    Ok(FieldElement::from_fr(hasher.hash(&inputs)?))
}

fn read_u64(slot: &FieldElement, offset: usize) -> u64 {
    let mut bytes = [0u8; NONCE_LENGTH];
    bytes.copy_from_slice(&slot.as_bytes()[offset..offset + NONCE_LENGTH]);
    u64::from_le_bytes(bytes)
}

fn write_u64(slot: &mut FieldElement, offset: usize, n: u64) {
    slot.bytes_mut()[offset..offset + NONCE_LENGTH].copy_from_slice(&n.to_le_bytes());
}

// 31 bytes of identifier and a zero top byte stay below Q.
fn id_slot(id: &Identifier) -> FieldElement {
    let mut bytes = [0u8; FIELD_ELEMENT_LENGTH];
    bytes[..ID_LENGTH].copy_from_slice(id.as_bytes());
    FieldElement::from_raw(bytes)
}

fn overflow(slot: SlotName) -> ClaimError {
    ClaimError::DataOverflow { slot: Some(slot) }
}

fn slot_from_int(n: Option<&BigUint>, slot: SlotName) -> Result<FieldElement, ClaimError> {
    match n {
        Some(n) => FieldElement::from_int(n).map_err(|_| overflow(slot)),
        None => Ok(FieldElement::ZERO),
    }
}

fn slot_from_bytes(
    bytes: Option<&[u8; FIELD_ELEMENT_LENGTH]>,
    slot: SlotName,
) -> Result<FieldElement, ClaimError> {
    match bytes {
        Some(bytes) => {
            FieldElement::from_bytes(bytes).map_err(|_| overflow(slot))
        }
        None => Ok(FieldElement::ZERO),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FLAGS_BYTE_INDEX;
    use crate::crypto::sha256;
    use crate::primitives::field::modulus;
    use chrono::TimeZone;

    fn test_identifier() -> Identifier {
        let mut genesis = [0u8; 27];
        genesis.copy_from_slice(&sha256(b"genesistest")[..27]);
        Identifier::new([0x00, 0x00], genesis).unwrap()
    }

    #[test]
    fn new_claim_updatable_layout() {
        let mut claim = Claim::new(SchemaHash::default());
        claim.set_flag_updatable(true);

        for (i, b) in claim.index[0].as_bytes().iter().enumerate() {
            if i == FLAGS_BYTE_INDEX {
                assert_eq!(*b, 0b10000);
            } else {
                assert_eq!(*b, 0);
            }
        }
        for slot in &claim.index[1..] {
            assert!(slot.is_zero());
        }
        assert!(claim.expiration_date().unwrap().is_none());
    }

    #[test]
    fn reference_hashes() {
        let mut claim = Claim::new(SchemaHash::default());
        claim.set_flag_updatable(true);
        let (hi, hv) = claim.hi_hv().unwrap();
        assert_eq!(
            hi.to_string(),
            "19905260441950906049955646784794273651462264973332746773406911374272567544299"
        );
        assert_eq!(
            hv.to_string(),
            "2351654555892372227640888372176282444150254868378439619268573230312091195718"
        );
    }

    #[test]
    fn schema_hash_round_trip() {
        let sh = SchemaHash::from_hex("ca938857241db9451ea329256b9c06e5").unwrap();
        let claim = Claim::new(sh);
        assert_eq!(claim.schema_hash(), sh);
        assert_eq!(&claim.index[0].as_bytes()[..16], sh.as_bytes());
    }

    #[test]
    fn updatable_toggles() {
        let mut claim = Claim::new(SchemaHash::default());
        assert!(!claim.flag_updatable());
        claim.set_flag_updatable(true);
        assert!(claim.flag_updatable());
        claim.set_flag_updatable(false);
        assert!(!claim.flag_updatable());
    }

    #[test]
    fn version_and_nonce() {
        let mut claim = Claim::new(SchemaHash::default());
        claim.set_version(u32::MAX);
        assert_eq!(claim.version(), u32::MAX);
        claim.set_revocation_nonce(u64::MAX);
        assert_eq!(claim.revocation_nonce(), u64::MAX);
        // Neither bleeds into the flags.
        assert!(!claim.flag_updatable());
        assert_eq!(claim.expiration_timestamp(), None);
    }

    #[test]
    fn expiration_date_lifecycle() {
        let mut claim = Claim::new(SchemaHash::default());
        let date = Utc.with_ymd_and_hms(2030, 1, 2, 3, 4, 5).unwrap();
        claim.set_expiration_date(date).unwrap();
        assert_eq!(claim.expiration_date().unwrap(), Some(date));

        claim.reset_expiration_date();
        assert_eq!(claim.expiration_date().unwrap(), None);
        assert_eq!(read_u64(&claim.value[0], EXPIRATION_OFFSET), 0);

        let later = date + chrono::Duration::seconds(10);
        claim.set_expiration_date(later).unwrap();
        assert_eq!(claim.expiration_date().unwrap(), Some(later));
    }

    #[test]
    fn unrepresentable_expiration_is_an_error() {
        let mut claim = Claim::new(SchemaHash::default());
        for seconds in [u64::MAX, i64::MAX as u64] {
            claim.set_expiration_timestamp(seconds);
            assert_eq!(claim.expiration_timestamp(), Some(seconds));
            assert!(matches!(
                claim.expiration_date(),
                Err(ClaimError::UnrepresentableExpiration(s)) if s == seconds
            ));
        }
    }

    #[test]
    fn expiration_before_epoch_is_rejected() {
        let mut claim = Claim::new(SchemaHash::default());
        let date = Utc.with_ymd_and_hms(1969, 12, 31, 0, 0, 0).unwrap();
        assert!(matches!(
            claim.set_expiration_date(date),
            Err(ClaimError::InvalidTimestamp(_))
        ));
        assert_eq!(claim, Claim::new(SchemaHash::default()));
    }

    #[test]
    fn flags_are_independent() {
        let mut claim = Claim::new(SchemaHash::default());
        claim.set_flag_updatable(true);
        claim.set_expiration_timestamp(1_700_000_000);
        assert!(claim.flag_updatable());
        assert_eq!(claim.expiration_timestamp(), Some(1_700_000_000));
        assert_eq!(claim.id_position().unwrap(), IdPosition::None);
        assert_eq!(claim.merklized_position().unwrap(), MerklizedPosition::None);
    }

    #[test]
    fn id_positions() {
        let id = test_identifier();

        let claim = Claim::new(SchemaHash::default());
        assert_eq!(claim.id_position().unwrap(), IdPosition::None);
        assert!(matches!(claim.id(), Err(ClaimError::NoId)));

        let mut claim = Claim::new(SchemaHash::default());
        claim.set_index_id(&id);
        assert_eq!(claim.id_position().unwrap(), IdPosition::Index);
        assert_eq!(claim.id().unwrap(), id);

        claim.set_value_id(&id);
        assert_eq!(claim.id_position().unwrap(), IdPosition::Value);
        assert_eq!(claim.id().unwrap(), id);
        assert!(claim.index[1].is_zero());

        claim.reset_id();
        assert_eq!(claim.id_position().unwrap(), IdPosition::None);
        assert!(claim.value[1].is_zero());
    }

    #[test]
    fn invalid_subject_position() {
        let mut claim = Claim::new(SchemaHash::default());
        claim.set_subject(SubjectTag::INVALID);
        assert!(matches!(
            claim.id_position(),
            Err(ClaimError::InvalidSubjectPosition)
        ));
        assert!(matches!(claim.id(), Err(ClaimError::NoId)));
    }

    #[test]
    fn set_id_at_none_is_rejected() {
        let mut claim = Claim::new(SchemaHash::default());
        assert!(matches!(
            claim.set_id(&test_identifier(), IdPosition::None),
            Err(ClaimError::IncorrectIdPosition)
        ));
    }

    #[test]
    fn index_data_field_boundary() {
        let mut claim = Claim::new(SchemaHash::default());
        let q_minus_one = modulus() - 1u32;
        let q_plus_one = modulus() + 1u32;

        claim
            .set_index_data_ints(Some(&q_minus_one), None)
            .unwrap();
        assert_eq!(claim.index[2].to_int(), q_minus_one);

        let before = claim.clone();
        let err = claim
            .set_index_data_ints(None, Some(&q_plus_one))
            .unwrap_err();
        assert!(matches!(
            err,
            ClaimError::DataOverflow {
                slot: Some(SlotName::IndexB)
            }
        ));
        assert_eq!(claim, before);
    }

    #[test]
    fn value_data_field_boundary() {
        let mut claim = Claim::new(SchemaHash::default());
        let q_minus_one = modulus() - 1u32;
        let q_plus_one = modulus() + 1u32;

        claim
            .set_value_data_ints(Some(&q_minus_one), Some(&q_minus_one))
            .unwrap();
        assert_eq!(claim.value[3].to_int(), q_minus_one);

        let before = claim.clone();
        let err = claim
            .set_value_data_ints(Some(&q_plus_one), None)
            .unwrap_err();
        assert!(matches!(
            err,
            ClaimError::DataOverflow {
                slot: Some(SlotName::ValueA)
            }
        ));
        assert_eq!(
            err.to_string(),
            "data does not fit in the SNARK field (slot ValueA)"
        );
        assert_eq!(claim, before);
    }

    #[test]
    fn data_ints_none_writes_zero() {
        let sixty_four = BigUint::from(64u8);
        let mut claim = Claim::new(SchemaHash::default());
        claim.set_index_data_ints(Some(&sixty_four), None).unwrap();
        assert!(claim.index[3].is_zero());
        assert_eq!(claim.index[2].to_int(), sixty_four);

        claim.set_value_data_ints(None, Some(&sixty_four)).unwrap();
        assert!(claim.value[2].is_zero());
        assert_eq!(claim.value[3].to_int(), sixty_four);
    }

    #[test]
    fn data_bytes_overflow_names_slot() {
        let mut claim = Claim::new(SchemaHash::default());
        let err = claim
            .set_value_data_bytes(Some(&[0xff; 32]), None)
            .unwrap_err();
        assert!(matches!(
            err,
            ClaimError::DataOverflow {
                slot: Some(SlotName::ValueA)
            }
        ));

        let mut ok = [0u8; 32];
        ok[0] = 7;
        claim.set_value_data_bytes(None, Some(&ok)).unwrap();
        assert_eq!(claim.value[3].to_int(), BigUint::from(7u8));
    }

    #[test]
    fn merklized_root_exclusivity() {
        let root = BigUint::from(1234u32);
        let mut claim = Claim::new(SchemaHash::default());
        assert!(matches!(
            claim.merklized_root(),
            Err(ClaimError::NoMerklizedRoot)
        ));

        claim.set_index_merklized_root(&root).unwrap();
        assert_eq!(claim.merklized_position().unwrap(), MerklizedPosition::Index);
        assert_eq!(claim.merklized_root().unwrap(), root);

        claim.set_value_merklized_root(&root).unwrap();
        assert_eq!(claim.merklized_position().unwrap(), MerklizedPosition::Value);
        assert!(claim.index[2].is_zero());
        assert_eq!(claim.merklized_root().unwrap(), root);

        assert!(matches!(
            claim.set_merklized_root(&root, MerklizedPosition::None),
            Err(ClaimError::IncorrectMerklizedPosition)
        ));
    }

    #[test]
    fn merklized_flag_bits() {
        let mut claim = Claim::new(SchemaHash::default());
        claim.set_flag_merklized(MerklizedPosition::Index);
        assert_eq!(claim.index[0].as_bytes()[FLAGS_BYTE_INDEX] & 0b1110_0000, 0b0010_0000);
        claim.set_flag_merklized(MerklizedPosition::Value);
        assert_eq!(claim.index[0].as_bytes()[FLAGS_BYTE_INDEX] & 0b1110_0000, 0b0100_0000);
    }

    #[test]
    fn invalid_merklized_tag() {
        let mut claim = Claim::new(SchemaHash::default());
        claim.index[0].bytes_mut()[FLAGS_BYTE_INDEX] |= 0b1000_0000;
        assert!(matches!(
            claim.merklized_position(),
            Err(ClaimError::IncorrectMerklizedPosition)
        ));
    }

    #[test]
    fn merklized_root_overflow_leaves_claim_untouched() {
        let mut claim = Claim::new(SchemaHash::default());
        claim.set_index_merklized_root(&BigUint::from(5u8)).unwrap();
        let before = claim.clone();
        assert!(claim.set_value_merklized_root(&modulus()).is_err());
        assert_eq!(claim, before);
    }

    #[test]
    fn raw_slots_as_ints_order() {
        let mut claim = Claim::new(SchemaHash::default());
        claim.set_revocation_nonce(9);
        claim
            .set_index_data_ints(Some(&BigUint::from(3u8)), Some(&BigUint::from(4u8)))
            .unwrap();
        let ints = claim.raw_slots_as_ints();
        assert_eq!(ints.len(), 8);
        assert_eq!(ints[2], BigUint::from(3u8));
        assert_eq!(ints[3], BigUint::from(4u8));
        assert_eq!(ints[4], BigUint::from(9u8));
    }
}
