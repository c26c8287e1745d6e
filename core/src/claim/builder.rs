//! # Claim Builder
//!
//! Claims are assembled by applying an ordered list of [`ClaimOption`]s to a
//! fresh claim. Options are independent except where the layout forces an
//! interaction: an identifier set on one side clears the other side, and a
//! merklized root set on one side clears the other side. Later options win.
//!
//! ```
//! use idcore::{ClaimBuilder, SchemaHash};
//!
//! let claim = ClaimBuilder::new(SchemaHash::default())
//!     .updatable(true)
//!     .version(2)
//!     .revocation_nonce(1000)
//!     .build()
//!     .unwrap();
//!
//! assert!(claim.flag_updatable());
//! assert_eq!(claim.version(), 2);
//! ```

use chrono::{DateTime, Utc};
use num_bigint::BigUint;

use super::slots::Claim;
use super::types::{ClaimError, IdPosition, MerklizedPosition};
use crate::config::FIELD_ELEMENT_LENGTH;
use crate::identity::Identifier;
use crate::primitives::{FieldElement, SchemaHash};

/// One field assignment on a claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimOption {
    Updatable(bool),
    Version(u32),
    RevocationNonce(u64),
    ExpirationDate(DateTime<Utc>),
    IndexId(Identifier),
    ValueId(Identifier),
    Id(Identifier, IdPosition),
    IndexData(FieldElement, FieldElement),
    IndexDataInts(Option<BigUint>, Option<BigUint>),
    IndexDataBytes(
        Option<[u8; FIELD_ELEMENT_LENGTH]>,
        Option<[u8; FIELD_ELEMENT_LENGTH]>,
    ),
    ValueData(FieldElement, FieldElement),
    ValueDataInts(Option<BigUint>, Option<BigUint>),
    ValueDataBytes(
        Option<[u8; FIELD_ELEMENT_LENGTH]>,
        Option<[u8; FIELD_ELEMENT_LENGTH]>,
    ),
    /// Position tag only; the root slots are not touched.
    MerklizedFlag(MerklizedPosition),
    IndexMerklizedRoot(BigUint),
    ValueMerklizedRoot(BigUint),
    MerklizedRoot(BigUint, MerklizedPosition),
}

impl ClaimOption {
    /// Apply this option to `claim`.
    pub fn apply(&self, claim: &mut Claim) -> Result<(), ClaimError> {
        match self {
            ClaimOption::Updatable(flag) => claim.set_flag_updatable(*flag),
            ClaimOption::Version(version) => claim.set_version(*version),
            ClaimOption::RevocationNonce(nonce) => claim.set_revocation_nonce(*nonce),
            ClaimOption::ExpirationDate(date) => claim.set_expiration_date(*date)?,
            ClaimOption::IndexId(id) => claim.set_index_id(id),
            ClaimOption::ValueId(id) => claim.set_value_id(id),
            ClaimOption::Id(id, position) => claim.set_id(id, *position)?,
            ClaimOption::IndexData(a, b) => claim.set_index_data(*a, *b),
            ClaimOption::IndexDataInts(a, b) => {
                claim.set_index_data_ints(a.as_ref(), b.as_ref())?
            }
            ClaimOption::IndexDataBytes(a, b) => {
                claim.set_index_data_bytes(a.as_ref(), b.as_ref())?
            }
            ClaimOption::ValueData(a, b) => claim.set_value_data(*a, *b),
            ClaimOption::ValueDataInts(a, b) => {
                claim.set_value_data_ints(a.as_ref(), b.as_ref())?
            }
            ClaimOption::ValueDataBytes(a, b) => {
                claim.set_value_data_bytes(a.as_ref(), b.as_ref())?
            }
            ClaimOption::MerklizedFlag(position) => claim.set_flag_merklized(*position),
            ClaimOption::IndexMerklizedRoot(root) => claim.set_index_merklized_root(root)?,
            ClaimOption::ValueMerklizedRoot(root) => claim.set_value_merklized_root(root)?,
            ClaimOption::MerklizedRoot(root, position) => {
                claim.set_merklized_root(root, *position)?
            }
        }
        Ok(())
    }
}

impl Claim {
    /// Build a claim from `schema` and an ordered list of options. Nothing
    /// is returned unless every option applies.
    pub fn with_options<I>(schema: SchemaHash, options: I) -> Result<Self, ClaimError>
    where
        I: IntoIterator<Item = ClaimOption>,
    {
        let mut claim = Claim::new(schema);
        for option in options {
            option.apply(&mut claim)?;
        }
        Ok(claim)
    }
}

// ---------------------------------------------------------------------------
// Fluent builder
// ---------------------------------------------------------------------------

/// Fluent front-end over [`ClaimOption`]s.
#[derive(Debug, Clone, Default)]
pub struct ClaimBuilder {
    schema: SchemaHash,
    options: Vec<ClaimOption>,
}

impl ClaimBuilder {
    pub fn new(schema: SchemaHash) -> Self {
        Self {
            schema,
            options: Vec::new(),
        }
    }

    /// Append a raw option.
    pub fn option(mut self, option: ClaimOption) -> Self {
        self.options.push(option);
        self
    }

    pub fn updatable(self, flag: bool) -> Self {
        self.option(ClaimOption::Updatable(flag))
    }

    pub fn version(self, version: u32) -> Self {
        self.option(ClaimOption::Version(version))
    }

    pub fn revocation_nonce(self, nonce: u64) -> Self {
        self.option(ClaimOption::RevocationNonce(nonce))
    }

    pub fn expiration_date(self, date: DateTime<Utc>) -> Self {
        self.option(ClaimOption::ExpirationDate(date))
    }

    pub fn index_id(self, id: Identifier) -> Self {
        self.option(ClaimOption::IndexId(id))
    }

    pub fn value_id(self, id: Identifier) -> Self {
        self.option(ClaimOption::ValueId(id))
    }

    pub fn id(self, id: Identifier, position: IdPosition) -> Self {
        self.option(ClaimOption::Id(id, position))
    }

    pub fn index_data(self, a: FieldElement, b: FieldElement) -> Self {
        self.option(ClaimOption::IndexData(a, b))
    }

    pub fn index_data_ints(self, a: Option<BigUint>, b: Option<BigUint>) -> Self {
        self.option(ClaimOption::IndexDataInts(a, b))
    }

    pub fn value_data(self, a: FieldElement, b: FieldElement) -> Self {
        self.option(ClaimOption::ValueData(a, b))
    }

    pub fn value_data_ints(self, a: Option<BigUint>, b: Option<BigUint>) -> Self {
        self.option(ClaimOption::ValueDataInts(a, b))
    }

    pub fn merklized_root(self, root: BigUint, position: MerklizedPosition) -> Self {
        self.option(ClaimOption::MerklizedRoot(root, position))
    }

    /// Apply every option in order.
    pub fn build(self) -> Result<Claim, ClaimError> {
        Claim::with_options(self.schema, self.options)
    }
}
