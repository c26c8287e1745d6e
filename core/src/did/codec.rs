//! DID ↔ identifier conversion.
//!
//! A registered identifier prints as
//! `did:<method>[:<blockchain>[:<network>]]:<base58>`, where the method,
//! blockchain and network are recovered from the identifier's two type
//! bytes through a [`Registry`]. Empty blockchain or network names (the
//! "no chain" entries) are omitted from the string.
//!
//! DIDs whose method is not registered still map to an identifier: the
//! SHA-256 of the DID string supplies the genesis and the type bytes are
//! the unsupported sentinel `0xFFFF`. Such identifiers never print back
//! as DIDs.

use thiserror::Error;
use tracing::warn;

use super::parser::{parse, DidParseError};
use super::uri::Did;
use crate::config::{
    DID_SCHEME, GENESIS_LENGTH, ID_TYPE_LENGTH, UNSUPPORTED_METHOD_BYTE, UNSUPPORTED_NETWORK_FLAG,
};
use crate::crypto::sha256;
use crate::identity::{IdError, Identifier};
use crate::primitives::FieldElement;
use crate::registry::{blockchain, method, network, Registry, RegistryError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DidError {
    /// The identifier's method byte is not in the registry.
    #[error("unsupported identifier: {0}")]
    UnsupportedId(String),

    /// The identifier carries the unsupported sentinel type.
    #[error("unknown DID method: unsupported DID")]
    UnknownDidMethod,

    /// The DID text and the identifier it embeds disagree.
    #[error("incorrect DID: {0}")]
    IncorrectDid(String),

    #[error(transparent)]
    Id(#[from] IdError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Parse(#[from] DidParseError),
}

/// Method, blockchain and network decoded from an identifier's type bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdParts<'r> {
    pub method: &'r str,
    pub blockchain: &'r str,
    pub network: &'r str,
}

impl IdParts<'_> {
    /// Whether these are the sentinel parts of an identifier minted from
    /// an unregistered DID.
    pub fn is_unsupported(&self) -> bool {
        self.method == method::OTHER
            && self.blockchain == blockchain::UNKNOWN
            && self.network == network::UNKNOWN
    }
}

/// Converts between DIDs and identifiers using a borrowed registry.
#[derive(Debug, Clone, Copy)]
pub struct DidCodec<'r> {
    registry: &'r Registry,
}

impl<'r> DidCodec<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Reverse-look-up the type bytes of `id`. The unsupported sentinel is
    /// returned as is.
    pub fn decode_id_parts(&self, id: &Identifier) -> Result<IdParts<'r>, DidError> {
        let method = self
            .registry
            .method_by_byte(id.method_byte())
            .map_err(|e| DidError::UnsupportedId(e.to_string()))?;
        let key = self.registry.network_by_flag(method, id.network_flag())?;
        Ok(IdParts {
            method,
            blockchain: &key.blockchain,
            network: &key.network,
        })
    }

    fn supported_parts(&self, id: &Identifier) -> Result<IdParts<'r>, DidError> {
        let parts = self.decode_id_parts(id)?;
        if parts.is_unsupported() {
            return Err(DidError::UnknownDidMethod);
        }
        Ok(parts)
    }

    pub fn method_from_id(&self, id: &Identifier) -> Result<&'r str, DidError> {
        Ok(self.supported_parts(id)?.method)
    }

    pub fn blockchain_from_id(&self, id: &Identifier) -> Result<&'r str, DidError> {
        Ok(self.supported_parts(id)?.blockchain)
    }

    pub fn network_from_id(&self, id: &Identifier) -> Result<&'r str, DidError> {
        Ok(self.supported_parts(id)?.network)
    }

    /// The DID of a registered identifier.
    ///
    /// The checksum needs no check here: an [`Identifier`] cannot be built
    /// with a bad one.
    pub fn did_from_identifier(&self, id: &Identifier) -> Result<Did, DidError> {
        let parts = self.supported_parts(id)?;

        let mut text = format!("{DID_SCHEME}:{}", parts.method);
        for segment in [parts.blockchain, parts.network] {
            if !segment.is_empty() {
                text.push(':');
                text.push_str(segment);
            }
        }
        text.push(':');
        text.push_str(&id.to_base58());

        // Re-parsing checks registry names against the DID grammar.
        Ok(parse(&text)?)
    }

    pub fn did_from_type_and_genesis(
        &self,
        id_type: [u8; ID_TYPE_LENGTH],
        genesis: [u8; GENESIS_LENGTH],
    ) -> Result<Did, DidError> {
        self.did_from_identifier(&Identifier::new(id_type, genesis)?)
    }

    /// The DID of the genesis identifier of an identity state.
    pub fn did_from_type_and_state(
        &self,
        id_type: [u8; ID_TYPE_LENGTH],
        state: &FieldElement,
    ) -> Result<Did, DidError> {
        self.did_from_identifier(&Identifier::from_identity_state(id_type, state)?)
    }

    /// The identifier a DID refers to.
    ///
    /// For a registered method the last id component is decoded and its
    /// type bytes must agree with the DID's method, blockchain and network
    /// text. An unregistered method falls back to
    /// [`identifier_from_unsupported_did`](Self::identifier_from_unsupported_did).
    pub fn identifier_from_did(&self, did: &Did) -> Result<Identifier, DidError> {
        match self.registry.method_byte(&did.method) {
            Ok(byte) if byte != UNSUPPORTED_METHOD_BYTE => {}
            _ => {
                warn!(method = %did.method, "DID method not registered, hashing DID");
                return self.identifier_from_unsupported_did(did);
            }
        }

        let (blockchain, network, encoded) = match did.id_strings.as_slice() {
            [id] => ("", "", id),
            [b, id] => (b.as_str(), "", id),
            [b, n, id] => (b.as_str(), n.as_str(), id),
            _ => {
                return Err(DidError::IncorrectDid(
                    "unexpected number of id strings".into(),
                ))
            }
        };

        let id = Identifier::from_base58(encoded)?;
        let parts = self.decode_id_parts(&id)?;

        if parts.method != did.method {
            return Err(DidError::IncorrectDid(
                "methods in identifier and DID are different".into(),
            ));
        }
        if parts.blockchain != blockchain {
            return Err(DidError::IncorrectDid(
                "blockchains in identifier and DID are different".into(),
            ));
        }
        if parts.network != network {
            return Err(DidError::IncorrectDid(
                "networks in identifier and DID are different".into(),
            ));
        }
        Ok(id)
    }

    /// An identifier for a DID outside the registry: genesis is the low 27
    /// bytes of `sha256(did_string)`, type is the unsupported sentinel.
    pub fn identifier_from_unsupported_did(&self, did: &Did) -> Result<Identifier, DidError> {
        let hash = sha256(did.to_did_string().as_bytes());
        let mut genesis = [0u8; GENESIS_LENGTH];
        genesis.copy_from_slice(&hash[hash.len() - GENESIS_LENGTH..]);
        Ok(Identifier::new(
            [UNSUPPORTED_METHOD_BYTE, UNSUPPORTED_NETWORK_FLAG],
            genesis,
        )?)
    }

    /// The EVM chain id of the blockchain and network a DID lives on.
    pub fn chain_id_from_did(&self, did: &Did) -> Result<u64, DidError> {
        let id = self.identifier_from_did(did)?;
        let parts = self.supported_parts(&id)?;
        Ok(self.registry.chain_id(parts.blockchain, parts.network)?)
    }
}
