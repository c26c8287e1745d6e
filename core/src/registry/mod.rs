//! # Registry
//!
//! The tables that give the two identifier type bytes a human-readable
//! meaning:
//!
//! - DID method name ↔ method byte (type byte 0)
//! - per method, `(blockchain, network)` ↔ network flag (type byte 1)
//! - `(blockchain, network)` ↔ EVM chain id
//!
//! A [`Registry`] is an ordinary value. Build one with
//! [`Registry::with_defaults`], extend it during startup, then share it by
//! reference. Mutation takes `&mut self`, so the borrow checker enforces a
//! single writer and lookups can run concurrently once registration is
//! done.
//!
//! ## Invariants
//!
//! - Method bytes are unique, and below the reserved `0xFF` sentinel.
//! - Within one method, each flag maps to exactly one `(blockchain, network)`.
//! - Each chain id maps to exactly one `(blockchain, network)`.
//!
//! A failed registration leaves the registry unchanged.

pub mod defaults;
pub mod flags;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::{ID_TYPE_LENGTH, UNSUPPORTED_METHOD_BYTE, UNSUPPORTED_NETWORK_FLAG};

pub use defaults::{blockchain, method, network};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The method is unknown or has no method byte.
    #[error("unsupported DID method: {0:?}")]
    UnsupportedDidMethod(String),

    /// No method is registered under this byte.
    #[error("unknown DID method byte: {0:#04x}")]
    UnknownMethodByte(u8),

    /// The method has no flag for this blockchain and network.
    #[error("network {key} is not supported for DID method {method:?}")]
    NetworkNotSupportedForDid { method: String, key: NetworkKey },

    /// The method has no `(blockchain, network)` under this flag.
    #[error("no blockchain registered for DID method {method:?} under flag {flag:#04x}")]
    UnsupportedBlockchainForDid { method: String, flag: u8 },

    /// The flag is already taken by another `(blockchain, network)`.
    #[error("flag {flag:#04x} for DID method {method:?} is already registered for {existing}")]
    FlagAlreadyRegistered {
        method: String,
        flag: u8,
        existing: NetworkKey,
    },

    /// The `(blockchain, network)` already has a different flag.
    #[error("network {key} for DID method {method:?} is already registered with flag {flag:#04x}")]
    NetworkAlreadyRegistered {
        method: String,
        key: NetworkKey,
        flag: u8,
    },

    /// The chain id or the key is already bound to something else.
    #[error("chain id {chain_id} for {key} collides with an existing registration")]
    ChainIdCollision { key: NetworkKey, chain_id: u64 },

    #[error("chain id not found for {0}")]
    ChainIdNotFound(NetworkKey),

    /// The byte is used by another method, or the method already has a
    /// different byte.
    #[error("DID method byte {byte:#04x} for {method:?} collides with an existing registration")]
    MethodByteCollision { method: String, byte: u8 },

    /// Bytes at or above the unsupported sentinel cannot be registered.
    #[error("DID method byte {0:#04x} is reserved")]
    MethodByteReserved(u8),

    /// The unsupported-method sentinel `""` is fixed at construction.
    #[error("the unsupported DID method sentinel cannot take registrations")]
    SentinelMethodReserved,

    /// A network without a blockchain has no DID form: the network segment
    /// would print in the blockchain position.
    #[error("network {network:?} for DID method {method:?} needs a blockchain")]
    NetworkWithoutBlockchain { method: String, network: String },

    /// No blockchain or network nibble left to allocate.
    #[error("blockchain or network space exhausted for DID method {method:?}")]
    BlockchainOrNetworkSpaceExhausted { method: String },
}

// ---------------------------------------------------------------------------
// Keys and requests
// ---------------------------------------------------------------------------

/// A `(blockchain, network)` pair. Either side may be empty.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NetworkKey {
    pub blockchain: String,
    pub network: String,
}

impl NetworkKey {
    pub fn new(blockchain: impl Into<String>, network: impl Into<String>) -> Self {
        Self {
            blockchain: blockchain.into(),
            network: network.into(),
        }
    }
}

impl fmt::Display for NetworkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.blockchain, self.network)
    }
}

/// One composite registration: method, network flag and optionally the
/// method byte and chain id.
///
/// ```
/// use idcore::{DidMethodNetworkRequest, Registry};
///
/// let json = r#"{"method":"test","methodByte":3,"blockchain":"chain",
///                "network":"net","networkFlag":17,"chainId":4242}"#;
/// let request: DidMethodNetworkRequest = serde_json::from_str(json).unwrap();
///
/// let mut registry = Registry::new();
/// registry.register_did_method_network(&request).unwrap();
/// assert_eq!(registry.id_type("test", "chain", "net").unwrap(), [0x03, 0x11]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DidMethodNetworkRequest {
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method_byte: Option<u8>,
    pub blockchain: String,
    pub network: String,
    pub network_flag: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,
}

impl DidMethodNetworkRequest {
    pub fn new(
        method: impl Into<String>,
        blockchain: impl Into<String>,
        network: impl Into<String>,
        network_flag: u8,
    ) -> Self {
        Self {
            method: method.into(),
            method_byte: None,
            blockchain: blockchain.into(),
            network: network.into(),
            network_flag,
            chain_id: None,
        }
    }

    pub fn with_method_byte(mut self, byte: u8) -> Self {
        self.method_byte = Some(byte);
        self
    }

    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = Some(chain_id);
        self
    }

    fn key(&self) -> NetworkKey {
        NetworkKey::new(&self.blockchain, &self.network)
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct MethodEntry {
    pub(crate) byte: Option<u8>,
    pub(crate) networks: BTreeMap<NetworkKey, u8>,
}

/// Method, blockchain, network and chain-id tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    pub(crate) blockchains: BTreeSet<String>,
    pub(crate) networks: BTreeSet<String>,
    pub(crate) methods: BTreeMap<String, MethodEntry>,
    pub(crate) chain_ids: BTreeMap<NetworkKey, u64>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// A registry holding only the unsupported sentinel: method `""` with
    /// byte `0xFF` and `unknown:unknown` flagged `0xFF`.
    pub fn new() -> Self {
        let sentinel = NetworkKey::new(blockchain::UNKNOWN, network::UNKNOWN);
        let mut methods = BTreeMap::new();
        methods.insert(
            method::OTHER.to_string(),
            MethodEntry {
                byte: Some(UNSUPPORTED_METHOD_BYTE),
                networks: BTreeMap::from([(sentinel, UNSUPPORTED_NETWORK_FLAG)]),
            },
        );
        Self {
            blockchains: BTreeSet::from([blockchain::UNKNOWN.to_string()]),
            networks: BTreeSet::from([network::UNKNOWN.to_string()]),
            methods,
            chain_ids: BTreeMap::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Registration
    // -----------------------------------------------------------------------

    pub fn register_blockchain(&mut self, name: &str) {
        if self.blockchains.insert(name.to_string()) {
            debug!(blockchain = name, "registered blockchain");
        }
    }

    pub fn register_network(&mut self, name: &str) {
        if self.networks.insert(name.to_string()) {
            debug!(network = name, "registered network");
        }
    }

    pub fn register_did_method(&mut self, name: &str, byte: u8) -> Result<(), RegistryError> {
        self.check_method_byte(name, byte)?;
        self.methods.entry(name.to_string()).or_default().byte = Some(byte);
        debug!(method = name, byte, "registered DID method");
        Ok(())
    }

    pub fn register_chain_id(
        &mut self,
        blockchain: &str,
        network: &str,
        chain_id: u64,
    ) -> Result<(), RegistryError> {
        let key = NetworkKey::new(blockchain, network);
        self.check_chain_id(&key, chain_id)?;
        debug!(%key, chain_id, "registered chain id");
        self.chain_ids.insert(key, chain_id);
        Ok(())
    }

    /// Register a method network and everything it references. Repeating
    /// an identical registration is a no-op.
    pub fn register_did_method_network(
        &mut self,
        request: &DidMethodNetworkRequest,
    ) -> Result<(), RegistryError> {
        let key = request.key();

        // Validate everything before touching any table.
        check_did_layout(request)?;
        if let Some(byte) = request.method_byte {
            self.check_method_byte(&request.method, byte)?;
        }
        if let Some(chain_id) = request.chain_id {
            self.check_chain_id(&key, chain_id)?;
        }
        self.check_network_flag(&request.method, &key, request.network_flag)?;

        self.register_blockchain(&request.blockchain);
        self.register_network(&request.network);
        let entry = self.methods.entry(request.method.clone()).or_default();
        if let Some(byte) = request.method_byte {
            entry.byte = Some(byte);
        }
        entry.networks.insert(key.clone(), request.network_flag);
        if let Some(chain_id) = request.chain_id {
            self.chain_ids.insert(key.clone(), chain_id);
        }

        debug!(
            method = %request.method,
            %key,
            flag = request.network_flag,
            "registered DID method network"
        );
        Ok(())
    }

    /// Return the flag of `(blockchain, network)` under `method`, allocating
    /// and registering the next free one if there is none yet.
    pub fn allocate_network_flag(
        &mut self,
        method: &str,
        blockchain: &str,
        network: &str,
    ) -> Result<u8, RegistryError> {
        if let Ok(flag) = self.network_flag(method, blockchain, network) {
            return Ok(flag);
        }
        let empty = BTreeMap::new();
        let entries = self.methods.get(method).map_or(&empty, |m| &m.networks);
        let flag = flags::next_flag(method, entries, blockchain)?;
        self.register_did_method_network(&DidMethodNetworkRequest::new(
            method, blockchain, network, flag,
        ))?;
        Ok(flag)
    }

    fn check_method_byte(&self, name: &str, byte: u8) -> Result<(), RegistryError> {
        if byte >= UNSUPPORTED_METHOD_BYTE {
            return Err(RegistryError::MethodByteReserved(byte));
        }
        let collision = || RegistryError::MethodByteCollision {
            method: name.to_string(),
            byte,
        };
        if let Some(existing) = self.methods.get(name).and_then(|m| m.byte) {
            if existing != byte {
                return Err(collision());
            }
        }
        if self
            .methods
            .iter()
            .any(|(other, m)| other != name && m.byte == Some(byte))
        {
            return Err(collision());
        }
        Ok(())
    }

    fn check_chain_id(&self, key: &NetworkKey, chain_id: u64) -> Result<(), RegistryError> {
        let collision = || RegistryError::ChainIdCollision {
            key: key.clone(),
            chain_id,
        };
        if let Some(existing) = self.chain_ids.get(key) {
            if *existing != chain_id {
                return Err(collision());
            }
        }
        if self
            .chain_ids
            .iter()
            .any(|(other, id)| other != key && *id == chain_id)
        {
            return Err(collision());
        }
        Ok(())
    }

    fn check_network_flag(
        &self,
        method: &str,
        key: &NetworkKey,
        flag: u8,
    ) -> Result<(), RegistryError> {
        let Some(entry) = self.methods.get(method) else {
            return Ok(());
        };
        if let Some(existing) = entry.networks.get(key) {
            if *existing != flag {
                return Err(RegistryError::NetworkAlreadyRegistered {
                    method: method.to_string(),
                    key: key.clone(),
                    flag: *existing,
                });
            }
            return Ok(());
        }
        if let Some((other, _)) = entry.networks.iter().find(|(_, f)| **f == flag) {
            return Err(RegistryError::FlagAlreadyRegistered {
                method: method.to_string(),
                flag,
                existing: other.clone(),
            });
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Lookups
    // -----------------------------------------------------------------------

    pub fn has_blockchain(&self, name: &str) -> bool {
        self.blockchains.contains(name)
    }

    pub fn has_network(&self, name: &str) -> bool {
        self.networks.contains(name)
    }

    /// The method byte of `method`.
    pub fn method_byte(&self, method: &str) -> Result<u8, RegistryError> {
        self.methods
            .get(method)
            .and_then(|m| m.byte)
            .ok_or_else(|| RegistryError::UnsupportedDidMethod(method.to_string()))
    }

    /// The network flag of `(blockchain, network)` under `method`.
    pub fn network_flag(
        &self,
        method: &str,
        blockchain: &str,
        network: &str,
    ) -> Result<u8, RegistryError> {
        let key = NetworkKey::new(blockchain, network);
        self.methods
            .get(method)
            .and_then(|m| m.networks.get(&key).copied())
            .ok_or_else(|| RegistryError::NetworkNotSupportedForDid {
                method: method.to_string(),
                key,
            })
    }

    /// The two identifier type bytes for a method network.
    pub fn id_type(
        &self,
        method: &str,
        blockchain: &str,
        network: &str,
    ) -> Result<[u8; ID_TYPE_LENGTH], RegistryError> {
        let byte = self.method_byte(method)?;
        let flag = self.network_flag(method, blockchain, network)?;
        Ok([byte, flag])
    }

    /// The method registered under `byte`.
    pub fn method_by_byte(&self, byte: u8) -> Result<&str, RegistryError> {
        self.methods
            .iter()
            .find(|(_, m)| m.byte == Some(byte))
            .map(|(name, _)| name.as_str())
            .ok_or(RegistryError::UnknownMethodByte(byte))
    }

    /// The `(blockchain, network)` registered under `flag` for `method`.
    pub fn network_by_flag(&self, method: &str, flag: u8) -> Result<&NetworkKey, RegistryError> {
        self.methods
            .get(method)
            .and_then(|m| m.networks.iter().find(|(_, f)| **f == flag))
            .map(|(key, _)| key)
            .ok_or_else(|| RegistryError::UnsupportedBlockchainForDid {
                method: method.to_string(),
                flag,
            })
    }

    pub fn chain_id(&self, blockchain: &str, network: &str) -> Result<u64, RegistryError> {
        let key = NetworkKey::new(blockchain, network);
        self.chain_ids
            .get(&key)
            .copied()
            .ok_or(RegistryError::ChainIdNotFound(key))
    }
}

// Only registrations whose DID text decodes back to the same type bytes.
fn check_did_layout(request: &DidMethodNetworkRequest) -> Result<(), RegistryError> {
    if request.method == method::OTHER {
        return Err(RegistryError::SentinelMethodReserved);
    }
    if request.blockchain.is_empty() && !request.network.is_empty() {
        return Err(RegistryError::NetworkWithoutBlockchain {
            method: request.method.clone(),
            network: request.network.clone(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
