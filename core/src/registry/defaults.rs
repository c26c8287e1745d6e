//! Builtin methods, blockchains, networks, flags and chain ids.

use super::flags::compose;
use super::{MethodEntry, NetworkKey, Registry};

/// DID method names.
pub mod method {
    pub const IDEN3: &str = "iden3";
    pub const POLYGON_ID: &str = "polygonid";
    /// Sentinel for identifiers minted outside the registry.
    pub const OTHER: &str = "";
}

/// Blockchain names.
pub mod blockchain {
    pub const ETHEREUM: &str = "eth";
    pub const POLYGON: &str = "polygon";
    pub const PRIVADO: &str = "privado";
    pub const LINEA: &str = "linea";
    pub const UNKNOWN: &str = "unknown";
    /// No chain: the DID carries no blockchain segment.
    pub const NO_CHAIN: &str = "";
}

/// Network names.
pub mod network {
    pub const MAIN: &str = "main";
    pub const MUMBAI: &str = "mumbai";
    pub const AMOY: &str = "amoy";
    pub const GOERLI: &str = "goerli";
    pub const SEPOLIA: &str = "sepolia";
    pub const ZKEVM: &str = "zkevm";
    pub const CARDONA: &str = "cardona";
    pub const TEST: &str = "test";
    pub const UNKNOWN: &str = "unknown";
    /// No network: the DID carries no network segment.
    pub const NO_NETWORK: &str = "";
}

use blockchain as bc;
use network as net;

const METHOD_BYTES: &[(&str, u8)] = &[(method::IDEN3, 0x01), (method::POLYGON_ID, 0x02)];

/// Flags shared by `iden3` and `polygonid`.
const NETWORK_FLAGS: &[(&str, &str, u8)] = &[
    (bc::NO_CHAIN, net::NO_NETWORK, compose(0x0, 0x0)),
    (bc::POLYGON, net::MAIN, compose(0x1, 0x1)),
    (bc::POLYGON, net::MUMBAI, compose(0x1, 0x2)),
    (bc::POLYGON, net::AMOY, compose(0x1, 0x3)),
    (bc::POLYGON, net::ZKEVM, compose(0x1, 0x4)),
    (bc::POLYGON, net::CARDONA, compose(0x1, 0x5)),
    (bc::ETHEREUM, net::MAIN, compose(0x2, 0x1)),
    (bc::ETHEREUM, net::GOERLI, compose(0x2, 0x2)),
    (bc::ETHEREUM, net::SEPOLIA, compose(0x2, 0x3)),
    (bc::PRIVADO, net::MAIN, compose(0xA, 0x1)),
    (bc::PRIVADO, net::TEST, compose(0xA, 0x2)),
    (bc::LINEA, net::MAIN, compose(0x4, 0x9)),
    (bc::LINEA, net::SEPOLIA, compose(0x4, 0x8)),
];

const CHAIN_IDS: &[(&str, &str, u64)] = &[
    (bc::ETHEREUM, net::MAIN, 1),
    (bc::ETHEREUM, net::GOERLI, 5),
    (bc::ETHEREUM, net::SEPOLIA, 11_155_111),
    (bc::POLYGON, net::MAIN, 137),
    (bc::POLYGON, net::MUMBAI, 80_001),
    (bc::POLYGON, net::AMOY, 80_002),
    (bc::POLYGON, net::ZKEVM, 1101),
    (bc::POLYGON, net::CARDONA, 2442),
    (bc::PRIVADO, net::MAIN, 21_000),
    (bc::PRIVADO, net::TEST, 21_001),
    (bc::LINEA, net::MAIN, 59_144),
    (bc::LINEA, net::SEPOLIA, 59_141),
];

impl Registry {
    /// A registry preloaded with the builtin tables.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        for (b, n, _) in NETWORK_FLAGS {
            registry.blockchains.insert((*b).to_string());
            registry.networks.insert((*n).to_string());
        }

        for (name, byte) in METHOD_BYTES {
            let networks = NETWORK_FLAGS
                .iter()
                .map(|(b, n, flag)| (NetworkKey::new(*b, *n), *flag))
                .collect();
            registry.methods.insert(
                (*name).to_string(),
                MethodEntry {
                    byte: Some(*byte),
                    networks,
                },
            );
        }

        for (b, n, id) in CHAIN_IDS {
            registry.chain_ids.insert(NetworkKey::new(*b, *n), *id);
        }

        registry
    }
}
