//! Network flag packing.
//!
//! The second identifier type byte packs a blockchain index in the high
//! nibble and a network index in the low nibble: `0x12` is blockchain 1,
//! network 2. New flags are allocated by bumping one of the two nibbles.

use std::collections::BTreeMap;

use super::{NetworkKey, RegistryError};
use crate::config::MAX_FLAG_NIBBLE;

/// Pack two nibbles into a flag byte. Inputs above `0xF` are masked.
pub const fn compose(blockchain: u8, network: u8) -> u8 {
    ((blockchain & MAX_FLAG_NIBBLE) << 4) | (network & MAX_FLAG_NIBBLE)
}

pub const fn blockchain_nibble(flag: u8) -> u8 {
    flag >> 4
}

pub const fn network_nibble(flag: u8) -> u8 {
    flag & MAX_FLAG_NIBBLE
}

/// Next free flag for `blockchain` among a method's `entries`.
///
/// A blockchain already present keeps its high nibble and takes the
/// largest network nibble plus one. A new blockchain takes the largest
/// blockchain nibble plus one, with network nibble 1.
pub(crate) fn next_flag(
    method: &str,
    entries: &BTreeMap<NetworkKey, u8>,
    blockchain: &str,
) -> Result<u8, RegistryError> {
    let exhausted = || RegistryError::BlockchainOrNetworkSpaceExhausted {
        method: method.to_string(),
    };

    let siblings: Vec<u8> = entries
        .iter()
        .filter(|(key, _)| key.blockchain == blockchain)
        .map(|(_, flag)| *flag)
        .collect();

    let (high, low) = match siblings.iter().max() {
        Some(&max) => {
            let low = siblings.iter().map(|f| network_nibble(*f)).max().unwrap_or(0) + 1;
            (blockchain_nibble(max), low)
        }
        None => {
            let high = entries
                .values()
                .map(|f| blockchain_nibble(*f))
                .max()
                .unwrap_or(0)
                + 1;
            (high, 1)
        }
    };

    if high > MAX_FLAG_NIBBLE || low > MAX_FLAG_NIBBLE {
        return Err(exhausted());
    }
    let flag = compose(high, low);
    if entries.values().any(|f| *f == flag) {
        return Err(exhausted());
    }
    Ok(flag)
}
