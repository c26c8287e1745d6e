//! Byte-level helpers: identifier checksums, little-endian integer
//! conversion and Base58.

use num_bigint::BigUint;

use crate::config::{CHECKSUM_LENGTH, GENESIS_LENGTH, ID_LENGTH, ID_TYPE_LENGTH};

/// Checksum over `type || genesis`: the byte sum, wrapped to 16 bits and
/// emitted little-endian.
pub fn checksum(id_type: &[u8; ID_TYPE_LENGTH], genesis: &[u8; GENESIS_LENGTH]) -> [u8; 2] {
    let sum = id_type
        .iter()
        .chain(genesis.iter())
        .fold(0u16, |acc, b| acc.wrapping_add(u16::from(*b)));
    sum.to_le_bytes()
}

/// Split a raw 31-byte identifier into `(type, genesis, checksum)`.
pub fn decompose(
    bytes: &[u8; ID_LENGTH],
) -> ([u8; ID_TYPE_LENGTH], [u8; GENESIS_LENGTH], [u8; CHECKSUM_LENGTH]) {
    let mut id_type = [0u8; ID_TYPE_LENGTH];
    let mut genesis = [0u8; GENESIS_LENGTH];
    let mut check = [0u8; CHECKSUM_LENGTH];
    id_type.copy_from_slice(&bytes[..ID_TYPE_LENGTH]);
    genesis.copy_from_slice(&bytes[ID_TYPE_LENGTH..ID_TYPE_LENGTH + GENESIS_LENGTH]);
    check.copy_from_slice(&bytes[ID_LENGTH - CHECKSUM_LENGTH..]);
    (id_type, genesis, check)
}

/// Whether the trailing checksum of a raw identifier matches its content.
///
/// An all-zero checksum is never valid, which also rules out the all-zero
/// identifier.
pub fn checksum_is_valid(bytes: &[u8; ID_LENGTH]) -> bool {
    let (id_type, genesis, check) = decompose(bytes);
    if check == [0, 0] {
        return false;
    }
    checksum(&id_type, &genesis) == check
}

/// Encode `n` as exactly `N` little-endian bytes, dropping anything above
/// the low `N` bytes.
pub fn int_to_le_bytes<const N: usize>(n: &BigUint) -> [u8; N] {
    let mut out = [0u8; N];
    for (dst, src) in out.iter_mut().zip(n.to_bytes_le()) {
        *dst = src;
    }
    out
}

/// Interpret `bytes` as an unsigned little-endian integer.
pub fn le_bytes_to_int(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_le(bytes)
}

/// Base58 (Bitcoin alphabet) encoding.
pub fn to_base58(bytes: &[u8]) -> String {
    bs58::encode(bytes).into_string()
}

/// Base58 (Bitcoin alphabet) decoding.
pub fn from_base58(s: &str) -> Result<Vec<u8>, bs58::decode::Error> {
    bs58::decode(s).into_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checksum_of_max_bytes() {
        let id_type = [0xff; 2];
        let genesis = [0xff; 27];
        // 29 × 0xff = 0x1ce3
        assert_eq!(checksum(&id_type, &genesis), [0xe3, 0x1c]);
    }

    #[test]
    fn checksum_of_zero_is_zero_and_invalid() {
        assert_eq!(checksum(&[0, 0], &[0; 27]), [0, 0]);
        assert!(!checksum_is_valid(&[0u8; 31]));
    }

    #[test]
    fn checksum_detects_corruption() {
        let mut raw = [0u8; 31];
        raw[0] = 0x01;
        raw[5] = 0x42;
        let (t, g, _) = decompose(&raw);
        raw[29..].copy_from_slice(&checksum(&t, &g));
        assert!(checksum_is_valid(&raw));

        raw[10] ^= 0x01;
        assert!(!checksum_is_valid(&raw));
    }

    #[test]
    fn any_single_byte_flip_is_caught() {
        let mut raw = [0u8; ID_LENGTH];
        raw[..ID_TYPE_LENGTH].copy_from_slice(&[0x02, 0x13]);
        for (i, b) in raw[ID_TYPE_LENGTH..ID_TYPE_LENGTH + GENESIS_LENGTH]
            .iter_mut()
            .enumerate()
        {
            *b = (i as u8).wrapping_mul(37);
        }
        let (t, g, _) = decompose(&raw);
        raw[ID_LENGTH - CHECKSUM_LENGTH..].copy_from_slice(&checksum(&t, &g));
        assert!(checksum_is_valid(&raw));

        // Type bytes, genesis bytes and both checksum bytes.
        for i in 0..ID_LENGTH {
            let mut flipped = raw;
            flipped[i] ^= 0x01;
            assert!(!checksum_is_valid(&flipped), "flip at byte {i} went unnoticed");
        }
    }

    #[test]
    fn int_to_le_bytes_pads_and_truncates() {
        let n = BigUint::from(0x0102_0304u32);
        assert_eq!(int_to_le_bytes::<6>(&n), [4, 3, 2, 1, 0, 0]);
        assert_eq!(int_to_le_bytes::<2>(&n), [4, 3]);
        assert_eq!(int_to_le_bytes::<4>(&BigUint::from(0u8)), [0; 4]);
    }

    #[test]
    fn le_bytes_round_trip() {
        let n = BigUint::parse_bytes(b"123456789012345678901234567890", 10).unwrap();
        let bytes: [u8; 32] = int_to_le_bytes(&n);
        assert_eq!(le_bytes_to_int(&bytes), n);
    }

    #[test]
    fn base58_rejects_invalid_alphabet() {
        assert!(from_base58("0OIl").is_err());
        assert_eq!(from_base58(&to_base58(&[0, 0, 1])).unwrap(), vec![0, 0, 1]);
    }
}
