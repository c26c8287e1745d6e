//! # Hashing Utilities
//!
//! [`FieldHasher`] is the seam between the claim engine and whatever hash
//! the host's Merkle tree uses. [`PoseidonHasher`] is the default: the
//! circom-parameterized Poseidon permutation, so claim hashes computed here
//! line up with the hashes checked inside identity circuits.

use ark_bn254::Fr;
use light_poseidon::{Poseidon, PoseidonHasher as _};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Errors raised by a [`FieldHasher`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HashError {
    /// The Poseidon instance could not be built or rejected its inputs
    /// (typically an unsupported arity).
    #[error("poseidon hash failed: {0}")]
    Poseidon(String),
}

/// A hash from a sequence of field elements to a single field element.
///
/// Implementations must be deterministic. The claim engine calls this with
/// exactly four inputs (one half of a claim); profile derivation calls it
/// with two.
pub trait FieldHasher {
    /// Hash `inputs` to a field element.
    fn hash(&self, inputs: &[Fr]) -> Result<Fr, HashError>;
}

/// Circom-compatible Poseidon over the BN254 scalar field.
#[derive(Debug, Clone, Copy, Default)]
pub struct PoseidonHasher;

impl FieldHasher for PoseidonHasher {
    fn hash(&self, inputs: &[Fr]) -> Result<Fr, HashError> {
        let mut poseidon = Poseidon::<Fr>::new_circom(inputs.len())
            .map_err(|e| HashError::Poseidon(e.to_string()))?;
        poseidon
            .hash(inputs)
            .map_err(|e| HashError::Poseidon(e.to_string()))
    }
}

/// Compute the SHA-256 digest of `data` as a fixed-size array.
///
/// # Example
///
/// ```
/// use idcore::crypto::sha256;
///
/// let digest = sha256(b"genesistest");
/// assert_eq!(digest.len(), 32);
/// ```
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_ff::PrimeField;

    #[test]
    fn sha256_known_vector() {
        // SHA-256("abc") from FIPS 180-2.
        assert_eq!(
            hex::encode(sha256(b"abc")),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn poseidon_is_deterministic() {
        let inputs = [Fr::from(1u64), Fr::from(2u64)];
        let a = PoseidonHasher.hash(&inputs).unwrap();
        let b = PoseidonHasher.hash(&inputs).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn poseidon_circom_vector() {
        // poseidon([1, 2]) as published by circomlibjs.
        let h = PoseidonHasher
            .hash(&[Fr::from(1u64), Fr::from(2u64)])
            .unwrap();
        let expected = Fr::from_be_bytes_mod_order(
            &hex::decode("115cc0f5e7d690413df64c6b9662e9cf2a3617f2743245519e19607a4417189a")
                .unwrap(),
        );
        assert_eq!(h, expected);
    }

    #[test]
    fn poseidon_input_order_matters() {
        let a = PoseidonHasher
            .hash(&[Fr::from(1u64), Fr::from(2u64)])
            .unwrap();
        let b = PoseidonHasher
            .hash(&[Fr::from(2u64), Fr::from(1u64)])
            .unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn poseidon_rejects_empty_input() {
        assert!(PoseidonHasher.hash(&[]).is_err());
    }
}
