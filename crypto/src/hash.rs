//! Blake2b hashing and digest reduction.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};

type Blake2b256 = Blake2b<U32>;

/// Compute a 256-bit Blake2b hash of arbitrary data.
pub fn blake2b_256(data: &[u8]) -> [u8; 32] {
    blake2b_256_multi(&[data])
}

/// Hash multiple byte slices in sequence (avoids concatenation allocation).
pub fn blake2b_256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    for part in parts {
        hasher.update(part);
    }
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Interpret `digest` as a big-endian 256-bit integer and reduce it modulo `modulus`.
///
/// Returns `None` when `modulus` is zero.
pub fn reduce_mod(digest: &[u8; 32], modulus: u64) -> Option<u64> {
    if modulus == 0 {
        return None;
    }
    let m = modulus as u128;
    // Horner's rule; the accumulator stays below m * 256, well inside u128.
    let rem = digest
        .iter()
        .fold(0u128, |acc, &byte| ((acc << 8) | byte as u128) % m);
    Some(rem as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blake2b_deterministic() {
        assert_eq!(blake2b_256(b"rotating pool"), blake2b_256(b"rotating pool"));
    }

    #[test]
    fn blake2b_different_inputs() {
        assert_ne!(blake2b_256(b"hello"), blake2b_256(b"world"));
    }

    #[test]
    fn blake2b_multi_equivalent() {
        let single = blake2b_256(b"helloworld");
        let multi = blake2b_256_multi(&[b"hello", b"world"]);
        assert_eq!(single, multi);
    }

    #[test]
    fn reduce_mod_zero_modulus() {
        assert_eq!(reduce_mod(&[7u8; 32], 0), None);
    }

    #[test]
    fn reduce_mod_small_values() {
        let mut digest = [0u8; 32];
        digest[31] = 10;
        assert_eq!(reduce_mod(&digest, 3), Some(1));
        digest[30] = 1; // 266
        assert_eq!(reduce_mod(&digest, 7), Some(266 % 7));
    }

    #[test]
    fn reduce_mod_always_in_range() {
        let digest = blake2b_256(b"range");
        for m in 1..50u64 {
            let r = reduce_mod(&digest, m).unwrap();
            assert!(r < m);
        }
    }

    #[test]
    fn reduce_mod_matches_u128_for_low_digest() {
        let mut digest = [0u8; 32];
        let value: u128 = 0x0123_4567_89ab_cdef_0011_2233_4455_6677;
        digest[16..].copy_from_slice(&value.to_be_bytes());
        assert_eq!(reduce_mod(&digest, 1_000_003), Some((value % 1_000_003) as u64));
    }
}
