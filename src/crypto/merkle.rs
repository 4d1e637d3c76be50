//! Merkle tree over transaction ids
//!
//! A block with a single transaction has that transaction's id as its root,
//! which is all the genesis block needs.

use super::{hash_pair, Hash256};

/// Compute the merkle root of a list of hashes
///
/// Empty input gives the zero hash. Odd levels duplicate their last element.
pub fn compute_merkle_root(hashes: &[Hash256]) -> Hash256 {
    match hashes {
        [] => return Hash256::zero(),
        [only] => return *only,
        _ => {}
    }

    let mut current_level: Vec<Hash256> = hashes.to_vec();

    while current_level.len() > 1 {
        if let Some(&last) = current_level.last() {
            if current_level.len() % 2 == 1 {
                current_level.push(last);
            }
        }

        current_level = current_level
            .chunks(2)
            .map(|pair| hash_pair(&pair[0], &pair[1]))
            .collect();
    }

    current_level[0]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::sha256;

    fn make_hashes(n: usize) -> Vec<Hash256> {
        (0..n).map(|i| sha256(&i.to_le_bytes())).collect()
    }

    #[test]
    fn test_empty_merkle_root() {
        assert_eq!(compute_merkle_root(&[]), Hash256::zero());
    }

    #[test]
    fn test_single_element_is_root() {
        let hashes = make_hashes(1);
        assert_eq!(compute_merkle_root(&hashes), hashes[0]);
    }

    #[test]
    fn test_two_elements() {
        let hashes = make_hashes(2);
        assert_eq!(
            compute_merkle_root(&hashes),
            hash_pair(&hashes[0], &hashes[1])
        );
    }

    #[test]
    fn test_odd_count_duplicates_last() {
        let hashes = make_hashes(3);
        let left = hash_pair(&hashes[0], &hashes[1]);
        let right = hash_pair(&hashes[2], &hashes[2]);
        assert_eq!(compute_merkle_root(&hashes), hash_pair(&left, &right));
    }
}
