// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::address::RecipientAddress;
use crate::codec::{LeafEncoding, NodeHash};
use crate::error::{Error, Result};
use crate::payload::RewardEntry;
use crate::tree::DistributionTree;
use crate::verify::verify_leaf;
use serde::{Deserialize, Serialize};

/// An inclusion proof: one sibling hash and one path flag per level, from the
/// leaf up to just below the root.
///
/// `path[s]` is `true` when `siblings[s]` is the left operand at step `s`, so
/// the verifier hashes `sibling || current`; otherwise it hashes
/// `current || sibling`.
///
/// Proofs share nothing with the tree they came from and can be handed to any
/// verifier together with the claimed entry and the published root.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MerkleProof {
    pub siblings: Vec<NodeHash>,
    pub path: Vec<bool>,
}

impl MerkleProof {
    pub fn new(siblings: Vec<NodeHash>, path: Vec<bool>) -> Self {
        Self { siblings, path }
    }

    /// Number of hashing steps. Only meaningful when `siblings` and `path`
    /// have equal length; verification rejects proofs where they don't.
    pub fn depth(&self) -> usize {
        self.siblings.len()
    }

    /// Verify this proof for `entry` against `root`.
    ///
    /// # Returns
    ///
    /// `true` if folding the entry's leaf through the proof reproduces `root`
    pub fn verify(&self, encoding: LeafEncoding, entry: &RewardEntry, root: &NodeHash) -> bool {
        verify_leaf(encoding, &encoding.hash_leaf(entry), self, root).is_ok()
    }
}

impl DistributionTree {
    /// Generate the inclusion proof for the leaf at `index`.
    ///
    /// `expected` is the entry the caller believes sits at that index. It is
    /// hashed and compared to the stored leaf first, so a caller whose view of
    /// the entry list has drifted from the tree gets an error instead of a
    /// meaningless proof.
    ///
    /// # Errors
    ///
    /// - `IndexOutOfRange` if `index >= padded_leaf_count()`
    /// - `LeafMismatch` if `expected` does not hash to the stored leaf
    pub fn generate_proof(&self, index: usize, expected: &RewardEntry) -> Result<MerkleProof> {
        let leaf_count = self.padded_leaf_count();
        if index >= leaf_count {
            warn!("Proof requested for leaf {index}, tree has {leaf_count} leaves");
            return Err(Error::IndexOutOfRange { index, leaf_count });
        }

        let leaf = self.encoding().hash_leaf(expected);
        if self.leaf(index) != Some(&leaf) {
            warn!("Expected entry for {} does not match leaf {index}", expected.address);
            return Err(Error::LeafMismatch { index });
        }

        let levels = self.levels();
        let depth = levels.len() - 1;
        let mut siblings = Vec::with_capacity(depth);
        let mut path = Vec::with_capacity(depth);

        // Walk from the leaf level up to the level below the root
        let mut position = index;
        for level in &levels[..depth] {
            let sibling_is_left = position % 2 == 1;
            let sibling_position = if sibling_is_left {
                position - 1
            } else {
                position + 1
            };
            let sibling = level.get(sibling_position).copied().ok_or_else(|| {
                Error::Internal(format!("Missing sibling {sibling_position} in level"))
            })?;
            siblings.push(sibling);
            path.push(sibling_is_left);
            position /= 2;
        }

        let proof = MerkleProof { siblings, path };

        if self.verifies_generated_proofs()
            && verify_leaf(self.encoding(), &leaf, &proof, &self.root()).is_err()
        {
            error!("Generated proof for leaf {index} does not reproduce root {}", self.root());
            return Err(Error::Internal(format!(
                "Generated proof for leaf {index} is invalid"
            )));
        }

        debug!("Generated proof for leaf {index} (depth {})", proof.depth());
        Ok(proof)
    }

    /// Look up a recipient and generate its proof.
    ///
    /// # Returns
    ///
    /// The recipient's leaf index, entry and proof
    pub fn proof_for(
        &self,
        address: &RecipientAddress,
    ) -> Result<(usize, RewardEntry, MerkleProof)> {
        let (index, entry) = self.find(address)?;
        let entry = entry.clone();
        let proof = self.generate_proof(index, &entry)?;
        Ok((index, entry, proof))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DistributionConfig;
    use crate::payload::LeafPayload;

    fn make_test_entries(count: usize) -> Vec<RewardEntry> {
        (0..count)
            .map(|i| {
                let mut bytes = [0u8; 32];
                bytes[..8].copy_from_slice(&(i as u64 + 1).to_be_bytes());
                RewardEntry::new(RecipientAddress::new(bytes), LeafPayload::token(i as u64))
            })
            .collect()
    }

    fn make_tree(count: usize) -> DistributionTree {
        DistributionTree::build(make_test_entries(count), &DistributionConfig::default()).unwrap()
    }

    #[test]
    fn test_proof_for_every_leaf_verifies() {
        let tree = make_tree(13);
        for (index, entry) in tree.entries().iter().enumerate() {
            let proof = tree.generate_proof(index, entry).unwrap();
            assert_eq!(proof.depth(), 4);
            assert_eq!(proof.path.len(), 4);
            assert!(proof.verify(tree.encoding(), entry, &tree.root()));
        }
    }

    #[test]
    fn test_path_bits_follow_index_parity() {
        let tree = make_tree(8);
        let entry = tree.entry(5).unwrap().clone();
        let proof = tree.generate_proof(5, &entry).unwrap();

        // 5 = 0b101: right child, then left child, then right child
        assert_eq!(proof.path, vec![true, false, true]);
        assert_eq!(proof.siblings[0], *tree.leaf(4).unwrap());
        assert_eq!(proof.siblings[1], tree.level(1).unwrap()[3]);
        assert_eq!(proof.siblings[2], tree.level(2).unwrap()[0]);
    }

    #[test]
    fn test_index_out_of_range() {
        let tree = make_tree(3);
        let entry = tree.entry(0).unwrap().clone();
        assert!(matches!(
            tree.generate_proof(4, &entry),
            Err(Error::IndexOutOfRange {
                index: 4,
                leaf_count: 4
            })
        ));
    }

    #[test]
    fn test_leaf_mismatch() {
        let tree = make_tree(3);
        let mut entry = tree.entry(1).unwrap().clone();
        entry.amounts = LeafPayload::token(999_999);
        assert!(matches!(
            tree.generate_proof(1, &entry),
            Err(Error::LeafMismatch { index: 1 })
        ));

        let other = tree.entry(2).unwrap().clone();
        assert!(matches!(
            tree.generate_proof(1, &other),
            Err(Error::LeafMismatch { index: 1 })
        ));
    }

    #[test]
    fn test_filler_leaf_proves_only_zero() {
        let tree = make_tree(3);
        let filler = tree.entry(3).unwrap().clone();
        let proof = tree.generate_proof(3, &filler).unwrap();
        assert!(proof.verify(tree.encoding(), &filler, &tree.root()));

        let mut inflated = filler.clone();
        inflated.amounts = LeafPayload::token(1);
        assert!(!proof.verify(tree.encoding(), &inflated, &tree.root()));
    }

    #[test]
    fn test_proof_for_address() {
        let tree = make_tree(6);
        let target = tree.entries()[4].clone();
        let (index, entry, proof) = tree.proof_for(&target.address).unwrap();
        assert_eq!(index, 4);
        assert_eq!(entry, target);
        assert!(proof.verify(tree.encoding(), &entry, &tree.root()));
    }

    #[test]
    fn test_single_leaf_proof_is_empty() {
        let tree = make_tree(1);
        let entry = tree.entry(0).unwrap().clone();
        let proof = tree.generate_proof(0, &entry).unwrap();
        assert!(proof.siblings.is_empty());
        assert!(proof.path.is_empty());
        assert!(proof.verify(tree.encoding(), &entry, &tree.root()));
    }
}
