// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::address::RecipientAddress;
use crate::canonical::Canonicalizer;
use crate::codec::NodeHash;
use crate::config::DistributionConfig;
use crate::error::{Error, Result};
use crate::payload::RewardEntry;
use crate::settlement::{ClaimSubmission, RewardRecord};
use crate::tree::DistributionTree;

/// One epoch's rewards, split across one or more trees.
///
/// The whole entry list is canonicalized once and then cut into consecutive
/// chunks of at most `max_leaves_per_tree` entries, one tree per chunk. The
/// chunk position is the tree's `merkle_index`.
#[derive(Clone, custom_debug::Debug)]
pub struct EpochDistribution {
    epoch: u64,
    #[debug(skip)]
    trees: Vec<DistributionTree>,
    /// Sum of each amount field over all real entries
    totals: Vec<u64>,
    max_roots: usize,
}

impl EpochDistribution {
    /// Build all trees for `epoch`.
    ///
    /// # Errors
    ///
    /// - `Validation` for malformed entries (see [`Canonicalizer`]), or a
    ///   chunk whose padded size exceeds `max_leaves`
    /// - `TooManyRoots` if the split needs more trees than `max_roots_per_epoch`
    /// - `TotalOverflow` if an amount field does not sum within 64 bits
    pub fn build(epoch: u64, entries: Vec<RewardEntry>, config: &DistributionConfig) -> Result<Self> {
        // max_leaves bounds each tree, so it is checked per chunk below
        let epoch_config = config.clone().with_max_leaves(usize::MAX);
        let entries = Canonicalizer::new(&epoch_config).canonicalize(entries)?;

        let chunk_size = config.max_leaves_per_tree.max(1);
        let tree_count = entries.len().div_ceil(chunk_size);
        let max_roots = config.max_roots_per_epoch.min(usize::from(u8::MAX) + 1);
        if tree_count > max_roots {
            return Err(Error::TooManyRoots {
                got: tree_count,
                max: max_roots,
            });
        }

        let totals = sum_amounts(&entries, config)?;

        let trees = entries
            .chunks(chunk_size)
            .map(|chunk| DistributionTree::from_canonical(chunk.to_vec(), config))
            .collect::<Result<Vec<_>>>()?;

        info!(
            "Built epoch {epoch} distribution: {} entries across {} trees, totals {totals:?}",
            entries.len(),
            trees.len()
        );

        Ok(Self {
            epoch,
            trees,
            totals,
            max_roots,
        })
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn trees(&self) -> &[DistributionTree] {
        &self.trees
    }

    pub fn tree(&self, merkle_index: u8) -> Option<&DistributionTree> {
        self.trees.get(usize::from(merkle_index))
    }

    /// Roots in `merkle_index` order.
    pub fn roots(&self) -> Vec<NodeHash> {
        self.trees.iter().map(DistributionTree::root).collect()
    }

    pub fn totals(&self) -> &[u64] {
        &self.totals
    }

    pub fn entry_count(&self) -> usize {
        self.trees.iter().map(DistributionTree::entry_count).sum()
    }

    /// The record a settlement authority stores for this epoch.
    pub fn reward_record(&self) -> Result<RewardRecord> {
        let (encoding, layout) = self
            .trees
            .first()
            .map(|tree| (tree.encoding(), tree.layout()))
            .ok_or_else(|| Error::Internal("Distribution has no trees".to_string()))?;
        RewardRecord::new(self.epoch, self.roots(), encoding, layout, self.max_roots)
    }

    /// Everything `claimant` needs to submit its claim.
    pub fn claim(&self, claimant: &RecipientAddress) -> Result<ClaimSubmission> {
        for (merkle_index, tree) in self.trees.iter().enumerate() {
            if let Some(index) = tree.position(claimant) {
                let entry = &tree.entries()[index];
                let proof = tree.generate_proof(index, entry)?;
                let merkle_index = u8::try_from(merkle_index).map_err(|_| {
                    Error::Internal(format!("Merkle index {merkle_index} exceeds u8"))
                })?;
                return Ok(ClaimSubmission {
                    merkle_index,
                    proof: proof.siblings,
                    proof_path: proof.path,
                    amounts: entry.amounts.clone(),
                });
            }
        }
        Err(Error::ClaimantNotFound(*claimant))
    }
}

fn sum_amounts(entries: &[RewardEntry], config: &DistributionConfig) -> Result<Vec<u64>> {
    let mut totals = vec![0u64; config.layout.field_count()];
    for entry in entries {
        for (position, (total, amount)) in totals.iter_mut().zip(entry.amounts.fields()).enumerate()
        {
            *total = total.checked_add(*amount).ok_or(Error::TotalOverflow {
                field: config.layout.field_name(position),
            })?;
        }
    }
    Ok(totals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::{LeafPayload, PayloadLayout};

    fn make_entries(count: u8) -> Vec<RewardEntry> {
        (1..=count)
            .map(|i| {
                RewardEntry::new(
                    RecipientAddress::new([i; 32]),
                    LeafPayload::token_and_usdc(u64::from(i), u64::from(i) * 2),
                )
            })
            .collect()
    }

    fn config() -> DistributionConfig {
        DistributionConfig::default()
            .with_layout(PayloadLayout::TokenAndUsdc)
            .with_max_leaves_per_tree(4)
    }

    #[test]
    fn test_split_into_trees() {
        let distribution = EpochDistribution::build(3, make_entries(10), &config()).unwrap();

        assert_eq!(distribution.trees().len(), 3);
        assert_eq!(distribution.entry_count(), 10);
        assert_eq!(distribution.tree(2).unwrap().entry_count(), 2);
        assert_eq!(distribution.totals(), &[55, 110]);
        assert_eq!(distribution.roots().len(), 3);
    }

    #[test]
    fn test_every_entry_claims_against_its_root() {
        let distribution = EpochDistribution::build(3, make_entries(10), &config()).unwrap();
        let record = distribution.reward_record().unwrap();
        assert_eq!(record.epoch, 3);
        assert_eq!(record.merkle_roots, distribution.roots());

        for entry in make_entries(10) {
            let claim = distribution.claim(&entry.address).unwrap();
            assert_eq!(claim.amounts, entry.amounts);
            assert!(record.verify_claim(&entry.address, &claim).is_ok());
        }
    }

    #[test]
    fn test_too_many_trees() {
        let config = config().with_max_roots_per_epoch(2);
        assert!(matches!(
            EpochDistribution::build(1, make_entries(9), &config),
            Err(Error::TooManyRoots { got: 3, max: 2 })
        ));
    }

    #[test]
    fn test_total_overflow() {
        let entries = vec![
            RewardEntry::new(
                RecipientAddress::new([1; 32]),
                LeafPayload::token_and_usdc(u64::MAX, 0),
            ),
            RewardEntry::new(
                RecipientAddress::new([2; 32]),
                LeafPayload::token_and_usdc(1, 0),
            ),
        ];
        assert!(matches!(
            EpochDistribution::build(1, entries, &config()),
            Err(Error::TotalOverflow {
                field: "token_amount"
            })
        ));
    }

    #[test]
    fn test_unknown_claimant() {
        let distribution = EpochDistribution::build(1, make_entries(3), &config()).unwrap();
        assert!(matches!(
            distribution.claim(&RecipientAddress::new([42; 32])),
            Err(Error::ClaimantNotFound(_))
        ));
    }
}
