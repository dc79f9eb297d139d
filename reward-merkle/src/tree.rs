// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::address::RecipientAddress;
use crate::canonical::{Canonicalizer, RawEntry};
use crate::codec::{LeafEncoding, NodeHash};
use crate::config::DistributionConfig;
use crate::error::{Error, Result};
use crate::padding::pad_entries;
use crate::payload::{PayloadLayout, RewardEntry};
use rayon::prelude::*;

/// A Merkle distribution tree over one batch of reward entries.
///
/// Stored as an arena of levels: `levels[0]` holds the padded leaves and the
/// last level holds the root. The parent of node `j` at level `i` is node
/// `j / 2` at level `i + 1`; its children are `2j` and `2j + 1` at level `i - 1`.
///
/// - Built once from a finalized entry list, read-only afterwards
/// - Entries are canonicalized, so the tree is a pure function of the entry set
/// - Padded with sentinel fillers to the next power of two
/// - Only the root needs publishing; the tree answers proof queries
#[derive(Clone, custom_debug::Debug)]
pub struct DistributionTree {
    encoding: LeafEncoding,
    layout: PayloadLayout,

    /// Real entry count, before padding
    entry_count: usize,

    /// Canonical entries followed by fillers
    #[debug(skip)]
    entries: Vec<RewardEntry>,

    #[debug(skip)]
    levels: Vec<Vec<NodeHash>>,

    root: NodeHash,

    /// Re-verify generated proofs against the root
    verify_generated_proofs: bool,
}

impl DistributionTree {
    /// Build a tree from typed entries in any order.
    ///
    /// # Errors
    ///
    /// - `Validation` if the list is empty, has duplicates, uses the reserved
    ///   address, does not match the configured layout or exceeds `max_leaves`
    pub fn build(entries: Vec<RewardEntry>, config: &DistributionConfig) -> Result<Self> {
        let entries = Canonicalizer::new(config).canonicalize(entries)?;
        Ok(Self::from_sorted(entries, config))
    }

    /// Build a tree from raw text entries in any order.
    pub fn from_raw(raw: &[RawEntry], config: &DistributionConfig) -> Result<Self> {
        let entries = Canonicalizer::new(config).canonicalize_raw(raw)?;
        Ok(Self::from_sorted(entries, config))
    }

    /// Build a tree from entries the caller already holds in canonical order.
    /// The order is checked, not repaired.
    pub fn from_canonical(entries: Vec<RewardEntry>, config: &DistributionConfig) -> Result<Self> {
        Canonicalizer::new(config).ensure_canonical(&entries)?;
        Ok(Self::from_sorted(entries, config))
    }

    fn from_sorted(mut entries: Vec<RewardEntry>, config: &DistributionConfig) -> Self {
        let entry_count = entries.len();
        pad_entries(&mut entries, config.layout);

        let levels = build_levels(&entries, config.encoding, config.parallel_threshold);
        // build_levels always ends with a single-node level
        let root = levels
            .last()
            .and_then(|level| level.first())
            .copied()
            .unwrap_or_default();

        info!(
            "Built distribution tree: {entry_count} entries, {} leaves, depth {}, root {root}",
            entries.len(),
            levels.len() - 1
        );

        Self {
            encoding: config.encoding,
            layout: config.layout,
            entry_count,
            entries,
            levels,
            root,
            verify_generated_proofs: config.verify_generated_proofs,
        }
    }

    /// The root hash, the only value that must be published.
    pub fn root(&self) -> NodeHash {
        self.root
    }

    /// Number of hashing steps from a leaf to the root: log2(padded leaf count)
    pub fn depth(&self) -> u8 {
        (self.levels.len() - 1) as u8
    }

    /// Real entries, before padding
    pub fn entry_count(&self) -> usize {
        self.entry_count
    }

    pub fn padded_leaf_count(&self) -> usize {
        self.entries.len()
    }

    pub fn encoding(&self) -> LeafEncoding {
        self.encoding
    }

    pub fn layout(&self) -> PayloadLayout {
        self.layout
    }

    /// Real entries in canonical (leaf) order.
    pub fn entries(&self) -> &[RewardEntry] {
        &self.entries[..self.entry_count]
    }

    /// Entry at a leaf index, fillers included.
    pub fn entry(&self, index: usize) -> Option<&RewardEntry> {
        self.entries.get(index)
    }

    pub fn leaf(&self, index: usize) -> Option<&NodeHash> {
        self.levels.first().and_then(|leaves| leaves.get(index))
    }

    /// Nodes at `level`, 0 being the leaves.
    pub fn level(&self, level: usize) -> Option<&[NodeHash]> {
        self.levels.get(level).map(Vec::as_slice)
    }

    pub(crate) fn levels(&self) -> &[Vec<NodeHash>] {
        &self.levels
    }

    pub(crate) fn verifies_generated_proofs(&self) -> bool {
        self.verify_generated_proofs
    }

    /// Leaf index of a recipient's entry, if present.
    pub fn position(&self, address: &RecipientAddress) -> Option<usize> {
        if address.is_sentinel() {
            return None;
        }
        let key = address.to_canonical_string();
        self.entries()
            .binary_search_by(|entry| entry.address.to_canonical_string().cmp(&key))
            .ok()
    }

    /// Entry of a recipient, with its leaf index.
    pub fn find(&self, address: &RecipientAddress) -> Result<(usize, &RewardEntry)> {
        let index = self
            .position(address)
            .ok_or(Error::ClaimantNotFound(*address))?;
        Ok((index, &self.entries[index]))
    }
}

/// Hash the padded entries into leaves, then fold pairs upwards until one
/// node remains. Wide levels are hashed on the rayon pool; `collect` on an
/// indexed parallel iterator keeps the output in input order, so pairing
/// (`2j`, `2j + 1`) and concatenation (left then right) never change.
fn build_levels(
    entries: &[RewardEntry],
    encoding: LeafEncoding,
    parallel_threshold: usize,
) -> Vec<Vec<NodeHash>> {
    let leaves: Vec<NodeHash> = if entries.len() >= parallel_threshold {
        entries
            .par_iter()
            .map(|entry| encoding.hash_leaf(entry))
            .collect()
    } else {
        entries.iter().map(|entry| encoding.hash_leaf(entry)).collect()
    };

    let mut levels = vec![leaves];
    while let Some(current) = levels.last() {
        if current.len() <= 1 {
            break;
        }
        let next: Vec<NodeHash> = if current.len() >= parallel_threshold {
            current
                .par_chunks_exact(2)
                .map(|pair| encoding.hash_nodes(&pair[0], &pair[1]))
                .collect()
        } else {
            current
                .chunks_exact(2)
                .map(|pair| encoding.hash_nodes(&pair[0], &pair[1]))
                .collect()
        };
        debug!("Hashed level {} ({} nodes)", levels.len(), next.len());
        levels.push(next);
    }
    levels
}
