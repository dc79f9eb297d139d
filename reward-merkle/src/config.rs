// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::codec::LeafEncoding;
use crate::error::Result;
use crate::payload::PayloadLayout;
use serde::{Deserialize, Serialize};

/// Maximum padded leaf count of a single tree (2^24)
const MAX_LEAVES: usize = 1 << 24;

/// Level width from which pairwise hashing is spread over the rayon pool
const PARALLEL_THRESHOLD: usize = 4096;

/// Maximum number of roots one epoch's reward record can hold
const MAX_ROOTS_PER_EPOCH: usize = 5;

/// Maximum real entries per tree when an epoch is split across several trees (2^20)
const MAX_LEAVES_PER_TREE: usize = 1 << 20;

/// Configuration for building distribution trees and proofs.
///
/// Every field has a default, so a partial JSON document is enough:
///
/// ```
/// use reward_merkle::{DistributionConfig, PayloadLayout};
///
/// let config = DistributionConfig::from_json_str(r#"{ "layout": "token_and_usdc" }"#).unwrap();
/// assert_eq!(config.layout, PayloadLayout::TokenAndUsdc);
/// assert_eq!(config.max_roots_per_epoch, 5);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistributionConfig {
    /// Hashing scheme used for leaves and nodes.
    pub encoding: LeafEncoding,
    /// Amount fields carried by every leaf, in their fixed order.
    pub layout: PayloadLayout,
    /// Upper bound on the padded leaf count of a single tree.
    pub max_leaves: usize,
    /// Levels at least this wide are hashed in parallel. Pairing and
    /// concatenation order are identical either way.
    pub parallel_threshold: usize,
    /// Re-verify every generated proof against the tree root before returning it.
    pub verify_generated_proofs: bool,
    /// Capacity of a reward record.
    pub max_roots_per_epoch: usize,
    /// Real entries per tree when splitting an epoch distribution.
    pub max_leaves_per_tree: usize,
}

impl Default for DistributionConfig {
    fn default() -> Self {
        Self {
            encoding: LeafEncoding::default(),
            layout: PayloadLayout::default(),
            max_leaves: MAX_LEAVES,
            parallel_threshold: PARALLEL_THRESHOLD,
            verify_generated_proofs: true,
            max_roots_per_epoch: MAX_ROOTS_PER_EPOCH,
            max_leaves_per_tree: MAX_LEAVES_PER_TREE,
        }
    }
}

impl DistributionConfig {
    /// Parse a configuration from JSON, filling missing fields with defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the hashing scheme
    pub fn with_encoding(mut self, encoding: LeafEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Set the payload layout
    pub fn with_layout(mut self, layout: PayloadLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Sets the maximum padded leaf count of a single tree
    pub fn with_max_leaves(mut self, max_leaves: usize) -> Self {
        self.max_leaves = max_leaves;
        self
    }

    /// Sets the level width at which hashing goes parallel
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    pub fn with_verify_generated_proofs(mut self, enable: bool) -> Self {
        self.verify_generated_proofs = enable;
        self
    }

    /// Sets the maximum number of roots per epoch
    pub fn with_max_roots_per_epoch(mut self, max_roots: usize) -> Self {
        self.max_roots_per_epoch = max_roots;
        self
    }

    /// Sets the number of real entries per tree when an epoch is split
    pub fn with_max_leaves_per_tree(mut self, max_leaves: usize) -> Self {
        self.max_leaves_per_tree = max_leaves;
        self
    }
}
