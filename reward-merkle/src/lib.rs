// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! Canonical Merkle distribution trees for epoch rewards.
//!
//! A distribution is a list of `(recipient, amounts)` entries. The list is
//! validated and sorted into canonical order, padded with zero-amount
//! fillers to a power of two and hashed into a binary SHA-256 tree. Only the
//! root is published; each recipient later claims with a short proof that a
//! verifier checks against that root.

#[macro_use]
extern crate tracing;

/// Recipient addresses and their canonical text form.
pub mod address;
/// Input validation and canonical ordering.
pub mod canonical;
/// Leaf and node hashing.
pub mod codec;
/// Tree building configuration.
pub mod config;
/// Epochs split across several trees.
pub mod distribution;
/// Errors.
pub mod error;
/// Padding to a power of two.
pub mod padding;
/// Amount fields carried by a leaf.
pub mod payload;
/// Inclusion proof generation.
pub mod proof;
/// Reward records and claim checks.
pub mod settlement;
/// The tree itself.
pub mod tree;
/// Stateless proof verification.
pub mod verify;

pub use address::{AddressParseError, RecipientAddress};
pub use canonical::{parse_amount, Canonicalizer, RawEntry};
pub use codec::{leaf_text, LeafEncoding, NodeHash};
pub use config::DistributionConfig;
pub use distribution::EpochDistribution;
pub use error::{Error, InvalidProof, Result, ValidationError};
pub use padding::{pad_entries, padded_len, tree_depth};
pub use payload::{LeafPayload, PayloadLayout, RewardEntry};
pub use proof::MerkleProof;
pub use settlement::{ClaimSubmission, RewardRecord};
pub use tree::DistributionTree;
pub use verify::{compute_root, verify_claim, verify_entry, verify_leaf};
