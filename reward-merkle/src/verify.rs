// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! Proof verification without access to the tree.
//!
//! This mirrors what a settlement authority runs on untrusted input: recompute
//! the leaf from the claimed address and amounts, fold it through the proof,
//! compare with the published root. Every failure is the same `InvalidProof`.

use crate::address::RecipientAddress;
use crate::codec::{LeafEncoding, NodeHash};
use crate::error::InvalidProof;
use crate::payload::{LeafPayload, RewardEntry};
use crate::proof::MerkleProof;

type VerifyResult<T> = std::result::Result<T, InvalidProof>;

/// Fold a leaf hash through a proof and return the resulting root.
///
/// Fails only when `siblings` and `path` differ in length.
pub fn compute_root(
    encoding: LeafEncoding,
    leaf: &NodeHash,
    siblings: &[NodeHash],
    path: &[bool],
) -> VerifyResult<NodeHash> {
    if siblings.len() != path.len() {
        return Err(InvalidProof);
    }
    let root = siblings
        .iter()
        .zip(path)
        .fold(*leaf, |current, (sibling, sibling_is_left)| {
            if *sibling_is_left {
                encoding.hash_nodes(sibling, &current)
            } else {
                encoding.hash_nodes(&current, sibling)
            }
        });
    Ok(root)
}

/// Verify a proof for an already hashed leaf.
pub fn verify_leaf(
    encoding: LeafEncoding,
    leaf: &NodeHash,
    proof: &MerkleProof,
    root: &NodeHash,
) -> VerifyResult<()> {
    let computed = compute_root(encoding, leaf, &proof.siblings, &proof.path)?;
    if computed != *root {
        return Err(InvalidProof);
    }
    Ok(())
}

/// Verify a proof for a claimed entry.
pub fn verify_entry(
    encoding: LeafEncoding,
    entry: &RewardEntry,
    proof: &MerkleProof,
    root: &NodeHash,
) -> VerifyResult<()> {
    verify_leaf(encoding, &encoding.hash_leaf(entry), proof, root)
}

/// Verify a claim given as separate arguments, the shape in which a claimant
/// submits it: the verifier supplies the claimant's address itself.
pub fn verify_claim(
    encoding: LeafEncoding,
    claimant: &RecipientAddress,
    amounts: &LeafPayload,
    siblings: &[NodeHash],
    path: &[bool],
    root: &NodeHash,
) -> VerifyResult<()> {
    let entry = RewardEntry::new(*claimant, amounts.clone());
    let computed = compute_root(encoding, &encoding.hash_leaf(&entry), siblings, path)?;
    if computed != *root {
        return Err(InvalidProof);
    }
    Ok(())
}
