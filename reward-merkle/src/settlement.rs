// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! Consumer side of a distribution: what a settlement authority keeps per
//! epoch and how it checks a claim.
//!
//! The authority stores only the roots. A claimant submits the index of the
//! root, the proof, the path and the amounts; the authority supplies the
//! claimant's address itself and recomputes the leaf before verifying.

use crate::address::RecipientAddress;
use crate::codec::{LeafEncoding, NodeHash};
use crate::error::{Error, InvalidProof, Result};
use crate::payload::{LeafPayload, PayloadLayout};
use crate::verify;
use serde::{Deserialize, Serialize};

/// A claim as submitted to the settlement authority.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimSubmission {
    /// Which of the epoch's roots the proof is against
    pub merkle_index: u8,
    /// Sibling hashes, leaf to just below root
    pub proof: Vec<NodeHash>,
    /// `true` where the sibling at that step is on the left
    pub proof_path: Vec<bool>,
    /// Claimed amounts, in the record's layout order
    pub amounts: LeafPayload,
}

/// Roots published for one epoch, addressed by `merkle_index` at claim time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardRecord {
    pub epoch: u64,
    pub merkle_roots: Vec<NodeHash>,
    pub encoding: LeafEncoding,
    pub layout: PayloadLayout,
}

impl RewardRecord {
    /// Create a record holding at most `max_roots` roots.
    ///
    /// # Errors
    ///
    /// - `TooManyRoots` if more than `max_roots` roots are given, or more than
    ///   a `u8` merkle index can address
    pub fn new(
        epoch: u64,
        merkle_roots: Vec<NodeHash>,
        encoding: LeafEncoding,
        layout: PayloadLayout,
        max_roots: usize,
    ) -> Result<Self> {
        let max = max_roots.min(usize::from(u8::MAX) + 1);
        if merkle_roots.len() > max {
            return Err(Error::TooManyRoots {
                got: merkle_roots.len(),
                max,
            });
        }
        info!(
            "Created reward record for epoch {epoch} with {} merkle roots",
            merkle_roots.len()
        );
        Ok(Self {
            epoch,
            merkle_roots,
            encoding,
            layout,
        })
    }

    pub fn root(&self, merkle_index: u8) -> Result<&NodeHash> {
        self.merkle_roots
            .get(usize::from(merkle_index))
            .ok_or(Error::UnknownMerkleIndex {
                merkle_index,
                root_count: self.merkle_roots.len(),
            })
    }

    /// Check a claim by `claimant` against the selected root.
    ///
    /// # Errors
    ///
    /// - `UnknownMerkleIndex` if the record has no root at `merkle_index`
    /// - `InvalidProof` for any other failure, including amounts that do not
    ///   fit the record's layout
    pub fn verify_claim(&self, claimant: &RecipientAddress, claim: &ClaimSubmission) -> Result<()> {
        let root = self.root(claim.merkle_index)?;

        let result = if claim.amounts.len() != self.layout.field_count() {
            Err(InvalidProof)
        } else {
            verify::verify_claim(
                self.encoding,
                claimant,
                &claim.amounts,
                &claim.proof,
                &claim.proof_path,
                root,
            )
        };

        if let Err(err) = result {
            warn!(
                "Rejected claim by {claimant} against epoch {} root {}",
                self.epoch, claim.merkle_index
            );
            return Err(err.into());
        }
        debug!(
            "Accepted claim by {claimant} for {} in epoch {}",
            claim.amounts, self.epoch
        );
        Ok(())
    }
}
