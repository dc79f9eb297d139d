// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! Leaf and node hashing.
//!
//! This is a wire format shared with every downstream verifier. A leaf is the
//! SHA-256 of `address_text,amount_1[,amount_2...]` (ASCII, decimal amounts, no
//! padding or whitespace). An internal node is the SHA-256 of `left || right`.
//! Any change here invalidates every published root.

use crate::payload::RewardEntry;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

pub const HASH_LEN: usize = 32;

/// Separator between the address and each amount field in a leaf.
pub const FIELD_SEPARATOR: char = ',';

const LEAF_PREFIX: u8 = 0x00;
const NODE_PREFIX: u8 = 0x01;

/// A 32-byte tree node: a leaf, an internal node or a root.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeHash(#[serde(with = "hex::serde")] [u8; HASH_LEN]);

impl NodeHash {
    pub const fn new(bytes: [u8; HASH_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; HASH_LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl From<[u8; HASH_LEN]> for NodeHash {
    fn from(bytes: [u8; HASH_LEN]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for NodeHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for NodeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for NodeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "NodeHash({:02x}{:02x}{:02x}..)",
            self.0[0], self.0[1], self.0[2]
        )
    }
}

/// Versioned hashing scheme. A root is only meaningful together with the
/// encoding it was built with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeafEncoding {
    /// `SHA-256(leaf_text)` and `SHA-256(left || right)`.
    #[default]
    V1,
    /// Domain separated: `SHA-256(0x00 || leaf_text)` and `SHA-256(0x01 || left || right)`.
    V2,
}

impl LeafEncoding {
    /// Hash one entry into its leaf node.
    pub fn hash_leaf(&self, entry: &RewardEntry) -> NodeHash {
        let text = leaf_text(entry);
        let mut hasher = Sha256::new();
        if let LeafEncoding::V2 = self {
            hasher.update([LEAF_PREFIX]);
        }
        hasher.update(text.as_bytes());
        NodeHash(hasher.finalize().into())
    }

    /// Hash two sibling nodes, left then right, into their parent.
    pub fn hash_nodes(&self, left: &NodeHash, right: &NodeHash) -> NodeHash {
        let mut hasher = Sha256::new();
        if let LeafEncoding::V2 = self {
            hasher.update([NODE_PREFIX]);
        }
        hasher.update(left.0);
        hasher.update(right.0);
        NodeHash(hasher.finalize().into())
    }
}

/// The exact text that is hashed into a leaf.
pub fn leaf_text(entry: &RewardEntry) -> String {
    let address = entry.address.to_canonical_string();
    let mut text = String::with_capacity(address.len() + entry.amounts.len() * 21);
    text.push_str(&address);
    for amount in entry.amounts.fields() {
        text.push(FIELD_SEPARATOR);
        text.push_str(&amount.to_string());
    }
    text
}
