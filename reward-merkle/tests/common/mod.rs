// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

#![allow(dead_code)]

use reward_merkle::{LeafPayload, RecipientAddress, RewardEntry};
use sha2::{Digest, Sha256};
use tracing_subscriber::EnvFilter;

/// Route crate logs to the test writer, filtered by `RUST_LOG`.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A stable address derived from a human readable label, e.g. "addrA".
pub fn named_address(label: &str) -> RecipientAddress {
    RecipientAddress::new(Sha256::digest(label.as_bytes()).into())
}

/// A distinct, never-sentinel address for synthetic entry `i`.
pub fn synthetic_address(i: u64) -> RecipientAddress {
    let mut bytes = [0xa5u8; 32];
    bytes[..8].copy_from_slice(&i.to_be_bytes());
    RecipientAddress::new(bytes)
}

pub fn token_entry(label: &str, amount: u64) -> RewardEntry {
    RewardEntry::new(named_address(label), LeafPayload::token(amount))
}

pub fn synthetic_entries(count: u64) -> Vec<RewardEntry> {
    (0..count)
        .map(|i| RewardEntry::new(synthetic_address(i), LeafPayload::token(i % 1_000 + 1)))
        .collect()
}
