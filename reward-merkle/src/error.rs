// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::address::RecipientAddress;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building distribution trees, generating proofs or checking claims.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid distribution input: {0}")]
    Validation(#[from] ValidationError),
    #[error("Leaf index {index} is out of range (tree has {leaf_count} leaves)")]
    IndexOutOfRange { index: usize, leaf_count: usize },
    #[error("Expected entry does not match the tree leaf at index {index}")]
    LeafMismatch { index: usize },
    #[error(transparent)]
    InvalidProof(#[from] InvalidProof),
    #[error("Merkle index {merkle_index} does not exist (epoch has {root_count} roots)")]
    UnknownMerkleIndex { merkle_index: u8, root_count: usize },
    #[error("Too many merkle roots for one epoch: got {got}, maximum is {max}")]
    TooManyRoots { got: usize, max: usize },
    #[error("Claimant {0} has no entry in this distribution")]
    ClaimantNotFound(RecipientAddress),
    #[error("Amount total overflowed for field {field}")]
    TotalOverflow { field: &'static str },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Rejection of malformed distribution input. Every variant names the offending
/// entry (its position in the caller's input) so the list can be corrected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Entry list cannot be empty")]
    EmptyInput,
    #[error("Column {column} has {got} values, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        got: usize,
    },
    #[error("Entry {index}: {address:?} is not a valid recipient address")]
    InvalidAddress { index: usize, address: String },
    #[error("Entry {index}: the reserved filler address cannot receive rewards")]
    ReservedAddress { index: usize },
    #[error("Entry {index}: {field} value {value:?} is not an integer")]
    NonIntegerAmount {
        index: usize,
        field: &'static str,
        value: String,
    },
    #[error("Entry {index}: {field} value {value:?} is negative")]
    NegativeAmount {
        index: usize,
        field: &'static str,
        value: String,
    },
    #[error("Entry {index}: {field} value {value:?} does not fit in 64 bits")]
    AmountOutOfRange {
        index: usize,
        field: &'static str,
        value: String,
    },
    #[error("Entry {index}: expected {expected} amount fields, got {got}")]
    FieldCountMismatch {
        index: usize,
        expected: usize,
        got: usize,
    },
    #[error("Entry {index}: address {address} appears more than once")]
    DuplicateAddress { index: usize, address: String },
    #[error("Too many entries: got {got}, maximum is {max}")]
    TooManyEntries { got: usize, max: usize },
    #[error("Entry {index} is out of canonical order")]
    NotCanonical { index: usize },
}

/// A proof did not reproduce the published root.
///
/// Carries no detail: a length mismatch and a root mismatch look the same
/// to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid proof")]
pub struct InvalidProof;
