// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Length in bytes of a recipient key.
pub const ADDRESS_LEN: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressParseError {
    #[error("Address is not valid base58: {0}")]
    Base58(String),
    #[error("Address decodes to {0} bytes, expected {ADDRESS_LEN}")]
    WrongLength(usize),
}

/// The identity a reward is allotted to: a 32-byte public key.
///
/// Its canonical text form is base58, which is what the leaf encoding and the
/// canonical sort order operate on. The all-zero key is reserved for filler
/// leaves and is rendered as thirty-two `1`s.
#[derive(
    Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, SerializeDisplay, DeserializeFromStr,
)]
pub struct RecipientAddress([u8; ADDRESS_LEN]);

impl RecipientAddress {
    /// The reserved sentinel used by filler entries.
    pub const SENTINEL: RecipientAddress = RecipientAddress([0u8; ADDRESS_LEN]);

    pub const fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    pub fn is_sentinel(&self) -> bool {
        *self == Self::SENTINEL
    }

    /// Canonical base58 text, as hashed into leaves.
    pub fn to_canonical_string(&self) -> String {
        bs58::encode(self.0).into_string()
    }
}

impl FromStr for RecipientAddress {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let decoded = bs58::decode(s)
            .into_vec()
            .map_err(|err| AddressParseError::Base58(err.to_string()))?;
        let bytes: [u8; ADDRESS_LEN] = decoded
            .as_slice()
            .try_into()
            .map_err(|_| AddressParseError::WrongLength(decoded.len()))?;
        Ok(Self(bytes))
    }
}

impl From<[u8; ADDRESS_LEN]> for RecipientAddress {
    fn from(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for RecipientAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_canonical_string())
    }
}

impl fmt::Debug for RecipientAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecipientAddress({})", self.to_canonical_string())
    }
}
