// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::address::RecipientAddress;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed set and order of amount fields carried by every leaf of a tree.
///
/// Changing the layout of a published tree breaks every outstanding proof, so
/// the layout is chosen once per deployed root and travels with it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadLayout {
    /// `address,token_amount`
    #[default]
    Token,
    /// `address,token_amount,usdc_amount`
    TokenAndUsdc,
}

impl PayloadLayout {
    pub fn field_names(&self) -> &'static [&'static str] {
        match self {
            PayloadLayout::Token => &["token_amount"],
            PayloadLayout::TokenAndUsdc => &["token_amount", "usdc_amount"],
        }
    }

    pub fn field_count(&self) -> usize {
        self.field_names().len()
    }

    /// Name of the field at `position`, for error reporting.
    pub fn field_name(&self, position: usize) -> &'static str {
        self.field_names()
            .get(position)
            .copied()
            .unwrap_or("extra_amount")
    }
}

/// Ordered integer amounts of one entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeafPayload(Vec<u64>);

impl LeafPayload {
    pub fn new(fields: Vec<u64>) -> Self {
        Self(fields)
    }

    pub fn token(amount: u64) -> Self {
        Self(vec![amount])
    }

    pub fn token_and_usdc(token_amount: u64, usdc_amount: u64) -> Self {
        Self(vec![token_amount, usdc_amount])
    }

    /// All-zero payload for the given layout, used by filler entries.
    pub fn zero(layout: PayloadLayout) -> Self {
        Self(vec![0; layout.field_count()])
    }

    pub fn fields(&self) -> &[u64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|amount| *amount == 0)
    }
}

impl fmt::Display for LeafPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for amount in &self.0 {
            if !first {
                write!(f, ",")?;
            }
            write!(f, "{amount}")?;
            first = false;
        }
        Ok(())
    }
}

/// One recipient and its allotted amounts. Immutable once placed in a tree.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RewardEntry {
    pub address: RecipientAddress,
    pub amounts: LeafPayload,
}

impl RewardEntry {
    pub fn new(address: RecipientAddress, amounts: LeafPayload) -> Self {
        Self { address, amounts }
    }

    /// Filler entry: sentinel address with every amount zero.
    pub fn filler(layout: PayloadLayout) -> Self {
        Self {
            address: RecipientAddress::SENTINEL,
            amounts: LeafPayload::zero(layout),
        }
    }

    pub fn is_filler(&self) -> bool {
        self.address.is_sentinel() && self.amounts.is_zero()
    }
}
