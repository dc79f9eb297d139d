// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::payload::{PayloadLayout, RewardEntry};

/// Smallest power of two that is `>= entry_count` (1 for 0 or 1 entries).
pub fn padded_len(entry_count: usize) -> usize {
    entry_count.max(1).next_power_of_two()
}

/// Calculate tree depth from leaf count: ceil(log2(n))
pub fn tree_depth(entry_count: usize) -> u8 {
    padded_len(entry_count).trailing_zeros() as u8
}

/// Append filler entries until the list length is a power of two.
///
/// Fillers are only ever appended, so the index of every real entry is the
/// same before and after padding.
pub fn pad_entries(entries: &mut Vec<RewardEntry>, layout: PayloadLayout) {
    let target = padded_len(entries.len());
    let fillers = target - entries.len();
    if fillers > 0 {
        trace!("Padding {} entries with {fillers} fillers", entries.len());
        entries.resize(target, RewardEntry::filler(layout));
    }
}
