// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! Input validation and canonical ordering.
//!
//! Two callers holding the same logical entry set must build byte-identical
//! trees, so entries are sorted by the byte-lexicographic order of the
//! address's canonical base58 text. Addresses must be unique.

use crate::address::RecipientAddress;
use crate::config::DistributionConfig;
use crate::error::ValidationError;
use crate::padding::padded_len;
use crate::payload::{LeafPayload, PayloadLayout, RewardEntry};
use serde::{Deserialize, Serialize};

type ValidationResult<T> = std::result::Result<T, ValidationError>;

/// An entry as received from distribution tooling, before any parsing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEntry {
    pub address: String,
    /// Decimal amounts, in the layout's field order.
    pub amounts: Vec<String>,
}

impl RawEntry {
    pub fn new(address: impl Into<String>, amounts: &[&str]) -> Self {
        Self {
            address: address.into(),
            amounts: amounts.iter().map(|amount| amount.to_string()).collect(),
        }
    }
}

/// Validates entry lists and puts them into canonical order.
#[derive(Clone, Copy, Debug)]
pub struct Canonicalizer {
    layout: PayloadLayout,
    max_leaves: usize,
}

impl Canonicalizer {
    pub fn new(config: &DistributionConfig) -> Self {
        Self {
            layout: config.layout,
            max_leaves: config.max_leaves,
        }
    }

    pub fn layout(&self) -> PayloadLayout {
        self.layout
    }

    /// Parse, validate and sort raw text entries.
    pub fn canonicalize_raw(&self, raw: &[RawEntry]) -> ValidationResult<Vec<RewardEntry>> {
        let result = self.parse_raw(raw).and_then(|entries| self.canonicalize(entries));
        if let Err(err) = &result {
            warn!("Rejected raw distribution input: {err}");
        }
        result
    }

    /// Parse, validate and sort parallel columns: one address list and one
    /// list per amount field, all of equal length.
    pub fn canonicalize_columns(
        &self,
        addresses: &[String],
        amount_columns: &[Vec<String>],
    ) -> ValidationResult<Vec<RewardEntry>> {
        let raw = self.zip_columns(addresses, amount_columns);
        if let Err(err) = &raw {
            warn!("Rejected columnar distribution input: {err}");
        }
        self.canonicalize_raw(&raw?)
    }

    /// Validate typed entries and sort them into canonical order.
    pub fn canonicalize(&self, entries: Vec<RewardEntry>) -> ValidationResult<Vec<RewardEntry>> {
        self.check_entries(&entries)?;

        let mut keyed: Vec<(String, usize, RewardEntry)> = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| (entry.address.to_canonical_string(), index, entry))
            .collect();
        keyed.sort_unstable_by(|a, b| a.0.cmp(&b.0));

        for pair in keyed.windows(2) {
            if pair[0].0 == pair[1].0 {
                let err = ValidationError::DuplicateAddress {
                    index: pair[0].1.max(pair[1].1),
                    address: pair[1].0.clone(),
                };
                warn!("Rejected distribution input: {err}");
                return Err(err);
            }
        }

        debug!("Canonicalized {} distribution entries", keyed.len());
        Ok(keyed.into_iter().map(|(_, _, entry)| entry).collect())
    }

    /// Check entries that must already be in canonical order, without re-sorting.
    pub fn ensure_canonical(&self, entries: &[RewardEntry]) -> ValidationResult<()> {
        self.check_entries(entries)?;

        let mut previous: Option<String> = None;
        for (index, entry) in entries.iter().enumerate() {
            let key = entry.address.to_canonical_string();
            if let Some(previous) = &previous {
                if *previous == key {
                    return Err(ValidationError::DuplicateAddress {
                        index,
                        address: key,
                    });
                }
                if *previous > key {
                    return Err(ValidationError::NotCanonical { index });
                }
            }
            previous = Some(key);
        }
        Ok(())
    }

    fn check_entries(&self, entries: &[RewardEntry]) -> ValidationResult<()> {
        if entries.is_empty() {
            return Err(ValidationError::EmptyInput);
        }
        let padded = padded_len(entries.len());
        if padded > self.max_leaves {
            return Err(ValidationError::TooManyEntries {
                got: entries.len(),
                max: self.max_leaves,
            });
        }

        let expected = self.layout.field_count();
        for (index, entry) in entries.iter().enumerate() {
            if entry.amounts.len() != expected {
                return Err(ValidationError::FieldCountMismatch {
                    index,
                    expected,
                    got: entry.amounts.len(),
                });
            }
            if entry.address.is_sentinel() {
                return Err(ValidationError::ReservedAddress { index });
            }
        }
        Ok(())
    }

    fn parse_raw(&self, raw: &[RawEntry]) -> ValidationResult<Vec<RewardEntry>> {
        if raw.is_empty() {
            return Err(ValidationError::EmptyInput);
        }

        let expected = self.layout.field_count();
        raw.iter()
            .enumerate()
            .map(|(index, entry)| {
                let address: RecipientAddress =
                    entry
                        .address
                        .parse()
                        .map_err(|_| ValidationError::InvalidAddress {
                            index,
                            address: entry.address.clone(),
                        })?;
                if entry.amounts.len() != expected {
                    return Err(ValidationError::FieldCountMismatch {
                        index,
                        expected,
                        got: entry.amounts.len(),
                    });
                }
                let amounts = entry
                    .amounts
                    .iter()
                    .enumerate()
                    .map(|(position, text)| {
                        parse_amount(index, self.layout.field_name(position), text)
                    })
                    .collect::<ValidationResult<Vec<u64>>>()?;
                Ok(RewardEntry::new(address, LeafPayload::new(amounts)))
            })
            .collect()
    }

    fn zip_columns(
        &self,
        addresses: &[String],
        amount_columns: &[Vec<String>],
    ) -> ValidationResult<Vec<RawEntry>> {
        let expected_columns = self.layout.field_count();
        if amount_columns.len() != expected_columns {
            return Err(ValidationError::LengthMismatch {
                column: "amount columns".to_string(),
                expected: expected_columns,
                got: amount_columns.len(),
            });
        }
        for (position, column) in amount_columns.iter().enumerate() {
            if column.len() != addresses.len() {
                return Err(ValidationError::LengthMismatch {
                    column: self.layout.field_name(position).to_string(),
                    expected: addresses.len(),
                    got: column.len(),
                });
            }
        }
        if addresses.is_empty() {
            return Err(ValidationError::EmptyInput);
        }

        Ok(addresses
            .iter()
            .enumerate()
            .map(|(index, address)| RawEntry {
                address: address.clone(),
                amounts: amount_columns
                    .iter()
                    .map(|column| column[index].clone())
                    .collect(),
            })
            .collect())
    }
}

/// Parse one decimal amount. Only plain ASCII digits are accepted: no sign,
/// no fraction, no exponent, no surrounding whitespace.
pub fn parse_amount(index: usize, field: &'static str, text: &str) -> ValidationResult<u64> {
    let is_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

    if let Some(magnitude) = text.strip_prefix('-') {
        if is_digits(magnitude) {
            return Err(ValidationError::NegativeAmount {
                index,
                field,
                value: text.to_string(),
            });
        }
    }
    if !is_digits(text) {
        return Err(ValidationError::NonIntegerAmount {
            index,
            field,
            value: text.to_string(),
        });
    }
    text.parse::<u64>()
        .map_err(|_| ValidationError::AmountOutOfRange {
            index,
            field,
            value: text.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(byte: u8) -> RecipientAddress {
        RecipientAddress::new([byte; 32])
    }

    fn canonicalizer() -> Canonicalizer {
        Canonicalizer::new(&DistributionConfig::default())
    }

    #[test]
    fn sorts_by_canonical_text() {
        let entries = vec![
            RewardEntry::new(address(9), LeafPayload::token(1)),
            RewardEntry::new(address(3), LeafPayload::token(2)),
            RewardEntry::new(address(200), LeafPayload::token(3)),
        ];
        let sorted = canonicalizer().canonicalize(entries).unwrap();

        let keys: Vec<String> = sorted.iter().map(|e| e.address.to_string()).collect();
        let mut expected = keys.clone();
        expected.sort();
        assert_eq!(keys, expected);
        assert!(canonicalizer().ensure_canonical(&sorted).is_ok());
    }

    #[test]
    fn rejects_duplicates_even_with_different_amounts() {
        let entries = vec![
            RewardEntry::new(address(1), LeafPayload::token(1)),
            RewardEntry::new(address(2), LeafPayload::token(5)),
            RewardEntry::new(address(1), LeafPayload::token(7)),
        ];
        let err = canonicalizer().canonicalize(entries).unwrap_err();
        assert_eq!(
            err,
            ValidationError::DuplicateAddress {
                index: 2,
                address: address(1).to_string()
            }
        );
    }

    #[test]
    fn rejects_empty_and_reserved() {
        assert_eq!(
            canonicalizer().canonicalize(vec![]).unwrap_err(),
            ValidationError::EmptyInput
        );
        let entries = vec![
            RewardEntry::new(address(1), LeafPayload::token(1)),
            RewardEntry::new(RecipientAddress::SENTINEL, LeafPayload::token(0)),
        ];
        assert_eq!(
            canonicalizer().canonicalize(entries).unwrap_err(),
            ValidationError::ReservedAddress { index: 1 }
        );
    }

    #[test]
    fn rejects_wrong_field_count() {
        let entries = vec![RewardEntry::new(
            address(1),
            LeafPayload::token_and_usdc(1, 2),
        )];
        assert_eq!(
            canonicalizer().canonicalize(entries).unwrap_err(),
            ValidationError::FieldCountMismatch {
                index: 0,
                expected: 1,
                got: 2
            }
        );
    }

    #[test]
    fn enforces_leaf_cap_on_padded_count() {
        let canonicalizer =
            Canonicalizer::new(&DistributionConfig::default().with_max_leaves(4));
        let entries: Vec<RewardEntry> = (1..=5)
            .map(|byte| RewardEntry::new(address(byte), LeafPayload::token(1)))
            .collect();
        assert_eq!(
            canonicalizer.canonicalize(entries).unwrap_err(),
            ValidationError::TooManyEntries { got: 5, max: 4 }
        );
    }

    #[test]
    fn ensure_canonical_flags_order() {
        let mut entries = canonicalizer()
            .canonicalize(vec![
                RewardEntry::new(address(1), LeafPayload::token(1)),
                RewardEntry::new(address(2), LeafPayload::token(1)),
            ])
            .unwrap();
        entries.swap(0, 1);
        assert_eq!(
            canonicalizer().ensure_canonical(&entries).unwrap_err(),
            ValidationError::NotCanonical { index: 1 }
        );
    }

    #[test]
    fn parses_amount_text_strictly() {
        assert_eq!(parse_amount(0, "token_amount", "0").unwrap(), 0);
        assert_eq!(
            parse_amount(0, "token_amount", "18446744073709551615").unwrap(),
            u64::MAX
        );
        assert!(matches!(
            parse_amount(3, "token_amount", "-5"),
            Err(ValidationError::NegativeAmount { index: 3, .. })
        ));
        for bad in ["1.5", "", " 1", "1e3", "+1", "abc", "-"] {
            assert!(
                matches!(
                    parse_amount(0, "token_amount", bad),
                    Err(ValidationError::NonIntegerAmount { .. })
                ),
                "{bad:?} should be rejected as non-integer"
            );
        }
        assert!(matches!(
            parse_amount(0, "usdc_amount", "18446744073709551616"),
            Err(ValidationError::AmountOutOfRange {
                field: "usdc_amount",
                ..
            })
        ));
    }

    #[test]
    fn raw_entries_report_bad_address() {
        let raw = vec![
            RawEntry::new(address(1).to_string(), &["10"]),
            RawEntry::new("addrB", &["20"]),
        ];
        assert_eq!(
            canonicalizer().canonicalize_raw(&raw).unwrap_err(),
            ValidationError::InvalidAddress {
                index: 1,
                address: "addrB".to_string()
            }
        );
    }

    #[test]
    fn columns_must_line_up() {
        let canonicalizer = Canonicalizer::new(
            &DistributionConfig::default().with_layout(PayloadLayout::TokenAndUsdc),
        );
        let addresses = vec![address(1).to_string(), address(2).to_string()];

        let err = canonicalizer
            .canonicalize_columns(
                &addresses,
                &[vec!["1".into(), "2".into()], vec!["3".into()]],
            )
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::LengthMismatch {
                column: "usdc_amount".to_string(),
                expected: 2,
                got: 1
            }
        );

        let err = canonicalizer
            .canonicalize_columns(&addresses, &[vec!["1".into(), "2".into()]])
            .unwrap_err();
        assert!(matches!(err, ValidationError::LengthMismatch { .. }));

        let entries = canonicalizer
            .canonicalize_columns(
                &addresses,
                &[
                    vec!["1".into(), "2".into()],
                    vec!["3".into(), "4".into()],
                ],
            )
            .unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.amounts.len() == 2));

        assert_eq!(
            canonicalizer
                .canonicalize_columns(&[], &[vec![], vec![]])
                .unwrap_err(),
            ValidationError::EmptyInput
        );
    }
}
