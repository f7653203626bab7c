// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{errors::OnSetError, implicant::Implicant};
use std::{collections::BTreeSet, fmt, str::FromStr};

/// The set of minterms on which a Boolean function is true.
///
/// An `OnSet` is always non-empty, every minterm has the same width, and minterms are kept in
/// ascending order. That order is the canonical column order of the prime implicant chart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OnSet {
    width: usize,
    minterms: Vec<Implicant>,
}

impl OnSet {
    /// Maximum width accepted by [`from_values`](Self::from_values), whose minterms are `u64`.
    pub const MAX_VALUE_WIDTH: usize = 64;

    /// Builds an on-set from binary patterns such as `"0110"`.
    ///
    /// The width is taken from the first pattern and may be any positive number. Duplicates are
    /// rejected.
    pub fn from_patterns<I, S>(patterns: I) -> Result<Self, OnSetError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut width = None;
        let mut minterms = BTreeSet::new();

        for (index, pattern) in patterns.into_iter().enumerate() {
            let pattern = pattern.as_ref();
            let found = pattern.chars().count();
            let expected = *width.get_or_insert(found);
            if expected == 0 {
                return Err(OnSetError::WidthOutOfRange { width: expected });
            }
            if found != expected {
                return Err(OnSetError::InconsistentWidth {
                    expected,
                    found,
                    index,
                });
            }

            let minterm = pattern
                .chars()
                .map(|ch| match ch {
                    '0' => Ok(Some(false)),
                    '1' => Ok(Some(true)),
                    _ => Err(OnSetError::InvalidCharacter { ch, index }),
                })
                .collect::<Result<Vec<_>, _>>()?;

            if !minterms.insert(Implicant::new(minterm)) {
                return Err(OnSetError::DuplicateMinterm {
                    pattern: pattern.to_owned(),
                });
            }
        }

        match width {
            Some(width) => Ok(Self {
                width,
                minterms: minterms.into_iter().collect(),
            }),
            None => Err(OnSetError::EmptyInput),
        }
    }

    /// Builds an on-set from integer minterms over `width` variables, most significant bit
    /// first.
    ///
    /// Unlike [`from_patterns`](Self::from_patterns), repeated values are merged, since integer
    /// sets are commonly produced by set operations.
    pub fn from_values(
        width: usize,
        values: impl IntoIterator<Item = u64>,
    ) -> Result<Self, OnSetError> {
        if width == 0 || width > Self::MAX_VALUE_WIDTH {
            return Err(OnSetError::WidthOutOfRange { width });
        }

        let values: BTreeSet<_> = values
            .into_iter()
            .map(|value| {
                if width < 64 && value >> width != 0 {
                    Err(OnSetError::ValueOutOfRange { value, width })
                } else {
                    Ok(value)
                }
            })
            .collect::<Result<_, _>>()?;

        if values.is_empty() {
            return Err(OnSetError::EmptyInput);
        }

        Ok(Self {
            width,
            minterms: values
                .into_iter()
                .map(|value| Implicant::from_value(value, width))
                .collect(),
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.minterms.len()
    }

    /// Always false: empty on-sets are rejected at construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.minterms.is_empty()
    }

    /// The minterms as dash-free implicants, in ascending order.
    #[inline]
    pub fn minterms(&self) -> &[Implicant] {
        &self.minterms
    }

    #[inline]
    pub fn contains(&self, minterm: &Implicant) -> bool {
        self.minterms.binary_search(minterm).is_ok()
    }
}

/// Parses one pattern per line. Surrounding whitespace and blank lines are ignored.
impl FromStr for OnSet {
    type Err = OnSetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_patterns(s.lines().map(str::trim).filter(|line| !line.is_empty()))
    }
}

/// Writes one pattern per line, the format accepted by `FromStr`.
impl fmt::Display for OnSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for minterm in &self.minterms {
            writeln!(f, "{}", minterm)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns(on_set: &OnSet) -> Vec<String> {
        on_set.minterms().iter().map(|m| m.to_string()).collect()
    }

    fn imp(pattern: &str) -> Implicant {
        Implicant::from_pattern(pattern).unwrap()
    }

    #[test]
    fn test_from_patterns() {
        let on_set = OnSet::from_patterns(["111", "001", "101", "011"]).unwrap();
        assert_eq!(on_set.width(), 3);
        assert_eq!(on_set.len(), 4);
        assert_eq!(patterns(&on_set), ["001", "011", "101", "111"]);
        assert!(on_set.contains(&imp("101")));
        assert!(!on_set.contains(&imp("100")));
    }

    #[test]
    fn test_from_values() {
        let on_set = OnSet::from_values(3, [7, 1, 5, 3, 1]).unwrap();
        assert_eq!(on_set, OnSet::from_patterns(["001", "011", "101", "111"]).unwrap());
    }

    #[test]
    fn test_wide_patterns() {
        let zeros = "0".repeat(65);
        let one = format!("{}1", "0".repeat(64));
        let on_set = OnSet::from_patterns([one.as_str(), zeros.as_str()]).unwrap();
        assert_eq!(on_set.width(), 65);
        assert_eq!(patterns(&on_set), [zeros, one]);
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            OnSet::from_patterns(Vec::<String>::new()),
            Err(OnSetError::EmptyInput)
        );
        assert_eq!(
            OnSet::from_patterns(["01", "011"]),
            Err(OnSetError::InconsistentWidth {
                expected: 2,
                found: 3,
                index: 1
            })
        );
        assert_eq!(
            OnSet::from_patterns(["01", "0-"]),
            Err(OnSetError::InvalidCharacter { ch: '-', index: 1 })
        );
        assert_eq!(
            OnSet::from_patterns(["01", "01"]),
            Err(OnSetError::DuplicateMinterm {
                pattern: "01".to_owned()
            })
        );
        assert_eq!(
            OnSet::from_patterns([""]),
            Err(OnSetError::WidthOutOfRange { width: 0 })
        );
        assert_eq!(
            OnSet::from_values(65, [1]),
            Err(OnSetError::WidthOutOfRange { width: 65 })
        );
        assert_eq!(
            OnSet::from_values(2, [1, 4]),
            Err(OnSetError::ValueOutOfRange { value: 4, width: 2 })
        );
        assert_eq!(
            OnSet::from_values(3, []),
            Err(OnSetError::EmptyInput)
        );
    }

    #[test]
    fn test_parse_and_display() {
        let text = "  011\n\n001\n  \n";
        let on_set: OnSet = text.parse().unwrap();
        assert_eq!(patterns(&on_set), ["001", "011"]);
        assert_eq!(on_set.to_string(), "001\n011\n");
        assert_eq!(on_set.to_string().parse::<OnSet>().unwrap(), on_set);
    }
}
