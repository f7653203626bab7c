// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::errors::InvalidPattern;
use std::{fmt, str::FromStr};

/// A product term over `width` variables.
///
/// Each position is `Some(false)` (complemented literal), `Some(true)` (literal) or `None` (a
/// dash: the variable is absent from the product). An implicant represents every minterm obtained
/// by instantiating its dashes to 0 or 1.
///
/// The derived ordering compares positions left to right with `0 < 1`, so for dash-free
/// implicants it matches the order of the binary numbers they spell.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct Implicant {
    pub input: Box<[Option<bool>]>,
}

impl Implicant {
    #[inline]
    pub fn new(input: impl IntoIterator<Item = Option<bool>>) -> Self {
        Self {
            input: input.into_iter().collect(),
        }
    }

    /// Builds an implicant from a pattern such as `"01-1"`.
    pub fn from_pattern(pattern: &str) -> Result<Self, InvalidPattern> {
        let input = pattern
            .chars()
            .map(|ch| match ch {
                '0' => Ok(Some(false)),
                '1' => Ok(Some(true)),
                '-' => Ok(None),
                _ => Err(InvalidPattern),
            })
            .collect::<Result<_, _>>()?;
        Ok(Self { input })
    }

    /// Builds the minterm for `value`, most significant bit first.
    ///
    /// Positions beyond the 64 bits of `value` are 0.
    pub fn from_value(value: u64, width: usize) -> Self {
        Self::new((0..width).map(|ix| {
            let shift = (width - 1 - ix) as u32;
            Some(value.checked_shr(shift).unwrap_or(0) & 1 == 1)
        }))
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.input.len()
    }

    #[inline]
    pub fn has_dash(&self) -> bool {
        self.input.iter().any(|c| c.is_none())
    }

    #[inline]
    pub fn dash_count(&self) -> usize {
        self.input.iter().filter(|c| c.is_none()).count()
    }

    /// Attempts to merge two implicants of the same width.
    ///
    /// The merge succeeds iff the implicants differ in exactly one position and both values at
    /// that position are literals. A dash only matches a dash: a dash against a literal is a
    /// mismatch like any other. Returns the merged implicant, with a dash at the differing
    /// position, along with that position.
    pub fn try_merge(&self, other: &Implicant) -> Option<(Implicant, usize)> {
        debug_assert_eq!(self.width(), other.width(), "implicant widths must match");

        let mut differing = None;
        for (ix, (c, d)) in self.input.iter().zip(other.input.iter()).enumerate() {
            if c == d {
                continue;
            }
            if differing.is_some() {
                return None;
            }
            differing = Some(ix);
        }

        let ix = differing?;
        if self.input[ix].is_none() || other.input[ix].is_none() {
            return None;
        }

        let mut input = self.input.clone();
        input[ix] = None;
        Some((Implicant { input }, ix))
    }

    /// Returns every minterm this implicant represents, in ascending order.
    ///
    /// Dash assignments are enumerated with a counter rather than by recursion, so expansion
    /// works at any width.
    pub fn minterms(&self) -> Minterms<'_> {
        Minterms::new(self)
    }

    /// Returns true if `minterm` is one of the minterms of this implicant.
    pub fn covers(&self, minterm: &Implicant) -> bool {
        self.width() == minterm.width()
            && self
                .input
                .iter()
                .zip(minterm.input.iter())
                .all(|(c, m)| c.is_none() || c == m)
    }

    #[inline]
    pub fn algebraic_display(&self) -> ImplicantAlgebraicDisplay<'_> {
        ImplicantAlgebraicDisplay::new(self)
    }
}

impl FromStr for Implicant {
    type Err = InvalidPattern;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_pattern(s)
    }
}

/// Writes the pattern form, such as `01-1`.
impl fmt::Display for Implicant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for input in self.input.iter() {
            let ch = match input {
                Some(true) => '1',
                Some(false) => '0',
                None => '-',
            };
            write!(f, "{}", ch)?;
        }
        Ok(())
    }
}

/// Iterator over the minterms of an [`Implicant`], in ascending order.
#[derive(Clone, Debug)]
pub struct Minterms<'a> {
    implicant: &'a Implicant,
    // Dash positions, left to right.
    dashes: Vec<usize>,
    next: Option<u64>,
}

impl<'a> Minterms<'a> {
    fn new(implicant: &'a Implicant) -> Self {
        let dashes = implicant
            .input
            .iter()
            .enumerate()
            .filter_map(|(ix, c)| c.is_none().then(|| ix))
            .collect();
        Self {
            implicant,
            dashes,
            next: Some(0),
        }
    }
}

impl<'a> Iterator for Minterms<'a> {
    type Item = Implicant;

    fn next(&mut self) -> Option<Implicant> {
        let counter = self.next?;
        let dash_count = self.dashes.len();

        // The rightmost dash takes the least significant bit of the counter.
        let mut input = self.implicant.input.clone();
        for (bit, &ix) in self.dashes.iter().rev().enumerate() {
            input[ix] = Some(counter.checked_shr(bit as u32).unwrap_or(0) & 1 == 1);
        }

        self.next = counter
            .checked_add(1)
            .filter(|&next| dash_count >= 64 || next >> dash_count == 0);
        Some(Implicant { input })
    }
}

pub struct ImplicantAlgebraicDisplay<'a> {
    implicant: &'a Implicant,
}

impl<'a> ImplicantAlgebraicDisplay<'a> {
    pub fn new(implicant: &'a Implicant) -> Self {
        Self { implicant }
    }
}

impl<'a> fmt::Display for ImplicantAlgebraicDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // The empty product is the constant 1.
        if !self.implicant.input.iter().any(|c| c.is_some()) {
            return write!(f, "1");
        }

        for (input_ix, input) in self.implicant.input.iter().enumerate() {
            match input {
                Some(true) => write!(f, "{}", AlgebraicSymbol::variable(input_ix))?,
                Some(false) => write!(f, "{}'", AlgebraicSymbol::variable(input_ix))?,
                None => {}
            };
        }

        Ok(())
    }
}

const ALGEBRAIC_SYMBOLS: [char; 26] = [
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's',
    't', 'u', 'v', 'w', 'x', 'y', 'z',
];

/// Name of a variable: `a` to `z`, then `ba`, `bb`, and so on.
#[derive(Debug)]
pub(crate) enum AlgebraicSymbol {
    Char(char),
    String(String),
}

impl AlgebraicSymbol {
    pub(crate) fn variable(ix: usize) -> Self {
        if ix < 26 {
            return Self::Char(ALGEBRAIC_SYMBOLS[ix]);
        }
        let rest = ix / 26;
        let last_ch = ALGEBRAIC_SYMBOLS[ix % 26];

        match Self::variable(rest) {
            Self::Char(ch) => Self::String(format!("{}{}", ch, last_ch)),
            Self::String(mut s) => {
                s.push(last_ch);
                Self::String(s)
            }
        }
    }
}

impl fmt::Display for AlgebraicSymbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Char(ch) => write!(f, "{}", *ch),
            Self::String(s) => write!(f, "{}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn imp(pattern: &str) -> Implicant {
        Implicant::from_pattern(pattern).unwrap()
    }

    fn patterns(minterms: Minterms<'_>) -> Vec<String> {
        minterms.map(|m| m.to_string()).collect()
    }

    #[test]
    fn test_from_pattern() {
        assert_eq!(imp("0-1"), Implicant::new([Some(false), None, Some(true)]));
        assert_eq!(Implicant::from_pattern("0x1"), Err(InvalidPattern));
        assert_eq!("0-1".parse::<Implicant>().unwrap().to_string(), "0-1");
    }

    #[test]
    fn test_from_value() {
        assert_eq!(Implicant::from_value(5, 4), imp("0101"));
        assert_eq!(Implicant::from_value(0, 1), imp("0"));
        assert_eq!(
            Implicant::from_value(u64::MAX, 66).to_string(),
            format!("00{}", "1".repeat(64))
        );
    }

    #[test]
    fn test_try_merge() {
        assert_eq!(imp("001").try_merge(&imp("011")), Some((imp("0-1"), 1)));
        assert_eq!(imp("0-1").try_merge(&imp("1-1")), Some((imp("--1"), 0)));

        // Two differing positions.
        assert_eq!(imp("000").try_merge(&imp("011")), None);
        // Identical patterns.
        assert_eq!(imp("0-1").try_merge(&imp("0-1")), None);
        // A dash against a literal is a mismatch, never a merge.
        assert_eq!(imp("0-1").try_merge(&imp("011")), None);
        assert_eq!(imp("-01").try_merge(&imp("0-1")), None);
    }

    #[test]
    fn test_minterms() {
        assert_eq!(patterns(imp("1-1").minterms()), ["101", "111"]);
        assert_eq!(patterns(imp("--1").minterms()), ["001", "011", "101", "111"]);
        assert_eq!(patterns(imp("110").minterms()), ["110"]);
        assert_eq!(patterns(imp("-0-").minterms()), ["000", "001", "100", "101"]);
        assert!(imp("-0-").covers(&imp("101")));
        assert!(!imp("-0-").covers(&imp("111")));
        assert!(!imp("-0-").covers(&imp("1010")));
    }

    #[test]
    fn test_wide_implicant() {
        let zeros = "0".repeat(63);
        let wide = imp(&format!("-{}-1", zeros));
        assert_eq!(wide.width(), 66);
        assert_eq!(
            patterns(wide.minterms()),
            [
                format!("0{}01", zeros),
                format!("0{}11", zeros),
                format!("1{}01", zeros),
                format!("1{}11", zeros),
            ]
        );
        let algebraic = wide.algebraic_display().to_string();
        assert!(algebraic.starts_with("b'c'd'"), "{}", algebraic);
        assert!(algebraic.ends_with("cl'cn"), "{}", algebraic);
    }

    #[test]
    fn test_algebraic_display() {
        assert_eq!(format!("{}", imp("01-").algebraic_display()), "a'b");
        assert_eq!(format!("{}", imp("---").algebraic_display()), "1");
        assert_eq!(format!("{}", AlgebraicSymbol::variable(26)), "ba");
        assert_eq!(format!("{}", AlgebraicSymbol::variable(27)), "bb");
    }

    fn pattern_pair() -> impl Strategy<Value = (Implicant, Implicant)> {
        (1_usize..8).prop_flat_map(|width| {
            let position = prop::option::of(any::<bool>());
            (
                prop::collection::vec(position.clone(), width),
                prop::collection::vec(position, width),
            )
                .prop_map(|(a, b)| (Implicant::new(a), Implicant::new(b)))
        })
    }

    proptest! {
        #[test]
        fn proptest_merge_rule((a, b) in pattern_pair()) {
            let differing: Vec<_> = (0..a.width()).filter(|&ix| a.input[ix] != b.input[ix]).collect();
            let expected = differing.len() == 1
                && a.input[differing[0]].is_some()
                && b.input[differing[0]].is_some();

            match a.try_merge(&b) {
                Some((merged, ix)) => {
                    prop_assert!(expected, "merge should not have happened");
                    prop_assert_eq!(ix, differing[0]);
                    let mut input = a.input.clone();
                    input[ix] = None;
                    prop_assert_eq!(merged.input, input);
                }
                None => prop_assert!(!expected, "merge should have happened"),
            }
        }

        #[test]
        fn proptest_minterms_sorted_and_covered((a, _) in pattern_pair()) {
            let minterms: Vec<_> = a.minterms().collect();
            prop_assert_eq!(minterms.len(), 1 << a.dash_count());
            prop_assert!(minterms.windows(2).all(|w| w[0] < w[1]), "ascending order");
            for value in 0..(1_u64 << a.width()) {
                let minterm = Implicant::from_value(value, a.width());
                prop_assert_eq!(a.covers(&minterm), minterms.contains(&minterm));
            }
        }
    }
}
