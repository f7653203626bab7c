// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use thiserror::Error;

/// An implicant pattern contained a character other than `0`, `1` or `-`.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("invalid implicant pattern: positions must be 0, 1 or a dash")]
pub struct InvalidPattern;

/// Errors produced while building an [`OnSet`](crate::on_set::OnSet).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum OnSetError {
    /// The on-set has no members, so there is nothing to minimize.
    #[error("on-set is empty")]
    EmptyInput,

    /// An entry's width differs from the width of the first entry.
    #[error("on-set entry {index} has width {found}, expected {expected}")]
    InconsistentWidth {
        expected: usize,
        found: usize,
        index: usize,
    },

    /// An entry contains something other than `0` or `1`.
    #[error("on-set entry {index} contains invalid character {ch:?}")]
    InvalidCharacter { ch: char, index: usize },

    /// The same minterm was listed twice.
    #[error("on-set contains duplicate minterm {pattern}")]
    DuplicateMinterm { pattern: String },

    /// The width is zero, or too large for the integer encoding used by
    /// [`OnSet::from_values`](crate::on_set::OnSet::from_values).
    #[error("width {width} is out of range")]
    WidthOutOfRange { width: usize },

    /// An integer minterm doesn't fit in the requested width.
    #[error("value {value} does not fit in {width} variables")]
    ValueOutOfRange { value: u64, width: usize },
}

/// Errors produced by a minimization run.
///
/// All of these are terminal: a failed run never produces a partial cover.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MinimizeError {
    /// A chart column has no covering implicant. This indicates a broken
    /// invariant in prime generation rather than bad input.
    #[error("minterm {minterm} is not covered by any prime implicant")]
    UncoverableColumn { minterm: String },

    /// Some minterms never merged with anything, so under the dash-only
    /// emission rule they are not represented by any prime implicant.
    #[error(
        "isolated minterms with no merge partner are not covered: {}",
        .patterns.join(", ")
    )]
    IsolatedMinterms { patterns: Vec<String> },

    /// The residual covering problem has more clauses than the configured bound.
    #[error("residual cover problem has {clauses} clauses over {rows} rows, more than the limit of {limit}")]
    CoverExplosion {
        clauses: usize,
        rows: usize,
        limit: usize,
    },

    /// The cover search visited more nodes than the configured bound without proving a
    /// minimum.
    #[error("cover search over {clauses} clauses and {rows} rows gave up after {nodes} nodes")]
    SearchExhausted {
        clauses: usize,
        rows: usize,
        nodes: u64,
    },
}
