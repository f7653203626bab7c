// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{caches::ChartCache, BoolMatrix, ChartTableDisplay};
use crate::{errors::MinimizeError, implicant::Implicant, on_set::OnSet};
use bitvec::vec::BitVec;
use log::debug;
use std::collections::BTreeSet;

/// A prime implicant chart.
///
/// Rows are implicants in order of discovery, columns are minterms in ascending order. Cell
/// `(r, c)` is true iff implicant `r` covers minterm `c`.
#[derive(Clone, Debug)]
pub struct PrimeChart {
    width: usize,
    implicants: Vec<Implicant>,
    minterms: Vec<Implicant>,
    matrix: BoolMatrix,
    cache: ChartCache,
}

impl PrimeChart {
    /// Expands every prime implicant into its minterms and builds the chart against the on-set.
    ///
    /// Fails with [`MinimizeError::UncoverableColumn`] if some minterm is covered by no prime.
    pub fn build(primes: &[Implicant], on_set: &OnSet) -> Result<Self, MinimizeError> {
        let minterms = on_set.minterms().to_vec();
        let mut matrix = BoolMatrix::new(minterms.len());
        for prime in primes {
            let covered: BTreeSet<Implicant> = prime.minterms().collect();
            let row: BitVec = minterms.iter().map(|m| covered.contains(m)).collect();
            matrix.push_row(row);
        }

        let chart = Self::from_parts(on_set.width(), primes.to_vec(), minterms, matrix);
        if let Some(column_ix) = chart.column_counts().iter().position(|&count| count == 0) {
            return Err(MinimizeError::UncoverableColumn {
                minterm: chart.minterm(column_ix).to_string(),
            });
        }

        debug!(
            "built chart with {} rows and {} columns",
            chart.row_count(),
            chart.column_count()
        );
        Ok(chart)
    }

    pub(super) fn from_parts(
        width: usize,
        implicants: Vec<Implicant>,
        minterms: Vec<Implicant>,
        matrix: BoolMatrix,
    ) -> Self {
        debug_assert_eq!(implicants.len(), matrix.row_count(), "one label per row");
        debug_assert_eq!(minterms.len(), matrix.column_count(), "one label per column");
        Self {
            width,
            implicants,
            minterms,
            matrix,
            cache: ChartCache::default(),
        }
    }

    /// Number of variables.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Row labels.
    #[inline]
    pub fn implicants(&self) -> &[Implicant] {
        &self.implicants
    }

    /// Column labels, in ascending order.
    #[inline]
    pub fn minterms(&self) -> &[Implicant] {
        &self.minterms
    }

    /// Column label `column_ix`.
    #[inline]
    pub fn minterm(&self, column_ix: usize) -> &Implicant {
        &self.minterms[column_ix]
    }

    #[inline]
    pub fn matrix(&self) -> &BoolMatrix {
        &self.matrix
    }

    #[inline]
    pub fn row_count(&self) -> usize {
        self.matrix.row_count()
    }

    #[inline]
    pub fn column_count(&self) -> usize {
        self.matrix.column_count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.matrix.is_empty()
    }

    /// Number of implicants covering each column.
    #[inline]
    pub fn column_counts(&self) -> &[usize] {
        self.cache.get_or_init_column_counts(&self.matrix)
    }

    #[inline]
    pub fn table_display(&self) -> ChartTableDisplay<'_> {
        ChartTableDisplay::new(self)
    }

    /// Returns a copy of this chart with the given rows and columns deleted, labels included.
    pub(super) fn without(&self, rows: &BTreeSet<usize>, columns: &BTreeSet<usize>) -> Self {
        let implicants = self
            .implicants
            .iter()
            .enumerate()
            .filter(|(row_ix, _)| !rows.contains(row_ix))
            .map(|(_, implicant)| implicant.clone())
            .collect();
        let minterms = self
            .minterms
            .iter()
            .enumerate()
            .filter(|(column_ix, _)| !columns.contains(column_ix))
            .map(|(_, minterm)| minterm.clone())
            .collect();
        Self::from_parts(
            self.width,
            implicants,
            minterms,
            self.matrix.without(rows, columns),
        )
    }
}

impl PartialEq for PrimeChart {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.implicants == other.implicants
            && self.minterms == other.minterms
            && self.matrix == other.matrix
    }
}

impl Eq for PrimeChart {}
