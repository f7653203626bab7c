// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{Kernel, PrimeChart};
use log::debug;
use std::collections::BTreeSet;

/// The residual covering problem left once the kernel is removed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reduction {
    /// The chart without essential rows, essential columns and dominated rows.
    pub residual: PrimeChart,
    /// Rows dropped for being all-false, indexed in the chart after kernel removal.
    pub removed_zero_rows: BTreeSet<usize>,
    /// For each residual row, its row index in the original chart.
    pub row_origins: Vec<usize>,
}

impl PrimeChart {
    /// Deletes the kernel's rows and columns, then every row left with no true cell.
    ///
    /// Every column of the residual chart is covered by at least two rows, so running kernel
    /// extraction on it again finds nothing.
    pub fn reduce(&self, kernel: &Kernel) -> Reduction {
        let without_kernel = self.without(&kernel.rows, &kernel.columns);
        let removed_zero_rows = without_kernel.matrix().zero_rows();
        let residual = without_kernel.without(&removed_zero_rows, &BTreeSet::new());

        let row_origins = (0..self.row_count())
            .filter(|row_ix| !kernel.rows.contains(row_ix))
            .enumerate()
            .filter(|(reduced_ix, _)| !removed_zero_rows.contains(reduced_ix))
            .map(|(_, row_ix)| row_ix)
            .collect();

        debug!(
            "reduced chart to {} rows and {} columns ({} dominated rows removed)",
            residual.row_count(),
            residual.column_count(),
            removed_zero_rows.len()
        );

        Reduction {
            residual,
            removed_zero_rows,
            row_origins,
        }
    }
}
