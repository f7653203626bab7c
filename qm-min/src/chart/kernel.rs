// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::PrimeChart;
use crate::implicant::Implicant;
use log::debug;
use std::collections::BTreeSet;

/// The essential part of a chart: rows that are the sole cover of some column, and every column
/// those rows cover.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Kernel {
    pub rows: BTreeSet<usize>,
    pub columns: BTreeSet<usize>,
}

impl Kernel {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl PrimeChart {
    /// Rows that hold the only true cell of at least one column.
    pub fn essential_rows(&self) -> BTreeSet<usize> {
        self.column_counts()
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count == 1)
            .filter_map(|(column_ix, _)| self.matrix().column(column_ix).position(|cell| cell))
            .collect()
    }

    /// Union of the columns covered by `rows`.
    pub fn essential_columns(&self, rows: &BTreeSet<usize>) -> BTreeSet<usize> {
        rows.iter()
            .flat_map(|&row_ix| self.matrix().row(row_ix).iter_ones())
            .collect()
    }

    pub fn kernel(&self) -> Kernel {
        let rows = self.essential_rows();
        let columns = self.essential_columns(&rows);
        debug!(
            "kernel: {} essential rows covering {} of {} columns",
            rows.len(),
            columns.len(),
            self.column_count()
        );
        Kernel { rows, columns }
    }

    /// The implicants of the given rows, in row order.
    pub fn implicants_at<'a>(
        &'a self,
        rows: impl IntoIterator<Item = &'a usize> + 'a,
    ) -> impl Iterator<Item = &'a Implicant> + 'a {
        rows.into_iter().map(move |&row_ix| &self.implicants()[row_ix])
    }
}
