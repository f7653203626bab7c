// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::BoolMatrix;
use once_cell::sync::OnceCell;

/// Cache for chart data.
#[derive(Clone, Debug, Default)]
pub(super) struct ChartCache {
    column_counts: OnceCell<Vec<usize>>,
}

impl ChartCache {
    pub(super) fn get_or_init_column_counts(&self, matrix: &BoolMatrix) -> &[usize] {
        self.column_counts.get_or_init(|| matrix.column_counts())
    }
}
