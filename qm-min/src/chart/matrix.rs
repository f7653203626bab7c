// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use bitvec::{slice::BitSlice, vec::BitVec};
use std::collections::BTreeSet;

/// A dense boolean matrix stored as one bit vector per row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BoolMatrix {
    rows: Vec<BitVec>,
    column_count: usize,
}

impl BoolMatrix {
    /// Creates a matrix with `column_count` columns and no rows.
    pub fn new(column_count: usize) -> Self {
        Self {
            rows: Vec::new(),
            column_count,
        }
    }

    /// Creates a matrix from rows of cells.
    ///
    /// Panics if any row doesn't have exactly `column_count` cells.
    pub fn from_rows<R>(column_count: usize, rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = bool>,
    {
        let mut matrix = Self::new(column_count);
        for row in rows {
            matrix.push_row(row.into_iter().collect());
        }
        matrix
    }

    /// Appends a row.
    ///
    /// Panics if the row doesn't have exactly `self.column_count()` cells.
    pub fn push_row(&mut self, row: BitVec) {
        assert_eq!(
            row.len(),
            self.column_count,
            "row length {} must match column count {}",
            row.len(),
            self.column_count
        );
        self.rows.push(row);
    }

    #[inline]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Returns true if the matrix has no rows or no columns.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.column_count == 0
    }

    #[inline]
    pub fn get(&self, row_ix: usize, column_ix: usize) -> bool {
        self.rows[row_ix][column_ix]
    }

    #[inline]
    pub fn row(&self, row_ix: usize) -> &BitSlice {
        &self.rows[row_ix]
    }

    #[inline]
    pub fn rows(&self) -> impl Iterator<Item = &BitSlice> + '_ {
        self.rows.iter().map(|row| row.as_bitslice())
    }

    pub fn column(&self, column_ix: usize) -> impl Iterator<Item = bool> + '_ {
        assert!(
            column_ix < self.column_count,
            "column {} must be in range 0..{}",
            column_ix,
            self.column_count
        );
        self.rows.iter().map(move |row| row[column_ix])
    }

    /// Number of true cells in each column.
    pub fn column_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.column_count];
        for row in &self.rows {
            for column_ix in row.iter_ones() {
                counts[column_ix] += 1;
            }
        }
        counts
    }

    /// Indexes of rows with no true cell.
    pub fn zero_rows(&self) -> BTreeSet<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter_map(|(row_ix, row)| row.not_any().then(|| row_ix))
            .collect()
    }

    /// Returns a copy of this matrix with the given rows and columns deleted.
    pub fn without(&self, rows: &BTreeSet<usize>, columns: &BTreeSet<usize>) -> Self {
        let column_count = self.column_count - columns.range(..self.column_count).count();
        let rows = self
            .rows
            .iter()
            .enumerate()
            .filter(|(row_ix, _)| !rows.contains(row_ix))
            .map(|(_, row)| {
                row.iter()
                    .by_vals()
                    .enumerate()
                    .filter_map(|(column_ix, cell)| (!columns.contains(&column_ix)).then(|| cell))
                    .collect::<BitVec>()
            })
            .collect();
        Self { rows, column_count }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: &[&[u8]]) -> BoolMatrix {
        let column_count = rows.first().map_or(0, |row| row.len());
        BoolMatrix::from_rows(
            column_count,
            rows.iter().map(|row| row.iter().map(|&cell| cell == 1)),
        )
    }

    #[test]
    fn test_columns() {
        let m = matrix(&[&[1, 0, 1], &[0, 0, 1], &[1, 0, 0]]);
        assert_eq!(m.row_count(), 3);
        assert_eq!(m.column_count(), 3);
        assert_eq!(m.column_counts(), vec![2, 0, 2]);
        assert_eq!(m.column(2).collect::<Vec<_>>(), vec![true, true, false]);
        assert!(m.get(0, 0));
        assert!(!m.get(1, 0));
    }

    #[test]
    fn test_without() {
        let m = matrix(&[&[1, 0, 1], &[0, 1, 1], &[1, 0, 0]]);
        let rows = BTreeSet::from([1]);
        let columns = BTreeSet::from([0]);
        let reduced = m.without(&rows, &columns);
        assert_eq!(reduced, matrix(&[&[0, 1], &[0, 0]]));
        assert_eq!(reduced.zero_rows(), BTreeSet::from([1]));

        let all_columns = BTreeSet::from([0, 1, 2]);
        let empty = m.without(&BTreeSet::new(), &all_columns);
        assert_eq!(empty.row_count(), 3);
        assert_eq!(empty.column_count(), 0);
        assert!(empty.is_empty());
        assert_eq!(empty.zero_rows().len(), 3);
    }

    #[test]
    #[should_panic(expected = "must match column count")]
    fn test_row_length_checked() {
        let mut m = BoolMatrix::new(2);
        m.push_row([true].into_iter().collect());
    }
}
