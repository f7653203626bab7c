// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::PrimeChart;
use std::{borrow::Cow, fmt};

/// Displays a chart as a text table: a header of minterm patterns, then one line per implicant.
///
/// ```
/// use qm_min::{chart::PrimeChart, implicant::Implicant, on_set::OnSet};
///
/// let on_set = OnSet::from_patterns(["00", "01"]).unwrap();
/// let primes = [Implicant::from_pattern("0-").unwrap()];
/// let chart = PrimeChart::build(&primes, &on_set).unwrap();
///
/// assert_eq!(
///     chart.table_display().to_string(),
///     "impl | 00 | 01\n0-   | 1  | 1 \n",
/// );
/// ```
#[derive(Clone, Debug)]
pub struct ChartTableDisplay<'a> {
    chart: &'a PrimeChart,
    corner: Cow<'a, str>,
    column_separator: Cow<'a, str>,
}

impl<'a> ChartTableDisplay<'a> {
    pub fn new(chart: &'a PrimeChart) -> Self {
        Self {
            chart,
            corner: Cow::Borrowed("impl"),
            column_separator: Cow::Borrowed(" | "),
        }
    }

    /// Sets the text in the top-left cell.
    pub fn with_corner(mut self, corner: impl Into<Cow<'a, str>>) -> Self {
        self.corner = corner.into();
        self
    }

    pub fn with_column_separator(mut self, separator: impl Into<Cow<'a, str>>) -> Self {
        self.column_separator = separator.into();
        self
    }
}

impl<'a> fmt::Display for ChartTableDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let cell_width = self.chart.width();
        let label_width = cell_width.max(self.corner.chars().count());

        write!(f, "{:<width$}", self.corner, width = label_width)?;
        for column_ix in 0..self.chart.column_count() {
            let pattern = self.chart.minterm(column_ix).to_string();
            write!(
                f,
                "{}{:<width$}",
                self.column_separator,
                pattern,
                width = cell_width
            )?;
        }
        writeln!(f)?;

        for (implicant, row) in self.chart.implicants().iter().zip(self.chart.matrix().rows()) {
            write!(
                f,
                "{:<width$}",
                implicant.to_string(),
                width = label_width
            )?;
            for cell in row.iter().by_vals() {
                let ch = if cell { '1' } else { '0' };
                write!(f, "{}{:<width$}", self.column_separator, ch, width = cell_width)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
