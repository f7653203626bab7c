// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use camino::{Utf8Path, Utf8PathBuf};
use color_eyre::{eyre::WrapErr, Result};
use itertools::Itertools;
use qm_min::{
    errors::MinimizeError, on_set::OnSet, primes::IsolatedMinterms, Minimization,
    MinimizeOptions, Minimizer,
};
use std::fmt;

/// A single on-set fixture on disk.
#[derive(Clone, Debug)]
pub struct FixtureDetails {
    name: String,
    path: Utf8PathBuf,
    on_set: OnSet,
}

impl FixtureDetails {
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let name = path
            .file_stem()
            .ok_or_else(|| color_eyre::eyre::eyre!("fixture path {} has no file name", path))?
            .to_owned();
        let contents = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read fixture {}", path))?;
        let on_set = contents
            .parse()
            .wrap_err_with(|| format!("failed to parse fixture {}", path))?;
        Ok(Self {
            name,
            path: path.to_owned(),
            on_set,
        })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    #[inline]
    pub fn on_set(&self) -> &OnSet {
        &self.on_set
    }

    /// Minimizes the on-set with isolated minterms emitted as primes, so that every fixture
    /// has an output.
    pub fn minimize(&self) -> Result<Minimization, MinimizeError> {
        Minimizer::new(
            MinimizeOptions::default().with_isolated_minterms(IsolatedMinterms::EmitAsPrimes),
        )
        .minimize(&self.on_set)
    }
}

/// Displays a minimization in the fixture output format: the essential and additional
/// implicants, the cover as a sum of products, then the chart before and after reduction.
#[derive(Clone, Copy, Debug)]
pub struct FixtureOutput<'a> {
    minimization: &'a Minimization,
}

impl<'a> FixtureOutput<'a> {
    pub fn new(minimization: &'a Minimization) -> Self {
        Self { minimization }
    }
}

impl<'a> fmt::Display for FixtureOutput<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let minimization = self.minimization;
        writeln!(f, "essential: {}", minimization.essential().iter().join(" "))?;
        writeln!(f, "additional: {}", minimization.additional().iter().join(" "))?;
        writeln!(f, "cover: {}", minimization.algebraic_display())?;
        writeln!(f)?;
        write!(f, "{}", minimization.chart().table_display())?;
        writeln!(f)?;
        write!(
            f,
            "{}",
            minimization.residual().table_display().with_corner("rest")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_output() {
        let on_set: OnSet = "000\n001\n011\n111\n110\n".parse().unwrap();
        let minimization = qm_min::minimize(&on_set).unwrap();
        let expected = "\
essential: 00- 11-
additional: 0-1
cover: a'b' + ab + a'c

impl | 000 | 001 | 011 | 110 | 111
00-  | 1   | 1   | 0   | 0   | 0  
0-1  | 0   | 1   | 1   | 0   | 0  
-11  | 0   | 0   | 1   | 0   | 1  
11-  | 0   | 0   | 0   | 1   | 1  

rest | 011
0-1  | 1  
-11  | 1  
";
        assert_eq!(FixtureOutput::new(&minimization).to_string(), expected);
    }
}
