// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    chart::{Kernel, PrimeChart, Reduction},
    errors::MinimizeError,
    implicant::Implicant,
    on_set::OnSet,
    petrick::{PetrickLimits, PetrickProblem},
    primes::{IsolatedMinterms, PrimeImplicants},
};
use itertools::{Itertools, Position};
use log::debug;
use std::fmt;

/// Options for a minimization run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MinimizeOptions {
    pub isolated_minterms: IsolatedMinterms,
    pub petrick: PetrickLimits,
}

impl MinimizeOptions {
    pub fn with_isolated_minterms(mut self, isolated_minterms: IsolatedMinterms) -> Self {
        self.isolated_minterms = isolated_minterms;
        self
    }

    pub fn with_petrick_limits(mut self, petrick: PetrickLimits) -> Self {
        self.petrick = petrick;
        self
    }
}

/// Runs the Quine-McCluskey pipeline: prime generation, chart construction, kernel extraction,
/// chart reduction and Petrick's method.
#[derive(Clone, Debug, Default)]
pub struct Minimizer {
    options: MinimizeOptions,
}

impl Minimizer {
    pub fn new(options: MinimizeOptions) -> Self {
        Self { options }
    }

    #[inline]
    pub fn options(&self) -> &MinimizeOptions {
        &self.options
    }

    pub fn minimize(&self, on_set: &OnSet) -> Result<Minimization, MinimizeError> {
        debug!(
            "minimizing {} minterms over {} variables",
            on_set.len(),
            on_set.width()
        );

        let primes = PrimeImplicants::generate(on_set, self.options.isolated_minterms);
        if self.options.isolated_minterms == IsolatedMinterms::Report
            && !primes.isolated().is_empty()
        {
            return Err(MinimizeError::IsolatedMinterms {
                patterns: primes.isolated().iter().map(|m| m.to_string()).collect(),
            });
        }

        let chart = PrimeChart::build(primes.primes(), on_set)?;
        let kernel = chart.kernel();
        let reduction = chart.reduce(&kernel);

        let additional_rows = if reduction.residual.is_empty() {
            Vec::new()
        } else {
            PetrickProblem::new(&reduction.residual).solve(&self.options.petrick)?
        };

        let essential: Vec<_> = chart.implicants_at(&kernel.rows).cloned().collect();
        let additional: Vec<_> = reduction
            .residual
            .implicants_at(&additional_rows)
            .cloned()
            .collect();
        debug!(
            "minimal cover: {} essential + {} additional implicants",
            essential.len(),
            additional.len()
        );

        Ok(Minimization {
            primes: primes.into_primes(),
            chart,
            kernel,
            reduction,
            essential,
            additional,
        })
    }
}

/// Minimizes `on_set` with default options.
pub fn minimize(on_set: &OnSet) -> Result<Minimization, MinimizeError> {
    Minimizer::default().minimize(on_set)
}

/// Every stage of a successful minimization run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Minimization {
    primes: Vec<Implicant>,
    chart: PrimeChart,
    kernel: Kernel,
    reduction: Reduction,
    essential: Vec<Implicant>,
    additional: Vec<Implicant>,
}

impl Minimization {
    /// All prime implicants, in order of discovery.
    #[inline]
    pub fn primes(&self) -> &[Implicant] {
        &self.primes
    }

    /// The full prime implicant chart.
    #[inline]
    pub fn chart(&self) -> &PrimeChart {
        &self.chart
    }

    #[inline]
    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    /// The chart left after removing the kernel and dominated rows.
    #[inline]
    pub fn residual(&self) -> &PrimeChart {
        &self.reduction.residual
    }

    #[inline]
    pub fn reduction(&self) -> &Reduction {
        &self.reduction
    }

    /// Essential prime implicants, in chart row order.
    #[inline]
    pub fn essential(&self) -> &[Implicant] {
        &self.essential
    }

    /// Implicants chosen by Petrick's method, in residual row order.
    #[inline]
    pub fn additional(&self) -> &[Implicant] {
        &self.additional
    }

    /// The minimal cover: essential implicants followed by additional ones.
    pub fn cover(&self) -> impl Iterator<Item = &Implicant> + '_ {
        self.essential.iter().chain(&self.additional)
    }

    #[inline]
    pub fn cover_len(&self) -> usize {
        self.essential.len() + self.additional.len()
    }

    #[inline]
    pub fn algebraic_display(&self) -> MinimizationAlgebraicDisplay<'_> {
        MinimizationAlgebraicDisplay { minimization: self }
    }
}

/// Displays the minimal cover as a sum of products, e.g. `a'b + c`.
pub struct MinimizationAlgebraicDisplay<'a> {
    minimization: &'a Minimization,
}

impl<'a> fmt::Display for MinimizationAlgebraicDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for implicant in self.minimization.cover().with_position() {
            match implicant {
                Position::First(implicant) | Position::Middle(implicant) => {
                    write!(f, "{} + ", implicant.algebraic_display())?;
                }
                Position::Last(implicant) | Position::Only(implicant) => {
                    write!(f, "{}", implicant.algebraic_display())?;
                }
            }
        }
        Ok(())
    }
}
