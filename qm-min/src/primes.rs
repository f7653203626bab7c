// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{implicant::Implicant, on_set::OnSet};
use itertools::Itertools;
use log::{debug, trace};
use std::collections::BTreeSet;

/// How prime generation treats minterms that have no merge partner at all.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IsolatedMinterms {
    /// Only implicants containing a dash are emitted as primes. Isolated minterms are recorded
    /// in [`PrimeImplicants::isolated`] and the minimizer reports them as an error.
    #[default]
    Report,

    /// Isolated minterms are emitted as primes too, which is the full Quine-McCluskey rule.
    EmitAsPrimes,
}

/// One generation of implicants. Level `k` holds implicants with exactly `k` dashes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Level {
    index: usize,
    implicants: Vec<Implicant>,
}

/// The outcome of merging every pair in a [`Level`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelMerge {
    /// Distinct merge results, in the order they were first produced.
    pub next: Level,
    /// Members of the merged level that didn't take part in any merge.
    pub unmerged: Vec<Implicant>,
}

impl Level {
    /// Level 0: the minterms of the on-set, in ascending order.
    pub fn initial(on_set: &OnSet) -> Self {
        Self {
            index: 0,
            implicants: on_set.minterms().to_vec(),
        }
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn implicants(&self) -> &[Implicant] {
        &self.implicants
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.implicants.is_empty()
    }

    /// Attempts to merge every unordered pair of implicants in this level.
    pub fn merge_pairs(&self) -> LevelMerge {
        let mut merged = vec![false; self.implicants.len()];
        let mut seen = BTreeSet::new();
        let mut next = Vec::new();

        for ((a_ix, a), (b_ix, b)) in self.implicants.iter().enumerate().tuple_combinations() {
            if let Some((implicant, position)) = a.try_merge(b) {
                trace!("merged {} and {} at {} into {}", a, b, position, implicant);
                merged[a_ix] = true;
                merged[b_ix] = true;
                if seen.insert(implicant.clone()) {
                    next.push(implicant);
                }
            }
        }

        let unmerged = self
            .implicants
            .iter()
            .zip(&merged)
            .filter_map(|(implicant, &merged)| (!merged).then(|| implicant.clone()))
            .collect();

        LevelMerge {
            next: Level {
                index: self.index + 1,
                implicants: next,
            },
            unmerged,
        }
    }
}

/// The prime implicants of an on-set, in order of discovery.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrimeImplicants {
    primes: Vec<Implicant>,
    isolated: Vec<Implicant>,
    level_count: usize,
}

impl PrimeImplicants {
    /// Merges level after level until a level produces no merges.
    ///
    /// After each level, every member that took part in no merge and contains a dash becomes a
    /// prime implicant. Unmerged level-0 minterms are handled according to `policy`.
    pub fn generate(on_set: &OnSet, policy: IsolatedMinterms) -> Self {
        let mut level = Level::initial(on_set);
        let mut primes = Vec::new();
        let mut recorded = BTreeSet::new();
        let mut isolated = Vec::new();

        loop {
            let LevelMerge { next, unmerged } = level.merge_pairs();
            debug!(
                "level {}: {} implicants, {} merged into level {}, {} unmerged",
                level.index(),
                level.implicants().len(),
                next.implicants().len(),
                next.index(),
                unmerged.len(),
            );

            for implicant in unmerged {
                if !implicant.has_dash() {
                    if policy == IsolatedMinterms::EmitAsPrimes && recorded.insert(implicant.clone())
                    {
                        primes.push(implicant.clone());
                    }
                    isolated.push(implicant);
                } else if recorded.insert(implicant.clone()) {
                    primes.push(implicant);
                }
            }

            if next.is_empty() {
                break;
            }
            level = next;
        }

        let level_count = level.index() + 1;
        debug!(
            "generated {} prime implicants over {} levels ({} isolated minterms)",
            primes.len(),
            level_count,
            isolated.len(),
        );

        Self {
            primes,
            isolated,
            level_count,
        }
    }

    #[inline]
    pub fn primes(&self) -> &[Implicant] {
        &self.primes
    }

    #[inline]
    pub fn into_primes(self) -> Vec<Implicant> {
        self.primes
    }

    /// Level-0 minterms that merged with nothing, whatever the policy.
    #[inline]
    pub fn isolated(&self) -> &[Implicant] {
        &self.isolated
    }

    /// Number of levels that were scanned, including level 0.
    #[inline]
    pub fn level_count(&self) -> usize {
        self.level_count
    }
}
