// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Petrick's method for the covering problem left after kernel removal.
//!
//! Each row of the residual chart is a Boolean variable and each column a clause: the OR of the
//! rows covering it. A set of rows covers the chart iff it satisfies the AND of all clauses.

use crate::{chart::PrimeChart, errors::MinimizeError, implicant::AlgebraicSymbol};
use bitvec::{slice::BitSlice, vec::BitVec};
use itertools::{Itertools, Position};
use log::{debug, trace};
use std::{
    cmp::Reverse,
    collections::{BTreeMap, BTreeSet},
    fmt,
};

/// Bounds on the work done by Petrick's method.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PetrickLimits {
    /// Maximum number of clauses (residual columns).
    pub max_clauses: usize,
    /// Maximum number of search nodes to visit.
    pub max_nodes: u64,
}

impl PetrickLimits {
    pub const DEFAULT_MAX_CLAUSES: usize = 4096;
    pub const DEFAULT_MAX_NODES: u64 = 1 << 22;

    pub fn with_max_clauses(mut self, max_clauses: usize) -> Self {
        self.max_clauses = max_clauses;
        self
    }

    pub fn with_max_nodes(mut self, max_nodes: u64) -> Self {
        self.max_nodes = max_nodes;
        self
    }
}

impl Default for PetrickLimits {
    fn default() -> Self {
        Self {
            max_clauses: Self::DEFAULT_MAX_CLAUSES,
            max_nodes: Self::DEFAULT_MAX_NODES,
        }
    }
}

/// The product-of-sums form of a residual chart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PetrickProblem {
    row_count: usize,
    // clauses[c] = rows covering column c, ascending.
    clauses: Vec<Vec<usize>>,
    column_labels: Vec<String>,
}

impl PetrickProblem {
    pub fn new(chart: &PrimeChart) -> Self {
        let clauses = (0..chart.column_count())
            .map(|column_ix| {
                chart
                    .matrix()
                    .column(column_ix)
                    .enumerate()
                    .filter_map(|(row_ix, cell)| cell.then(|| row_ix))
                    .collect()
            })
            .collect();
        let column_labels = chart.minterms().iter().map(|m| m.to_string()).collect();

        Self {
            row_count: chart.row_count(),
            clauses,
            column_labels,
        }
    }

    #[inline]
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    #[inline]
    pub fn clauses(&self) -> &[Vec<usize>] {
        &self.clauses
    }

    /// Finds a minimum-cardinality set of rows satisfying every clause.
    ///
    /// Among minimum sets, the one whose sorted row indexes are lexicographically lowest is
    /// returned. Returns an empty set when there are no clauses.
    ///
    /// The problem is first shrunk by dominance, then searched in two passes. The first pass
    /// branches on the uncovered clause with the fewest rows to find the minimum size. The
    /// second includes or excludes rows in index order, so the first cover of that size it
    /// reaches is the lowest one. Both passes prune with a lower bound: the number of uncovered
    /// clauses that pairwise share no row.
    pub fn solve(&self, limits: &PetrickLimits) -> Result<Vec<usize>, MinimizeError> {
        if self.clauses.is_empty() {
            return Ok(Vec::new());
        }
        if self.clauses.len() > limits.max_clauses {
            return Err(MinimizeError::CoverExplosion {
                clauses: self.clauses.len(),
                rows: self.row_count,
                limit: limits.max_clauses,
            });
        }
        if let Some(clause_ix) = self.clauses.iter().position(|clause| clause.is_empty()) {
            return Err(MinimizeError::UncoverableColumn {
                minterm: self.column_labels[clause_ix].clone(),
            });
        }

        let mut search = CoverSearch::new(self, limits.max_nodes);
        let rows = search.run()?;
        debug!(
            "petrick: chose {} of {} rows for {} clauses after {} nodes",
            rows.len(),
            self.row_count,
            self.clauses.len(),
            search.nodes
        );
        Ok(rows)
    }
}

struct CoverSearch<'a> {
    problem: &'a PetrickProblem,
    // Rows every cover needs, found while shrinking the problem.
    forced: Vec<usize>,
    // Rows left after shrinking, ascending.
    rows: Vec<usize>,
    // Clauses left after shrinking, as ascending row indexes.
    clauses: Vec<Vec<usize>>,
    // coverage[r] = remaining clauses satisfied by row r.
    coverage: Vec<BitVec>,
    max_nodes: u64,
    nodes: u64,
}

impl<'a> CoverSearch<'a> {
    fn new(problem: &'a PetrickProblem, max_nodes: u64) -> Self {
        let (forced, rows, clauses) = shrink(problem);
        trace!(
            "petrick: {} forced rows, {} rows and {} clauses left to search",
            forced.len(),
            rows.len(),
            clauses.len()
        );

        let mut coverage = vec![BitVec::repeat(false, clauses.len()); problem.row_count];
        for (clause_ix, clause) in clauses.iter().enumerate() {
            for &row_ix in clause {
                coverage[row_ix].set(clause_ix, true);
            }
        }
        Self {
            problem,
            forced,
            rows,
            clauses,
            coverage,
            max_nodes,
            nodes: 0,
        }
    }

    fn run(&mut self) -> Result<Vec<usize>, MinimizeError> {
        let uncovered: BitVec = BitVec::repeat(true, self.clauses.len());
        let excluded: BitVec = BitVec::repeat(false, self.problem.row_count);

        let mut min_len = self.greedy_cover_len();
        self.min_cover_len(&uncovered, &excluded, 0, &mut min_len)?;

        let mut chosen = Vec::with_capacity(min_len + self.forced.len());
        if !self.first_cover(&uncovered, 0, &mut chosen, min_len)? {
            unreachable!("the first pass found a cover of {} rows", min_len);
        }
        chosen.extend_from_slice(&self.forced);
        chosen.sort_unstable();
        Ok(chosen)
    }

    fn visit(&mut self) -> Result<(), MinimizeError> {
        self.nodes += 1;
        if self.nodes > self.max_nodes {
            return Err(MinimizeError::SearchExhausted {
                clauses: self.problem.clauses.len(),
                rows: self.problem.row_count,
                nodes: self.max_nodes,
            });
        }
        Ok(())
    }

    // `uncovered` with the clauses satisfied by `row_ix` cleared.
    fn cover_with(&self, uncovered: &BitSlice, row_ix: usize) -> BitVec {
        let mut next = uncovered.to_bitvec();
        for clause_ix in self.coverage[row_ix].iter_ones() {
            next.set(clause_ix, false);
        }
        next
    }

    // Size of the cover built by repeatedly taking the row that satisfies the most clauses.
    fn greedy_cover_len(&self) -> usize {
        let mut uncovered: BitVec = BitVec::repeat(true, self.clauses.len());
        let mut len = 0;
        while uncovered.any() {
            let newly_covered = |row_ix: usize| {
                self.coverage[row_ix]
                    .iter_ones()
                    .filter(|&clause_ix| uncovered[clause_ix])
                    .count()
            };
            let row_ix = match self
                .rows
                .iter()
                .copied()
                .min_by_key(|&row_ix| Reverse(newly_covered(row_ix)))
            {
                Some(row_ix) => row_ix,
                None => break,
            };
            uncovered = self.cover_with(&uncovered, row_ix);
            len += 1;
        }
        len
    }

    // Lower bound on the allowed rows needed to satisfy `uncovered`: clauses that pairwise
    // share no allowed row each need a row of their own. None if some clause has no allowed row.
    fn lower_bound(&self, uncovered: &BitSlice, allowed: impl Fn(usize) -> bool) -> Option<usize> {
        let mut clause_ixs: Vec<usize> = uncovered.iter_ones().collect();
        clause_ixs.sort_by_key(|&clause_ix| self.clauses[clause_ix].len());

        let mut used = BitVec::<usize>::repeat(false, self.problem.row_count);
        let mut bound = 0;
        for clause_ix in clause_ixs {
            let rows: Vec<usize> = self.clauses[clause_ix]
                .iter()
                .copied()
                .filter(|&row_ix| allowed(row_ix))
                .collect();
            if rows.is_empty() {
                return None;
            }
            if rows.iter().all(|&row_ix| !used[row_ix]) {
                for row_ix in rows {
                    used.set(row_ix, true);
                }
                bound += 1;
            }
        }
        Some(bound)
    }

    // First pass: lowers `best` to the size of the smallest cover that adds rows outside
    // `excluded` to `chosen_len` chosen ones.
    fn min_cover_len(
        &mut self,
        uncovered: &BitSlice,
        excluded: &BitSlice,
        chosen_len: usize,
        best: &mut usize,
    ) -> Result<(), MinimizeError> {
        self.visit()?;

        if uncovered.not_any() {
            *best = (*best).min(chosen_len);
            return Ok(());
        }
        match self.lower_bound(uncovered, |row_ix| !excluded[row_ix]) {
            Some(bound) if chosen_len + bound < *best => {}
            _ => return Ok(()),
        }

        // Branch on the uncovered clause with the fewest allowed rows.
        let allowed_count = |clause_ix: usize| {
            self.clauses[clause_ix]
                .iter()
                .filter(|&&row_ix| !excluded[row_ix])
                .count()
        };
        let branch = match uncovered.iter_ones().min_by_key(|&ix| allowed_count(ix)) {
            Some(clause_ix) => self.clauses[clause_ix].clone(),
            None => return Ok(()),
        };

        // Once a row's branch is done, later branches exclude it.
        let mut excluded = excluded.to_bitvec();
        for row_ix in branch {
            if excluded[row_ix] {
                continue;
            }
            trace!("petrick: trying row {} at depth {}", row_ix, chosen_len);
            let next = self.cover_with(uncovered, row_ix);
            self.min_cover_len(&next, &excluded, chosen_len + 1, best)?;
            excluded.set(row_ix, true);
        }
        Ok(())
    }

    // Second pass: extends `chosen` with rows from `self.rows[position..]` into a cover of at
    // most `target` rows, including each row before excluding it. Returns false if there is
    // none.
    fn first_cover(
        &mut self,
        uncovered: &BitSlice,
        position: usize,
        chosen: &mut Vec<usize>,
        target: usize,
    ) -> Result<bool, MinimizeError> {
        self.visit()?;

        if uncovered.not_any() {
            return Ok(true);
        }
        let row_ix = match self.rows.get(position) {
            Some(&row_ix) => row_ix,
            None => return Ok(false),
        };
        match self.lower_bound(uncovered, |other_ix| other_ix >= row_ix) {
            Some(bound) if chosen.len() + bound <= target => {}
            _ => return Ok(false),
        }

        if self.coverage[row_ix].iter_ones().any(|clause_ix| uncovered[clause_ix]) {
            let next = self.cover_with(uncovered, row_ix);
            chosen.push(row_ix);
            if self.first_cover(&next, position + 1, chosen, target)? {
                return Ok(true);
            }
            chosen.pop();
        }
        self.first_cover(uncovered, position + 1, chosen, target)
    }
}

// Shrinks a problem to (forced rows, remaining rows, remaining clauses) by repeating three
// steps until none applies:
//
// * a clause with a single row forces that row, and every clause it satisfies is dropped;
// * a clause whose rows include all rows of another clause is dropped;
// * a row is dropped if it satisfies no clause, or if a lower-numbered row satisfies every
//   clause it does.
//
// None of these steps changes the lowest minimum cover.
fn shrink(problem: &PetrickProblem) -> (Vec<usize>, Vec<usize>, Vec<Vec<usize>>) {
    let mut rows: BTreeSet<usize> = (0..problem.row_count).collect();
    let mut clauses: Vec<BTreeSet<usize>> = problem
        .clauses
        .iter()
        .map(|clause| clause.iter().copied().collect())
        .collect();
    let mut forced = Vec::new();

    loop {
        let mut changed = false;

        let singles: BTreeSet<usize> = clauses
            .iter()
            .filter(|clause| clause.len() == 1)
            .flatten()
            .copied()
            .collect();
        if !singles.is_empty() {
            clauses.retain(|clause| clause.is_disjoint(&singles));
            for row_ix in &singles {
                rows.remove(row_ix);
            }
            forced.extend(singles);
            changed = true;
        }

        let dominated: BTreeSet<usize> = (0..clauses.len())
            .filter(|&c2| {
                (0..clauses.len()).any(|c1| {
                    c1 != c2
                        && clauses[c1].is_subset(&clauses[c2])
                        && (c1 < c2 || clauses[c1] != clauses[c2])
                })
            })
            .collect();
        if !dominated.is_empty() {
            clauses = clauses
                .into_iter()
                .enumerate()
                .filter(|(clause_ix, _)| !dominated.contains(clause_ix))
                .map(|(_, clause)| clause)
                .collect();
            changed = true;
        }

        let coverage: BTreeMap<usize, BTreeSet<usize>> = rows
            .iter()
            .map(|&row_ix| {
                let covered = clauses
                    .iter()
                    .enumerate()
                    .filter(|(_, clause)| clause.contains(&row_ix))
                    .map(|(clause_ix, _)| clause_ix)
                    .collect();
                (row_ix, covered)
            })
            .collect();
        let dominated: Vec<usize> = rows
            .iter()
            .copied()
            .filter(|row_ix| {
                let covered = &coverage[row_ix];
                covered.is_empty()
                    || rows
                        .range(..row_ix)
                        .any(|other_ix| covered.is_subset(&coverage[other_ix]))
            })
            .collect();
        if !dominated.is_empty() {
            for row_ix in &dominated {
                rows.remove(row_ix);
                for clause in &mut clauses {
                    clause.remove(row_ix);
                }
            }
            changed = true;
        }

        if !changed {
            break;
        }
    }

    (
        forced,
        rows.into_iter().collect(),
        clauses
            .into_iter()
            .map(|clause| clause.into_iter().collect())
            .collect(),
    )
}

/// Displays the problem as a product of sums such as `(a + b)(b + c)`, naming rows `a`, `b`, ...
impl fmt::Display for PetrickProblem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.clauses.is_empty() {
            return write!(f, "1");
        }
        for clause in &self.clauses {
            write!(f, "(")?;
            for row in clause.iter().with_position() {
                match row {
                    Position::First(&row_ix) | Position::Middle(&row_ix) => {
                        write!(f, "{} + ", AlgebraicSymbol::variable(row_ix))?;
                    }
                    Position::Last(&row_ix) | Position::Only(&row_ix) => {
                        write!(f, "{}", AlgebraicSymbol::variable(row_ix))?;
                    }
                }
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{implicant::Implicant, on_set::OnSet};
    use proptest::prelude::*;

    fn chart(on_set: &[&str], primes: &[&str]) -> PrimeChart {
        let primes: Vec<_> = primes
            .iter()
            .map(|p| Implicant::from_pattern(p).unwrap())
            .collect();
        PrimeChart::build(&primes, &OnSet::from_patterns(on_set).unwrap()).unwrap()
    }

    fn cyclic_chart() -> PrimeChart {
        chart(
            &["000", "001", "011", "111", "110", "100"],
            &["00-", "0-1", "-11", "11-", "1-0", "-00"],
        )
    }

    #[test]
    fn test_clauses() {
        let problem = PetrickProblem::new(&cyclic_chart());
        assert_eq!(problem.row_count(), 6);
        // Columns are 000, 001, 011, 100, 110, 111.
        assert_eq!(
            problem.clauses(),
            &[
                vec![0, 5],
                vec![0, 1],
                vec![1, 2],
                vec![4, 5],
                vec![3, 4],
                vec![2, 3],
            ]
        );
        assert_eq!(
            problem.to_string(),
            "(a + f)(a + b)(b + c)(e + f)(d + e)(c + d)"
        );
    }

    #[test]
    fn test_solve_cyclic() {
        let problem = PetrickProblem::new(&cyclic_chart());
        let rows = problem.solve(&PetrickLimits::default()).unwrap();
        // Two covers of size 3 exist: {0, 2, 4} and {1, 3, 5}.
        assert_eq!(rows, vec![0, 2, 4]);
    }

    #[test]
    fn test_solve_prefers_lowest_rows() {
        // Row 2 is forced. {0, 4}, {1, 3} and {3, 4} each finish the cover.
        let problem = PetrickProblem {
            row_count: 5,
            clauses: vec![vec![2], vec![0, 3], vec![1, 4], vec![3, 4]],
            column_labels: (0..4).map(|ix| ix.to_string()).collect(),
        };
        assert_eq!(
            problem.solve(&PetrickLimits::default()).unwrap(),
            vec![0, 2, 4]
        );
    }

    #[test]
    fn test_shrink() {
        // Clause 2 contains clause 1. Once it's gone, row 3 only satisfies clauses that row 0
        // satisfies too.
        let problem = PetrickProblem {
            row_count: 4,
            clauses: vec![vec![0, 1, 3], vec![1, 2], vec![1, 2, 3], vec![0, 2]],
            column_labels: (0..4).map(|ix| ix.to_string()).collect(),
        };
        let (forced, rows, clauses) = shrink(&problem);
        assert!(forced.is_empty());
        assert_eq!(rows, vec![0, 1, 2]);
        assert_eq!(clauses, vec![vec![0, 1], vec![1, 2], vec![0, 2]]);
        assert_eq!(problem.solve(&PetrickLimits::default()).unwrap(), vec![0, 1]);
    }

    #[test]
    fn test_solve_empty() {
        let problem = PetrickProblem {
            row_count: 0,
            clauses: Vec::new(),
            column_labels: Vec::new(),
        };
        assert_eq!(
            problem.solve(&PetrickLimits::default()).unwrap(),
            Vec::<usize>::new()
        );
        assert_eq!(problem.to_string(), "1");
    }

    #[test]
    fn test_limits() {
        let problem = PetrickProblem::new(&cyclic_chart());

        let limits = PetrickLimits::default().with_max_clauses(5);
        assert_eq!(
            problem.solve(&limits),
            Err(MinimizeError::CoverExplosion {
                clauses: 6,
                rows: 6,
                limit: 5
            })
        );

        let limits = PetrickLimits::default().with_max_nodes(1);
        let err = problem.solve(&limits).unwrap_err();
        assert_eq!(
            err,
            MinimizeError::SearchExhausted {
                clauses: 6,
                rows: 6,
                nodes: 1
            }
        );
        assert_eq!(
            err.to_string(),
            "cover search over 6 clauses and 6 rows gave up after 1 nodes"
        );
    }

    #[test]
    fn test_empty_clause() {
        let problem = PetrickProblem {
            row_count: 1,
            clauses: vec![vec![0], vec![]],
            column_labels: vec!["00".to_owned(), "11".to_owned()],
        };
        assert_eq!(
            problem.solve(&PetrickLimits::default()),
            Err(MinimizeError::UncoverableColumn {
                minterm: "11".to_owned()
            })
        );
    }

    fn problem_strategy() -> impl Strategy<Value = PetrickProblem> {
        (1_usize..9, 1_usize..9).prop_flat_map(|(row_count, clause_count)| {
            prop::collection::vec(
                prop::collection::btree_set(0..row_count, 1..=row_count),
                clause_count,
            )
            .prop_map(move |clauses| PetrickProblem {
                row_count,
                column_labels: (0..clauses.len()).map(|ix| ix.to_string()).collect(),
                clauses: clauses
                    .into_iter()
                    .map(|clause| clause.into_iter().collect())
                    .collect(),
            })
        })
    }

    fn satisfies(problem: &PetrickProblem, rows: &[usize]) -> bool {
        problem
            .clauses()
            .iter()
            .all(|clause| clause.iter().any(|row_ix| rows.contains(row_ix)))
    }

    // The first row set satisfying every clause, trying sets by size and then in lexicographic
    // order.
    fn first_cover_by_enumeration(problem: &PetrickProblem) -> Vec<usize> {
        (0..=problem.row_count())
            .flat_map(|size| (0..problem.row_count()).combinations(size))
            .find(|rows| satisfies(problem, rows))
            .unwrap()
    }

    proptest! {
        #[test]
        fn proptest_solve_is_lowest_minimum(problem in problem_strategy()) {
            let rows = problem.solve(&PetrickLimits::default()).unwrap();
            prop_assert!(satisfies(&problem, &rows), "solution covers every clause");
            prop_assert_eq!(rows, first_cover_by_enumeration(&problem));
        }
    }
}
