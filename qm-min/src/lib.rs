// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Exact two-level minimization of single-output Boolean functions.
//!
//! Prime implicants are generated by repeated pairwise merging (Quine-McCluskey), essential
//! implicants are read off the prime implicant chart, and the remaining covering problem is
//! solved exactly with Petrick's method.
//!
//! ```
//! use qm_min::{minimize, on_set::OnSet};
//!
//! let on_set: OnSet = "001\n011\n101\n111\n".parse().unwrap();
//! let result = minimize(&on_set).unwrap();
//! assert_eq!(result.algebraic_display().to_string(), "c");
//! ```

pub mod chart;
pub mod errors;
pub mod implicant;
pub mod minimize;
pub mod on_set;
pub mod petrick;
pub mod primes;
#[cfg(any(test, feature = "proptest1"))]
mod proptest_helpers;

pub use minimize::{minimize, Minimization, MinimizeOptions, Minimizer};
