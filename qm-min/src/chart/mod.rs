// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The prime implicant chart: construction, kernel extraction and reduction.

mod caches;
mod chart_impl;
mod display;
mod kernel;
mod matrix;
mod reduce;

pub use chart_impl::*;
pub use display::*;
pub use kernel::*;
pub use matrix::*;
pub use reduce::*;
