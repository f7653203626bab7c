// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::on_set::OnSet;
use proptest::prelude::*;

impl Arbitrary for OnSet {
    /// Inclusive range of widths to generate, `(1, 5)` by default.
    type Parameters = Option<(usize, usize)>;
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(params: Self::Parameters) -> Self::Strategy {
        let (min_width, max_width) = params.unwrap_or((1, 5));
        (min_width..=max_width)
            .prop_flat_map(|width| {
                let universe = 1_u64 << width;
                // Between one minterm and the whole universe.
                prop::collection::btree_set(0..universe, 1..=(universe as usize))
                    .prop_map(move |values| {
                        OnSet::from_values(width, values).expect("values are in range and non-empty")
                    })
            })
            .boxed()
    }
}
