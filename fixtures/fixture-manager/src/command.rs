// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use clap::Parser;
use color_eyre::Result;
use fixture_details::AllFixtures;

/// Manage the on-set fixtures used to regression test qm-min.
#[derive(Debug, Parser)]
pub struct FixtureManagerApp {
    #[clap(subcommand)]
    command: FixtureManagerCommand,
}

#[derive(Debug, Parser)]
pub enum FixtureManagerCommand {
    /// Generate random on-sets.
    GenerateInputs {
        #[clap(long, short, default_value_t = 64)]
        count: usize,
    },
    /// Minimize every on-set and write the results.
    GenerateOutputs,
}

impl FixtureManagerApp {
    pub fn exec(self) -> Result<()> {
        self.command.exec()
    }
}

impl FixtureManagerCommand {
    pub fn exec(self) -> Result<()> {
        let fixtures = AllFixtures::get();
        match self {
            Self::GenerateInputs { count } => fixtures.generate_inputs(count),
            Self::GenerateOutputs => fixtures.generate_outputs(),
        }
    }
}
