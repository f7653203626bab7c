// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{FixtureDetails, FixtureOutput, ValueGenerator};
use camino::{Utf8Path, Utf8PathBuf};
use color_eyre::{eyre::WrapErr, Result};
use once_cell::sync::Lazy;
use proptest::prelude::*;
use qm_min::{errors::MinimizeError, on_set::OnSet, Minimizer};

pub struct AllFixtures {
    dir: Utf8PathBuf,
}

static ALL_FIXTURES_STATIC: Lazy<AllFixtures> = Lazy::new(AllFixtures::init);

impl AllFixtures {
    pub fn get() -> &'static Self {
        &*ALL_FIXTURES_STATIC
    }

    fn init() -> Self {
        let dir: Utf8PathBuf = env!("CARGO_MANIFEST_DIR").into();
        let dir = dir
            .parent()
            .expect("fixture-details lives in the fixtures directory")
            .join("data");
        Self { dir }
    }

    #[inline]
    pub fn dir(&self) -> &Utf8Path {
        &self.dir
    }

    #[inline]
    pub fn inputs_dir(&self) -> Utf8PathBuf {
        self.dir.join("inputs")
    }

    #[inline]
    pub fn outputs_dir(&self) -> Utf8PathBuf {
        self.dir.join("outputs")
    }

    /// Writes `count` random on-sets of 2 to 6 variables to the inputs directory, next to the
    /// hand-written ones.
    pub fn generate_inputs(&self, count: usize) -> Result<()> {
        let mut value_gen = ValueGenerator::from_seed("qm-min_2_6");
        let inputs_dir = self.inputs_dir();
        std::fs::create_dir_all(&inputs_dir)
            .wrap_err_with(|| format!("failed to create {}", inputs_dir))?;

        let mut isolated_count = 0;
        for ix in 0..count {
            let mut gen = value_gen.partial_clone();
            let on_set = gen.generate(any_with::<OnSet>(Some((2, 6))));
            if matches!(
                Minimizer::default().minimize(&on_set),
                Err(MinimizeError::IsolatedMinterms { .. })
            ) {
                isolated_count += 1;
            }

            let path = inputs_dir.join(format!("random-{:04}.txt", ix));
            std::fs::write(&path, on_set.to_string())
                .wrap_err_with(|| format!("failed to write {}", path))?;
        }

        println!(
            "wrote {} inputs to {} ({} with isolated minterms)",
            count, inputs_dir, isolated_count
        );
        Ok(())
    }

    /// Minimizes every input fixture and writes the result to the outputs directory.
    pub fn generate_outputs(&self) -> Result<()> {
        let outputs_dir = self.outputs_dir();
        std::fs::create_dir_all(&outputs_dir)
            .wrap_err_with(|| format!("failed to create {}", outputs_dir))?;

        let fixtures = self.load_inputs()?;
        for fixture in &fixtures {
            let minimization = fixture
                .minimize()
                .wrap_err_with(|| format!("failed to minimize {}", fixture.path()))?;
            let path = self.output_path(fixture);
            std::fs::write(&path, FixtureOutput::new(&minimization).to_string())
                .wrap_err_with(|| format!("failed to write {}", path))?;
        }

        println!("wrote {} outputs to {}", fixtures.len(), outputs_dir);
        Ok(())
    }

    /// Where the output for `fixture` is stored.
    pub fn output_path(&self, fixture: &FixtureDetails) -> Utf8PathBuf {
        self.outputs_dir().join(format!("{}.txt", fixture.name()))
    }

    /// Loads every input fixture, sorted by name.
    pub fn load_inputs(&self) -> Result<Vec<FixtureDetails>> {
        let inputs_dir = self.inputs_dir();
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(&inputs_dir)
            .wrap_err_with(|| format!("failed to read {}", inputs_dir))?
        {
            let path = Utf8PathBuf::try_from(entry?.path())?;
            if path.extension() == Some("txt") {
                paths.push(path);
            }
        }
        paths.sort();

        paths.iter().map(|path| FixtureDetails::load(path)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outputs_match() {
        let fixtures = AllFixtures::get();
        let inputs = fixtures.load_inputs().unwrap();
        assert!(!inputs.is_empty(), "no inputs in {}", fixtures.inputs_dir());

        for fixture in &inputs {
            let path = fixtures.output_path(fixture);
            let expected = std::fs::read_to_string(&path)
                .unwrap_or_else(|err| panic!("failed to read {}: {}", path, err));
            let minimization = fixture.minimize().unwrap();
            assert_eq!(
                FixtureOutput::new(&minimization).to_string(),
                expected,
                "output for {} changed",
                fixture.name()
            );
        }
    }

    #[test]
    fn test_isolated_fixture_is_reported_by_default() {
        let inputs = AllFixtures::get().load_inputs().unwrap();
        let fixture = inputs
            .iter()
            .find(|fixture| fixture.name() == "isolated-minterms")
            .unwrap();
        assert!(matches!(
            Minimizer::default().minimize(fixture.on_set()),
            Err(MinimizeError::IsolatedMinterms { .. })
        ));
    }
}
