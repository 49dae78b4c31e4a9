//! Paths to the YAML datasets under tests/fixtures.
//!
//! `file:` references inside the datasets are relative to the package root,
//! which is the working directory of `cargo test`.

use std::path::PathBuf;

/// Get the path to a dataset fixture
///
/// # Panics
/// Panics if the fixture file doesn't exist.
pub fn get_fixture_path(name: &str) -> PathBuf {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(format!("{}.yaml", name));

    if !path.exists() {
        panic!("Fixture '{}' not found at {}", name, path.display());
    }

    path
}
