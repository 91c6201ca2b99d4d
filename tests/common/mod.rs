#![allow(dead_code)]

use std::path::PathBuf;

pub use cmdrun_test_utils::fake_resolver::StaticResolver;
pub use cmdrun_test_utils::init_tracing;

/// Directory holding the checked-in discovery fixtures.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/discover")
}
