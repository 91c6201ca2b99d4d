// src/discover/mod.rs

//! Test discovery.
//!
//! Suite files are found by file-name pattern under a start directory
//! ([`loader`]), parsed into cases ([`suite`]) and executed one by one through
//! the scoped execution style ([`runner`]).

pub mod loader;
pub mod runner;
pub mod suite;

use crate::config::DiscoverSection;
use crate::errors::Result;
use crate::exec::CommandRunner;
use crate::fs::FileSystem;

pub use loader::{LoadedSuite, discover_suites};
pub use runner::{CaseReport, TestResult, TestRunner};
pub use suite::{TestCase, TestSuite};

/// Discover suites as configured by `section` and run them, reporting to
/// stderr.
pub fn discover_and_run(
    fs: &dyn FileSystem,
    section: &DiscoverSection,
    runner: CommandRunner,
) -> Result<TestResult> {
    let suites = discover_suites(fs, &section.start_dir, &section.pattern)?;
    TestRunner::new(runner)
        .failfast(section.failfast)
        .buffer(section.buffer)
        .run(&suites)
}
