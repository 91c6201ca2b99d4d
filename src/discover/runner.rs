// src/discover/runner.rs

use std::io::{self, Write};
use std::time::Instant;

use tracing::{debug, info};

use crate::discover::loader::LoadedSuite;
use crate::discover::suite::{TestCase, TestSuite};
use crate::errors::Result;
use crate::exec::CommandRunner;

const HEAVY_RULE: &str =
    "======================================================================";
const LIGHT_RULE: &str =
    "----------------------------------------------------------------------";

/// A case that did not pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseReport {
    pub id: String,
    pub message: String,
    /// Selected output of the case; empty when the command never ran.
    pub output: String,
}

/// Aggregate outcome of a discovery run.
///
/// `failures` are cases whose command ran but did not meet expectations;
/// `errors` are cases that could not run at all (or suite files that could
/// not be loaded).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestResult {
    pub tests_run: usize,
    pub failures: Vec<CaseReport>,
    pub errors: Vec<CaseReport>,
    pub should_stop: bool,
}

impl TestResult {
    pub fn was_successful(&self) -> bool {
        self.failures.is_empty() && self.errors.is_empty()
    }
}

enum CaseOutcome {
    Pass(String),
    Fail(CaseReport),
    Error(CaseReport),
}

/// Runs discovered suites case by case.
#[derive(Debug, Clone)]
pub struct TestRunner {
    runner: CommandRunner,
    failfast: bool,
    buffer: bool,
}

impl TestRunner {
    /// Defaults: fail-fast and buffered output.
    pub fn new(runner: CommandRunner) -> Self {
        Self {
            runner,
            failfast: true,
            buffer: true,
        }
    }

    pub fn failfast(mut self, failfast: bool) -> Self {
        self.failfast = failfast;
        self
    }

    pub fn buffer(mut self, buffer: bool) -> Self {
        self.buffer = buffer;
        self
    }

    /// Run `suites`, reporting to stderr.
    pub fn run(&self, suites: &[LoadedSuite]) -> Result<TestResult> {
        let stderr = io::stderr();
        let mut out = stderr.lock();
        self.run_with_writer(suites, &mut out)
    }

    pub fn run_with_writer<W: Write>(
        &self,
        suites: &[LoadedSuite],
        out: &mut W,
    ) -> Result<TestResult> {
        let started = Instant::now();
        let mut result = TestResult::default();

        'suites: for loaded in suites {
            match loaded {
                LoadedSuite::Broken { name, error, .. } => {
                    result.tests_run += 1;
                    writeln!(out, "{name} ... ERROR")?;
                    result.errors.push(CaseReport {
                        id: name.clone(),
                        message: format!("failed to load suite: {error}"),
                        output: String::new(),
                    });
                    if self.stop_requested(&mut result) {
                        break 'suites;
                    }
                }
                LoadedSuite::Loaded(suite) => {
                    for case in &suite.cases {
                        result.tests_run += 1;
                        let id = suite.case_id(case);

                        match self.run_case(suite, case) {
                            CaseOutcome::Pass(output) => {
                                self.echo_unbuffered(out, &output)?;
                                writeln!(out, "{id} ... ok")?;
                            }
                            CaseOutcome::Fail(report) => {
                                self.echo_unbuffered(out, &report.output)?;
                                writeln!(out, "{id} ... FAIL")?;
                                result.failures.push(report);
                            }
                            CaseOutcome::Error(report) => {
                                writeln!(out, "{id} ... ERROR")?;
                                result.errors.push(report);
                            }
                        }

                        if self.stop_requested(&mut result) {
                            break 'suites;
                        }
                    }
                }
            }
        }

        self.write_summary(out, &result, started)?;

        info!(
            tests_run = result.tests_run,
            failures = result.failures.len(),
            errors = result.errors.len(),
            stopped_early = result.should_stop,
            "discovery run finished"
        );

        Ok(result)
    }

    fn run_case(&self, suite: &TestSuite, case: &TestCase) -> CaseOutcome {
        let id = suite.case_id(case);
        debug!(case = %id, cmd = %case.cmd, "running case");

        match self.runner.capture(&case.cmd) {
            Ok(exec) => {
                let output = exec.selected_output().to_string();
                match case.check(&exec) {
                    None => CaseOutcome::Pass(output),
                    Some(message) => CaseOutcome::Fail(CaseReport {
                        id,
                        message,
                        output,
                    }),
                }
            }
            Err(err) => CaseOutcome::Error(CaseReport {
                id,
                message: err.to_string(),
                output: String::new(),
            }),
        }
    }

    fn stop_requested(&self, result: &mut TestResult) -> bool {
        if self.failfast && !result.was_successful() {
            result.should_stop = true;
        }
        result.should_stop
    }

    fn echo_unbuffered<W: Write>(&self, out: &mut W, output: &str) -> io::Result<()> {
        if !self.buffer && !output.is_empty() {
            writeln!(out, "{output}")?;
        }
        Ok(())
    }

    fn write_summary<W: Write>(
        &self,
        out: &mut W,
        result: &TestResult,
        started: Instant,
    ) -> io::Result<()> {
        let details = result
            .errors
            .iter()
            .map(|r| ("ERROR", r))
            .chain(result.failures.iter().map(|r| ("FAIL", r)));

        for (kind, report) in details {
            writeln!(out)?;
            writeln!(out, "{HEAVY_RULE}")?;
            writeln!(out, "{kind}: {}", report.id)?;
            writeln!(out, "{LIGHT_RULE}")?;
            writeln!(out, "{}", report.message)?;
            if self.buffer && !report.output.is_empty() {
                writeln!(out)?;
                writeln!(out, "Output:")?;
                writeln!(out, "{}", report.output)?;
            }
        }

        writeln!(out, "{LIGHT_RULE}")?;
        let plural = if result.tests_run == 1 { "" } else { "s" };
        writeln!(
            out,
            "Ran {} test{plural} in {:.3}s",
            result.tests_run,
            started.elapsed().as_secs_f64()
        )?;
        writeln!(out)?;

        if result.was_successful() {
            writeln!(out, "OK")?;
        } else {
            let mut parts = Vec::new();
            if !result.failures.is_empty() {
                parts.push(format!("failures={}", result.failures.len()));
            }
            if !result.errors.is_empty() {
                parts.push(format!("errors={}", result.errors.len()));
            }
            writeln!(out, "FAILED ({})", parts.join(", "))?;
        }

        Ok(())
    }
}
