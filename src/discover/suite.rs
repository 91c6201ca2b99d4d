// src/discover/suite.rs

//! Test-suite files.
//!
//! A suite is a TOML file with one `[[case]]` table per test case:
//!
//! ```toml
//! [[case]]
//! name = "echo_hello"
//! cmd = "echo Hello"
//! expect_output = "Hello"
//!
//! [[case]]
//! name = "false_fails"
//! cmd = "false"
//! expect_code = 1
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::{CmdrunError, Result};
use crate::exec::ExecutionResult;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSuiteFile {
    #[serde(default, rename = "case")]
    cases: Vec<TestCase>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TestCase {
    pub name: String,

    /// Command string, parsed like any other (no shell, no quoting).
    pub cmd: String,

    #[serde(default)]
    pub expect_code: i32,

    /// Substring that must appear in the selected output.
    #[serde(default)]
    pub expect_output: Option<String>,
}

impl TestCase {
    /// `None` if the result satisfies this case, otherwise why it didn't.
    pub fn check(&self, result: &ExecutionResult) -> Option<String> {
        if result.code != self.expect_code {
            return Some(format!(
                "expected exit code {}, got {}",
                self.expect_code, result.code
            ));
        }
        if let Some(ref expected) = self.expect_output {
            if !result.selected_output().contains(expected.as_str()) {
                return Some(format!("output does not contain {expected:?}"));
            }
        }
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestSuite {
    /// File stem of the suite file, used to prefix case ids.
    pub name: String,
    pub path: PathBuf,
    pub cases: Vec<TestCase>,
}

impl TestSuite {
    pub fn parse(path: &Path, contents: &str) -> Result<Self> {
        let raw: RawSuiteFile = toml::from_str(contents)?;

        let mut seen = HashSet::new();
        for case in &raw.cases {
            if !seen.insert(case.name.as_str()) {
                return Err(CmdrunError::ConfigError(format!(
                    "suite {:?} declares case '{}' more than once",
                    path, case.name
                )));
            }
        }

        Ok(Self {
            name: suite_name(path),
            path: path.to_path_buf(),
            cases: raw.cases,
        })
    }

    pub fn case_id(&self, case: &TestCase) -> String {
        format!("{}::{}", self.name, case.name)
    }
}

pub(crate) fn suite_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(code: i32, stdout: &str) -> ExecutionResult {
        ExecutionResult {
            code,
            stdout: stdout.to_string(),
            stderr: String::new(),
        }
    }

    #[test]
    fn parses_cases_with_defaults() {
        let suite = TestSuite::parse(
            Path::new("test/runner_test.toml"),
            r#"
[[case]]
name = "hello"
cmd = "echo Hello"
expect_output = "Hello"

[[case]]
name = "false"
cmd = "false"
expect_code = 1
"#,
        )
        .unwrap();

        assert_eq!(suite.name, "runner_test");
        assert_eq!(suite.cases.len(), 2);
        assert_eq!(suite.cases[0].expect_code, 0);
        assert_eq!(suite.case_id(&suite.cases[1]), "runner_test::false");
    }

    #[test]
    fn rejects_duplicate_case_names() {
        let err = TestSuite::parse(
            Path::new("dup_test.toml"),
            "[[case]]\nname = \"a\"\ncmd = \"true\"\n[[case]]\nname = \"a\"\ncmd = \"true\"\n",
        )
        .unwrap_err();
        assert!(matches!(err, CmdrunError::ConfigError(msg) if msg.contains("more than once")));
    }

    #[test]
    fn check_reports_code_before_output() {
        let case = TestCase {
            name: "c".to_string(),
            cmd: "echo Hello".to_string(),
            expect_code: 0,
            expect_output: Some("Hello".to_string()),
        };
        assert_eq!(case.check(&result(0, "Hello\n")), None);
        assert_eq!(
            case.check(&result(2, "")),
            Some("expected exit code 0, got 2".to_string())
        );
        assert!(case.check(&result(0, "Bye")).unwrap().contains("Hello"));
    }
}
