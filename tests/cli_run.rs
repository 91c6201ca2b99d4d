// tests/cli_run.rs
#![cfg(unix)]

mod common;
use crate::common::{fixtures_dir, init_tracing};

use std::io::Write;
use std::path::Path;

use clap::Parser;
use cmdrun_test_utils::builders::SuiteBuilder;
use tempfile::{NamedTempFile, tempdir};

use cmdrun::cli::CliArgs;
use cmdrun::errors::CmdrunError;
use cmdrun::{exit_code_for, run};

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

fn args(config: &NamedTempFile, rest: &[&str]) -> CliArgs {
    let config = config.path().to_str().unwrap();
    let mut argv = vec!["cmdrun", "--config", config];
    argv.extend_from_slice(rest);
    CliArgs::try_parse_from(argv).unwrap()
}

fn start_dir_config(dir: &Path, extra: &str) -> NamedTempFile {
    let dir = dir.to_str().unwrap();
    config_file(&format!("[discover]\nstart_dir = {dir:?}\n{extra}"))
}

#[tokio::test]
async fn exec_returns_the_child_code_by_default() {
    init_tracing();
    let cfg = config_file("");

    assert_eq!(run(args(&cfg, &["exec", "echo Hello"])).await.unwrap(), 0);
    assert_eq!(run(args(&cfg, &["exec", "false"])).await.unwrap(), 1);
}

#[tokio::test]
async fn configured_checked_style_turns_failure_into_an_error() {
    let cfg = config_file("[exec]\nstyle = \"checked\"\n");

    let err = run(args(&cfg, &["exec", "false"])).await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<CmdrunError>(),
        Some(CmdrunError::NonZeroExit { code: 1, .. })
    ));
    assert_eq!(exit_code_for(&err), 1);
}

#[tokio::test]
async fn style_flag_overrides_the_configured_style() {
    let cfg = config_file("[exec]\nstyle = \"checked\"\n");

    let code = run(args(&cfg, &["exec", "--style", "cooperative", "false"]))
        .await
        .unwrap();

    assert_eq!(code, 1);
}

#[tokio::test]
async fn cwd_flag_sets_the_child_directory() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("marker.txt"), "").unwrap();
    let cfg = config_file("");
    let cwd = dir.path().to_str().unwrap();

    let found = ["exec", "--style", "checked", "--cwd", cwd, "ls marker.txt"];
    assert_eq!(run(args(&cfg, &found)).await.unwrap(), 0);

    let elsewhere = ["exec", "--style", "checked", "ls marker.txt"];
    assert!(run(args(&cfg, &elsewhere)).await.is_err());
}

#[tokio::test]
async fn discover_exit_code_reflects_the_result() {
    let cfg = start_dir_config(&fixtures_dir(), "");
    assert_eq!(run(args(&cfg, &["discover"])).await.unwrap(), 0);

    let dir = tempdir().unwrap();
    SuiteBuilder::new()
        .case("broken", "false")
        .case("fine", "true")
        .write_to(dir.path(), "a_test.toml");
    let cfg = start_dir_config(dir.path(), "");

    assert_eq!(run(args(&cfg, &["discover", "--no-failfast"])).await.unwrap(), 1);
}

#[tokio::test]
async fn demo_runs_every_style_then_discovery() {
    let dir = tempdir().unwrap();
    SuiteBuilder::new()
        .case("fine", "true")
        .write_to(dir.path(), "a_test.toml");
    let cfg = start_dir_config(dir.path(), "[demo]\ncommand = \"echo Hello\"\n");

    assert_eq!(run(args(&cfg, &["demo"])).await.unwrap(), 0);
}

#[tokio::test]
async fn failing_demo_command_stops_at_the_checked_style() {
    let dir = tempdir().unwrap();
    SuiteBuilder::new()
        .case("never_reached", "false")
        .write_to(dir.path(), "a_test.toml");
    let cfg = start_dir_config(dir.path(), "[demo]\ncommand = \"false\"\n");

    let err = run(args(&cfg, &["demo"])).await.unwrap_err();

    assert_eq!(exit_code_for(&err), 1);
    assert!(matches!(
        err.downcast_ref::<CmdrunError>(),
        Some(CmdrunError::NonZeroExit { .. })
    ));
}
