// tests/exec_styles.rs
#![cfg(unix)]

mod common;
use crate::common::{StaticResolver, init_tracing};

use tempfile::tempdir;

use cmdrun::errors::CmdrunError;
use cmdrun::exec::{CommandRunner, ExecOptions, exec_async, exec_checked, exec_scoped};
use cmdrun::types::ExecutionStyle;

#[tokio::test]
async fn echo_hello_exits_zero_in_every_style() {
    init_tracing();

    assert_eq!(exec_async("echo Hello").await.unwrap(), 0);
    assert_eq!(exec_scoped("echo Hello").unwrap(), 0);
    assert_eq!(exec_checked("echo Hello").unwrap(), 0);
}

#[tokio::test]
async fn every_style_prints_the_selected_output() {
    let runner = CommandRunner::default();

    let mut cooperative = Vec::new();
    let mut scoped = Vec::new();
    let mut checked = Vec::new();
    assert_eq!(runner.exec_async_to("echo Hello", &mut cooperative).await.unwrap(), 0);
    assert_eq!(runner.exec_scoped_to("echo Hello", &mut scoped).unwrap(), 0);
    assert_eq!(runner.exec_checked_to("echo Hello", &mut checked).unwrap(), 0);

    for out in [cooperative, scoped, checked] {
        assert_eq!(String::from_utf8(out).unwrap(), "Hello\n");
    }
}

#[test]
fn checked_style_prints_stderr_before_failing() {
    let mut out = Vec::new();
    let res = CommandRunner::default().exec_checked_to("cat /cmdrun-missing-file", &mut out);

    assert!(matches!(res, Err(CmdrunError::NonZeroExit { code: 1, .. })));
    let printed = String::from_utf8(out).unwrap();
    assert!(printed.contains("/cmdrun-missing-file"), "{printed:?}");
}

#[test]
fn nothing_is_printed_when_resolution_fails() {
    let mut out = Vec::new();
    let res = CommandRunner::new(StaticResolver::new()).exec_checked_to("ghost", &mut out);

    assert!(matches!(res, Err(CmdrunError::Resolution { .. })));
    assert!(out.is_empty());
}

#[tokio::test]
async fn captured_output_contains_hello() {
    let runner = CommandRunner::default();

    let blocking = runner.capture("echo Hello").unwrap();
    let cooperative = runner.capture_async("echo Hello").await.unwrap();

    assert_eq!(blocking.selected_output(), "Hello");
    assert_eq!(cooperative, blocking);
}

#[tokio::test]
async fn non_zero_exit_only_fails_the_checked_style() {
    let runner = CommandRunner::default();

    assert_eq!(runner.exec_async("false").await.unwrap(), 1);
    assert_eq!(runner.exec_scoped("false").unwrap(), 1);

    match runner.exec_checked("false") {
        Err(CmdrunError::NonZeroExit { cmd, code }) => {
            assert_eq!(cmd, "false");
            assert_eq!(code, 1);
        }
        other => panic!("expected NonZeroExit, got {:?}", other),
    }
}

#[tokio::test]
async fn dispatcher_applies_the_same_policies() {
    let runner = CommandRunner::default();

    for style in ExecutionStyle::ALL {
        assert_eq!(runner.execute(style, "echo Hello").await.unwrap(), 0);
    }

    assert_eq!(runner.execute(ExecutionStyle::Cooperative, "false").await.unwrap(), 1);
    assert_eq!(runner.execute(ExecutionStyle::Scoped, "false").await.unwrap(), 1);
    assert!(matches!(
        runner.execute(ExecutionStyle::Checked, "false").await,
        Err(CmdrunError::NonZeroExit { code: 1, .. })
    ));
}

#[tokio::test]
async fn unresolvable_executable_fails_before_spawning_in_every_style() {
    let runner = CommandRunner::new(StaticResolver::new());

    assert!(matches!(
        runner.exec_async("ghost arg").await,
        Err(CmdrunError::Resolution { .. })
    ));
    assert!(matches!(
        runner.exec_scoped("ghost arg"),
        Err(CmdrunError::Resolution { .. })
    ));
    assert!(matches!(
        runner.exec_checked("ghost arg"),
        Err(CmdrunError::Resolution { .. })
    ));
}

#[test]
fn resolved_but_unstartable_is_a_spawn_error() {
    let dir = tempdir().unwrap();
    let not_executable = dir.path().join("plain.txt");
    std::fs::write(&not_executable, "just text").unwrap();

    let runner = CommandRunner::new(StaticResolver::new().with("plain", &not_executable));

    match runner.exec_scoped("plain") {
        Err(CmdrunError::Spawn { path, .. }) => assert_eq!(path, not_executable),
        other => panic!("expected Spawn error, got {:?}", other),
    }
}

#[test]
fn repeated_runs_yield_the_same_code() {
    let runner = CommandRunner::default();
    let codes: Vec<i32> = (0..3)
        .map(|_| runner.exec_scoped("ls /cmdrun-missing-dir").unwrap())
        .collect();

    assert_ne!(codes[0], 0);
    assert!(codes.iter().all(|c| *c == codes[0]));
}

#[test]
fn injected_resolver_decides_which_binary_runs() {
    let resolver = StaticResolver::new().alias("greet", "echo");
    let runner = CommandRunner::new(resolver.clone());

    let result = runner.capture("greet Hello").unwrap();

    assert_eq!(result.selected_output(), "Hello");
    assert_eq!(resolver.lookups(), vec!["greet".to_string()]);
}

#[test]
fn options_are_passed_through_to_the_child() {
    let dir = tempdir().unwrap();
    let cwd = dir.path().canonicalize().unwrap();

    let runner = CommandRunner::default().with_options(
        ExecOptions::new()
            .current_dir(&cwd)
            .env("CMDRUN_GREETING", "greeting-value"),
    );

    let env = runner.capture("printenv CMDRUN_GREETING").unwrap();
    assert_eq!(env.selected_output(), "greeting-value");

    let pwd = runner.capture("pwd").unwrap();
    assert_eq!(pwd.selected_output(), cwd.to_string_lossy());
}

#[test]
fn child_gets_no_stdin() {
    // `cat` with no file argument reads stdin; a closed stdin ends it at once.
    let result = CommandRunner::default().capture("cat").unwrap();
    assert_eq!(result.code, 0);
    assert!(result.stdout.is_empty());
}
