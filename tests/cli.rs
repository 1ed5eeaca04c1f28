// Runs the `grape` binary the way a shell pipeline would and checks what it
// prints and how it exits.

use std::io::Write;
use std::process::{Command, Output, Stdio};

use anyhow::Context;

fn grape(args: &[&str], stdin: &[u8]) -> anyhow::Result<Output> {
    let mut child = Command::new(env!("CARGO_BIN_EXE_grape"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .context("failed to start grape")?;
    // A rejected command line exits before reading, which can close the pipe.
    let _ = child.stdin.take().context("stdin is piped")?.write_all(stdin);
    child.wait_with_output().context("failed to wait for grape")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn match_prints_true() -> anyhow::Result<()> {
    let output = grape(&["-E", r"\d+"], b"123\n")?;
    assert_eq!(stdout(&output), "true\n");
    assert_eq!(output.status.code(), Some(0));
    Ok(())
}

#[test]
fn non_match_prints_false() -> anyhow::Result<()> {
    let output = grape(&["-E", r"\d+"], b"12a\n")?;
    assert_eq!(stdout(&output), "false\n");
    assert_eq!(output.status.code(), Some(1));
    Ok(())
}

#[test]
fn line_endings_are_stripped() -> anyhow::Result<()> {
    let inputs: [&[u8]; 3] = [b"ab\r\n", b"ab\n", b"ab"];
    for input in inputs {
        let output = grape(&["-E", "ab"], input)?;
        assert_eq!(stdout(&output), "true\n", "input {:?}", input);
        assert_eq!(output.status.code(), Some(0));
    }
    Ok(())
}

#[test]
fn empty_input() -> anyhow::Result<()> {
    let output = grape(&["-E", "a*"], b"")?;
    assert_eq!(stdout(&output), "true\n");
    assert_eq!(output.status.code(), Some(0));
    Ok(())
}

#[test]
fn wrong_argument_count_fails() -> anyhow::Result<()> {
    let cases: [&[&str]; 3] = [&[], &["-E"], &["-E", "a", "b"]];
    for args in cases {
        let output = grape(args, b"a\n")?;
        assert_eq!(output.status.code(), Some(1), "args {:?}", args);
        assert!(output.stdout.is_empty());
    }
    Ok(())
}

#[test]
fn unknown_flag_fails() -> anyhow::Result<()> {
    let output = grape(&["-P", "a"], b"a\n")?;
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    Ok(())
}

#[test]
fn malformed_pattern_fails() -> anyhow::Result<()> {
    let output = grape(&["-E", "*"], b"a\n")?;
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to compile '*'"));
    Ok(())
}
