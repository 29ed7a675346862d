//! Blocking external command execution with unified error mapping
//!
//! Spawn failure and non-zero exit map to distinct error variants; stderr
//! tails are carried as detail so the operator sees the underlying cause.

use std::process::{Command, Output, Stdio};

use crate::error::{Result, RocstrapError, command_failed};

/// Run a command, capturing output; non-zero exit is an error
pub fn run(program: &str, args: &[&str]) -> Result<Output> {
    let output = Command::new(program).args(args).output().map_err(|e| {
        RocstrapError::CommandSpawnFailed {
            program: program.to_string(),
            reason: e.to_string(),
        }
    })?;

    if !output.status.success() {
        return Err(command_failed(program, stderr_tail(&output)));
    }

    Ok(output)
}

/// Run a command with inherited stdio, for long operations whose own
/// output (apt, pip, git) should stream to the operator
pub fn run_streaming(program: &str, args: &[&str]) -> Result<()> {
    let status = Command::new(program)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| RocstrapError::CommandSpawnFailed {
            program: program.to_string(),
            reason: e.to_string(),
        })?;

    if !status.success() {
        return Err(command_failed(
            program,
            format!("exit status {}", status.code().unwrap_or(-1)),
        ));
    }

    Ok(())
}

/// Run a privileged command through sudo with inherited stdio so the
/// password prompt reaches the operator
pub fn run_sudo(args: &[&str]) -> Result<()> {
    run_streaming("sudo", args)
}

/// Run a command and return captured stdout as a string, `None` on any
/// failure. Used for probes where absence is an expected outcome.
pub fn probe(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Last few stderr lines, enough to explain a failure without flooding
fn stderr_tail(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let lines: Vec<&str> = stderr.trim().lines().collect();
    let tail = if lines.len() > 5 {
        &lines[lines.len() - 5..]
    } else {
        &lines[..]
    };
    if tail.is_empty() {
        format!("exit status {}", output.status.code().unwrap_or(-1))
    } else {
        tail.join("\n")
    }
}
