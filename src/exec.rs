//! Synchronous command execution
//!
//! Every interaction with the `git` executable goes through the
//! [`CommandRunner`] trait so the workflow and aggregator can be driven by a
//! scripted double in tests. Commands are passed as argument vectors; nothing
//! here ever builds a shell string.

use log::debug;
use std::process::{Command, Stdio};

/// Narrow seam over external command execution.
///
/// The contract is deliberately lossy: callers get trimmed stdout on success
/// and the empty string on any failure (spawn error, non-zero exit with no
/// output, undecodable bytes). Stderr is discarded. Callers treat empty or
/// unexpected output as the failure signal.
pub trait CommandRunner {
    /// Run `program` with `args`, blocking until it exits, and return its
    /// trimmed standard output. Returns an empty string on any failure.
    fn run(&self, program: &str, args: &[&str]) -> String;
}

/// Runs commands through [`std::process::Command`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&self, program: &str, args: &[&str]) -> String {
        debug!("Running command: {program} {}", args.join(" "));

        let output = Command::new(program)
            .args(args)
            .stderr(Stdio::null())
            .output();

        match output {
            Ok(output) => String::from_utf8_lossy(&output.stdout).trim().to_string(),
            Err(e) => {
                debug!("Command {program} failed to spawn: {e}");
                String::new()
            }
        }
    }
}
