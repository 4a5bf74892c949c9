// src/domain/services/process.rs
use std::fmt::Debug;
use std::io;
use std::process::ExitStatus;
use std::time::Duration;

/// What happens to a child that is still running when its timeout expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeoutPolicy {
    /// Kill and reap the child.
    Kill,
    /// Leave the child running; it is no longer our concern.
    Detach,
}

/// A single bounded external program run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub timeout: Duration,
    pub on_timeout: TimeoutPolicy,
}

impl Invocation {
    pub fn new(program: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args,
            timeout,
            on_timeout: TimeoutPolicy::Kill,
        }
    }

    pub fn detach_on_timeout(mut self) -> Self {
        self.on_timeout = TimeoutPolicy::Detach;
        self
    }

    /// Shell-like rendering for log and error messages.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Captured result of an [`Invocation`].
#[derive(Debug, Clone, Default)]
pub struct ProcessOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    /// `None` when the child did not exit before the timeout.
    pub status: Option<ExitStatus>,
    pub timed_out: bool,
}

impl ProcessOutput {
    pub fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.stderr).trim().to_string()
    }

    pub fn has_diagnostics(&self) -> bool {
        !self.stderr.is_empty()
    }
}

/// Runs external programs with a bounded wait.
pub trait ProcessRunner: Debug {
    fn run(&self, invocation: &Invocation) -> io::Result<ProcessOutput>;
}
