// src/infrastructure/clipboard.rs
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::services::clipboard::{ClipboardReader, Encoding};
use crate::domain::services::process::{Invocation, ProcessRunner};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

pub const DEFAULT_CLIPBOARD_PROGRAM: &str = "xclip";
pub const DEFAULT_CLIPBOARD_ARGS: &[&str] = &["-o"];

/// Reads the clipboard through an external utility (`xclip -o` by default).
///
/// Any output on the utility's stderr is taken as failure, whatever its exit
/// status. A non-zero exit with a clean stderr is only logged.
#[derive(Debug)]
pub struct CommandClipboardReader {
    runner: Arc<dyn ProcessRunner>,
    program: String,
    args: Vec<String>,
    timeout: Duration,
    encoding: Encoding,
}

impl CommandClipboardReader {
    pub fn new(
        runner: Arc<dyn ProcessRunner>,
        program: impl Into<String>,
        args: Vec<String>,
        timeout: Duration,
        encoding: Encoding,
    ) -> Self {
        Self {
            runner,
            program: program.into(),
            args,
            timeout,
            encoding,
        }
    }

    pub fn xclip(runner: Arc<dyn ProcessRunner>, timeout: Duration) -> Self {
        Self::new(
            runner,
            DEFAULT_CLIPBOARD_PROGRAM,
            DEFAULT_CLIPBOARD_ARGS.iter().map(|s| s.to_string()).collect(),
            timeout,
            Encoding::default(),
        )
    }
}

impl ClipboardReader for CommandClipboardReader {
    #[instrument(skip(self), level = "debug", fields(program = %self.program))]
    fn read(&self) -> DomainResult<String> {
        let invocation = Invocation::new(&self.program, self.args.clone(), self.timeout);

        let output = self.runner.run(&invocation).map_err(|e| {
            DomainError::ClipboardUnavailable(format!("failed to run {}: {}", self.program, e))
        })?;

        if output.timed_out {
            return Err(DomainError::ClipboardUnavailable(format!(
                "{} did not finish within {}ms",
                self.program,
                self.timeout.as_millis()
            )));
        }

        if output.has_diagnostics() {
            return Err(DomainError::ClipboardUnavailable(format!(
                "{} subprocess error: {}",
                self.program,
                output.stderr_text()
            )));
        }

        if let Some(status) = output.status.filter(|s| !s.success()) {
            debug!("{} exited with {} but wrote no diagnostics", self.program, status);
        }

        let text = self
            .encoding
            .decode(&output.stdout)
            .map_err(|e| DomainError::DecodeError(format!("decode error: {}", e)))?;

        debug!("Read {} bytes from clipboard", output.stdout.len());
        Ok(text)
    }
}

/// Fixed clipboard for tests; never touches the system clipboard.
#[derive(Debug, Clone)]
pub struct DummyClipboardReader {
    result: DomainResult<String>,
}

impl DummyClipboardReader {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            result: Ok(text.into()),
        }
    }

    pub fn failing(error: DomainError) -> Self {
        Self { result: Err(error) }
    }
}

impl Default for DummyClipboardReader {
    fn default() -> Self {
        Self::with_text("")
    }
}

impl ClipboardReader for DummyClipboardReader {
    #[instrument(level = "trace")]
    fn read(&self) -> DomainResult<String> {
        self.result.clone()
    }
}
