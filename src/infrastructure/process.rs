// src/infrastructure/process.rs
use crate::domain::services::process::{Invocation, ProcessOutput, ProcessRunner, TimeoutPolicy};
use std::fs::File;
use std::io::{self, Read};
use std::process::Stdio;
use tempfile::NamedTempFile;
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tracing::{debug, instrument, warn};

/// Runs programs on a private current-thread runtime, so callers see a plain
/// blocking call.
///
/// With [`TimeoutPolicy::Kill`] the child never outlives [`ProcessRunner::run`]:
/// it is killed on timeout and whenever the handle is dropped. With
/// [`TimeoutPolicy::Detach`] it keeps running and owns no pipes.
#[derive(Debug, Default)]
pub struct SystemProcessRunner;

impl SystemProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for SystemProcessRunner {
    #[instrument(skip(self), level = "debug", fields(cmd = %invocation.display()))]
    fn run(&self, invocation: &Invocation) -> io::Result<ProcessOutput> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(run_bounded(invocation))
    }
}

async fn run_bounded(invocation: &Invocation) -> io::Result<ProcessOutput> {
    match invocation.on_timeout {
        TimeoutPolicy::Kill => run_piped(invocation).await,
        TimeoutPolicy::Detach => run_detachable(invocation).await,
    }
}

/// Pipes both streams; the child is killed on timeout and on drop.
async fn run_piped(invocation: &Invocation) -> io::Result<ProcessOutput> {
    let mut child = Command::new(&invocation.program)
        .args(&invocation.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()?;

    let mut stdout_pipe = child
        .stdout
        .take()
        .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "stdout pipe not captured"))?;
    let mut stderr_pipe = child
        .stderr
        .take()
        .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "stderr pipe not captured"))?;

    let mut stdout = Vec::new();
    let mut stderr = Vec::new();

    // Bytes read before the deadline stay in the buffers.
    let finished = tokio::time::timeout(invocation.timeout, async {
        let (out, err) = tokio::join!(
            stdout_pipe.read_to_end(&mut stdout),
            stderr_pipe.read_to_end(&mut stderr)
        );
        match (out, err) {
            (Err(e), _) | (_, Err(e)) => Err(e),
            _ => child.wait().await,
        }
    })
    .await;

    let status = match finished {
        Ok(status) => {
            let status = status?;
            debug!("{} exited with {}", invocation.program, status);
            Some(status)
        }
        Err(_) => {
            warn!(
                "{} did not finish within {:?}, killing it",
                invocation.program, invocation.timeout
            );
            if let Err(e) = child.kill().await {
                debug!("Kill after timeout failed: {}", e);
            }
            None
        }
    };

    Ok(ProcessOutput {
        timed_out: status.is_none(),
        stdout,
        stderr,
        status,
    })
}

/// Sends both streams to temp files, removed on return, instead of pipes. A child
/// left running after the deadline never writes into a closed pipe.
async fn run_detachable(invocation: &Invocation) -> io::Result<ProcessOutput> {
    let mut stdout_file = NamedTempFile::new()?;
    let mut stderr_file = NamedTempFile::new()?;

    // `reopen` gives the child its own file offset.
    let mut child = Command::new(&invocation.program)
        .args(&invocation.args)
        .stdin(Stdio::null())
        .stdout(Stdio::from(stdout_file.reopen()?))
        .stderr(Stdio::from(stderr_file.reopen()?))
        .spawn()?;

    let status = match tokio::time::timeout(invocation.timeout, child.wait()).await {
        Ok(status) => {
            let status = status?;
            debug!("{} exited with {}", invocation.program, status);
            Some(status)
        }
        Err(_) => {
            debug!(
                "{} still running after {:?}, detaching",
                invocation.program, invocation.timeout
            );
            None
        }
    };

    Ok(ProcessOutput {
        stdout: read_captured(stdout_file.as_file_mut())?,
        stderr: read_captured(stderr_file.as_file_mut())?,
        timed_out: status.is_none(),
        status,
    })
}

fn read_captured(file: &mut File) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    file.read_to_end(&mut buf)?;
    Ok(buf)
}
