// src/util/testing.rs

use crate::domain::services::process::{Invocation, ProcessOutput, ProcessRunner};
use std::env;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::sync::{Mutex, Once};
use tempfile::TempDir;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT_LOGGING: Once = Once::new();

/// Sets up test logging exactly once; later calls do nothing.
pub fn init_test_env() {
    INIT_LOGGING.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .with_test_writer()
                .with_target(true)
                .with_filter(env_filter),
        );
        if let Err(e) = subscriber.try_init() {
            eprintln!("Error: Failed to set up logging: {}", e);
        }
        debug!("Test logging initialized");
    });
}

#[derive(Debug, Clone)]
enum Script {
    Output(ProcessOutput),
    NotFound,
}

/// [`ProcessRunner`] replaying one canned result and recording every call.
#[derive(Debug)]
pub struct ScriptedRunner {
    script: Script,
    calls: Mutex<Vec<Invocation>>,
}

impl ScriptedRunner {
    fn new(script: Script) -> Self {
        Self {
            script,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_stdout(stdout: &[u8]) -> Self {
        Self::new(Script::Output(ProcessOutput {
            stdout: stdout.to_vec(),
            status: Some(exit_ok()),
            ..ProcessOutput::default()
        }))
    }

    pub fn with_stderr(stderr: &[u8]) -> Self {
        Self::new(Script::Output(ProcessOutput {
            stderr: stderr.to_vec(),
            status: Some(exit_ok()),
            ..ProcessOutput::default()
        }))
    }

    pub fn succeeding() -> Self {
        Self::with_stdout(b"")
    }

    pub fn timing_out() -> Self {
        Self::new(Script::Output(ProcessOutput {
            timed_out: true,
            ..ProcessOutput::default()
        }))
    }

    pub fn not_found() -> Self {
        Self::new(Script::NotFound)
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

impl ProcessRunner for ScriptedRunner {
    fn run(&self, invocation: &Invocation) -> io::Result<ProcessOutput> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(invocation.clone());
        }
        match &self.script {
            Script::Output(output) => Ok(output.clone()),
            Script::NotFound => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{}: not found", invocation.program),
            )),
        }
    }
}

fn exit_ok() -> ExitStatus {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        ExitStatus::from_raw(0)
    }
    #[cfg(windows)]
    {
        use std::os::windows::process::ExitStatusExt;
        ExitStatus::from_raw(0)
    }
}

/// Directory of stand-in executables (`xclip`, `firefox`, ...) for running
/// the binary end to end. Put [`FakeBin::path`] on `PATH`.
#[derive(Debug)]
pub struct FakeBin {
    dir: TempDir,
}

impl FakeBin {
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// `PATH` value with the fake directory in front of the current one.
    pub fn path_env(&self) -> OsString {
        let mut paths = vec![self.dir.path().to_path_buf()];
        if let Some(current) = env::var_os("PATH") {
            paths.extend(env::split_paths(&current));
        }
        env::join_paths(paths).unwrap_or_else(|_| self.dir.path().as_os_str().to_owned())
    }

    /// Writes an executable `/bin/sh` script called `name`.
    pub fn script(&self, name: &str, body: &str) -> io::Result<PathBuf> {
        let path = self.dir.path().join(name);
        fs::write(&path, format!("#!/bin/sh\n{}\n", body))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755))?;
        }
        Ok(path)
    }

    /// Clipboard utility printing `text` verbatim.
    pub fn clipboard(&self, text: &str) -> io::Result<PathBuf> {
        self.script("xclip", &format!("printf '%s' '{}'", text.replace('\'', r"'\''")))
    }

    /// Browser writing each argument to `firefox.log` and exiting quietly.
    pub fn browser(&self) -> io::Result<PathBuf> {
        let log = self.browser_log();
        self.script(
            "firefox",
            &format!("for arg in \"$@\"; do echo \"$arg\" >> '{}'; done", log.display()),
        )
    }

    pub fn browser_log(&self) -> PathBuf {
        self.dir.path().join("firefox.log")
    }

    /// Arguments the fake browser received, one per line; empty if never run.
    pub fn browser_args(&self) -> Vec<String> {
        fs::read_to_string(self.browser_log())
            .map(|log| log.lines().map(String::from).collect())
            .unwrap_or_default()
    }
}
