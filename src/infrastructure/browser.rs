// src/infrastructure/browser.rs
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::services::browser::BrowserLauncher;
use crate::domain::services::process::{Invocation, ProcessRunner};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

const URL_PLACEHOLDER: &str = "{url}";

/// Known browsers and their launch templates; the first entry is the program.
const KNOWN_BROWSERS: &[(&str, &[&str])] =
    &[("firefox", &["firefox", URL_PLACEHOLDER, "-new-tab"])];

/// Names accepted by [`CommandBrowserLauncher`].
pub fn known_browsers() -> impl Iterator<Item = &'static str> {
    KNOWN_BROWSERS.iter().map(|(id, _)| *id)
}

/// Resolve `browser_id` to a program and its arguments with `url` filled in.
pub fn browser_command(browser_id: &str, url: &str) -> Option<(String, Vec<String>)> {
    let (_, template) = KNOWN_BROWSERS.iter().find(|(id, _)| *id == browser_id)?;
    let (program, args) = template.split_first()?;
    let args = args
        .iter()
        .map(|arg| arg.replace(URL_PLACEHOLDER, url))
        .collect();
    Some((program.to_string(), args))
}

/// Opens URLs by running the browser's own command line.
///
/// A browser still running when the timeout expires has accepted the URL; it
/// is left running.
#[derive(Debug)]
pub struct CommandBrowserLauncher {
    runner: Arc<dyn ProcessRunner>,
    timeout: Duration,
}

impl CommandBrowserLauncher {
    pub fn new(runner: Arc<dyn ProcessRunner>, timeout: Duration) -> Self {
        Self { runner, timeout }
    }
}

impl BrowserLauncher for CommandBrowserLauncher {
    #[instrument(skip(self, url), level = "debug")]
    fn launch(&self, browser_id: &str, url: &str) -> DomainResult<()> {
        let (program, args) = browser_command(browser_id, url).ok_or_else(|| {
            DomainError::UnknownBrowser(format!(
                "unknown browser '{}' (known: {})",
                browser_id,
                known_browsers().collect::<Vec<_>>().join(", ")
            ))
        })?;

        let invocation = Invocation::new(program, args, self.timeout).detach_on_timeout();
        debug!("Launching: {}", invocation.display());

        let output = self.runner.run(&invocation).map_err(|e| {
            DomainError::LaunchError(format!("failed to run {}: {}", invocation.program, e))
        })?;

        if output.has_diagnostics() {
            return Err(DomainError::LaunchError(format!(
                "{} subprocess error: {}",
                invocation.program,
                output.stderr_text()
            )));
        }

        if output.timed_out {
            debug!("{} still running, treating dispatch as done", invocation.program);
        }
        Ok(())
    }
}

/// Records URLs instead of opening them.
#[derive(Debug, Default)]
pub struct DummyBrowserLauncher {
    opened: std::sync::Mutex<Vec<(String, String)>>,
}

impl DummyBrowserLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(browser_id, url)` pairs seen so far.
    pub fn opened(&self) -> Vec<(String, String)> {
        self.opened
            .lock()
            .map(|opened| opened.clone())
            .unwrap_or_default()
    }
}

impl BrowserLauncher for DummyBrowserLauncher {
    #[instrument(level = "trace")]
    fn launch(&self, browser_id: &str, url: &str) -> DomainResult<()> {
        if browser_command(browser_id, url).is_none() {
            return Err(DomainError::UnknownBrowser(format!(
                "unknown browser '{}'",
                browser_id
            )));
        }
        if let Ok(mut opened) = self.opened.lock() {
            opened.push((browser_id.to_string(), url.to_string()));
        }
        Ok(())
    }
}
