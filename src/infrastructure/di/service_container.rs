// src/infrastructure/di/service_container.rs
use crate::application::OperationPipeline;
use crate::config::{ConfigResult, Settings};
use crate::domain::services::browser::BrowserLauncher;
use crate::domain::services::clipboard::ClipboardReader;
use crate::domain::services::process::ProcessRunner;
use crate::infrastructure::browser::CommandBrowserLauncher;
use crate::infrastructure::clipboard::CommandClipboardReader;
use crate::infrastructure::process::SystemProcessRunner;
use std::sync::Arc;

/// Production service container - single source of truth for service creation
#[derive(Debug)]
pub struct ServiceContainer {
    pub pipeline: OperationPipeline,
}

impl ServiceContainer {
    pub fn new(settings: &Settings) -> ConfigResult<Self> {
        Self::with_runner(settings, Arc::new(SystemProcessRunner::new()))
    }

    /// Same wiring with a caller-supplied process runner.
    pub fn with_runner(
        settings: &Settings,
        process_runner: Arc<dyn ProcessRunner>,
    ) -> ConfigResult<Self> {
        let pipeline_config = settings.pipeline_config()?;

        let clipboard_reader: Arc<dyn ClipboardReader> = Arc::new(CommandClipboardReader::new(
            process_runner.clone(),
            settings.clipboard.program.clone(),
            settings.clipboard.args.clone(),
            settings.timeout(),
            settings.encoding,
        ));
        let browser_launcher: Arc<dyn BrowserLauncher> = Arc::new(CommandBrowserLauncher::new(
            process_runner,
            settings.timeout(),
        ));

        Ok(Self {
            pipeline: OperationPipeline::new(clipboard_reader, browser_launcher, pipeline_config),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::operation::{Operation, Request};
    use crate::util::testing::ScriptedRunner;

    #[test]
    fn given_settings_when_container_built_then_pipeline_uses_configured_clipboard() {
        let mut settings = Settings::default();
        settings.clipboard.program = "xsel".to_string();
        settings.clipboard.args = vec!["-o".to_string(), "-b".to_string()];
        settings.timeout_ms = 250;

        let runner = Arc::new(ScriptedRunner::with_stdout(b"rust"));
        let container = ServiceContainer::with_runner(&settings, runner.clone()).unwrap();

        container.pipeline.run(&Request::new(Operation::Search)).unwrap();

        let calls = runner.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].display(), "xsel -o -b");
        assert_eq!(calls[0].timeout.as_millis(), 250);
        assert_eq!(
            calls[1].display(),
            "firefox http://www.google.ru/search?q=rust -new-tab"
        );
    }

    #[test]
    fn given_invalid_languages_when_container_built_then_error() {
        let mut settings = Settings::default();
        settings.translate.target = String::new();
        assert!(ServiceContainer::new(&settings).is_err());
    }
}
