// src/application/pipeline.rs
use crate::domain::error::{DomainError, DomainResult, FailureKind};
use crate::domain::operation::{
    LanguageCode, Operation, Request, DEFAULT_BROWSER, DEFAULT_SOURCE_LANG, DEFAULT_TARGET_LANG,
};
use crate::domain::services::browser::BrowserLauncher;
use crate::domain::services::clipboard::ClipboardReader;
use crate::domain::url_builder::{UrlBuilder, DEFAULT_SEARCH_URL, DEFAULT_TRANSLATE_URL};
use std::sync::Arc;
use tracing::{debug, instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    ReadingClipboard,
    Validating,
    BuildingUrl,
    Launching,
    Done,
    Failed(FailureKind),
}

impl PipelineState {
    pub fn is_terminal(self) -> bool {
        matches!(self, PipelineState::Done | PipelineState::Failed(_))
    }
}

/// Defaults and endpoints the pipeline works with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub search_url: String,
    pub translate_url: String,
    pub default_browser: String,
    pub default_source: LanguageCode,
    pub default_target: LanguageCode,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            search_url: DEFAULT_SEARCH_URL.to_string(),
            translate_url: DEFAULT_TRANSLATE_URL.to_string(),
            default_browser: DEFAULT_BROWSER.to_string(),
            default_source: LanguageCode(DEFAULT_SOURCE_LANG.to_string()),
            default_target: LanguageCode(DEFAULT_TARGET_LANG.to_string()),
        }
    }
}

impl PipelineConfig {
    /// Translate operation, falling back to the configured languages.
    pub fn translate(
        &self,
        source: Option<LanguageCode>,
        target: Option<LanguageCode>,
    ) -> Operation {
        Operation::Translate {
            source: source.unwrap_or_else(|| self.default_source.clone()),
            target: target.unwrap_or_else(|| self.default_target.clone()),
        }
    }
}

/// Result of one pipeline run together with the states it passed through.
#[derive(Debug)]
pub struct PipelineRun {
    pub states: Vec<PipelineState>,
    /// The URL handed to the browser on success.
    pub outcome: DomainResult<String>,
}

impl PipelineRun {
    pub fn visited(&self, state: PipelineState) -> bool {
        self.states.contains(&state)
    }
}

#[derive(Debug, Default)]
struct Scratch {
    text: String,
    url: String,
}

/// Clipboard → validation → URL → browser, stopping at the first failure.
#[derive(Debug)]
pub struct OperationPipeline {
    clipboard: Arc<dyn ClipboardReader>,
    launcher: Arc<dyn BrowserLauncher>,
    urls: UrlBuilder,
    config: PipelineConfig,
}

impl OperationPipeline {
    pub fn new(
        clipboard: Arc<dyn ClipboardReader>,
        launcher: Arc<dyn BrowserLauncher>,
        config: PipelineConfig,
    ) -> Self {
        let urls = UrlBuilder::new(&config.search_url, &config.translate_url);
        Self {
            clipboard,
            launcher,
            urls,
            config,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn run(&self, request: &Request) -> DomainResult<()> {
        self.run_traced(request).outcome.map(|_| ())
    }

    #[instrument(skip(self), level = "debug")]
    pub fn run_traced(&self, request: &Request) -> PipelineRun {
        let browser = request
            .browser
            .as_deref()
            .unwrap_or(&self.config.default_browser);

        let mut scratch = Scratch::default();
        let mut state = PipelineState::ReadingClipboard;
        let mut states = vec![state];
        let mut failure: Option<DomainError> = None;

        while !state.is_terminal() {
            let next = match self.step(state, &request.operation, browser, &mut scratch) {
                Ok(next) => next,
                Err(e) => {
                    debug!("{:?} failed: {}", state, e);
                    let failed = PipelineState::Failed(e.kind());
                    failure = Some(e);
                    failed
                }
            };
            debug!("{:?} -> {:?}", state, next);
            state = next;
            states.push(state);
        }

        let outcome = match failure {
            Some(e) => Err(e),
            None => Ok(scratch.url),
        };
        PipelineRun { states, outcome }
    }

    fn step(
        &self,
        state: PipelineState,
        operation: &Operation,
        browser: &str,
        scratch: &mut Scratch,
    ) -> DomainResult<PipelineState> {
        match state {
            PipelineState::ReadingClipboard => {
                scratch.text = self.clipboard.read()?;
                Ok(PipelineState::Validating)
            }
            PipelineState::Validating => {
                if scratch.text.trim().is_empty() {
                    return Err(DomainError::empty_buffer());
                }
                Ok(PipelineState::BuildingUrl)
            }
            PipelineState::BuildingUrl => {
                scratch.url = self.urls.build(operation, &scratch.text)?;
                Ok(PipelineState::Launching)
            }
            PipelineState::Launching => {
                self.launcher.launch(browser, &scratch.url)?;
                Ok(PipelineState::Done)
            }
            terminal => Ok(terminal),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::browser::DummyBrowserLauncher;
    use crate::infrastructure::clipboard::DummyClipboardReader;
    use crate::util::testing::init_test_env;
    use rstest::rstest;

    fn build_pipeline(
        clipboard: DummyClipboardReader,
    ) -> (OperationPipeline, Arc<DummyBrowserLauncher>) {
        let launcher = Arc::new(DummyBrowserLauncher::new());
        let pipeline = OperationPipeline::new(
            Arc::new(clipboard),
            launcher.clone(),
            PipelineConfig::default(),
        );
        (pipeline, launcher)
    }

    #[test]
    fn given_text_when_search_then_all_states_visited_and_url_opened() {
        init_test_env();
        let (pipeline, launcher) = build_pipeline(DummyClipboardReader::with_text("foo bar"));

        let run = pipeline.run_traced(&Request::new(Operation::Search));

        assert_eq!(
            run.states,
            vec![
                PipelineState::ReadingClipboard,
                PipelineState::Validating,
                PipelineState::BuildingUrl,
                PipelineState::Launching,
                PipelineState::Done,
            ]
        );
        assert_eq!(
            run.outcome.unwrap(),
            "http://www.google.ru/search?q=foo+bar"
        );
        assert_eq!(
            launcher.opened(),
            vec![(
                "firefox".to_string(),
                "http://www.google.ru/search?q=foo+bar".to_string()
            )]
        );
    }

    #[test]
    fn given_defaults_when_translate_then_en_to_ru() {
        let (pipeline, launcher) = build_pipeline(DummyClipboardReader::with_text("cat"));
        let op = pipeline.config().translate(None, None);

        pipeline.run(&Request::new(op)).unwrap();

        assert_eq!(launcher.opened()[0].1, "https://translate.google.com/#en/ru/cat");
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\n")]
    fn given_blank_clipboard_when_run_then_empty_buffer_before_url_building(#[case] text: &str) {
        let (pipeline, launcher) = build_pipeline(DummyClipboardReader::with_text(text));

        let run = pipeline.run_traced(&Request::new(Operation::Search));

        assert_eq!(run.outcome.as_ref().unwrap_err().kind(), FailureKind::EmptyBuffer);
        assert!(!run.visited(PipelineState::BuildingUrl));
        assert!(!run.visited(PipelineState::Launching));
        assert_eq!(
            run.states.last(),
            Some(&PipelineState::Failed(FailureKind::EmptyBuffer))
        );
        assert!(launcher.opened().is_empty());
    }

    #[test]
    fn given_clipboard_failure_when_run_then_error_forwarded_verbatim() {
        let original =
            DomainError::ClipboardUnavailable("xclip did not finish within 1000ms".into());
        let (pipeline, launcher) = build_pipeline(DummyClipboardReader::failing(original.clone()));

        let run = pipeline.run_traced(&Request::new(Operation::Search));

        assert_eq!(run.outcome.as_ref().unwrap_err(), &original);
        assert_eq!(
            run.states,
            vec![
                PipelineState::ReadingClipboard,
                PipelineState::Failed(FailureKind::ClipboardUnavailable),
            ]
        );
        assert!(launcher.opened().is_empty());
    }

    #[test]
    fn given_unknown_browser_when_run_then_fails_in_launching() {
        let (pipeline, launcher) = build_pipeline(DummyClipboardReader::with_text("foo"));
        let request = Request::new(Operation::Search).with_browser(Some("netscape".into()));

        let run = pipeline.run_traced(&request);

        assert_eq!(run.outcome.as_ref().unwrap_err().kind(), FailureKind::UnknownBrowser);
        assert!(run.visited(PipelineState::Launching));
        assert!(launcher.opened().is_empty());
    }

    #[test]
    fn given_terminal_states_when_checked_then_only_done_and_failed() {
        assert!(PipelineState::Done.is_terminal());
        assert!(PipelineState::Failed(FailureKind::LaunchError).is_terminal());
        assert!(!PipelineState::ReadingClipboard.is_terminal());
        assert!(!PipelineState::Launching.is_terminal());
    }
}
