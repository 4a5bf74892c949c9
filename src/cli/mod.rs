// src/cli/mod.rs
use crate::cli::args::{Cli, Commands};
use crate::cli::error::{CliError, CliResult};
use crate::config::Settings;
use crate::domain::operation::{Operation, Request};
use crate::infrastructure::di::ServiceContainer;
use tracing::{debug, instrument};

pub mod args;
pub mod completion;
pub mod error;

pub fn execute_command(cli: Cli, settings: &Settings) -> CliResult<()> {
    if cli.generate_config {
        println!("{}", crate::config::generate_default_config());
        return Ok(());
    }
    // Completion needs no services.
    if let Some(Commands::Completion { shell }) = &cli.command {
        return handle_completion(shell);
    }
    let services = ServiceContainer::new(settings)?;
    execute_command_with_services(cli, &services)
}

#[instrument(skip_all, level = "debug")]
pub fn execute_command_with_services(cli: Cli, services: &ServiceContainer) -> CliResult<()> {
    match cli.command {
        Some(Commands::Search { browser }) => {
            run_operation(services, Request::new(Operation::Search).with_browser(browser))
        }
        Some(Commands::Translate { browser, from, to }) => {
            let operation = services.pipeline.config().translate(from, to);
            run_operation(services, Request::new(operation).with_browser(browser))
        }
        Some(Commands::Completion { shell }) => handle_completion(&shell),
        None => Ok(()),
    }
}

fn run_operation(services: &ServiceContainer, request: Request) -> CliResult<()> {
    debug!("Running {}", request.operation.name());
    services.pipeline.run(&request)?;
    Ok(())
}

fn handle_completion(shell: &str) -> CliResult<()> {
    match shell.to_lowercase().as_str() {
        "bash" => {
            eprintln!("# Outputting bash completion script for clipsearch");
            eprintln!("# To use, run: eval \"$(clipsearch completion bash)\"");
        }
        "zsh" => {
            eprintln!("# Outputting zsh completion script for clipsearch");
            eprintln!("# To use, run: clipsearch completion zsh > ~/.zfunc/_clipsearch");
        }
        "fish" => {
            eprintln!("# Outputting fish completion script for clipsearch");
            eprintln!("# To use, run: clipsearch completion fish | source");
        }
        _ => {}
    }

    completion::generate_completion(shell, &mut std::io::stdout())
        .map_err(|e| CliError::from(e).context("Failed to generate completion script"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::{DomainError, FailureKind};
    use crate::util::testing::{init_test_env, ScriptedRunner};
    use clap::Parser;
    use std::sync::Arc;

    fn services(runner: &Arc<ScriptedRunner>) -> ServiceContainer {
        ServiceContainer::with_runner(&Settings::default(), runner.clone()).unwrap()
    }

    #[test]
    fn given_translate_with_languages_when_executed_then_fragment_uses_them() {
        init_test_env();
        let runner = Arc::new(ScriptedRunner::with_stdout(b"Hund"));
        let cli = Cli::parse_from(["clipsearch", "translate", "--from", "de", "--to", "en"]);

        execute_command_with_services(cli, &services(&runner)).unwrap();

        let calls = runner.calls();
        assert_eq!(calls[1].args[0], "https://translate.google.com/#de/en/Hund");
    }

    #[test]
    fn given_unknown_browser_when_search_then_domain_error() {
        let runner = Arc::new(ScriptedRunner::with_stdout(b"foo"));
        let cli = Cli::parse_from(["clipsearch", "search", "-b", "mosaic"]);

        let err = execute_command_with_services(cli, &services(&runner)).unwrap_err();

        match err {
            CliError::Domain(e) => assert_eq!(e.kind(), FailureKind::UnknownBrowser),
            other => panic!("unexpected error: {}", other),
        }
        assert_eq!(runner.calls().len(), 1);
    }

    #[test]
    fn given_no_subcommand_when_executed_then_nothing_runs() {
        let runner = Arc::new(ScriptedRunner::with_stdout(b"foo"));
        let cli = Cli::parse_from(["clipsearch"]);
        execute_command_with_services(cli, &services(&runner)).unwrap();
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn given_invalid_language_when_parsed_then_rejected_by_clap() {
        let result = Cli::try_parse_from(["clipsearch", "translate", "--to", "r u"]);
        assert!(result.is_err());
    }

    #[test]
    fn given_domain_error_when_context_added_then_message_unchanged() {
        let err = CliError::from(DomainError::empty_buffer()).context("search");
        match err {
            CliError::Domain(e) => {
                assert_eq!(e.kind(), FailureKind::EmptyBuffer);
                assert_eq!(e.to_string(), "empty buffer");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn given_unsupported_shell_when_completion_then_command_failed_with_context() {
        let err = handle_completion("tcsh").unwrap_err();
        match err {
            CliError::CommandFailed(msg) => {
                assert!(msg.starts_with("Failed to generate completion script: IO error:"));
                assert!(msg.contains("Unsupported shell: tcsh"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn given_invalid_translate_config_when_completion_then_still_generated() {
        let mut settings = Settings::default();
        settings.translate.target = "not a language".to_string();
        let cli = Cli::parse_from(["clipsearch", "completion", "bash"]);

        assert!(execute_command(cli, &settings).is_ok());
    }

    #[test]
    fn given_invalid_translate_config_when_search_then_config_error() {
        let mut settings = Settings::default();
        settings.translate.target = "not a language".to_string();
        let cli = Cli::parse_from(["clipsearch", "search"]);

        let err = execute_command(cli, &settings).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }
}
