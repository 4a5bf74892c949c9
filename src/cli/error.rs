// src/cli/error.rs
use crate::config::ConfigError;
use crate::domain::error::DomainError;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl CliError {
    /// Prefix non-domain failures with `context`. Domain errors pass through
    /// unchanged so their message reaches the user verbatim.
    pub fn context<C: Into<String>>(self, context: C) -> Self {
        match self {
            CliError::Domain(err) => CliError::Domain(err),
            CliError::CommandFailed(msg) => {
                CliError::CommandFailed(format!("{}: {}", context.into(), msg))
            }
            err => CliError::CommandFailed(format!("{}: {}", context.into(), err)),
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;
