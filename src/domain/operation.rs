// src/domain/operation.rs
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_BROWSER: &str = "firefox";
pub const DEFAULT_SOURCE_LANG: &str = "en";
pub const DEFAULT_TARGET_LANG: &str = "ru";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid language code '{0}': expected letters with optional '-' segments, e.g. zh-CN")]
pub struct InvalidLanguageCode(pub String);

/// A provider language code such as `en`, `ru`, `zh-CN` or `auto`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguageCode(pub(crate) String);

impl LanguageCode {
    pub fn new(code: &str) -> Result<Self, InvalidLanguageCode> {
        let valid = !code.is_empty()
            && code.split('-').all(|segment| {
                !segment.is_empty() && segment.chars().all(|c| c.is_ascii_alphanumeric())
            })
            && code.chars().next().is_some_and(|c| c.is_ascii_alphabetic());

        if valid {
            Ok(Self(code.to_string()))
        } else {
            Err(InvalidLanguageCode(code.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for LanguageCode {
    type Err = InvalidLanguageCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.trim())
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What to do with the clipboard text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Search,
    Translate {
        source: LanguageCode,
        target: LanguageCode,
    },
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Search => "search",
            Operation::Translate { .. } => "translate",
        }
    }
}

/// An operation plus an optional browser; `None` means the configured default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub operation: Operation,
    pub browser: Option<String>,
}

impl Request {
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            browser: None,
        }
    }

    pub fn with_browser(mut self, browser: Option<String>) -> Self {
        self.browser = browser;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("en")]
    #[case("ru")]
    #[case("auto")]
    #[case("zh-CN")]
    #[case("sr-Latn")]
    fn given_valid_code_when_parsed_then_accepted(#[case] code: &str) {
        let lang: LanguageCode = code.parse().unwrap();
        assert_eq!(lang.as_str(), code);
    }

    #[rstest]
    #[case("")]
    #[case("-en")]
    #[case("en-")]
    #[case("e n")]
    #[case("en/ru")]
    #[case("1en")]
    fn given_invalid_code_when_parsed_then_rejected(#[case] code: &str) {
        assert!(LanguageCode::new(code).is_err());
    }

    #[test]
    fn given_operation_when_named_then_matches_subcommand() {
        assert_eq!(Operation::Search.name(), "search");
        let translate = Operation::Translate {
            source: LanguageCode::new(DEFAULT_SOURCE_LANG).unwrap(),
            target: LanguageCode::new(DEFAULT_TARGET_LANG).unwrap(),
        };
        assert_eq!(translate.name(), "translate");
    }
}
