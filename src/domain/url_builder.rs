// src/domain/url_builder.rs
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::operation::Operation;
use tracing::{instrument, trace};
use url::form_urlencoded;

pub const DEFAULT_SEARCH_URL: &str = "http://www.google.ru/search";
pub const DEFAULT_TRANSLATE_URL: &str = "https://translate.google.com/";

const QUERY_KEY: &str = "q";

/// Builds provider URLs from clipboard text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlBuilder {
    search_url: String,
    translate_url: String,
}

impl Default for UrlBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_URL, DEFAULT_TRANSLATE_URL)
    }
}

impl UrlBuilder {
    pub fn new(search_url: impl Into<String>, translate_url: impl Into<String>) -> Self {
        Self {
            search_url: search_url.into(),
            translate_url: translate_url.into(),
        }
    }

    /// Search: `<search>?q=<text>`. Translate: `<translate>#<from>/<to>/<text>`.
    ///
    /// Text is form-urlencoded in both cases, so spaces become `+`.
    #[instrument(skip(self, text), level = "debug", fields(op = operation.name()))]
    pub fn build(&self, operation: &Operation, text: &str) -> DomainResult<String> {
        if text.trim().is_empty() {
            return Err(DomainError::empty_buffer());
        }

        let query = encode_query(text);
        let url = match operation {
            Operation::Search => format!("{}?{}", self.search_url, query),
            Operation::Translate { source, target } => {
                // fragment carries the bare value, without the `q=` key
                let value = query
                    .strip_prefix(&format!("{}=", QUERY_KEY))
                    .unwrap_or(&query);
                format!("{}#{}/{}/{}", self.translate_url, source, target, value)
            }
        };

        trace!("Built URL: {}", url);
        Ok(url)
    }
}

fn encode_query(text: &str) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair(QUERY_KEY, text)
        .finish()
}
