// src/domain/services/clipboard.rs
use crate::domain::error::DomainResult;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

pub trait ClipboardReader: Debug {
    /// Current clipboard text; may be empty.
    fn read(&self) -> DomainResult<String>;
}

/// Text encoding used to decode clipboard bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Encoding {
    #[default]
    #[serde(rename = "utf-8", alias = "utf8")]
    Utf8,
    #[serde(rename = "ascii")]
    Ascii,
}

impl Encoding {
    /// Strict decode; invalid input is an error, never replaced.
    pub fn decode(self, bytes: &[u8]) -> Result<String, String> {
        match self {
            Encoding::Utf8 => String::from_utf8(bytes.to_vec()).map_err(|e| {
                format!("clipboard is not valid {}: {}", self.name(), e.utf8_error())
            }),
            Encoding::Ascii => match bytes.iter().position(|b| !b.is_ascii()) {
                Some(pos) => Err(format!(
                    "clipboard is not valid {}: byte {:#04x} at offset {}",
                    self.name(),
                    bytes[pos],
                    pos
                )),
                None => Ok(bytes.iter().map(|&b| b as char).collect()),
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf-8",
            Encoding::Ascii => "ascii",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_valid_utf8_when_decoded_then_text_returned() {
        assert_eq!(Encoding::Utf8.decode("привет".as_bytes()).unwrap(), "привет");
    }

    #[test]
    fn given_invalid_utf8_when_decoded_then_error() {
        let err = Encoding::Utf8.decode(&[0x66, 0xff, 0x6f]).unwrap_err();
        assert!(err.contains("utf-8"));
    }

    #[test]
    fn given_non_ascii_when_decoded_as_ascii_then_error_names_offset() {
        let err = Encoding::Ascii.decode("ab\u{e9}".as_bytes()).unwrap_err();
        assert!(err.starts_with("clipboard is not valid ascii"));
        assert!(err.contains("offset 2"));
        assert_eq!(Encoding::Ascii.decode(b"plain").unwrap(), "plain");
    }
}
