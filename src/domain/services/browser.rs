// src/domain/services/browser.rs
use crate::domain::error::DomainResult;
use std::fmt::Debug;

pub trait BrowserLauncher: Debug {
    /// Open `url` in the browser known as `browser_id`.
    fn launch(&self, browser_id: &str, url: &str) -> DomainResult<()>;
}
