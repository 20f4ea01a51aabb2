//! Browser-automation capabilities the scraper depends on.
//!
//! Collection code only talks to [`BrowserSession`]; the WebDriver backend in
//! [`webdriver`] is one implementation of it.

use std::time::Duration;

use thirtyfour::error::WebDriverError;

pub mod chromedriver;
pub mod wait;
pub mod webdriver;

pub use wait::{wait_for, wait_for_all, WaitOptions};

#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    #[error("no element matched '{selector}' within {waited:?}")]
    Timeout { selector: String, waited: Duration },
    #[error("cancelled by the operator")]
    Cancelled,
    #[error("WebDriver error: {0}")]
    WebDriver(#[from] WebDriverError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A single rendered page the scraper can query and drive.
///
/// `scope` arguments select where a lookup happens: `None` is the whole
/// document, `Some(element)` restricts it to that element's subtree.
#[allow(async_fn_in_trait)]
pub trait BrowserSession {
    type Element: Clone;

    async fn goto(&self, url: &str) -> Result<(), SessionError>;

    async fn current_url(&self) -> Result<String, SessionError>;

    /// All matches in document order. No match is `Ok(vec![])`, not an error.
    async fn find_all(
        &self,
        scope: Option<&Self::Element>,
        selector: &str,
    ) -> Result<Vec<Self::Element>, SessionError>;

    async fn find(
        &self,
        scope: Option<&Self::Element>,
        selector: &str,
    ) -> Result<Option<Self::Element>, SessionError> {
        Ok(self.find_all(scope, selector).await?.into_iter().next())
    }

    /// Visible text of the element.
    async fn text(&self, element: &Self::Element) -> Result<String, SessionError>;

    async fn attribute(
        &self,
        element: &Self::Element,
        name: &str,
    ) -> Result<Option<String>, SessionError>;

    async fn scroll_into_view(&self, element: &Self::Element) -> Result<(), SessionError>;

    /// Script-level click, so overlays covering the element do not intercept it.
    async fn click(&self, element: &Self::Element) -> Result<(), SessionError>;

    async fn close(self) -> Result<(), SessionError>
    where
        Self: Sized;
}
