use crate::{Error, Result};
use async_trait::async_trait;
use eoka::Page;
use tracing::debug;

/// Reads the HTTP status of the main document from navigation timing.
const RESPONSE_STATUS_JS: &str = r#"(() => {
    const nav = performance.getEntriesByType('navigation')[0];
    return nav && nav.responseStatus ? nav.responseStatus : null;
})()"#;

/// The browser operations the walkthrough needs.
///
/// Implemented for `eoka::Page`; tests substitute an in-memory page.
#[async_trait(?Send)]
pub trait PageDriver {
    /// Navigate and wait for the load. Failures are `Error::Navigation`.
    async fn goto(&self, url: &str) -> Result<()>;

    async fn fill(&self, selector: &str, value: &str) -> Result<()>;

    async fn click(&self, selector: &str) -> Result<()>;

    async fn url(&self) -> Result<String>;

    /// Wait for an element showing `text` (case-insensitive).
    /// Fails with `Error::MarkerNotFound` when the budget runs out.
    async fn wait_for_text(&self, text: &str, timeout_ms: u64) -> Result<()>;

    /// PNG bytes of the viewport.
    async fn screenshot(&self) -> Result<Vec<u8>>;

    /// HTTP status of the last main-document response, if the browser
    /// reports one.
    async fn response_status(&self) -> Result<Option<u16>>;
}

/// Value of a form field as it may appear in logs.
fn loggable_value<'a>(selector: &str, value: &'a str) -> &'a str {
    if selector.contains("password") {
        "***"
    } else {
        value
    }
}

#[async_trait(?Send)]
impl PageDriver for Page {
    async fn goto(&self, url: &str) -> Result<()> {
        debug!("goto: {}", url);
        Page::goto(self, url)
            .await
            .map_err(|source| Error::Navigation {
                url: url.to_string(),
                source,
            })?;
        Ok(())
    }

    async fn fill(&self, selector: &str, value: &str) -> Result<()> {
        debug!("fill: {} = '{}'", selector, loggable_value(selector, value));
        Page::fill(self, selector, value).await?;
        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<()> {
        debug!("click: {}", selector);
        Page::click(self, selector).await?;
        Ok(())
    }

    async fn url(&self) -> Result<String> {
        Ok(Page::url(self).await?)
    }

    async fn wait_for_text(&self, text: &str, timeout_ms: u64) -> Result<()> {
        debug!("wait_for_text: '{}' ({}ms)", text, timeout_ms);
        match Page::wait_for_text(self, text, timeout_ms).await {
            Ok(_) => Ok(()),
            Err(eoka::Error::Timeout(_)) => Err(Error::MarkerNotFound {
                marker: text.to_string(),
                timeout_ms,
            }),
            Err(e) => Err(e.into()),
        }
    }

    async fn screenshot(&self) -> Result<Vec<u8>> {
        Ok(Page::screenshot(self).await?)
    }

    async fn response_status(&self) -> Result<Option<u16>> {
        let value: serde_json::Value = self.evaluate(RESPONSE_STATUS_JS).await?;
        Ok(value.as_u64().and_then(|s| u16::try_from(s).ok()))
    }
}
