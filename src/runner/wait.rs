use crate::driver::PageDriver;
use crate::pattern::UrlPattern;
use crate::{Error, Result};
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Poll interval and overall budget for one wait.
#[derive(Debug, Clone, Copy)]
pub struct WaitOptions {
    pub timeout_ms: u64,
    pub poll_interval_ms: u64,
}

/// Poll `check` until it reports true or the budget runs out.
/// The check always runs at least once. A failed check counts as "not yet".
async fn poll_until<F, Fut>(options: WaitOptions, mut check: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<bool>>,
{
    let deadline = Instant::now() + Duration::from_millis(options.timeout_ms);
    loop {
        match check().await {
            Ok(true) => return true,
            Ok(false) => {}
            Err(e) => debug!("poll failed, retrying: {}", e),
        }
        let now = Instant::now();
        if now >= deadline {
            return false;
        }
        let step = Duration::from_millis(options.poll_interval_ms.max(1));
        tokio::time::sleep(step.min(deadline - now)).await;
    }
}

/// Wait until the page URL matches `pattern`. Fails with `Error::Timeout`.
pub async fn wait_for_url<D: PageDriver + ?Sized>(
    driver: &D,
    pattern: &UrlPattern,
    options: WaitOptions,
) -> Result<()> {
    debug!("wait_for_url: '{}' ({}ms)", pattern.as_str(), options.timeout_ms);
    let matched = poll_until(options, move || async move {
        let url = driver.url().await?;
        Ok::<_, Error>(pattern.matches(&url))
    })
    .await;

    if matched {
        Ok(())
    } else {
        Err(Error::Timeout(format!(
            "url did not match '{}' within {}ms",
            pattern.as_str(),
            options.timeout_ms
        )))
    }
}
