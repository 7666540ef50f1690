use crate::config::{Config, PageCheck};
use crate::driver::PageDriver;
use crate::{Error, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Why a page's content check failed. All kinds are recoverable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckFailure {
    /// A marker never appeared within its wait budget.
    MarkerNotFound,
    /// The browser errored while the markers were being read.
    Browser,
    /// The confirmation screenshot could not be captured or written.
    Screenshot,
}

impl CheckFailure {
    pub fn classify(error: &Error) -> Self {
        match error {
            Error::MarkerNotFound { .. } => Self::MarkerNotFound,
            Error::Screenshot { .. } => Self::Screenshot,
            _ => Self::Browser,
        }
    }
}

impl fmt::Display for CheckFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MarkerNotFound => write!(f, "marker not found"),
            Self::Browser => write!(f, "browser error"),
            Self::Screenshot => write!(f, "screenshot error"),
        }
    }
}

/// Result of a page's content check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    Ok,
    Failed { kind: CheckFailure, message: String },
}

impl PageOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }
}

/// What happened on one checked page.
#[derive(Debug, Clone)]
pub struct PageReport {
    pub name: String,
    /// HTTP status of the page load, if the browser reported one.
    pub status: Option<u16>,
    /// Screenshots written, in order.
    pub screenshots: Vec<PathBuf>,
    pub outcome: PageOutcome,
}

/// Navigate to a page, record its status and debug screenshot, then
/// confirm its markers.
///
/// Navigation, status and the debug screenshot are fatal. Marker waits
/// and the confirmation screenshot are not: their failure is reported in
/// the returned `PageReport`.
pub async fn visit_page<D: PageDriver + ?Sized>(
    driver: &D,
    config: &Config,
    check: &PageCheck,
) -> Result<PageReport> {
    println!("Navigating to {} Page...", check.name);
    let url = config.url(&check.path);
    info!("Checking {} page at {}", check.name, url);
    driver.goto(&url).await?;

    let status = driver.response_status().await?;
    match status {
        Some(code) => println!("Status: {}", code),
        None => println!("Status: unknown"),
    }

    let debug_path = config.screenshot_path(&check.debug_screenshot);
    save_screenshot(driver, &debug_path).await?;
    let mut screenshots = vec![debug_path];

    let outcome = match confirm_markers(driver, config, check).await {
        Ok(path) => {
            println!("{} Page OK", check.name);
            screenshots.push(path);
            PageOutcome::Ok
        }
        Err(e) => {
            let kind = CheckFailure::classify(&e);
            warn!("{} page check failed ({}): {}", check.name, kind, e);
            println!("{} Page Failed: {}", check.name, e);
            PageOutcome::Failed {
                kind,
                message: e.to_string(),
            }
        }
    };

    Ok(PageReport {
        name: check.name.clone(),
        status,
        screenshots,
        outcome,
    })
}

async fn confirm_markers<D: PageDriver + ?Sized>(
    driver: &D,
    config: &Config,
    check: &PageCheck,
) -> Result<PathBuf> {
    let timeouts = &config.timeouts;
    for (i, marker) in check.markers.iter().enumerate() {
        // First marker gets the short budget.
        let timeout_ms = if i == 0 {
            timeouts.marker_wait_ms
        } else {
            timeouts.default_wait_ms
        };
        driver.wait_for_text(marker, timeout_ms).await?;
        debug!("marker '{}' present", marker);
    }

    let path = config.screenshot_path(&check.screenshot);
    save_screenshot(driver, &path).await?;
    Ok(path)
}

/// Capture and write a screenshot. Any failure is `Error::Screenshot`.
async fn save_screenshot<D: PageDriver + ?Sized>(driver: &D, path: &Path) -> Result<()> {
    info!("screenshot: {}", path.display());
    let written = match driver.screenshot().await {
        Ok(data) => std::fs::write(path, data).map_err(Error::from),
        Err(e) => Err(e),
    };
    written.map_err(|source| Error::Screenshot {
        path: path.to_path_buf(),
        source: Box::new(source),
    })
}
