mod page_check;
mod wait;

pub use page_check::{CheckFailure, PageOutcome, PageReport};

use crate::config::Config;
use crate::credentials::Credentials;
use crate::driver::PageDriver;
use crate::pattern::UrlPattern;
use crate::Result;
use eoka::{Browser, Page};
use std::future::Future;
use std::time::Instant;
use tracing::{debug, info, warn};
use wait::{wait_for_url, WaitOptions};

const NAME_FIELD: &str = "input[name='name']";
const EMAIL_FIELD: &str = "input[name='email']";
const PASSWORD_FIELD: &str = "input[name='password']";
const SUBMIT_BUTTON: &str = "button[type='submit']";

/// Result of a completed walkthrough.
#[derive(Debug)]
pub struct RunReport {
    /// Account email used for signup.
    pub email: String,
    /// Whether signup landed on the login form and the fallback ran.
    pub used_login_fallback: bool,
    /// One entry per checked page, in visit order.
    pub pages: Vec<PageReport>,
    /// Total duration in milliseconds.
    pub duration_ms: u64,
}

impl RunReport {
    /// True when every page passed its content check.
    pub fn all_pages_ok(&self) -> bool {
        self.pages.iter().all(|p| p.outcome.is_ok())
    }
}

/// One scripted pass over the application, against any page driver.
pub struct Walkthrough<'a, D: PageDriver + ?Sized> {
    driver: &'a D,
    config: &'a Config,
}

impl<'a, D: PageDriver + ?Sized> Walkthrough<'a, D> {
    pub fn new(driver: &'a D, config: &'a Config) -> Self {
        Self { driver, config }
    }

    /// Run with freshly generated credentials.
    pub async fn run(&self) -> Result<RunReport> {
        let creds = Credentials::generate(&self.config.account);
        self.run_as(&creds).await
    }

    /// Sign up as `creds`, reach the dashboard, then check every page.
    pub async fn run_as(&self, creds: &Credentials) -> Result<RunReport> {
        let start = Instant::now();
        let pattern = UrlPattern::new(&self.config.dashboard_pattern)?;
        std::fs::create_dir_all(&self.config.screenshot_dir)?;

        println!("Navigating to Signup...");
        let signup_url = self.config.url(&self.config.signup_path);
        self.driver.goto(&signup_url).await?;

        println!("Signing up with {}", creds.email);
        self.submit_signup(creds).await?;

        println!("Waiting for dashboard...");
        let used_login_fallback = self.reach_dashboard(&pattern, creds).await?;
        println!("Logged in!");

        let mut pages = Vec::with_capacity(self.config.pages.len());
        for check in &self.config.pages {
            pages.push(page_check::visit_page(self.driver, self.config, check).await?);
        }

        Ok(RunReport {
            email: creds.email.clone(),
            used_login_fallback,
            pages,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }

    async fn submit_signup(&self, creds: &Credentials) -> Result<()> {
        self.driver.fill(NAME_FIELD, &creds.name).await?;
        self.driver.fill(EMAIL_FIELD, &creds.email).await?;
        self.driver.fill(PASSWORD_FIELD, &creds.password).await?;
        self.driver.click(SUBMIT_BUTTON).await
    }

    async fn submit_login(&self, creds: &Credentials) -> Result<()> {
        self.driver.fill(EMAIL_FIELD, &creds.email).await?;
        self.driver.fill(PASSWORD_FIELD, &creds.password).await?;
        self.driver.click(SUBMIT_BUTTON).await
    }

    /// Wait for the dashboard. If signup timed out on the login form, log
    /// in once with the same credentials and wait again.
    ///
    /// Returns whether the login fallback ran.
    async fn reach_dashboard(&self, pattern: &UrlPattern, creds: &Credentials) -> Result<bool> {
        let options = WaitOptions {
            timeout_ms: self.config.timeouts.navigation_wait_ms,
            poll_interval_ms: self.config.timeouts.poll_interval_ms,
        };

        match wait_for_url(self.driver, pattern, options).await {
            Ok(()) => Ok(false),
            Err(e) if e.is_timeout() => {
                let url = self.driver.url().await?;
                if !url.contains(&self.config.login_marker) {
                    debug!("not on a login page ({}), giving up", url);
                    return Err(e);
                }
                info!("signup redirected to {}, logging in", url);
                println!("Redirected to login, logging in...");
                self.submit_login(creds).await?;
                wait_for_url(self.driver, pattern, options).await?;
                Ok(true)
            }
            Err(e) => Err(e),
        }
    }
}

/// Owns the browser and page for one verification run.
pub struct Runner {
    browser: Browser,
    page: Page,
    config: Config,
}

impl Runner {
    /// Launch the browser described by `config.browser`.
    pub async fn new(config: Config) -> Result<Self> {
        let browser_config = &config.browser;
        let stealth = eoka::StealthConfig {
            headless: browser_config.headless,
            proxy: browser_config.proxy.clone(),
            user_agent: browser_config.user_agent.clone(),
            viewport_width: browser_config.viewport.width,
            viewport_height: browser_config.viewport.height,
            ..Default::default()
        };

        debug!(
            "Launching browser (headless: {}, viewport: {}x{})",
            browser_config.headless, browser_config.viewport.width, browser_config.viewport.height
        );
        let browser = Browser::launch_with_config(stealth).await?;
        let page = browser.new_page("about:blank").await?;

        Ok(Self {
            browser,
            page,
            config,
        })
    }

    /// Run the walkthrough, leaving the browser open.
    pub async fn run(&self) -> Result<RunReport> {
        Walkthrough::new(&self.page, &self.config).run().await
    }

    /// Run the walkthrough and close the browser whatever the outcome.
    /// A run error takes precedence over a close error.
    pub async fn verify(self) -> Result<RunReport> {
        let result = self.run().await;
        close_after(result, self.close()).await
    }

    /// Close the browser.
    pub async fn close(self) -> Result<()> {
        self.browser.close().await?;
        Ok(())
    }
}

/// Await `close` once a run has finished, whatever its result.
async fn close_after<T, F>(result: Result<T>, close: F) -> Result<T>
where
    F: Future<Output = Result<()>>,
{
    match (result, close.await) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(e)) => Err(e),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(close_err)) => {
            warn!("Failed to close browser: {}", close_err);
            Err(e)
        }
    }
}
