//! # verify-frontend
//!
//! Headless end-to-end smoke test for a web app: sign up, reach the
//! dashboard (logging in if signup lands on the login form), then visit
//! each configured page, screenshot it and confirm its text markers.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use verify_frontend::{Config, Runner};
//!
//! # #[tokio::main]
//! # async fn main() -> verify_frontend::Result<()> {
//! let runner = Runner::new(Config::default()).await?;
//! let report = runner.verify().await?;
//! println!("All pages OK: {}", report.all_pages_ok());
//! # Ok(())
//! # }
//! ```

mod config;
mod credentials;
mod driver;
mod pattern;
mod runner;

pub use config::{Account, BrowserConfig, Config, PageCheck, Timeouts, Viewport};
pub use credentials::Credentials;
pub use driver::PageDriver;
pub use pattern::UrlPattern;
pub use runner::{CheckFailure, PageOutcome, PageReport, RunReport, Runner, Walkthrough};

/// Result type for verify-frontend operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during config loading or a run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("yaml parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("browser error: {0}")]
    Browser(#[from] eoka::Error),

    #[error("navigation to {url} failed: {source}")]
    Navigation { url: String, source: eoka::Error },

    #[error("timeout: {0}")]
    Timeout(String),

    #[error("marker '{marker}' not found within {timeout_ms}ms")]
    MarkerNotFound { marker: String, timeout_ms: u64 },

    #[error("screenshot {} failed: {source}", path.display())]
    Screenshot {
        path: std::path::PathBuf,
        source: Box<Error>,
    },
}

impl Error {
    /// True for waits that ran out of time.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::MarkerNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_stock_run() {
        let config = Config::default();
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.url(&config.signup_path), "http://localhost:3000/signup");
        assert_eq!(config.dashboard_pattern, "**/dashboard");
        assert_eq!(config.login_marker, "login");
        assert!(config.browser.headless);
        assert_eq!(config.browser.viewport.width, 1280);
        assert_eq!(config.browser.viewport.height, 800);
        assert_eq!(config.timeouts.navigation_wait_ms, 10000);
        assert_eq!(config.timeouts.marker_wait_ms, 10000);
        assert_eq!(config.timeouts.default_wait_ms, 30000);
        assert_eq!(config.account.password, "password123");
        assert_eq!(
            config.screenshot_path("debug_story.png"),
            std::path::PathBuf::from("/home/jules/verification/debug_story.png")
        );
    }

    #[test]
    fn test_default_pages() {
        let config = Config::default();
        assert_eq!(config.pages.len(), 2);

        let story = &config.pages[0];
        assert_eq!(story.path, "/dashboard/story");
        assert_eq!(story.debug_screenshot, "debug_story.png");
        assert_eq!(story.screenshot, "story_page.png");
        assert_eq!(
            story.markers,
            vec!["AI Story Review", "The Story", "Question 1"]
        );

        let conversation = &config.pages[1];
        assert_eq!(conversation.path, "/dashboard/conversation");
        assert_eq!(conversation.debug_screenshot, "debug_conversation.png");
        assert_eq!(conversation.screenshot, "conversation_page.png");
        assert_eq!(conversation.markers, vec!["AI Conversation Tutor"]);
    }

    #[test]
    fn test_parse_empty_document() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.pages.len(), 2);
    }

    #[test]
    fn test_parse_overrides() {
        let yaml = r#"
base_url: "http://staging.local:8080/"
screenshot_dir: "/tmp/shots"
browser:
  headless: false
  viewport:
    width: 1920
    height: 1080
  proxy: "http://localhost:8080"
timeouts:
  navigation_wait_ms: 5000
"#;
        let config = Config::parse(yaml).unwrap();
        assert_eq!(
            config.url("/signup"),
            "http://staging.local:8080/signup"
        );
        assert_eq!(
            config.screenshot_path("a.png"),
            std::path::PathBuf::from("/tmp/shots/a.png")
        );
        assert!(!config.browser.headless);
        assert_eq!(config.browser.viewport.width, 1920);
        assert_eq!(config.browser.proxy, Some("http://localhost:8080".into()));
        assert_eq!(config.timeouts.navigation_wait_ms, 5000);
        // untouched fields keep their defaults
        assert_eq!(config.timeouts.default_wait_ms, 30000);
        assert_eq!(config.account.name, "Test User");
    }

    #[test]
    fn test_parse_pages() {
        let yaml = r#"
pages:
  - name: "Settings"
    path: "/dashboard/settings"
    debug_screenshot: "debug_settings.png"
    screenshot: "settings.png"
    markers: ["Preferences", "Danger Zone"]
"#;
        let config = Config::parse(yaml).unwrap();
        assert_eq!(config.pages.len(), 1);
        assert_eq!(config.pages[0].name, "Settings");
        assert_eq!(config.pages[0].markers.len(), 2);
    }

    #[test]
    fn test_validation_empty_base_url() {
        let result = Config::parse("base_url: \"\"");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("base_url"));
    }

    #[test]
    fn test_validation_empty_pages() {
        let result = Config::parse("pages: []");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("page check"));
    }

    #[test]
    fn test_validation_page_without_markers() {
        let yaml = r#"
pages:
  - name: "Blank"
    path: "/blank"
    debug_screenshot: "debug_blank.png"
    screenshot: "blank.png"
    markers: []
"#;
        let result = Config::parse(yaml);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Blank"));
    }

    #[test]
    fn test_validation_zero_poll_interval() {
        let yaml = r#"
timeouts:
  poll_interval_ms: 0
"#;
        let result = Config::parse(yaml);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("at least 1"));
    }

    #[test]
    fn test_invalid_yaml() {
        let result = Config::parse("timeouts: [1, 2");
        assert!(matches!(result, Err(Error::Yaml(_))));
    }

    #[test]
    fn test_is_timeout() {
        assert!(Error::Timeout("url".into()).is_timeout());
        assert!(Error::MarkerNotFound {
            marker: "x".into(),
            timeout_ms: 1
        }
        .is_timeout());
        assert!(!Error::Config("bad".into()).is_timeout());
        assert!(!Error::Browser(eoka::Error::CdpSimple("closed".into())).is_timeout());
    }

    #[test]
    fn test_error_messages() {
        let e = Error::MarkerNotFound {
            marker: "Question 1".into(),
            timeout_ms: 30000,
        };
        assert_eq!(e.to_string(), "marker 'Question 1' not found within 30000ms");

        let e = Error::Navigation {
            url: "http://localhost:3000/dashboard/story".into(),
            source: eoka::Error::CdpSimple("refused".into()),
        };
        assert!(e
            .to_string()
            .starts_with("navigation to http://localhost:3000/dashboard/story failed"));
    }
}
