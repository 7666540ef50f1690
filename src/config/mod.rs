pub mod schema;

pub use schema::{Account, BrowserConfig, Config, PageCheck, Timeouts, Viewport};
