use crate::{Error, Result};
use regex::Regex;

/// URL glob as accepted by `dashboard_pattern`.
///
/// `**` matches any run of characters, `*` matches any run without `/`,
/// everything else is literal. The whole URL must match.
#[derive(Debug, Clone)]
pub struct UrlPattern {
    glob: String,
    regex: Regex,
}

impl UrlPattern {
    pub fn new(glob: &str) -> Result<Self> {
        let mut re = String::with_capacity(glob.len() + 8);
        re.push('^');
        let mut rest = glob;
        while !rest.is_empty() {
            if let Some(tail) = rest.strip_prefix("**") {
                re.push_str(".*");
                rest = tail;
            } else if let Some(tail) = rest.strip_prefix('*') {
                re.push_str("[^/]*");
                rest = tail;
            } else {
                let end = rest.find('*').unwrap_or(rest.len());
                re.push_str(&regex::escape(&rest[..end]));
                rest = &rest[end..];
            }
        }
        re.push('$');

        let regex = Regex::new(&re)
            .map_err(|e| Error::Config(format!("invalid url pattern '{}': {}", glob, e)))?;
        Ok(Self {
            glob: glob.to_string(),
            regex,
        })
    }

    pub fn matches(&self, url: &str) -> bool {
        self.regex.is_match(url)
    }

    pub fn as_str(&self) -> &str {
        &self.glob
    }
}
