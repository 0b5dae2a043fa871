use crate::error::{ResearchError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Symbols like `AAPL`, `BRK.B`, `^GSPC`, `ES=F`. Anything else could
/// break out of the heredoc file name the agent writes the report to.
static TICKER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\^?[A-Z0-9][A-Z0-9.=\-]{0,11}$").expect("valid ticker pattern"));

/// A validated, upper-cased stock ticker symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ticker(String);

impl Ticker {
    pub fn parse(raw: &str) -> Result<Self> {
        let symbol = raw.trim().to_uppercase();
        if TICKER_PATTERN.is_match(&symbol) {
            Ok(Self(symbol))
        } else {
            Err(ResearchError::InvalidTicker(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File the agent is told to write, relative to its working directory.
    pub fn report_file_name(&self) -> String {
        format!("{}_research_report.md", self.0)
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
