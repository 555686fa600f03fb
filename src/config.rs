//! Runtime configuration derived from command-line arguments.

use std::time::Duration;

use crate::api::{MockApi, PromisedApi};

/// Output format for the session report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(OutputFormat::Pretty),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("invalid format {:?}, must be 'pretty' or 'json'", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Pretty => write!(f, "pretty"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Settings for one run of the program.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub format: OutputFormat,
    /// Simulated mock API latency. `None` means callbacks fire synchronously.
    pub latency: Option<Duration>,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    pub color: bool,
}

impl Config {
    /// Build the promisified API described by this configuration.
    pub fn api(&self) -> PromisedApi {
        PromisedApi::new(MockApi::new().with_latency(self.latency)).with_timeout(self.timeout)
    }
}

/// Treat zero as "not set" for millisecond options.
pub(crate) fn millis(value: Option<u64>) -> Option<Duration> {
    value.filter(|ms| *ms > 0).map(Duration::from_millis)
}
