//! Command-line interface for promisify.

use clap::Parser;
use std::io;

use crate::config::{self, Config, OutputFormat};
use crate::report::{JsonReporter, PrettyReporter};
use crate::session::{self, Outcome};

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 2;

/// Callback-to-future adapter demo.
///
/// Queries a mock callback-style API through promisified wrappers and
/// prints admins, users, the server time and the coffee machine queue
/// length. The last request always fails; that is reported and the
/// program still exits successfully.
#[derive(Parser, Debug)]
#[command(name = "promisify")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    /// Simulated mock API latency in milliseconds (0 = synchronous callbacks)
    #[arg(long, env = "PROMISIFY_LATENCY_MS")]
    pub latency_ms: Option<u64>,

    /// Per-request timeout in milliseconds (0 = wait forever)
    #[arg(long, env = "PROMISIFY_TIMEOUT_MS")]
    pub timeout_ms: Option<u64>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Validate arguments and turn them into a [`Config`].
    pub fn config(&self) -> anyhow::Result<Config> {
        let format = self.format.parse::<OutputFormat>().map_err(anyhow::Error::msg)?;
        Ok(Config {
            format,
            latency: config::millis(self.latency_ms),
            timeout: config::millis(self.timeout_ms),
            color: !self.no_color,
        })
    }
}

/// Run the presentation session.
pub async fn run(cli: &Cli) -> anyhow::Result<i32> {
    let config = match cli.config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    if !config.color {
        colored::control::set_override(false);
    }

    tracing::debug!(?config, "starting session");
    let api = config.api();

    let outcome = match config.format {
        OutputFormat::Json => {
            let mut reporter = JsonReporter::new(io::stdout());
            session::run(&api, &mut reporter).await?
        }
        OutputFormat::Pretty => {
            let mut reporter = PrettyReporter::new(io::stdout());
            session::run(&api, &mut reporter).await?
        }
    };

    // A failed request is an expected ending, not a process failure.
    if let Outcome::Failed(error) = &outcome {
        tracing::info!(%error, "session ended early");
    }

    Ok(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_no_arguments_uses_defaults() {
        let cli = Cli::try_parse_from(["promisify"]).unwrap();
        let config = cli.config().unwrap();
        assert_eq!(config.format, OutputFormat::Pretty);
        assert!(config.color);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "promisify",
            "--format",
            "json",
            "--latency-ms",
            "20",
            "--timeout-ms",
            "0",
            "--no-color",
        ])
        .unwrap();
        let config = cli.config().unwrap();
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.latency, Some(Duration::from_millis(20)));
        assert_eq!(config.timeout, None);
        assert!(!config.color);
    }

    #[test]
    fn test_invalid_format_rejected() {
        let cli = Cli::try_parse_from(["promisify", "-f", "xml"]).unwrap();
        let err = cli.config().unwrap_err();
        assert!(err.to_string().contains("invalid format"));
    }

    #[tokio::test]
    async fn test_failed_request_still_exits_successfully() {
        let cli = Cli::try_parse_from(["promisify", "-f", "json"]).unwrap();
        assert_eq!(run(&cli).await.unwrap(), EXIT_SUCCESS);
    }

    #[tokio::test]
    async fn test_invalid_format_exits_with_error() {
        let cli = Cli::try_parse_from(["promisify", "-f", "xml"]).unwrap();
        assert_eq!(run(&cli).await.unwrap(), EXIT_ERROR);
    }
}
