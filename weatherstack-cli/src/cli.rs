use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::debug;
use weatherstack_core::{Config, LocationQuery, config, provider_from_config};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weather-report",
    version,
    about = "Print a current weather report from the weatherstack API"
)]
pub struct Cli {
    /// Country name, e.g. "Russia".
    pub country: String,

    /// Region or city name, e.g. "Samara".
    pub region: String,

    /// weatherstack access key.
    #[arg(long, env = "WEATHERSTACK_ACCESS_KEY", hide_env_values = true)]
    pub access_key: String,

    /// API base URL.
    #[arg(long, env = "WEATHERSTACK_BASE_URL", default_value = config::DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Total request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Largest response body accepted, in bytes.
    #[arg(long, default_value_t = config::DEFAULT_MAX_BODY_BYTES)]
    pub max_body_bytes: usize,
}

impl Cli {
    pub fn config(&self) -> Config {
        Config::new(self.access_key.clone())
            .with_base_url(self.base_url.clone())
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .with_max_body_bytes(self.max_body_bytes)
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let config = self.config();
        debug!(?config, "Resolved configuration");

        let provider = provider_from_config(&config).context("Failed to set up HTTP client")?;
        let query = LocationQuery::new(self.country, self.region);

        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        weatherstack_core::run(provider.as_ref(), &query, &mut out)
            .await
            .with_context(|| {
                format!("Failed to build weather report for {}, {}", query.country, query.region)
            })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positionals_and_flags() {
        let cli = Cli::try_parse_from([
            "weather-report",
            "Russia",
            "Samara",
            "--access-key",
            "KEY",
            "--base-url",
            "http://127.0.0.1:8080",
            "--timeout-secs",
            "5",
        ])
        .unwrap();

        let cfg = cli.config();
        assert_eq!(cli.country, "Russia");
        assert_eq!(cli.region, "Samara");
        assert_eq!(cfg.access_key, "KEY");
        assert_eq!(cfg.base_url, "http://127.0.0.1:8080");
        assert_eq!(cfg.timeout, Duration::from_secs(5));
        assert_eq!(cfg.max_body_bytes, config::DEFAULT_MAX_BODY_BYTES);
    }

    #[test]
    fn region_is_required() {
        let err = Cli::try_parse_from(["weather-report", "Russia", "--access-key", "KEY"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }
}
