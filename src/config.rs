use crate::global_variables::{API_BASE_URL, FRAMES_DIR, REQUEST_TIMEOUT_SECS, TICK_INTERVAL_MS};
use clap::Args;
use std::path::PathBuf;
use std::time::Duration;

/// Runtime settings shared by the binaries.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the JSON store, without a trailing slash.
    pub api_url: String,
    pub request_timeout: Duration,
    /// Interval between two simulation ticks.
    pub tick_interval: Duration,
    /// Directory the bitmap renderer writes frames into.
    pub frames_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: API_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            tick_interval: Duration::from_millis(TICK_INTERVAL_MS),
            frames_dir: PathBuf::from(FRAMES_DIR),
        }
    }
}

/// Command-line flags, each with an environment fallback.
#[derive(Debug, Clone, Args)]
pub struct ConfigArgs {
    /// Base URL of the scenarios/vehicles REST store
    #[arg(long, env = "DASHBOARD_API_URL", default_value = API_BASE_URL)]
    pub api_url: String,

    /// Request timeout in seconds
    #[arg(long, env = "DASHBOARD_TIMEOUT_SECS", default_value_t = REQUEST_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Simulation tick interval in milliseconds
    #[arg(long, env = "DASHBOARD_TICK_MS", default_value_t = TICK_INTERVAL_MS)]
    pub tick_ms: u64,

    /// Directory for rendered frames
    #[arg(long, env = "DASHBOARD_FRAMES_DIR", default_value = FRAMES_DIR)]
    pub frames_dir: PathBuf,
}

impl From<ConfigArgs> for Config {
    fn from(args: ConfigArgs) -> Self {
        Self {
            api_url: args.api_url.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(args.timeout_secs),
            // A zero period would make tokio's interval panic.
            tick_interval: Duration::from_millis(args.tick_ms.max(1)),
            frames_dir: args.frames_dir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_are_normalized() {
        let config = Config::from(ConfigArgs {
            api_url: "http://localhost:3000/".to_string(),
            timeout_secs: 5,
            tick_ms: 0,
            frames_dir: PathBuf::from("out"),
        });
        assert_eq!(config.api_url, "http://localhost:3000");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.tick_interval, Duration::from_millis(1));
        assert_eq!(config.frames_dir, PathBuf::from("out"));
    }

    #[test]
    fn defaults_point_at_hosted_store() {
        let config = Config::default();
        assert_eq!(config.api_url, API_BASE_URL);
        assert_eq!(config.tick_interval, Duration::from_millis(1000));
    }
}
