//! Relay Configuration
//!
//! Command-line flags (each with an environment variable fallback) and their
//! validated runtime form.

use crate::relay::submit::{
    DEFAULT_DEADLINE, DEFAULT_FORWARD_TIMEOUT, DEFAULT_POLL_INTERVAL, SubmitMode,
};

use anyhow::{Result, bail};
use clap::{Parser, ValueEnum};
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    FireAndForget,
    Blocking,
    Forward,
}

#[derive(Debug, Parser)]
#[command(
    name = "voxel-relay",
    version,
    about = "Question relay between a website and a private worker"
)]
pub struct RelayArgs {
    /// Address the HTTP server listens on
    #[arg(long, env = "RELAY_BIND", default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    /// How /api/ask hands questions to the worker
    #[arg(long, env = "RELAY_MODE", value_enum, default_value_t = ModeArg::FireAndForget)]
    pub mode: ModeArg,

    /// Blocking mode: milliseconds between answer checks
    #[arg(
        long,
        env = "RELAY_POLL_INTERVAL_MS",
        default_value_t = DEFAULT_POLL_INTERVAL.as_millis() as u64
    )]
    pub poll_interval_ms: u64,

    /// Blocking mode: seconds to wait for an answer
    #[arg(long, env = "RELAY_DEADLINE_SECS", default_value_t = DEFAULT_DEADLINE.as_secs())]
    pub deadline_secs: u64,

    /// Forward mode: base URL of the worker
    #[arg(long, env = "RELAY_FORWARD_URL")]
    pub forward_url: Option<String>,

    /// Forward mode: request timeout in seconds
    #[arg(
        long,
        env = "RELAY_FORWARD_TIMEOUT_SECS",
        default_value_t = DEFAULT_FORWARD_TIMEOUT.as_secs()
    )]
    pub forward_timeout_secs: u64,

    /// Seconds between queue stats log lines, 0 disables
    #[arg(long, env = "RELAY_STATS_INTERVAL_SECS", default_value_t = 30)]
    pub stats_interval_secs: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RelayConfig {
    pub bind: SocketAddr,
    pub mode: SubmitMode,
    pub stats_interval: Option<Duration>,
}

impl RelayArgs {
    pub fn into_config(self) -> Result<RelayConfig> {
        let mode = match self.mode {
            ModeArg::FireAndForget => SubmitMode::FireAndForget,
            ModeArg::Blocking => {
                if self.poll_interval_ms == 0 {
                    bail!("--poll-interval-ms must be greater than zero");
                }
                if self.deadline_secs == 0 {
                    bail!("--deadline-secs must be greater than zero");
                }
                SubmitMode::Blocking {
                    poll_interval: Duration::from_millis(self.poll_interval_ms),
                    deadline: Duration::from_secs(self.deadline_secs),
                }
            }
            ModeArg::Forward => {
                let url = match self.forward_url.as_deref().map(str::trim) {
                    Some(url) if !url.is_empty() => url,
                    _ => bail!("--forward-url is required in forward mode"),
                };
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    bail!("--forward-url must start with http:// or https://, got {}", url);
                }
                if self.forward_timeout_secs == 0 {
                    bail!("--forward-timeout-secs must be greater than zero");
                }
                SubmitMode::Forward {
                    url: url.trim_end_matches('/').to_string(),
                    timeout: Duration::from_secs(self.forward_timeout_secs),
                }
            }
        };

        let stats_interval =
            (self.stats_interval_secs > 0).then(|| Duration::from_secs(self.stats_interval_secs));

        Ok(RelayConfig {
            bind: self.bind,
            mode,
            stats_interval,
        })
    }
}
