use std::{net::SocketAddr, time::Duration};

use anyhow::{anyhow, Context};
use chrono_tz::Tz;
use planit_core::utils::time_utils::DEFAULT_TIMEZONE;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    /// Timezone in which "today" is evaluated for deposit suggestions.
    pub timezone: Tz,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            cors_allow: vec!["*".to_string()],
            request_timeout: Duration::from_millis(30000),
            timezone: DEFAULT_TIMEZONE,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let listen_addr = match std::env::var("PLANIT_LISTEN_ADDR") {
            Ok(addr) => addr
                .parse()
                .with_context(|| format!("Invalid PLANIT_LISTEN_ADDR: {}", addr))?,
            Err(_) => defaults.listen_addr,
        };
        let cors_allow = std::env::var("PLANIT_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let request_timeout = match std::env::var("PLANIT_REQUEST_TIMEOUT_MS") {
            Ok(ms) => Duration::from_millis(
                ms.trim()
                    .parse()
                    .with_context(|| format!("Invalid PLANIT_REQUEST_TIMEOUT_MS: {}", ms))?,
            ),
            Err(_) => defaults.request_timeout,
        };
        let timezone = match std::env::var("PLANIT_TIMEZONE") {
            Ok(tz) => tz
                .trim()
                .parse::<Tz>()
                .map_err(|e| anyhow!("Invalid PLANIT_TIMEZONE {:?}: {}", tz, e))?,
            Err(_) => defaults.timezone,
        };

        Ok(Self {
            listen_addr,
            cors_allow,
            request_timeout,
            timezone,
        })
    }
}
