// =============================================================================
// Process configuration — read once from the environment at startup
// =============================================================================
//
// The upstream API token is mandatory: the process fails fast when it is
// absent rather than serving requests that can only ever fail. Everything
// else has a sensible default. The resulting `Config` is passed explicitly
// into the upstream client at construction; there are no process-wide
// mutable singletons.
// =============================================================================

use anyhow::{bail, Result};

/// Default upstream query endpoint.
const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";
/// Default listen address for the API server.
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3001";

/// Immutable process configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Upstream API token, sent with every request.
    pub api_key: String,
    /// Upstream query endpoint.
    pub base_url: String,
    /// Address the API server binds to.
    pub bind_addr: String,
}

impl Config {
    /// Build the configuration from process environment variables.
    ///
    /// - `MARKETDESK_API_KEY`  — required; startup fails without it.
    /// - `MARKETDESK_BASE_URL` — optional upstream override.
    /// - `MARKETDESK_BIND_ADDR` — optional listen address override.
    pub fn from_env() -> Result<Self> {
        let api_key = match std::env::var("MARKETDESK_API_KEY") {
            Ok(key) if !key.trim().is_empty() => key,
            _ => bail!("MARKETDESK_API_KEY is not set; refusing to start"),
        };

        let base_url = std::env::var("MARKETDESK_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let bind_addr = std::env::var("MARKETDESK_BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        Ok(Self {
            api_key,
            base_url,
            bind_addr,
        })
    }
}
