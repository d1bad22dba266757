// =============================================================================
// Upstream HTTP client
// =============================================================================
//
// One outbound call per inbound request: fetch a time series for a
// (symbol, interval) pair and hand the payload to the normalizer. The API
// token and base URL are injected at construction from the process `Config`;
// nothing here reads the environment.
// =============================================================================

use tracing::{debug, instrument};

use crate::config::Config;
use crate::error::ApiError;
use crate::types::{Bar, Interval};
use crate::upstream::parse;

/// Client timeout for upstream calls (seconds).
const UPSTREAM_TIMEOUT_SECS: u64 = 10;

/// Thin wrapper around `reqwest::Client` bound to one upstream endpoint and
/// API token.
#[derive(Clone)]
pub struct UpstreamClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl UpstreamClient {
    /// Build a client from the process configuration.
    pub fn new(config: &Config) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(UPSTREAM_TIMEOUT_SECS))
            .build()
            .expect("failed to build reqwest client");

        Self {
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            client,
        }
    }

    /// Fetch and normalize the quote series for `symbol` at `interval`,
    /// ascending by date.
    #[instrument(skip_all, fields(symbol = %symbol, interval = %interval))]
    pub async fn fetch_series(
        &self,
        symbol: &str,
        interval: &Interval,
    ) -> Result<Vec<Bar>, ApiError> {
        let mut params: Vec<(&str, &str)> = vec![
            ("symbol", symbol),
            ("outputsize", "compact"),
            ("apikey", &self.api_key),
        ];
        match interval {
            Interval::Daily => params.push(("function", "TIME_SERIES_DAILY")),
            Interval::Weekly => params.push(("function", "TIME_SERIES_WEEKLY")),
            Interval::Monthly => params.push(("function", "TIME_SERIES_MONTHLY")),
            Interval::Intraday(step) => {
                params.push(("function", "TIME_SERIES_INTRADAY"));
                params.push(("interval", step));
            }
        }

        let payload: serde_json::Value = self
            .client
            .get(&self.base_url)
            .query(&params)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let bars = parse::parse_series(&payload, symbol, &interval.payload_key())?;
        debug!(symbol = %symbol, bars = bars.len(), "upstream series fetched");

        Ok(bars)
    }
}
