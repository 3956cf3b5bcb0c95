// ── Exchange rate client ──
//
// The one HTTP call this workspace owns. The price API answers
// `GET /tobtc?currency=<code>&value=1` with a bare decimal body: the
// value of one unit of that fiat currency in BTC.

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use crate::error::RateError;

const DEFAULT_RATE_HOST: &str = "https://blockchain.info";

/// Source of fiat → BTC exchange rates.
///
/// Seam for the wallet controller's rate poller; production code uses
/// [`RateClient`], tests substitute a canned source.
#[async_trait]
pub trait RateSource: Send + Sync {
    /// The value of 1 unit of `currency` in BTC.
    async fn to_btc(&self, currency: &str) -> Result<f64, RateError>;
}

/// HTTP client for the external price API.
pub struct RateClient {
    http: reqwest::Client,
    base_url: Url,
}

impl RateClient {
    /// Client against the default public price host.
    #[allow(clippy::unwrap_used)] // constant URL
    pub fn new() -> Self {
        Self::with_base_url(Url::parse(DEFAULT_RATE_HOST).unwrap())
    }

    /// Client against a custom host (tests point this at a mock server).
    pub fn with_base_url(base_url: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }
}

impl Default for RateClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RateSource for RateClient {
    async fn to_btc(&self, currency: &str) -> Result<f64, RateError> {
        let mut url = self.base_url.clone();
        url.set_path("/tobtc");
        url.query_pairs_mut()
            .append_pair("currency", currency)
            .append_pair("value", "1");

        debug!(%url, "fetching exchange rate");
        let resp = self.http.get(url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(RateError::Status {
                code: status.as_u16(),
            });
        }

        let body = resp.text().await?;
        body.trim()
            .parse::<f64>()
            .map_err(|_| RateError::Parse { body })
    }
}
