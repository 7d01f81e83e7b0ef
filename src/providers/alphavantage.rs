use crate::core::error::FetchResult;
use crate::core::finance::{self, DailySeriesPayload, StockReport};
use crate::core::resource::Pipeline;
use crate::providers::util::{build_url, fetch_json, http_client};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Daily closing prices from an Alpha Vantage-compatible API.
pub struct AlphaVantageProvider {
    base_url: String,
    api_key: String,
}

impl AlphaVantageProvider {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        AlphaVantageProvider {
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        }
    }
}

#[async_trait]
impl Pipeline for AlphaVantageProvider {
    type Input = String;
    type Raw = DailySeriesPayload;
    type View = StockReport;

    fn name(&self) -> &'static str {
        "finance"
    }

    #[instrument(name = "StockFetch", skip_all, fields(symbol = %symbol))]
    async fn fetch(&self, symbol: &String) -> FetchResult<DailySeriesPayload> {
        let url = build_url(
            &self.base_url,
            "/query",
            &[
                ("function", "TIME_SERIES_DAILY"),
                ("symbol", symbol.trim()),
                ("apikey", self.api_key.as_str()),
            ],
        )?;

        let client = http_client()?;
        let payload: DailySeriesPayload = fetch_json(&client, url, "daily time series").await?;
        debug!(
            entries = payload.time_series.as_ref().map_or(0, |s| s.len()),
            "Received daily time series"
        );
        Ok(payload)
    }

    fn normalize(&self, symbol: &String, raw: &DailySeriesPayload) -> FetchResult<StockReport> {
        finance::normalize(raw, symbol.trim())
    }
}
