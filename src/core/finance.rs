//! Stock price view model and normalizer for daily time-series payloads.

use crate::core::change::ChangeSummary;
use crate::core::error::{FetchError, FetchResult, ProviderPayload};
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::warn;

/// Maximum number of points in a price series.
pub const MAX_POINTS: usize = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct PricePoint {
    pub date: String,
    pub close: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StockReport {
    pub symbol: String,
    pub last_refreshed: Option<String>,
    /// Oldest to newest
    pub prices: Vec<PricePoint>,
    pub change: ChangeSummary,
}

impl StockReport {
    pub fn current_price(&self) -> Option<f64> {
        self.change.current
    }

    pub fn previous_close(&self) -> Option<f64> {
        self.change.previous
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct DailySeriesPayload {
    #[serde(rename = "Error Message")]
    pub error_message: Option<String>,
    /// Call frequency notice
    #[serde(rename = "Note")]
    pub note: Option<String>,
    #[serde(rename = "Information")]
    pub information: Option<String>,
    #[serde(rename = "Meta Data")]
    pub meta: Option<MetaData>,
    // Keys are ISO dates, so map order is chronological
    #[serde(rename = "Time Series (Daily)")]
    pub time_series: Option<BTreeMap<String, DailyBar>>,
}

#[derive(Debug, Deserialize, Default)]
pub struct MetaData {
    #[serde(rename = "2. Symbol")]
    pub symbol: Option<String>,
    #[serde(rename = "3. Last Refreshed")]
    pub last_refreshed: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct DailyBar {
    #[serde(rename = "4. close")]
    pub close: Option<String>,
}

impl ProviderPayload for DailySeriesPayload {
    fn provider_error(&self) -> Option<String> {
        self.error_message.clone()
    }
}

/// Builds a [`StockReport`] from the newest [`MAX_POINTS`] entries of the series.
///
/// `requested_symbol` is used only when the payload carries no metadata.
pub fn normalize(payload: &DailySeriesPayload, requested_symbol: &str) -> FetchResult<StockReport> {
    if let Some(message) = payload.provider_error() {
        return Err(FetchError::provider(message));
    }

    let series = match &payload.time_series {
        Some(series) if !series.is_empty() => series,
        _ => {
            // Throttled responses carry a notice instead of data
            if let Some(notice) = payload.note.as_ref().or(payload.information.as_ref()) {
                return Err(FetchError::provider(notice.clone()));
            }
            return Err(FetchError::empty("No time series data available"));
        }
    };

    let mut prices: Vec<PricePoint> = series
        .iter()
        .rev()
        .take(MAX_POINTS)
        .filter_map(|(date, bar)| {
            let parsed = bar.close.as_deref().map(|c| c.trim().parse::<f64>());
            match parsed {
                Some(Ok(close)) if close.is_finite() => Some(PricePoint {
                    date: date.clone(),
                    close,
                }),
                _ => {
                    warn!(%date, close = ?bar.close, "Skipping entry without a valid close");
                    None
                }
            }
        })
        .collect();
    prices.reverse();

    if prices.is_empty() {
        return Err(FetchError::empty("No time series data available"));
    }

    let closes: Vec<f64> = prices.iter().map(|p| p.close).collect();
    let meta = payload.meta.as_ref();

    Ok(StockReport {
        symbol: meta
            .and_then(|m| m.symbol.clone())
            .unwrap_or_else(|| requested_symbol.to_string()),
        last_refreshed: meta.and_then(|m| m.last_refreshed.clone()),
        change: ChangeSummary::from_series(&closes),
        prices,
    })
}
