//! Weather view model and normalizer.

use crate::core::error::{FetchError, FetchResult, ProviderPayload};
use crate::core::series::{self, DailyAggregate, RawObservation};
use serde::Deserialize;
use serde_json::Value;
use std::fmt::Display;

/// Weather condition family reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeatherCondition {
    Clear,
    Clouds,
    Rain,
    Drizzle,
    Snow,
    Thunderstorm,
    /// Mist, fog and haze
    Fog,
    Other(String),
}

impl WeatherCondition {
    pub fn from_code(code: &str) -> Self {
        match code {
            "Clear" => WeatherCondition::Clear,
            "Clouds" => WeatherCondition::Clouds,
            "Rain" => WeatherCondition::Rain,
            "Drizzle" => WeatherCondition::Drizzle,
            "Snow" => WeatherCondition::Snow,
            "Thunderstorm" => WeatherCondition::Thunderstorm,
            "Mist" | "Fog" | "Haze" => WeatherCondition::Fog,
            other => WeatherCondition::Other(other.to_string()),
        }
    }

    /// Icon for the condition; unknown conditions show clear sky.
    pub fn icon(&self) -> &'static str {
        match self {
            WeatherCondition::Clear => "☀",
            WeatherCondition::Clouds => "☁",
            WeatherCondition::Rain | WeatherCondition::Drizzle => "☂",
            WeatherCondition::Snow => "❄",
            WeatherCondition::Thunderstorm => "⚡",
            WeatherCondition::Fog => "🌫",
            WeatherCondition::Other(_) => "☀",
        }
    }
}

impl Display for WeatherCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeatherCondition::Other(code) => write!(f, "{code}"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// Normalized current conditions plus the daily forecast series.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub location: String,
    pub country: Option<String>,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: f64,
    pub pressure: f64,
    pub wind_speed: Option<f64>,
    /// Metres
    pub visibility: Option<f64>,
    pub condition: WeatherCondition,
    pub description: Option<String>,
    pub forecast: Vec<DailyAggregate>,
}

#[derive(Debug, Deserialize, Default)]
pub struct CurrentPayload {
    pub cod: Option<Value>,
    pub message: Option<Value>,
    pub name: Option<String>,
    pub sys: Option<SysBlock>,
    pub main: Option<MainBlock>,
    pub wind: Option<WindBlock>,
    pub visibility: Option<f64>,
    #[serde(default)]
    pub weather: Vec<ConditionBlock>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ForecastPayload {
    pub cod: Option<Value>,
    pub message: Option<Value>,
    pub list: Option<Vec<ForecastEntry>>,
}

#[derive(Debug, Deserialize, Default)]
pub struct SysBlock {
    pub country: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct MainBlock {
    pub temp: Option<f64>,
    pub feels_like: Option<f64>,
    pub humidity: Option<f64>,
    pub pressure: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
pub struct WindBlock {
    pub speed: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ConditionBlock {
    pub main: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ForecastEntry {
    pub dt: Option<i64>,
    pub main: Option<MainBlock>,
    #[serde(default)]
    pub weather: Vec<ConditionBlock>,
}

// The provider reports `cod` as a number on some endpoints and a string on others.
fn status_error(cod: &Option<Value>, message: &Option<Value>) -> Option<String> {
    let code = match cod.as_ref()? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse::<i64>().ok(),
        _ => None,
    };
    if code == Some(200) {
        return None;
    }
    let message = match message {
        Some(Value::String(m)) if !m.is_empty() => m.clone(),
        _ => {
            let shown = match cod.as_ref()? {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            format!("Weather provider returned code {shown}")
        }
    };
    Some(message)
}

impl ProviderPayload for CurrentPayload {
    fn provider_error(&self) -> Option<String> {
        status_error(&self.cod, &self.message)
    }
}

impl ProviderPayload for ForecastPayload {
    fn provider_error(&self) -> Option<String> {
        status_error(&self.cod, &self.message)
    }
}

impl ForecastPayload {
    /// Forecast samples with both a timestamp and a temperature.
    pub fn observations(&self) -> Vec<RawObservation> {
        self.list
            .iter()
            .flatten()
            .filter_map(|entry| {
                Some(RawObservation {
                    timestamp: entry.dt?,
                    temperature: entry.main.as_ref()?.temp?,
                    condition: entry
                        .weather
                        .first()
                        .and_then(|w| w.main.clone())
                        .unwrap_or_default(),
                })
            })
            .collect()
    }
}

fn required<T>(value: Option<T>, field: &str) -> FetchResult<T> {
    value.ok_or_else(|| FetchError::empty(format!("Incomplete weather data: missing `{field}`")))
}

/// Builds a [`WeatherReport`] from the current-conditions and forecast payloads.
pub fn normalize(current: &CurrentPayload, forecast: &ForecastPayload) -> FetchResult<WeatherReport> {
    if let Some(message) = current.provider_error().or_else(|| forecast.provider_error()) {
        return Err(FetchError::provider(message));
    }

    let location = required(current.name.clone(), "name")?;
    let main = required(current.main.as_ref(), "main")?;
    let condition = required(
        current.weather.first().and_then(|w| w.main.as_deref()),
        "weather[0].main",
    )?;

    if forecast.list.is_none() {
        return Err(FetchError::empty("No forecast data available"));
    }

    Ok(WeatherReport {
        location,
        country: current.sys.as_ref().and_then(|s| s.country.clone()),
        temperature: required(main.temp, "main.temp")?,
        feels_like: required(main.feels_like, "main.feels_like")?,
        humidity: required(main.humidity, "main.humidity")?,
        pressure: required(main.pressure, "main.pressure")?,
        wind_speed: current.wind.as_ref().and_then(|w| w.speed),
        visibility: current.visibility,
        condition: WeatherCondition::from_code(condition),
        description: current.weather.first().and_then(|w| w.description.clone()),
        forecast: series::aggregate_daily_local(&forecast.observations()),
    })
}
