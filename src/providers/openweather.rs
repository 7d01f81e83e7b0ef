use crate::core::error::FetchResult;
use crate::core::resource::Pipeline;
use crate::core::weather::{self, CurrentPayload, ForecastPayload, WeatherReport};
use crate::providers::util::{build_url, fetch_json, http_client};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Current conditions and 5-day forecast from an OpenWeatherMap-compatible API.
pub struct OpenWeatherProvider {
    base_url: String,
    api_key: String,
    units: String,
}

impl OpenWeatherProvider {
    pub fn new(base_url: &str, api_key: &str, units: &str) -> Self {
        OpenWeatherProvider {
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            units: units.to_string(),
        }
    }
}

#[async_trait]
impl Pipeline for OpenWeatherProvider {
    type Input = String;
    type Raw = (CurrentPayload, ForecastPayload);
    type View = WeatherReport;

    fn name(&self) -> &'static str {
        "weather"
    }

    #[instrument(name = "WeatherFetch", skip_all, fields(location = %location))]
    async fn fetch(&self, location: &String) -> FetchResult<Self::Raw> {
        let params = [
            ("q", location.trim()),
            ("appid", self.api_key.as_str()),
            ("units", self.units.as_str()),
        ];
        let current_url = build_url(&self.base_url, "/data/2.5/weather", &params)?;
        let forecast_url = build_url(&self.base_url, "/data/2.5/forecast", &params)?;

        let client = http_client()?;
        // Either request failing fails the whole cycle
        let (current, forecast) = tokio::try_join!(
            fetch_json::<CurrentPayload>(&client, current_url, "current weather"),
            fetch_json::<ForecastPayload>(&client, forecast_url, "weather forecast"),
        )?;
        debug!(
            samples = forecast.list.as_ref().map_or(0, Vec::len),
            "Received weather payloads"
        );
        Ok((current, forecast))
    }

    fn normalize(&self, _location: &String, raw: &Self::Raw) -> FetchResult<WeatherReport> {
        weather::normalize(&raw.0, &raw.1)
    }
}
