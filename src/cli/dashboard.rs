use super::{news, render_state, ui};
use crate::core::config::{AppConfig, ProviderKind, env_key};
use crate::core::finance::StockReport;
use crate::core::news::{NewsCategory, NewsItem};
use crate::core::resource::{Pipeline, Resource, ResourceState};
use crate::core::weather::WeatherReport;
use crate::providers::{AlphaVantageProvider, NewsApiProvider, OpenWeatherProvider};
use anyhow::Result;
use tracing::{debug, warn};

/// User inputs driving the three pipelines.
#[derive(Debug, Clone, PartialEq)]
pub struct Inputs {
    pub location: String,
    pub symbol: String,
    pub category: NewsCategory,
}

impl Inputs {
    pub fn from_config(config: &AppConfig) -> Self {
        Inputs {
            location: config.location.clone(),
            symbol: config.symbol.clone(),
            category: config.news_category(),
        }
    }
}

/// Which panels a command shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelSelection {
    All,
    Weather,
    Stock,
    News,
}

impl PanelSelection {
    fn includes(&self, other: PanelSelection) -> bool {
        *self == PanelSelection::All || *self == other
    }
}

/// A panel whose provider could not be set up carries the reason instead.
pub type Panel<P> = std::result::Result<Resource<P>, String>;

pub fn weather_title(location: &str) -> String {
    format!("Weather in {location}")
}

pub fn stock_title(symbol: &str) -> String {
    format!("{symbol} Stock Data")
}

pub fn news_title(category: &NewsCategory) -> String {
    format!("{} News", category.title())
}

pub fn render_weather(report: &WeatherReport) -> String {
    report.display()
}

pub fn render_stock(report: &StockReport) -> String {
    report.display()
}

/// The three independent pipelines.
pub struct Dashboard {
    pub weather: Panel<OpenWeatherProvider>,
    pub finance: Panel<AlphaVantageProvider>,
    pub news: Panel<NewsApiProvider>,
}

fn panel<P: Pipeline>(
    config: &AppConfig,
    kind: ProviderKind,
    keys: &impl Fn(&str) -> Option<String>,
    build: impl FnOnce(&str, &str) -> P,
) -> Panel<P> {
    match config.api_key_with(kind, keys) {
        Ok(key) => Ok(Resource::new(build(config.base_url(kind), &key))),
        Err(e) => {
            warn!(provider = ?kind, error = %e, "Panel disabled");
            Err(e.to_string())
        }
    }
}

async fn refresh_panel<P: Pipeline>(
    panel: &Panel<P>,
    title: &str,
    input: P::Input,
    render: impl Fn(&P::View) -> String,
) -> String {
    match panel {
        Ok(resource) => {
            let state = resource.refresh(input).await;
            render_state(title, &state, render)
        }
        Err(reason) => render_state(title, &ResourceState::Error(reason.clone()), render),
    }
}

async fn current_panel<P: Pipeline>(
    panel: &Panel<P>,
    title: &str,
    render: impl Fn(&P::View) -> String,
) -> String {
    match panel {
        Ok(resource) => render_state(title, &resource.state().await, render),
        Err(reason) => render_state(title, &ResourceState::Error(reason.clone()), render),
    }
}

impl Dashboard {
    /// Builds the panels with API keys read from the environment.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::with_keys(config, env_key)
    }

    /// Builds the panels with API keys resolved through `keys`.
    pub fn with_keys(config: &AppConfig, keys: impl Fn(&str) -> Option<String>) -> Self {
        Dashboard {
            weather: panel(config, ProviderKind::Weather, &keys, |base_url, key| {
                OpenWeatherProvider::new(base_url, key, &config.units)
            }),
            finance: panel(config, ProviderKind::Finance, &keys, AlphaVantageProvider::new),
            news: panel(config, ProviderKind::News, &keys, |base_url, key| {
                NewsApiProvider::new(base_url, key, &config.country)
            }),
        }
    }

    /// Fetches the selected panels concurrently and renders each one. A failed
    /// panel renders its error without affecting the others.
    pub async fn refresh(&self, inputs: &Inputs, selection: PanelSelection) -> Vec<String> {
        let weather = async {
            if !selection.includes(PanelSelection::Weather) {
                return None;
            }
            Some(
                refresh_panel(
                    &self.weather,
                    &weather_title(&inputs.location),
                    inputs.location.clone(),
                    render_weather,
                )
                .await,
            )
        };
        let finance = async {
            if !selection.includes(PanelSelection::Stock) {
                return None;
            }
            Some(
                refresh_panel(
                    &self.finance,
                    &stock_title(&inputs.symbol),
                    inputs.symbol.clone(),
                    render_stock,
                )
                .await,
            )
        };
        let headlines = async {
            if !selection.includes(PanelSelection::News) {
                return None;
            }
            Some(
                refresh_panel(
                    &self.news,
                    &news_title(&inputs.category),
                    inputs.category.clone(),
                    |items: &Vec<NewsItem>| news::display(&inputs.category, items),
                )
                .await,
            )
        };

        let (weather, finance, headlines) = tokio::join!(weather, finance, headlines);
        [weather, finance, headlines].into_iter().flatten().collect()
    }

    /// Renders the latest state of every panel without fetching.
    pub async fn current(&self, inputs: &Inputs) -> Vec<String> {
        let weather_title = weather_title(&inputs.location);
        let stock_title = stock_title(&inputs.symbol);
        let news_title = news_title(&inputs.category);
        let (weather, finance, headlines) = futures::join!(
            current_panel(&self.weather, &weather_title, render_weather),
            current_panel(&self.finance, &stock_title, render_stock),
            current_panel(&self.news, &news_title, |items: &Vec<NewsItem>| {
                news::display(&inputs.category, items)
            }),
        );
        vec![weather, finance, headlines]
    }
}

pub fn print_panels(panels: &[String]) {
    for (i, panel) in panels.iter().enumerate() {
        println!("{panel}");
        if i < panels.len() - 1 {
            ui::print_separator();
        }
    }
}

pub async fn run(dashboard: &Dashboard, inputs: &Inputs, selection: PanelSelection) -> Result<()> {
    debug!(?inputs, ?selection, "Refreshing dashboard");

    let pb = ui::new_spinner("Fetching data...");
    let panels = dashboard.refresh(inputs, selection).await;
    pb.finish_and_clear();

    print_panels(&panels);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_without_keys() -> AppConfig {
        serde_yaml::from_str(
            r#"
location: "Oslo"
symbol: "EQNR"
category: "science"
providers:
  weather:
    api_key_env: "DASHLINE_UNIT_UNSET_WEATHER"
  finance:
    api_key_env: "DASHLINE_UNIT_UNSET_FINANCE"
  news:
    api_key_env: "DASHLINE_UNIT_UNSET_NEWS"
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_selection() {
        assert!(PanelSelection::All.includes(PanelSelection::News));
        assert!(PanelSelection::Weather.includes(PanelSelection::Weather));
        assert!(!PanelSelection::Weather.includes(PanelSelection::Stock));
    }

    #[test]
    fn test_inputs_from_config() {
        let inputs = Inputs::from_config(&config_without_keys());
        assert_eq!(inputs.location, "Oslo");
        assert_eq!(inputs.symbol, "EQNR");
        assert_eq!(inputs.category, NewsCategory::Science);
    }

    #[tokio::test]
    async fn test_missing_keys_render_as_panel_errors() {
        let config = config_without_keys();
        let dashboard = Dashboard::with_keys(&config, |_| None);
        assert!(dashboard.weather.is_err());

        let inputs = Inputs::from_config(&config);
        let panels = dashboard.refresh(&inputs, PanelSelection::All).await;
        assert_eq!(panels.len(), 3);
        assert!(panels[0].contains("Weather in Oslo"));
        assert!(panels[0].contains("DASHLINE_UNIT_UNSET_WEATHER"));
        assert!(panels[1].contains("EQNR Stock Data"));
        assert!(panels[2].contains("Science News"));

        let panels = dashboard.refresh(&inputs, PanelSelection::Stock).await;
        assert_eq!(panels.len(), 1);
        assert!(panels[0].contains("DASHLINE_UNIT_UNSET_FINANCE"));
    }
}
