//! Interactive mode: panels re-fetch as inputs change, latest input wins.

use super::dashboard::{self, Dashboard, Inputs, Panel};
use super::{news, render_state, ui};
use crate::core::news::{NewsCategory, NewsItem};
use crate::core::resource::Pipeline;
use anyhow::Result;
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;
use tracing::debug;

const HELP: &str = "Commands:
  weather <location>   change the weather location
  stock <symbol>       change the stock symbol
  news <category>      change the news category
  show                 print all panels
  help                 print this help
  quit                 exit";

#[derive(Debug, Clone, PartialEq)]
pub enum WatchCommand {
    Weather(String),
    Stock(String),
    News(NewsCategory),
    Show,
    Help,
    Quit,
}

impl FromStr for WatchCommand {
    type Err = String;

    fn from_str(line: &str) -> std::result::Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, argument) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let require = |what: &str| {
            if argument.is_empty() {
                Err(format!("Usage: {verb} <{what}>"))
            } else {
                Ok(argument.to_string())
            }
        };

        match verb.to_ascii_lowercase().as_str() {
            "weather" | "w" => require("location").map(WatchCommand::Weather),
            "stock" | "s" => require("symbol").map(WatchCommand::Stock),
            "news" | "n" => require("category").map(|c| WatchCommand::News(NewsCategory::from_text(&c))),
            "show" | "" => Ok(WatchCommand::Show),
            "help" | "?" => Ok(WatchCommand::Help),
            "quit" | "exit" | "q" => Ok(WatchCommand::Quit),
            other => Err(format!("Unknown command: {other}. Type `help` for commands.")),
        }
    }
}

/// Print tasks still running when input ends are awaited before returning.
type PrintTasks = JoinSet<()>;

/// Issues a background request and queues a task that prints the panel once
/// the response is applied. Responses overtaken by a newer request are never
/// printed.
fn request_and_print<P: Pipeline>(
    tasks: &mut PrintTasks,
    panel: &Panel<P>,
    title: String,
    input: P::Input,
    render: impl Fn(&P::View) -> String + Send + 'static,
) {
    let resource = match panel {
        Ok(resource) => resource.clone(),
        Err(reason) => {
            println!("{}", ui::style_text(reason, ui::StyleType::Error));
            return;
        }
    };

    // Reap finished prints so the set only holds pending ones
    while tasks.try_join_next().is_some() {}

    let handle = resource.request(input);
    tasks.spawn(async move {
        match handle.await {
            Ok(true) => {
                let state = resource.state().await;
                println!("\n{}", render_state(&title, &state, render));
            }
            Ok(false) => debug!(%title, "Response superseded"),
            Err(e) => debug!(%title, error = %e, "Request task failed"),
        }
    });
}

fn request_weather(tasks: &mut PrintTasks, dashboard: &Dashboard, inputs: &Inputs) {
    request_and_print(
        tasks,
        &dashboard.weather,
        dashboard::weather_title(&inputs.location),
        inputs.location.clone(),
        dashboard::render_weather,
    );
}

fn request_stock(tasks: &mut PrintTasks, dashboard: &Dashboard, inputs: &Inputs) {
    request_and_print(
        tasks,
        &dashboard.finance,
        dashboard::stock_title(&inputs.symbol),
        inputs.symbol.clone(),
        dashboard::render_stock,
    );
}

fn request_news(tasks: &mut PrintTasks, dashboard: &Dashboard, inputs: &Inputs) {
    let category = inputs.category.clone();
    request_and_print(
        tasks,
        &dashboard.news,
        dashboard::news_title(&inputs.category),
        inputs.category.clone(),
        move |items: &Vec<NewsItem>| news::display(&category, items),
    );
}

/// Runs an interactive session reading commands from stdin.
pub async fn run(dashboard: &Dashboard, initial: Inputs) -> Result<()> {
    run_session(dashboard, initial, BufReader::new(tokio::io::stdin())).await?;
    Ok(())
}

/// Runs a session over any line source. Returns once the input ends or `quit`
/// is read and every pending panel has been printed.
pub async fn run_session<R>(dashboard: &Dashboard, initial: Inputs, input: R) -> Result<Inputs>
where
    R: AsyncBufRead + Unpin,
{
    let mut inputs = initial;
    let mut tasks = PrintTasks::new();

    println!("{HELP}\n");
    request_weather(&mut tasks, dashboard, &inputs);
    request_stock(&mut tasks, dashboard, &inputs);
    request_news(&mut tasks, dashboard, &inputs);

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        match line.parse::<WatchCommand>() {
            Ok(WatchCommand::Weather(location)) => {
                inputs.location = location;
                request_weather(&mut tasks, dashboard, &inputs);
            }
            Ok(WatchCommand::Stock(symbol)) => {
                inputs.symbol = symbol;
                request_stock(&mut tasks, dashboard, &inputs);
            }
            Ok(WatchCommand::News(category)) => {
                inputs.category = category;
                request_news(&mut tasks, dashboard, &inputs);
            }
            Ok(WatchCommand::Show) => {
                dashboard::print_panels(&dashboard.current(&inputs).await);
            }
            Ok(WatchCommand::Help) => println!("{HELP}"),
            Ok(WatchCommand::Quit) => break,
            Err(message) => println!("{}", ui::style_text(&message, ui::StyleType::Error)),
        }
    }

    debug!(pending = tasks.len(), "Input closed, waiting for pending panels");
    while let Some(joined) = tasks.join_next().await {
        if let Err(e) = joined {
            debug!(error = %e, "Print task failed");
        }
    }

    Ok(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::AppConfig;
    use crate::core::resource::ResourceState;
    use std::time::Duration;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            "weather New York".parse::<WatchCommand>(),
            Ok(WatchCommand::Weather("New York".to_string()))
        );
        assert_eq!(
            "  s   MSFT ".parse::<WatchCommand>(),
            Ok(WatchCommand::Stock("MSFT".to_string()))
        );
        assert_eq!(
            "news Health".parse::<WatchCommand>(),
            Ok(WatchCommand::News(NewsCategory::Health))
        );
        assert_eq!(
            "news gardening".parse::<WatchCommand>(),
            Ok(WatchCommand::News(NewsCategory::Other("gardening".to_string())))
        );
        assert_eq!("".parse::<WatchCommand>(), Ok(WatchCommand::Show));
        assert_eq!("QUIT".parse::<WatchCommand>(), Ok(WatchCommand::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "weather".parse::<WatchCommand>(),
            Err("Usage: weather <location>".to_string())
        );
        assert!("dance now".parse::<WatchCommand>().is_err());
    }

    fn config(base_url: &str) -> AppConfig {
        serde_yaml::from_str(&format!(
            r#"
location: "Dublin"
symbol: "AAPL"
category: "technology"
providers:
  weather:
    base_url: "{base_url}"
  finance:
    base_url: "{base_url}"
  news:
    base_url: "{base_url}"
"#
        ))
        .unwrap()
    }

    #[tokio::test]
    async fn test_session_waits_for_pending_panels() {
        let mock_server = MockServer::start().await;
        // Every provider answers slowly with an error body
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(503)
                    .set_body_string("unavailable")
                    .set_delay(Duration::from_millis(300)),
            )
            .mount(&mock_server)
            .await;

        let config = config(&mock_server.uri());
        let dashboard = Dashboard::with_keys(&config, |_| Some("test-key".to_string()));
        let initial = Inputs::from_config(&config);

        // Input ends right after the last command, long before any response
        let input: &[u8] = b"stock MSFT\nnews sports\n";
        let inputs = run_session(&dashboard, initial, input).await.unwrap();

        assert_eq!(inputs.symbol, "MSFT");
        assert_eq!(inputs.category, NewsCategory::Sports);
        assert_eq!(inputs.location, "Dublin");
        assert!(!dashboard.weather.as_ref().unwrap().state().await.is_loading());
        assert!(!dashboard.news.as_ref().unwrap().state().await.is_loading());
        assert!(matches!(
            dashboard.finance.as_ref().unwrap().state().await,
            ResourceState::Error(message) if message.contains("503")
        ));
    }

    #[tokio::test]
    async fn test_quit_stops_reading() {
        let config = config("http://127.0.0.1:9");
        let dashboard = Dashboard::with_keys(&config, |_| None);
        let input: &[u8] = b"quit\nstock MSFT\n";
        let inputs = run_session(&dashboard, Inputs::from_config(&config), input)
            .await
            .unwrap();
        assert_eq!(inputs.symbol, "AAPL");
    }
}
