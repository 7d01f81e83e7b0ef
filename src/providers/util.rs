use crate::core::error::{FetchError, FetchResult, ProviderPayload};
use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Query parameters that carry credentials and must never be logged.
const SECRET_PARAMS: [&str; 2] = ["appid", "apikey"];

pub fn http_client() -> FetchResult<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent("dashline/1.0")
        .build()
        .map_err(|e| FetchError::transport(format!("Failed to build HTTP client: {e}")))
}

/// Joins `base_url` and `path` and appends the query parameters.
pub fn build_url(base_url: &str, path: &str, params: &[(&str, &str)]) -> FetchResult<Url> {
    let raw = format!("{}{}", base_url.trim_end_matches('/'), path);
    Url::parse_with_params(&raw, params)
        .map_err(|e| FetchError::transport(format!("Invalid URL {raw}: {e}")))
}

/// Renders `url` with credential parameters masked.
pub fn redact(url: &Url) -> String {
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let value = if SECRET_PARAMS.contains(&k.to_ascii_lowercase().as_str()) {
                "***".to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), value)
        })
        .collect();
    let mut shown = url.clone();
    shown.query_pairs_mut().clear().extend_pairs(pairs);
    shown.to_string()
}

/// Sends a GET request and decodes the JSON body.
///
/// Providers report domain errors in the body, often alongside a non-2xx
/// status, so an error status surfaces the in-band message when there is one.
pub async fn fetch_json<T>(client: &reqwest::Client, url: Url, label: &str) -> FetchResult<T>
where
    T: DeserializeOwned + ProviderPayload,
{
    debug!(url = %redact(&url), "Requesting {}", label);

    let response = client.get(url).send().await.map_err(|e| {
        FetchError::transport(format!("Request error: {} for {}", e.without_url(), label))
    })?;

    let status = response.status();
    let text = response.text().await.map_err(|e| {
        FetchError::transport(format!(
            "Failed to read response for {}: {}",
            label,
            e.without_url()
        ))
    })?;

    let parsed = serde_json::from_str::<T>(&text);
    if !status.is_success() {
        let message = parsed.ok().and_then(|payload| payload.provider_error());
        return Err(match message {
            Some(message) => FetchError::provider(message),
            None => FetchError::transport(format!("HTTP error: {status} for {label}")),
        });
    }

    parsed.map_err(|e| FetchError::transport(format!("Failed to parse JSON response for {label}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Deserialize)]
    struct Echo {
        value: Option<i64>,
        error: Option<String>,
    }

    impl ProviderPayload for Echo {
        fn provider_error(&self) -> Option<String> {
            self.error.clone()
        }
    }

    async fn serve(status: u16, body: &str) -> MockServer {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/echo"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&mock_server)
            .await;
        mock_server
    }

    async fn fetch(mock_server: &MockServer) -> FetchResult<Echo> {
        let url = build_url(&mock_server.uri(), "/echo", &[("apikey", "secret")]).unwrap();
        fetch_json(&http_client().unwrap(), url, "echo").await
    }

    #[test]
    fn test_build_url_and_redact() {
        let url = build_url(
            "https://example.com/",
            "/query",
            &[("symbol", "IBM"), ("apikey", "secret"), ("appid", "other")],
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.com/query?symbol=IBM&apikey=secret&appid=other"
        );
        assert_eq!(
            redact(&url),
            "https://example.com/query?symbol=IBM&apikey=***&appid=***"
        );
    }

    #[tokio::test]
    async fn test_success() {
        let mock_server = serve(200, r#"{"value": 7}"#).await;
        let echo = fetch(&mock_server).await.unwrap();
        assert_eq!(echo.value, Some(7));
    }

    #[tokio::test]
    async fn test_error_status_with_message_is_provider_error() {
        let mock_server = serve(404, r#"{"error": "not found here"}"#).await;
        assert_eq!(
            fetch(&mock_server).await.unwrap_err(),
            FetchError::provider("not found here")
        );
    }

    #[tokio::test]
    async fn test_error_status_without_message_is_transport_error() {
        let mock_server = serve(500, "oops").await;
        assert_eq!(
            fetch(&mock_server).await.unwrap_err(),
            FetchError::transport("HTTP error: 500 Internal Server Error for echo")
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_transport_error() {
        let mock_server = serve(200, "<html>").await;
        let err = fetch(&mock_server).await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
        assert!(err.to_string().contains("Failed to parse JSON response for echo"));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let url = build_url("http://127.0.0.1:9", "/echo", &[]).unwrap();
        let result: FetchResult<Echo> = fetch_json(&http_client().unwrap(), url, "echo").await;
        assert!(matches!(result, Err(FetchError::Transport(_))));
    }
}
