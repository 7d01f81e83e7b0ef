use crate::core::error::FetchResult;
use crate::core::news::{self, HeadlinesPayload, MAX_ITEMS, NewsCategory, NewsItem};
use crate::core::resource::Pipeline;
use crate::providers::util::{build_url, fetch_json, http_client};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Top headlines per category from a NewsAPI-compatible API.
pub struct NewsApiProvider {
    base_url: String,
    api_key: String,
    country: String,
}

impl NewsApiProvider {
    pub fn new(base_url: &str, api_key: &str, country: &str) -> Self {
        NewsApiProvider {
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            country: country.to_string(),
        }
    }
}

#[async_trait]
impl Pipeline for NewsApiProvider {
    type Input = NewsCategory;
    type Raw = HeadlinesPayload;
    type View = Vec<NewsItem>;

    fn name(&self) -> &'static str {
        "news"
    }

    #[instrument(name = "HeadlinesFetch", skip_all, fields(category = %category))]
    async fn fetch(&self, category: &NewsCategory) -> FetchResult<HeadlinesPayload> {
        let page_size = MAX_ITEMS.to_string();
        let url = build_url(
            &self.base_url,
            "/v2/top-headlines",
            &[
                ("category", category.as_str()),
                ("pageSize", page_size.as_str()),
                ("country", self.country.as_str()),
                ("apiKey", self.api_key.as_str()),
            ],
        )?;

        let client = http_client()?;
        let payload: HeadlinesPayload = fetch_json(&client, url, "top headlines").await?;
        debug!(
            articles = payload.articles.as_ref().map_or(0, Vec::len),
            "Received headlines"
        );
        Ok(payload)
    }

    fn normalize(&self, _category: &NewsCategory, raw: &HeadlinesPayload) -> FetchResult<Vec<NewsItem>> {
        news::normalize(raw)
    }
}
