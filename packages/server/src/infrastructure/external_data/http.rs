use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::Deserialize;

use crate::domain::{ExternalDataError, ExternalDataSource};

const DEFAULT_HEADLINE_URL: &str =
    "https://saurav.tech/NewsAPI/top-headlines/category/technology/us.json";
const DEFAULT_TRIVIA_URL: &str = "https://uselessfacts.jsph.pl/random.json?language=en";

/// HTTP の公開 API から見出しと豆知識を取得する
pub struct HttpExternalDataSource {
    client: HttpClient,
    headline_url: String,
    trivia_url: String,
}

impl Default for HttpExternalDataSource {
    fn default() -> Self {
        Self::new(DEFAULT_HEADLINE_URL, DEFAULT_TRIVIA_URL)
    }
}

impl HttpExternalDataSource {
    pub fn new(headline_url: &str, trivia_url: &str) -> Self {
        Self {
            client: HttpClient::new(),
            headline_url: headline_url.to_string(),
            trivia_url: trivia_url.to_string(),
        }
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(&self, url: &str) -> Result<T, ExternalDataError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ExternalDataError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ExternalDataError::Request(format!(
                "{} returned {}",
                url,
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ExternalDataError::Payload(e.to_string()))
    }
}

#[derive(Deserialize)]
struct HeadlinesResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Deserialize)]
struct Article {
    title: Option<String>,
}

#[derive(Deserialize)]
struct TriviaResponse {
    text: Option<String>,
}

fn first_headline(response: HeadlinesResponse) -> Option<String> {
    response
        .articles
        .into_iter()
        .filter_map(|article| article.title)
        .map(|title| title.trim().to_string())
        .find(|title| !title.is_empty())
}

#[async_trait]
impl ExternalDataSource for HttpExternalDataSource {
    async fn headline(&self) -> Result<Option<String>, ExternalDataError> {
        let response: HeadlinesResponse = self.get_json(&self.headline_url).await?;
        Ok(first_headline(response))
    }

    async fn trivia(&self) -> Result<Option<String>, ExternalDataError> {
        let response: TriviaResponse = self.get_json(&self.trivia_url).await?;
        Ok(response
            .text
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty()))
    }
}
