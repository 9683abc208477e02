//! Google Books client, the fallback metadata source.

use crate::core::isbn::Isbn13;
use crate::domain::model::BookMeta;
use crate::domain::ports::MetadataSource;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

pub const DEFAULT_ENDPOINT: &str = "https://www.googleapis.com/books/v1";

pub struct GoogleBooksClient {
    endpoint: String,
    client: Client,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct VolumesResponse {
    items: Vec<Volume>,
}

#[derive(Debug, Deserialize)]
struct Volume {
    #[serde(rename = "volumeInfo")]
    volume_info: VolumeInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct VolumeInfo {
    title: String,
    authors: Vec<String>,
    publisher: String,
    published_date: String,
}

impl GoogleBooksClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: Client::new(),
        }
    }
}

#[async_trait]
impl MetadataSource for GoogleBooksClient {
    async fn lookup(&self, isbn: &Isbn13) -> Result<Option<BookMeta>> {
        let url = format!("{}/volumes", self.endpoint);
        tracing::debug!("Google Books request: {}?q=isbn:{}", url, isbn);

        let response = self
            .client
            .get(&url)
            .query(&[("q", format!("isbn:{}", isbn))])
            .send()
            .await?;
        tracing::debug!("Google Books response status: {}", response.status());
        if !response.status().is_success() {
            tracing::warn!("Google Books returned status {}", response.status());
            return Ok(None);
        }

        let volumes: VolumesResponse = response.json().await?;
        let Some(volume) = volumes.items.into_iter().next() else {
            return Ok(None);
        };
        if volume.volume_info.title.is_empty() {
            return Ok(None);
        }

        Ok(Some(BookMeta {
            isbn: isbn.clone(),
            title: volume.volume_info.title,
            author: volume.volume_info.authors.join(", "),
            publisher: volume.volume_info.publisher,
            pubdate: volume.volume_info.published_date,
            cover: String::new(),
        }))
    }

    fn name(&self) -> &'static str {
        "Google Books"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::isbn;
    use httpmock::prelude::*;

    fn isbn13() -> Isbn13 {
        isbn::normalize("9780306406157").unwrap()
    }

    #[tokio::test]
    async fn test_lookup_joins_authors() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/volumes")
                .query_param("q", "isbn:9780306406157");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "items": [{
                        "volumeInfo": {
                            "title": "Effective Modern Something",
                            "authors": ["Alice Writer", "Bob Coauthor"],
                            "publisher": "Example Press",
                            "publishedDate": "2014-11-07"
                        }
                    }]
                }));
        });

        let client = GoogleBooksClient::new(server.base_url());
        let meta = client.lookup(&isbn13()).await.unwrap().unwrap();

        mock.assert();
        assert_eq!(meta.title, "Effective Modern Something");
        assert_eq!(meta.author, "Alice Writer, Bob Coauthor");
        assert_eq!(meta.publisher, "Example Press");
        assert_eq!(meta.pubdate, "2014-11-07");
    }

    #[tokio::test]
    async fn test_lookup_no_items_returns_none() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/volumes");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"totalItems": 0}));
        });

        let client = GoogleBooksClient::new(server.base_url());
        assert!(client.lookup(&isbn13()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_lookup_partial_volume_info() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/volumes");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "items": [{"volumeInfo": {"title": "Title Only"}}]
                }));
        });

        let client = GoogleBooksClient::new(server.base_url());
        let meta = client.lookup(&isbn13()).await.unwrap().unwrap();
        assert_eq!(meta.title, "Title Only");
        assert_eq!(meta.author, "");
        assert_eq!(meta.publisher, "");
    }
}
