//! openBD client, the primary metadata source for Japanese ISBNs.

use crate::core::isbn::Isbn13;
use crate::domain::model::BookMeta;
use crate::domain::ports::MetadataSource;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

pub const DEFAULT_ENDPOINT: &str = "https://api.openbd.jp/v1";

pub struct OpenBdClient {
    endpoint: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct OpenBdEntry {
    summary: OpenBdSummary,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OpenBdSummary {
    title: String,
    author: String,
    publisher: String,
    pubdate: String,
}

impl OpenBdClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: Client::new(),
        }
    }
}

#[async_trait]
impl MetadataSource for OpenBdClient {
    async fn lookup(&self, isbn: &Isbn13) -> Result<Option<BookMeta>> {
        let url = format!("{}/get?isbn={}", self.endpoint, isbn);
        tracing::debug!("openBD request: {}", url);

        let response = self.client.get(&url).send().await?;
        tracing::debug!("openBD response status: {}", response.status());
        if !response.status().is_success() {
            tracing::warn!("openBD returned status {}", response.status());
            return Ok(None);
        }

        // Unknown ISBNs come back as [null], not as an empty array.
        let entries: Vec<Option<OpenBdEntry>> = response.json().await?;
        let Some(Some(entry)) = entries.into_iter().next() else {
            return Ok(None);
        };
        if entry.summary.title.is_empty() {
            // A titleless entry is treated as a miss so the fallback source
            // gets a chance.
            return Ok(None);
        }

        Ok(Some(BookMeta {
            isbn: isbn.clone(),
            title: entry.summary.title,
            author: entry.summary.author,
            publisher: entry.summary.publisher,
            pubdate: entry.summary.pubdate,
            cover: String::new(),
        }))
    }

    fn name(&self) -> &'static str {
        "openBD"
    }
}
