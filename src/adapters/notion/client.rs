//! Notion API client

use super::models::{create_page_body, query_body, ErrorBody, PageObject, QueryResponse};
use crate::adapters::database::{DocumentStore, StoredPage};
use crate::config::{NotionConfig, SecretString};
use crate::domain::{
    BackfillError, DatabaseId, Icon, NotionError, PropertySet, QueryFilter, Result,
};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, ClientBuilder, Response, StatusCode};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Notion client bound to one integration token
pub struct NotionClient {
    client: Client,
    base_url: Url,
}

fn connection_error(e: reqwest::Error) -> BackfillError {
    NotionError::ConnectionFailed(e.to_string()).into()
}

impl NotionClient {
    /// Builds a client sending `Authorization: Bearer <token>` and the
    /// configured `Notion-Version` on every request
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL or a header value is invalid.
    pub fn new(config: &NotionConfig, token: &SecretString) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret().as_str()))
            .map_err(|_| {
                BackfillError::Configuration("Notion token is not a valid header value".to_string())
            })?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            "Notion-Version",
            HeaderValue::from_str(&config.api_version).map_err(|_| {
                BackfillError::Configuration(format!(
                    "Invalid notion.api_version '{}'",
                    config.api_version
                ))
            })?,
        );

        let client = ClientBuilder::new()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                BackfillError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        let raw = config.base_url.trim_end_matches('/');
        let base_url = Url::parse(&format!("{raw}/")).map_err(|e| {
            BackfillError::Configuration(format!("Invalid notion.base_url '{raw}': {e}"))
        })?;

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| NotionError::InvalidResponse(format!("Invalid path {path}: {e}")).into())
    }

    /// POSTs a JSON body
    async fn post_json(&self, url: Url, body: &Value) -> Result<Response> {
        let payload = serde_json::to_vec(body)?;
        tracing::trace!(url = %url, bytes = payload.len(), "Notion request");

        self.client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(connection_error)
    }

    /// Reads a success body, or the error message of a failed call
    async fn read<T: DeserializeOwned>(
        response: Response,
    ) -> std::result::Result<T, (StatusCode, String)> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| (status, e.to_string()))?;
        if !status.is_success() {
            return Err((status, ErrorBody::describe(&body)));
        }
        serde_json::from_str(&body).map_err(|e| (status, format!("Failed to decode response: {e}")))
    }
}

#[async_trait]
impl DocumentStore for NotionClient {
    async fn query(
        &self,
        database_id: &DatabaseId,
        filter: &QueryFilter,
    ) -> Result<Vec<StoredPage>> {
        let url = self.endpoint(&format!("v1/databases/{database_id}/query"))?;
        tracing::debug!(database_id = %database_id, filter = %filter.describe(), "Notion query");

        let response = self.post_json(url, &query_body(filter)).await?;

        match Self::read::<QueryResponse>(response).await {
            Ok(page) => Ok(page.results.into_iter().map(StoredPage::from).collect()),
            Err((StatusCode::TOO_MANY_REQUESTS, message)) => {
                Err(NotionError::RateLimited(message).into())
            }
            Err((_, message)) => Err(NotionError::QueryFailed {
                database_id: database_id.to_string(),
                message,
            }
            .into()),
        }
    }

    async fn create(
        &self,
        database_id: &DatabaseId,
        properties: &PropertySet,
        icon: Option<&Icon>,
    ) -> Result<StoredPage> {
        let url = self.endpoint("v1/pages")?;

        let response = self
            .post_json(url, &create_page_body(database_id, properties, icon))
            .await?;

        match Self::read::<PageObject>(response).await {
            Ok(page) => Ok(page.into()),
            Err((StatusCode::TOO_MANY_REQUESTS, message)) => {
                Err(NotionError::RateLimited(message).into())
            }
            Err((_, message)) => Err(NotionError::CreateFailed {
                database_id: database_id.to_string(),
                message,
            }
            .into()),
        }
    }
}

impl From<PageObject> for StoredPage {
    fn from(page: PageObject) -> Self {
        StoredPage {
            id: page.id,
            url: page.url,
        }
    }
}
