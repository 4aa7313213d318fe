//! HTTP client for the Notion API.
//!
//! [`NotionClient`] wraps a [`reqwest::Client`] and exposes the three
//! operations the planner needs: paginated database queries, paginated
//! block-children listing, and page creation. Pagination is followed to
//! exhaustion inside the client, so callers always see full collections.
//!
//! The base URL is overridable via [`NotionConfig::with_base_url`] so the
//! whole surface can be exercised against a mock server.

use serde::Serialize;

use crate::error::{ChoreError, Result};
use crate::notion::types::{Block, BlockChildrenResponse, QueryResponse, Record};

/// Pinned Notion API version sent with every request.
pub const NOTION_VERSION: &str = "2022-06-28";

/// Page size requested when listing block children.
const BLOCK_PAGE_SIZE: &str = "100";

// ── Configuration ──────────────────────────────────────────────

/// Configuration for the Notion client.
#[derive(Debug, Clone)]
pub struct NotionConfig {
    /// Integration token sent as a bearer credential.
    pub token: String,
    /// Base URL for the API (defaults to `https://api.notion.com`).
    pub base_url: String,
    /// API version header value.
    pub api_version: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl NotionConfig {
    /// Create a new Notion config for the given integration token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            base_url: "https://api.notion.com".to_string(),
            api_version: NOTION_VERSION.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set the base URL (useful for testing with mock servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the API version header value.
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Set the per-request timeout in seconds.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

// ── Request bodies ─────────────────────────────────────────────

/// Body of a database query request. Only the pagination cursor is ever
/// set; filtering and sorting happen client-side on the full collection.
#[derive(Debug, Default, Serialize)]
struct QueryRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    start_cursor: Option<String>,
}

/// Body of a page creation request.
#[derive(Debug, Serialize)]
struct CreatePageRequest {
    parent: DatabaseParent,
    properties: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<serde_json::Value>,
}

/// Parent reference for pages created inside a database.
#[derive(Debug, Serialize)]
struct DatabaseParent {
    database_id: String,
}

// ── Client ─────────────────────────────────────────────────────

/// Client for the Notion API.
#[derive(Debug, Clone)]
pub struct NotionClient {
    config: NotionConfig,
    client: reqwest::Client,
}

impl NotionClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ChoreError::Http`] if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(config: NotionConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ChoreError::Http(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, client })
    }

    /// Returns a reference to the client configuration.
    pub fn config(&self) -> &NotionConfig {
        &self.config
    }

    /// Fetch every page of the given database, following pagination
    /// cursors until exhausted.
    pub async fn query_database(&self, database_id: &str) -> Result<Vec<Record>> {
        let url = format!(
            "{}/v1/databases/{database_id}/query",
            self.config.base_url.trim_end_matches('/')
        );

        let mut records: Vec<Record> = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            tracing::debug!(database_id, cursor = cursor.as_deref(), "querying database");
            let body = QueryRequest {
                start_cursor: cursor.clone(),
            };
            let response = self
                .client
                .post(&url)
                .bearer_auth(&self.config.token)
                .header("Notion-Version", &self.config.api_version)
                .json(&body)
                .send()
                .await
                .map_err(|e| ChoreError::Http(format!("database query failed: {e}")))?;

            let page: QueryResponse = Self::decode(response).await?;
            records.extend(page.results);

            match (page.has_more, page.next_cursor) {
                (true, Some(next)) => cursor = Some(next),
                _ => break,
            }
        }

        tracing::debug!(database_id, count = records.len(), "database query complete");
        Ok(records)
    }

    /// Fetch every child block of the given block (or page), following
    /// pagination cursors until exhausted.
    ///
    /// Blocks that cannot be copied (no type discriminator or payload)
    /// are skipped with a warning rather than failing the listing.
    pub async fn list_block_children(&self, block_id: &str) -> Result<Vec<Block>> {
        let url = format!(
            "{}/v1/blocks/{block_id}/children",
            self.config.base_url.trim_end_matches('/')
        );

        let mut blocks: Vec<Block> = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let mut query: Vec<(&str, String)> = vec![("page_size", BLOCK_PAGE_SIZE.to_string())];
            if let Some(ref c) = cursor {
                query.push(("start_cursor", c.clone()));
            }

            let response = self
                .client
                .get(&url)
                .query(&query)
                .bearer_auth(&self.config.token)
                .header("Notion-Version", &self.config.api_version)
                .send()
                .await
                .map_err(|e| ChoreError::Http(format!("block listing failed: {e}")))?;

            let page: BlockChildrenResponse = Self::decode(response).await?;
            for raw in &page.results {
                match Block::from_api(raw) {
                    Some(block) => blocks.push(block),
                    None => {
                        tracing::warn!(block_id, "skipping block without copyable payload");
                    }
                }
            }

            match (page.has_more, page.next_cursor) {
                (true, Some(next)) => cursor = Some(next),
                _ => break,
            }
        }

        Ok(blocks)
    }

    /// Create a page in the given database.
    pub async fn create_page(
        &self,
        parent_database_id: &str,
        properties: serde_json::Value,
        icon: Option<serde_json::Value>,
        children: Vec<serde_json::Value>,
    ) -> Result<Record> {
        let url = format!("{}/v1/pages", self.config.base_url.trim_end_matches('/'));
        let body = CreatePageRequest {
            parent: DatabaseParent {
                database_id: parent_database_id.to_string(),
            },
            properties,
            icon,
            children,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.token)
            .header("Notion-Version", &self.config.api_version)
            .json(&body)
            .send()
            .await
            .map_err(|e| ChoreError::Http(format!("page creation failed: {e}")))?;

        Self::decode(response).await
    }

    /// Decode a response body, mapping error statuses to [`ChoreError::Api`].
    async fn decode<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read body".into());
            tracing::error!(status = %status, body = %body, "Notion request returned error");
            return Err(map_http_error(status, &body));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ChoreError::Parse(format!("failed to decode Notion response: {e}")))
    }
}

/// Map a non-success HTTP status to a [`ChoreError`].
fn map_http_error(status: reqwest::StatusCode, body: &str) -> ChoreError {
    let detail: String = body.chars().take(500).collect();
    match status.as_u16() {
        401 | 403 => ChoreError::Api(format!(
            "HTTP {status}: check NOTION_TOKEN and integration sharing: {detail}"
        )),
        429 => ChoreError::Api(format!("HTTP {status}: rate limited: {detail}")),
        _ => ChoreError::Api(format!("HTTP {status}: {detail}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_points_at_notion() {
        let config = NotionConfig::new("secret");
        assert_eq!(config.base_url, "https://api.notion.com");
        assert_eq!(config.api_version, NOTION_VERSION);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn base_url_override_for_tests() {
        let config = NotionConfig::new("secret").with_base_url("http://127.0.0.1:9999");
        assert_eq!(config.base_url, "http://127.0.0.1:9999");
    }

    #[test]
    fn unauthorized_maps_to_token_hint() {
        let err = map_http_error(reqwest::StatusCode::UNAUTHORIZED, "{\"code\":\"unauthorized\"}");
        let msg = err.to_string();
        assert!(msg.contains("401"));
        assert!(msg.contains("NOTION_TOKEN"));
    }

    #[test]
    fn server_error_keeps_status_and_body() {
        let err = map_http_error(reqwest::StatusCode::INTERNAL_SERVER_ERROR, "boom");
        let msg = err.to_string();
        assert!(msg.contains("500"));
        assert!(msg.contains("boom"));
    }

    #[test]
    fn query_request_omits_absent_cursor() {
        let body = serde_json::to_value(QueryRequest::default()).unwrap();
        assert_eq!(body, serde_json::json!({}));

        let body = serde_json::to_value(QueryRequest {
            start_cursor: Some("cur-1".into()),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"start_cursor": "cur-1"}));
    }

    #[test]
    fn create_request_omits_empty_icon_and_children() {
        let body = serde_json::to_value(CreatePageRequest {
            parent: DatabaseParent {
                database_id: "db-1".into(),
            },
            properties: serde_json::json!({}),
            icon: None,
            children: Vec::new(),
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"parent": {"database_id": "db-1"}, "properties": {}})
        );
    }
}
