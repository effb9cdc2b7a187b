// src/services/monday.rs

//! monday.com board query client.
//!
//! One GraphQL request per call, no caching and no retry. Only the first
//! page of [`PAGE_SIZE`] items is requested; anything beyond it is not seen.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, instrument, warn};

use crate::error::{AppError, Result};
use crate::models::{BoardSnapshot, MondayConfig, QueryVariant};
use crate::utils::http::create_async_client;

/// Items requested per board query.
pub const PAGE_SIZE: usize = 100;

/// Column fields requested for every item and subitem.
const COLUMN_VALUES: &str = r#"
      column_values {
        id
        value
        text
        column { id title type }
        ... on StatusValue { index }
        ... on DateValue { date }
        ... on LinkValue { url }
      }"#;

/// Source of board snapshots.
#[async_trait]
pub trait BoardSource: Send + Sync {
    /// Fetch the full board in a single request.
    async fn fetch_board(&self) -> Result<BoardSnapshot>;
}

/// GraphQL response envelope.
#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<BoardSnapshot>,
    #[serde(default)]
    errors: Option<Vec<Value>>,
    #[serde(default)]
    error_message: Option<String>,
}

/// Client for the monday.com v2 API.
pub struct MondayClient {
    client: Client,
    api_url: String,
    token: String,
    board_id: String,
    variant: QueryVariant,
}

impl MondayClient {
    /// Create a client from configuration.
    pub fn new(config: &MondayConfig) -> Result<Self> {
        Ok(Self::with_client(create_async_client(config)?, config))
    }

    /// Create a client around an existing HTTP client.
    pub fn with_client(client: Client, config: &MondayConfig) -> Self {
        Self {
            client,
            api_url: config.api_url.clone(),
            token: config.api_token.clone(),
            board_id: config.board_id.trim().to_string(),
            variant: config.query,
        }
    }

    /// Request body for the configured query variant.
    fn request_body(&self) -> Value {
        json!({
            "query": build_query(self.variant),
            "variables": {
                "boardId": [self.board_id],
                "limit": PAGE_SIZE,
            }
        })
    }
}

#[async_trait]
impl BoardSource for MondayClient {
    #[instrument(skip(self), fields(board = %self.board_id, variant = ?self.variant))]
    async fn fetch_board(&self) -> Result<BoardSnapshot> {
        debug!("Fetching board");

        let response = self
            .client
            .post(&self.api_url)
            .header(reqwest::header::AUTHORIZATION, &self.token)
            .json(&self.request_body())
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Transport {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(transport_error)?;
        let snapshot = parse_response(&body)?;

        for board in &snapshot.boards {
            let shape = board.shape();
            debug!(
                "Board {:?}: {} shape, {} items",
                board.name,
                shape.name(),
                shape.item_count()
            );
            if shape.item_count() >= PAGE_SIZE {
                warn!(
                    "Board {:?} returned a full page of {} items; later items are not fetched",
                    board.name, PAGE_SIZE
                );
            }
        }

        Ok(snapshot)
    }
}

fn transport_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::Unavailable(err.to_string())
    } else {
        AppError::Http(err)
    }
}

/// Decode a GraphQL response body, surfacing upstream errors.
fn parse_response(body: &str) -> Result<BoardSnapshot> {
    let response: GraphQlResponse = serde_json::from_str(body)?;

    if let Some(errors) = response.errors.filter(|e| !e.is_empty()) {
        return Err(AppError::upstream(Value::Array(errors).to_string()));
    }
    if let Some(message) = response.error_message {
        return Err(AppError::upstream(message));
    }

    response
        .data
        .ok_or_else(|| AppError::upstream("response contained no data"))
}

/// GraphQL document for a query variant.
pub fn build_query(variant: QueryVariant) -> String {
    let body = match variant {
        QueryVariant::Groups => format!(
            r#"
    groups {{
      id
      title
      items_page(limit: $limit) {{
        items {{
          id
          name{COLUMN_VALUES}
        }}
      }}
    }}"#
        ),
        QueryVariant::Subitems => format!(
            r#"
    items_page(limit: $limit) {{
      items {{
        id
        name{COLUMN_VALUES}
        subitems {{
          id
          name{COLUMN_VALUES}
        }}
      }}
    }}"#
        ),
        QueryVariant::Items => format!(
            r#"
    items_page(limit: $limit) {{
      items {{
        id
        name
        group {{ id title }}{COLUMN_VALUES}
      }}
    }}"#
        ),
    };

    format!(
        r#"query GetBoard($boardId: [ID!], $limit: Int!) {{
  boards(ids: $boardId) {{
    name
    columns {{ id title type }}{body}
  }}
}}"#
    )
}
