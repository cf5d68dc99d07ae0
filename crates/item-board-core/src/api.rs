//! REST API Client
//!
//! The `ItemApi` seam and its reqwest implementation. On wasm32 reqwest goes
//! through the browser's fetch, natively through hyper.

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::models::{items_from_values, FormState, Item, ItemId};

/// The three calls the board makes
///
/// Futures are not `Send`: the browser runs everything on one thread.
#[async_trait(?Send)]
pub trait ItemApi {
    /// GET `{base}/items`
    async fn list_items(&self) -> ApiResult<Vec<Item>>;

    /// POST `{base}/item`
    async fn create_item(&self, draft: &FormState) -> ApiResult<Item>;

    /// DELETE `{base}/item/{id}`, succeeds only on 204
    async fn delete_item(&self, id: &ItemId) -> ApiResult<()>;
}

/// Any 2xx passes, everything else is `ApiError::Status`
pub fn check_success(status: StatusCode) -> ApiResult<()> {
    if status.is_success() {
        Ok(())
    } else {
        Err(ApiError::Status { status: status.as_u16() })
    }
}

/// Deletion is only confirmed by 204 No Content
pub fn check_deleted(status: StatusCode) -> ApiResult<()> {
    check_success(status)?;
    if status == StatusCode::NO_CONTENT {
        Ok(())
    } else {
        Err(ApiError::UnexpectedStatus {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct HttpItemApi {
    client: reqwest::Client,
    config: ApiConfig,
}

impl HttpItemApi {
    /// `config` must already be absolute, see `ApiConfig::resolve`
    pub fn new(config: ApiConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: ApiConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }
}

#[async_trait(?Send)]
impl ItemApi for HttpItemApi {
    async fn list_items(&self) -> ApiResult<Vec<Item>> {
        let resp = self.client.get(self.config.items_url()).send().await?;
        check_success(resp.status())?;
        let values = resp
            .json::<Vec<serde_json::Value>>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;
        Ok(items_from_values(values))
    }

    async fn create_item(&self, draft: &FormState) -> ApiResult<Item> {
        let resp = self
            .client
            .post(self.config.item_url())
            .json(draft)
            .send()
            .await?;
        check_success(resp.status())?;
        resp.json::<Item>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn delete_item(&self, id: &ItemId) -> ApiResult<()> {
        let resp = self.client.delete(self.config.item_id_url(id)).send().await?;
        check_deleted(resp.status())
    }
}
