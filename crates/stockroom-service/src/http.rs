use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use stockroom_core::health::Health;
use stockroom_core::item::{ItemAck, ItemEnvelope, ItemList};
use stockroom_core::Item;
use tracing::debug;

use crate::{ItemService, ServiceError};

/// Async HTTP client implementation of ItemService.
/// Connects to a running stockroom-server.
#[derive(Clone)]
pub struct HttpService {
    base_url: String,
    client: Client,
}

impl HttpService {
    pub fn new(base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            base_url,
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check if the server is reachable and reports itself healthy.
    pub async fn health_check(&self) -> Result<(), ServiceError> {
        let health: Health = self.get_json(self.url(&["health"])?).await?;
        if health.is_healthy() {
            Ok(())
        } else {
            Err(ServiceError::Internal(format!(
                "server reports status '{}'",
                health.status
            )))
        }
    }

    /// Build `{base_url}/{segments...}` with each segment percent-encoded,
    /// so a name like `a/b` stays a single path segment.
    fn url(&self, segments: &[&str]) -> Result<Url, ServiceError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ServiceError::Internal(format!("invalid base url: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| ServiceError::Internal(format!("base url cannot hold a path: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: Url) -> Result<T, ServiceError> {
        let resp = self.client.get(url).send().await.map_err(network)?;
        handle_response(resp).await
    }

    async fn post_json<B: serde::Serialize, T: serde::de::DeserializeOwned>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, ServiceError> {
        let resp = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(network)?;
        handle_response(resp).await
    }

    async fn put_json<B: serde::Serialize, T: serde::de::DeserializeOwned>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, ServiceError> {
        let resp = self
            .client
            .put(url)
            .json(body)
            .send()
            .await
            .map_err(network)?;
        handle_response(resp).await
    }

    async fn delete_json<T: serde::de::DeserializeOwned>(&self, url: Url) -> Result<T, ServiceError> {
        let resp = self.client.delete(url).send().await.map_err(network)?;
        handle_response(resp).await
    }
}

fn network(e: reqwest::Error) -> ServiceError {
    ServiceError::Network(e.to_string())
}

async fn handle_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, ServiceError> {
    let status = resp.status();
    if status.is_success() {
        resp.json::<T>()
            .await
            .map_err(|e| ServiceError::Internal(format!("json decode: {e}")))
    } else {
        Err(parse_error_with_status(status, resp).await)
    }
}

async fn parse_error_with_status(status: StatusCode, resp: reqwest::Response) -> ServiceError {
    let body = resp.text().await.unwrap_or_default();
    error_from_body(status, body)
}

/// Domain errors carry `{"detail": "..."}`; extractor rejections are plain text,
/// so anything without a string `detail` is used verbatim.
fn error_from_body(status: StatusCode, body: String) -> ServiceError {
    let msg = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v["detail"].as_str().map(String::from))
        .unwrap_or(body);
    debug!(status = status.as_u16(), %msg, "request failed");

    match status {
        StatusCode::NOT_FOUND => ServiceError::NotFound(msg),
        StatusCode::CONFLICT => ServiceError::Conflict(msg),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            ServiceError::InvalidInput(msg)
        }
        other => ServiceError::Server {
            status: other.as_u16(),
            message: msg,
        },
    }
}

#[async_trait]
impl ItemService for HttpService {
    async fn list_items(&self) -> Result<Vec<Item>, ServiceError> {
        let list: ItemList = self.get_json(self.url(&["items"])?).await?;
        Ok(list.items)
    }

    async fn get_item(&self, name: &str) -> Result<Item, ServiceError> {
        let envelope: ItemEnvelope = self.get_json(self.url(&["items", name])?).await?;
        Ok(envelope.item)
    }

    async fn create_item(&self, item: &Item) -> Result<Item, ServiceError> {
        let ack: ItemAck = self.post_json(self.url(&["items"])?, item).await?;
        Ok(ack.item)
    }

    async fn update_item(&self, name: &str, item: &Item) -> Result<Item, ServiceError> {
        let ack: ItemAck = self.put_json(self.url(&["items", name])?, item).await?;
        Ok(ack.item)
    }

    async fn delete_item(&self, name: &str) -> Result<Item, ServiceError> {
        let ack: ItemAck = self.delete_json(self.url(&["items", name])?).await?;
        Ok(ack.item)
    }
}
