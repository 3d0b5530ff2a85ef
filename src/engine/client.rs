use super::error::EngineError;
use super::protocol::*;
use crate::config::{Config, RefreshPolicy};

use anyhow::{Result, bail};
use reqwest::{RequestBuilder, StatusCode, Url};
use serde_json::Value;
use std::time::Duration;

const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);
const TCP_KEEPALIVE: Duration = Duration::from_secs(60);

/// Shared outbound HTTP client honoring the timeout and keep-alive settings.
pub fn build_http_client(config: &Config) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder().timeout(config.request_timeout);
    builder = if config.keep_alive {
        builder
            .pool_idle_timeout(POOL_IDLE_TIMEOUT)
            .tcp_keepalive(TCP_KEEPALIVE)
    } else {
        builder.pool_max_idle_per_host(0)
    };
    Ok(builder.build()?)
}

/// Client for one engine cluster and one index.
pub struct EngineClient {
    http: reqwest::Client,
    base_url: Url,
    index: String,
    refresh: RefreshPolicy,
}

impl EngineClient {
    pub fn new(
        http: reqwest::Client,
        base_url: &str,
        index: &str,
        refresh: RefreshPolicy,
    ) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            bail!("engine URL '{}' cannot carry a path", base_url);
        }
        Ok(Self {
            http,
            base_url,
            index: index.to_string(),
            refresh,
        })
    }

    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn index_url(&self, segments: &[&str]) -> Url {
        let mut all = Vec::with_capacity(segments.len() + 1);
        all.push(self.index.as_str());
        all.extend_from_slice(segments);
        self.url(&all)
    }

    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, EngineError> {
        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(EngineError::Status { status, body });
        }
        Ok(response)
    }

    async fn send_json(&self, request: RequestBuilder) -> Result<Value, EngineError> {
        let response = self.send(request).await?;
        Ok(response.json().await?)
    }

    fn with_refresh(&self, request: RequestBuilder, refresh: Option<&str>) -> RequestBuilder {
        match refresh {
            Some(value) => request.query(&[("refresh", value)]),
            None => request,
        }
    }

    pub async fn cluster_health(&self) -> Result<Value, EngineError> {
        self.send_json(self.http.get(self.url(&ENDPOINT_CLUSTER_HEALTH)))
            .await
    }

    /// Stores a new document. Without an id the engine assigns one.
    pub async fn create_document(
        &self,
        id: Option<&str>,
        body: &Value,
    ) -> Result<Value, EngineError> {
        let request = match id {
            Some(id) => self
                .http
                .put(self.index_url(&[ENDPOINT_CREATE, id])),
            None => self.http.post(self.index_url(&[ENDPOINT_DOC])),
        };
        let request = self.with_refresh(request.json(body), self.refresh.as_param());
        self.send_json(request).await
    }

    pub async fn replace_document(&self, id: &str, body: &Value) -> Result<Value, EngineError> {
        let request = self.http.put(self.index_url(&[ENDPOINT_DOC, id])).json(body);
        let request = self.with_refresh(request, self.refresh.as_param());
        self.send_json(request).await
    }

    /// `Ok(None)` when the engine reports the document as absent.
    pub async fn get_document(&self, id: &str) -> Result<Option<Value>, EngineError> {
        let response = self
            .http
            .get(self.index_url(&[ENDPOINT_DOC, id]))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(EngineError::Status { status, body });
        }

        Ok(Some(response.json().await?))
    }

    pub async fn search(&self, body: &Value) -> Result<RawSearchResponse, EngineError> {
        let response = self
            .send(self.http.post(self.index_url(&[ENDPOINT_SEARCH])).json(body))
            .await?;
        Ok(response.json().await?)
    }

    pub async fn delete_by_query(&self, body: &Value) -> Result<Value, EngineError> {
        let request = self
            .http
            .post(self.index_url(&[ENDPOINT_DELETE_BY_QUERY]))
            .json(body);
        let request = self.with_refresh(request, self.refresh.as_bulk_param());
        self.send_json(request).await
    }

    /// Creates the index with `mapping`. Returns `false` if it already existed.
    pub async fn ensure_index(&self, mapping: &Value) -> Result<bool, EngineError> {
        let request = self.http.put(self.index_url(&[])).json(mapping);
        match self.send(request).await {
            Ok(_) => Ok(true),
            Err(EngineError::Status { status: 400, body }) if body.contains(INDEX_EXISTS_ERROR) => {
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}
