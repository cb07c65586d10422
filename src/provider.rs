use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use crate::config::Config;
use crate::error::FetchError;

/// Read-only source of the catalog's JSON resources.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Fetch and decode one named resource (e.g. `kotatsu.json`).
    async fn fetch_json(&self, resource: &str) -> Result<Value, FetchError>;
}

/// Fetches resources over HTTP(S) beneath a base URL.
pub struct HttpProvider {
    client: reqwest::Client,
    base: Url,
}

impl HttpProvider {
    pub fn new(base: Url, user_agent: &str, timeout: Option<Duration>) -> reqwest::Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(user_agent);
        if let Some(t) = timeout { builder = builder.timeout(t); }
        Ok(Self { client: builder.build()?, base })
    }

    pub fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        let timeout = cfg.request_timeout_ms.map(Duration::from_millis);
        Ok(Self::new(cfg.base_url()?, &cfg.user_agent, timeout)?)
    }

    pub fn base(&self) -> &Url { &self.base }
}

#[async_trait]
impl ContentProvider for HttpProvider {
    async fn fetch_json(&self, resource: &str) -> Result<Value, FetchError> {
        let url = self
            .base
            .join(resource)
            .map_err(|source| FetchError::Url { resource: resource.to_string(), source })?;
        tracing::debug!(%url, "fetching");
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Transport { resource: resource.to_string(), source })?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status { resource: resource.to_string(), status: status.as_u16() });
        }
        let bytes = resp
            .bytes()
            .await
            .map_err(|source| FetchError::Transport { resource: resource.to_string(), source })?;
        serde_json::from_slice(&bytes).map_err(|source| FetchError::Decode { resource: resource.to_string(), source })
    }
}

/// Serves resources from a local directory holding a copy of the static content.
pub struct DirProvider {
    root: PathBuf,
}

impl DirProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self { Self { root: root.into() } }

    pub fn root(&self) -> &Path { &self.root }
}

#[async_trait]
impl ContentProvider for DirProvider {
    async fn fetch_json(&self, resource: &str) -> Result<Value, FetchError> {
        let path = self.root.join(resource.trim_start_matches('/'));
        let raw = tokio::fs::read(&path)
            .await
            .map_err(|source| FetchError::Io { resource: resource.to_string(), source })?;
        serde_json::from_slice(&raw).map_err(|source| FetchError::Decode { resource: resource.to_string(), source })
    }
}

/// Serves pre-registered documents; anything else answers 404.
#[derive(Debug, Default, Clone)]
pub struct MemoryProvider {
    docs: HashMap<String, Value>,
}

impl MemoryProvider {
    pub fn new() -> Self { Self::default() }

    pub fn with(mut self, resource: &str, doc: Value) -> Self {
        self.docs.insert(resource.to_string(), doc);
        self
    }
}

#[async_trait]
impl ContentProvider for MemoryProvider {
    async fn fetch_json(&self, resource: &str) -> Result<Value, FetchError> {
        self.docs
            .get(resource)
            .cloned()
            .ok_or_else(|| FetchError::Status { resource: resource.to_string(), status: 404 })
    }
}

/// Unwraps a decoded payload that must be a JSON array.
pub(crate) fn expect_array(resource: &str, v: Value) -> Result<Vec<Value>, FetchError> {
    match v {
        Value::Array(items) => Ok(items),
        other => Err(FetchError::Shape { resource: resource.to_string(), found: json_kind(&other) }),
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
