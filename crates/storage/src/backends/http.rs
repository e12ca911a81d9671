//! HTTP file store backend.

use crate::error::{StorageError, StorageResult};
use crate::traits::{ArchiveFile, FileStore};
use async_trait::async_trait;
use piecemeal_core::ArchiveId;
use reqwest::{StatusCode, Url};
use std::time::Duration;
use tracing::instrument;

/// File store served over HTTP at `{base_url}/v1/files/{id}`.
#[derive(Clone)]
pub struct HttpFileStore {
    http: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl HttpFileStore {
    pub fn new(base_url: &str, token: Option<String>, timeout: Duration) -> StorageResult<Self> {
        // A trailing slash keeps any path prefix of the base URL when joining.
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalized)
            .map_err(|e| StorageError::Config(format!("invalid file store URL {base_url}: {e}")))?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StorageError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    fn url(&self, id: &ArchiveId) -> StorageResult<Url> {
        self.base_url
            .join(&format!("v1/files/{id}"))
            .map_err(|e| StorageError::Config(format!("failed to build file URL: {e}")))
    }
}

#[async_trait]
impl FileStore for HttpFileStore {
    #[instrument(skip(self), fields(backend = "http"))]
    async fn get_by_id_or_fail(&self, id: &ArchiveId) -> StorageResult<ArchiveFile> {
        let http_error = |message: String| StorageError::Http {
            id: id.to_string(),
            message,
        };

        let mut req = self.http.get(self.url(id)?);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        let response = req.send().await.map_err(|e| http_error(e.to_string()))?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(StorageError::NotFound(id.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(http_error(format!("status {status}: {body}")));
        }

        let data = response
            .bytes()
            .await
            .map_err(|e| http_error(e.to_string()))?;
        Ok(ArchiveFile {
            id: id.clone(),
            data,
        })
    }

    fn backend_name(&self) -> &'static str {
        "http"
    }
}
