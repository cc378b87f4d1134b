//! HTTP implementation of [`GatePassApi`].

use async_trait::async_trait;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;

use gatepass_core::{GatePass, GatePassCreate, GatePassStatus, PassNumber, PhotoId};

use crate::api::GatePassApi;
use crate::config::ClientConfig;
use crate::download::{Download, PrintScope, ScanImage, ScanKind, disposition_file_name};
use crate::error::{ApiError, detail_message};

/// Client for the gate pass REST API.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let raw = config.base_url.trim();
        let base_url = Url::parse(raw)
            .map_err(|e| ApiError::InvalidRequest(format!("invalid base URL {raw:?}: {e}")))?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(ApiError::InvalidRequest(format!(
                "base URL must be http(s): {raw:?}"
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append percent-encoded path segments to the base URL.
    fn url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidRequest("base URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder, action: &'static str) -> Result<Response, ApiError> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!(action, error = %e, "gatepass api unreachable");
            ApiError::Network(e.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = detail_message(&body).unwrap_or_else(|| format!("Failed to {action}"));
        tracing::warn!(action, status = status.as_u16(), %message, "gatepass api rejected request");
        Err(ApiError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        action: &'static str,
    ) -> Result<T, ApiError> {
        let response = self.send(request, action).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(format!("{action}: {e}")))
    }

    async fn download(
        &self,
        request: RequestBuilder,
        action: &'static str,
        fallback_name: String,
    ) -> Result<Download, ApiError> {
        let response = self.send(request, action).await?;
        let headers = response.headers();
        let content_type = headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let file_name = headers
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(disposition_file_name)
            .unwrap_or(fallback_name);
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?
            .to_vec();

        tracing::debug!(action, %file_name, size = bytes.len(), "download complete");
        Ok(Download {
            bytes,
            content_type,
            file_name,
        })
    }

    async fn admin_action(
        &self,
        number: &PassNumber,
        verb: &'static str,
        actor: Option<&str>,
        action: &'static str,
    ) -> Result<GatePass, ApiError> {
        let url = self.url(&["admin", "gatepass", number.as_str(), verb])?;
        tracing::debug!(%url, actor = ?actor, "gatepass admin action");
        let mut request = self.http.post(url);
        if let Some(actor) = actor.map(str::trim).filter(|a| !a.is_empty()) {
            request = request.query(&[("name", actor)]);
        }
        self.json(request, action).await
    }
}

#[async_trait]
impl GatePassApi for ApiClient {
    async fn pending(&self) -> Result<Vec<GatePass>, ApiError> {
        let url = self.url(&["admin", "gatepass", "pending"])?;
        self.json(self.http.get(url), "fetch pending gatepasses").await
    }

    async fn list(&self, status: Option<GatePassStatus>) -> Result<Vec<GatePass>, ApiError> {
        let url = self.url(&["hr", "gatepass", "list"])?;
        let mut request = self.http.get(url);
        if let Some(status) = status {
            request = request.query(&[("status", status.as_str())]);
        }
        self.json(request, "fetch gatepasses").await
    }

    async fn detail(&self, number: &PassNumber) -> Result<GatePass, ApiError> {
        let url = self.url(&["admin", "gatepass", number.as_str()])?;
        let request = self.http.get(url).query(&[("pass_id", number.as_str())]);
        self.json(request, "fetch gatepass").await
    }

    async fn by_number(&self, number: &PassNumber) -> Result<GatePass, ApiError> {
        let url = self.url(&["gate", "gatepass", "number", number.as_str()])?;
        self.json(self.http.get(url), "fetch gatepass").await
    }

    async fn approve(&self, number: &PassNumber, actor: Option<&str>) -> Result<GatePass, ApiError> {
        self.admin_action(number, "approve", actor, "approve gatepass").await
    }

    async fn reject(&self, number: &PassNumber, actor: Option<&str>) -> Result<GatePass, ApiError> {
        self.admin_action(number, "reject", actor, "reject gatepass").await
    }

    async fn delete(&self, number: &PassNumber, actor: Option<&str>) -> Result<GatePass, ApiError> {
        self.admin_action(number, "delete", actor, "delete gatepass").await
    }

    async fn create(&self, body: &GatePassCreate) -> Result<GatePass, ApiError> {
        body.validate()?;
        let url = self.url(&["hr", "gatepass", "create"])?;
        self.json(self.http.post(url).json(body), "create gatepass").await
    }

    async fn print(&self, number: &PassNumber, scope: PrintScope) -> Result<Download, ApiError> {
        let url = self.url(&[scope.prefix(), "gatepass", number.as_str(), "print"])?;
        self.download(self.http.get(url), "print gatepass", format!("{number}.pdf"))
            .await
    }

    async fn photo(&self, photo_id: &PhotoId) -> Result<Download, ApiError> {
        let url = self.url(&["gate", "gatepass", "photo", photo_id.as_str()])?;
        self.download(self.http.get(url), "fetch photo", photo_id.to_string())
            .await
    }

    async fn scan(&self, kind: ScanKind, number: &PassNumber, image: ScanImage) -> Result<GatePass, ApiError> {
        let url = self.url(&["gate", kind.endpoint()])?;
        let part = Part::bytes(image.bytes)
            .file_name(image.file_name)
            .mime_str(&image.content_type)
            .map_err(|e| ApiError::InvalidRequest(format!("image content type: {e}")))?;
        let form = Form::new()
            .text("pass_number", number.to_string())
            .part("file", part);

        let action = match kind {
            ScanKind::Exit => "scan exit",
            ScanKind::Return => "scan return",
        };
        tracing::debug!(kind = kind.as_str(), %number, "submitting gate scan");
        self.json(self.http.post(url).multipart(form), action).await
    }
}
