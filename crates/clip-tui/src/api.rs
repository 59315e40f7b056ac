//! Clip server API client — listing and playback-URL resolution.

use clip_proto::catalog::{CatalogResponse, ClipEntry, ResolveResponse};
use reqwest::StatusCode;
use thiserror::Error;

/// Failure of one API operation.  The `Display` text of every variant is
/// exactly what the status slot shows to the user.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never completed (connectivity, DNS, reset).
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("{message}")]
    Remote {
        status: StatusCode,
        message: String,
    },
    /// A success response whose body does not match the expected shape.
    #[error("malformed {endpoint} response: {detail}")]
    Malformed {
        endpoint: &'static str,
        detail: String,
    },
}

/// Error text for a non-success response: the body text when the server
/// sent one, otherwise the status line.
fn remote_message(status: StatusCode, body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        status.to_string()
    } else {
        trimmed.to_string()
    }
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Fetch the clip listing.  An absent `videos` field is an empty
    /// catalog; server order is preserved.
    pub async fn fetch_catalog(&self) -> Result<Vec<ClipEntry>, ApiError> {
        let url = format!("{}/api/videos", self.base_url);
        let response = self
            .http
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;
        let body = Self::success_body(response).await?;

        let parsed: CatalogResponse =
            serde_json::from_str(&body).map_err(|e| ApiError::Malformed {
                endpoint: "listing",
                detail: e.to_string(),
            })?;
        Ok(parsed.into_clips())
    }

    /// Exchange a clip key for a playable URL.  The key travels URL-encoded
    /// as the `key` query parameter.
    pub async fn resolve_playback(&self, key: &str) -> Result<String, ApiError> {
        let url = format!("{}/api/videos/url", self.base_url);
        let response = self.http.get(&url).query(&[("key", key)]).send().await?;
        let body = Self::success_body(response).await?;

        let parsed: ResolveResponse =
            serde_json::from_str(&body).map_err(|e| ApiError::Malformed {
                endpoint: "resolution",
                detail: e.to_string(),
            })?;
        Ok(parsed.url)
    }

    async fn success_body(response: reqwest::Response) -> Result<String, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Remote {
                status,
                message: remote_message(status, &body),
            });
        }
        Ok(response.text().await?)
    }
}
