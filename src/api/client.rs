use std::time::Duration;

use bytes::Bytes;
use futures_util::{Stream, TryStreamExt};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::{debug, info};

use super::types::AnalyzeRequest;
use crate::config::{RequestConfig, ServiceConfig};
use crate::error::{AnalysisError, AnalysisResult};

/// Client for the streaming fact-check analysis API
#[derive(Clone)]
pub struct AnalysisClient {
    client: Client,
    base_url: String,
}

impl AnalysisClient {
    /// Create a new analysis client
    pub fn new(config: &ServiceConfig, request_config: RequestConfig) -> AnalysisResult<Self> {
        // Only the connection phase is bounded; the response body is a
        // long-lived stream and must not be subject to a total timeout.
        let client = Client::builder()
            .connect_timeout(Duration::from_millis(request_config.connect_timeout_ms))
            .build()
            .map_err(AnalysisError::Transport)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Get the base URL (for testing)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Open the analysis stream for the given text.
    ///
    /// Returns the byte-chunk stream of the response body once the status
    /// and content type have been checked. A non-success status and a body
    /// that is not an event stream are both fatal here, before any chunk is
    /// read.
    pub async fn stream_analyze(
        &self,
        text: &str,
    ) -> AnalysisResult<impl Stream<Item = AnalysisResult<Bytes>>> {
        let url = format!("{}/stream_analyze", self.base_url);

        debug!(url = %url, chars = text.len(), "Opening analysis stream");

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&AnalyzeRequest::new(text))
            .send()
            .await
            .map_err(AnalysisError::Transport)?;

        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AnalysisError::Status {
                status: status.as_u16(),
                message,
            });
        }

        if let Some(content_type) = response.headers().get(CONTENT_TYPE) {
            let content_type = content_type.to_str().unwrap_or_default();
            if !content_type.starts_with("text/event-stream") {
                return Err(AnalysisError::StreamingUnsupported {
                    message: format!("content-type {}", content_type),
                });
            }
        }

        info!(status = status.as_u16(), "Analysis stream open");

        Ok(response.bytes_stream().map_err(AnalysisError::Transport))
    }
}
