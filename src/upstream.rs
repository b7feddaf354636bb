use crate::model::GenerationRequest;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://baconipsum.com/api/";

const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Terminal failures of one fetch. None of these are retried; the only
/// recovery path is the caller triggering generation again.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("failed to reach the bacon ipsum API: {0}")]
    Unreachable(#[source] reqwest::Error),
    #[error("bacon ipsum API returned status {0}")]
    Status(u16),
    #[error("bacon ipsum API returned a malformed or empty response")]
    InvalidResponse,
}

/// Anything that can produce bacon ipsum paragraphs for a request.
pub trait ParagraphSource: Send + Sync {
    fn fetch(
        &self,
        req: &GenerationRequest,
    ) -> impl Future<Output = Result<Vec<String>, UpstreamError>> + Send;
}

/// HTTP client for the public bacon ipsum API.
#[derive(Debug, Clone)]
pub struct BaconIpsumClient {
    http: reqwest::Client,
    base_url: String,
}

impl BaconIpsumClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

impl ParagraphSource for BaconIpsumClient {
    async fn fetch(&self, req: &GenerationRequest) -> Result<Vec<String>, UpstreamError> {
        let query = [
            ("format", "json".to_string()),
            ("type", req.meat_type.as_str().to_string()),
            ("paras", req.paras.to_string()),
            (
                "start-with-lorem",
                if req.start_with_lorem { "1" } else { "0" }.to_string(),
            ),
        ];

        let resp = self
            .http
            .get(&self.base_url)
            .query(&query)
            .send()
            .await
            .map_err(UpstreamError::Unreachable)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status.as_u16()));
        }

        let paragraphs: Vec<String> = resp
            .json()
            .await
            .map_err(|_| UpstreamError::InvalidResponse)?;

        // An empty array never enters the cache; validation happens here,
        // before the orchestrator's store write.
        if paragraphs.is_empty() {
            return Err(UpstreamError::InvalidResponse);
        }

        Ok(paragraphs)
    }
}
