use std::time::Duration;

use engine_logging::{engine_debug, engine_info, engine_warn, preview};

use crate::wire::{self, DebugRequest};
use crate::{AnalysisError, AnalysisOutcome, FailureKind, SourceFile};

/// Where the analysis service listens unless configured otherwise.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub endpoint: String,
    /// `None` leaves connection setup unbounded.
    pub connect_timeout: Option<Duration>,
    /// `None` lets a hung request stay in flight forever.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout: None,
            request_timeout: None,
        }
    }
}

#[async_trait::async_trait]
pub trait Analyzer: Send + Sync {
    /// `POST /debug` with the code verbatim.
    async fn analyze(&self, code: &str) -> Result<AnalysisOutcome, AnalysisError>;

    /// `POST /analyze_project` with every file keyed by name.
    async fn analyze_project(
        &self,
        files: &[SourceFile],
    ) -> Result<AnalysisOutcome, AnalysisError>;

    /// `GET /`; returns the service's greeting.
    async fn health(&self) -> Result<String, AnalysisError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestAnalyzer {
    settings: ClientSettings,
    client: reqwest::Client,
}

impl ReqwestAnalyzer {
    pub fn new(settings: ClientSettings) -> Result<Self, AnalysisError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| AnalysisError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn url(&self, path: &str) -> Result<reqwest::Url, AnalysisError> {
        let base = self.settings.endpoint.trim_end_matches('/');
        reqwest::Url::parse(&format!("{base}{path}"))
            .map_err(|err| AnalysisError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    async fn read_body(response: reqwest::Response) -> Result<Vec<u8>, AnalysisError> {
        let status = response.status();
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        engine_debug!("Response status={} body_len={}", status, bytes.len());
        Ok(bytes.to_vec())
    }
}

#[async_trait::async_trait]
impl Analyzer for ReqwestAnalyzer {
    async fn analyze(&self, code: &str) -> Result<AnalysisOutcome, AnalysisError> {
        let url = self.url("/debug")?;
        engine_info!(
            "POST {} code_len={} code={}",
            url,
            code.len(),
            preview(code, 40)
        );

        let response = self
            .client
            .post(url)
            .json(&DebugRequest { code })
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let body = Self::read_body(response).await?;
        wire::parse_debug_response(&body)
    }

    async fn analyze_project(
        &self,
        files: &[SourceFile],
    ) -> Result<AnalysisOutcome, AnalysisError> {
        let url = self.url("/analyze_project")?;
        engine_info!("POST {} files={}", url, files.len());

        let response = self
            .client
            .post(url)
            .json(&wire::project_request(files))
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let body = Self::read_body(response).await?;
        wire::parse_project_response(&body)
    }

    async fn health(&self) -> Result<String, AnalysisError> {
        let url = self.url("/")?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let body = Self::read_body(response).await?;
        wire::parse_root_response(&body).inspect_err(|err| {
            engine_warn!("Health check returned an unexpected body: {}", err);
        })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> AnalysisError {
    if err.is_timeout() {
        return AnalysisError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_builder() {
        return AnalysisError::new(FailureKind::InvalidUrl, err.to_string());
    }
    AnalysisError::new(FailureKind::Network, err.to_string())
}
