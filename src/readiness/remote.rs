//! HTTP-backed analyzer.
//!
//! POSTs the request as JSON and expects a `ReadinessAnalysis` back.
//! Every failure collapses into `AnalysisError::Unavailable` so the
//! caller leaves the pending state.

use std::time::Duration;

use async_trait::async_trait;

use super::analyzer::ReadinessAnalyzer;
use super::types::{AnalysisError, AnalysisRequest, ReadinessAnalysis};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct RemoteReadinessAnalyzer {
    client: reqwest::Client,
    url: String,
}

impl RemoteReadinessAnalyzer {
    pub fn new(url: impl Into<String>) -> Result<Self, AnalysisError> {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AnalysisError::Unavailable(format!("HTTP client setup failed: {e}")))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

/// Reject payloads that parse but break the contract.
fn validate(analysis: ReadinessAnalysis) -> Result<ReadinessAnalysis, AnalysisError> {
    if !(0.0..=1.0).contains(&analysis.confidence_score) {
        return Err(AnalysisError::Unavailable(format!(
            "confidence {} outside [0, 1]",
            analysis.confidence_score
        )));
    }
    Ok(analysis)
}

#[async_trait]
impl ReadinessAnalyzer for RemoteReadinessAnalyzer {
    async fn analyze(
        &self,
        request: &AnalysisRequest,
    ) -> Result<ReadinessAnalysis, AnalysisError> {
        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| AnalysisError::Unavailable(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, url = %self.url, "Analysis backend returned an error");
            return Err(AnalysisError::Unavailable(format!("backend returned {status}")));
        }

        let analysis = response
            .json::<ReadinessAnalysis>()
            .await
            .map_err(|e| AnalysisError::Unavailable(format!("unreadable response: {e}")))?;

        validate(analysis)
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CoverageStatus, HospitalTier};

    fn analysis(confidence: f32) -> ReadinessAnalysis {
        ReadinessAnalysis {
            is_covered: true,
            reason: "ok".into(),
            estimated_out_of_pocket: "₹2,500".into(),
            confidence_score: confidence,
        }
    }

    #[test]
    fn out_of_range_confidence_is_rejected() {
        assert!(validate(analysis(0.5)).is_ok());
        assert!(validate(analysis(1.5)).is_err());
        assert!(validate(analysis(-0.1)).is_err());
        assert!(validate(analysis(f32::NAN)).is_err());
    }

    /// Serve `router` on an ephemeral local port; returns the base URL.
    async fn serve(router: axum::Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });
        format!("http://{addr}")
    }

    /// Direct client; ambient proxy settings must not intercept loopback.
    fn local_analyzer(url: String) -> RemoteReadinessAnalyzer {
        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        RemoteReadinessAnalyzer::with_client(client, url)
    }

    fn sample_request() -> AnalysisRequest {
        AnalysisRequest {
            policy: "Star Health".into(),
            hospital_name: "Apollo".into(),
            procedure: "Endoscopy".into(),
            tier: HospitalTier::Premium,
            status: CoverageStatus::Cashless,
        }
    }

    #[tokio::test]
    async fn backend_result_is_returned() {
        use axum::routing::post;
        use axum::Json;

        let router = axum::Router::new().route(
            "/analyze",
            post(|Json(req): Json<AnalysisRequest>| async move {
                Json(ReadinessAnalysis {
                    is_covered: true,
                    reason: format!("covered at {}", req.hospital_name),
                    estimated_out_of_pocket: "₹2,500".into(),
                    confidence_score: 0.9,
                })
            }),
        );
        let base = serve(router).await;

        let analyzer = local_analyzer(format!("{base}/analyze"));
        let analysis = analyzer.analyze(&sample_request()).await.unwrap();
        assert_eq!(analysis.reason, "covered at Apollo");
    }

    #[tokio::test]
    async fn error_status_is_unavailable() {
        use axum::http::StatusCode;
        use axum::routing::post;

        let router = axum::Router::new()
            .route("/analyze", post(|| async { StatusCode::BAD_GATEWAY }));
        let base = serve(router).await;

        let analyzer = local_analyzer(format!("{base}/analyze"));
        let err = analyzer.analyze(&sample_request()).await.unwrap_err();
        assert!(err.to_string().contains("502"));
    }

    #[tokio::test]
    async fn unreachable_backend_is_unavailable() {
        // Bind then drop to get a port nothing listens on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let analyzer = local_analyzer(format!("http://{addr}/analyze"));

        match analyzer.analyze(&sample_request()).await {
            Err(AnalysisError::Unavailable(_)) => {}
            other => panic!("Expected Unavailable, got: {other:?}"),
        }
    }
}
