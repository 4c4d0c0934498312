//! Readiness analyzers.
//!
//! Callers hold an `Arc<dyn ReadinessAnalyzer>` and never depend on a
//! particular implementation's timing.

use std::time::Duration;

use async_trait::async_trait;

use super::pricing::{self, format_inr};
use super::types::{AnalysisError, AnalysisRequest, ReadinessAnalysis};
use crate::models::CoverageStatus;

#[async_trait]
pub trait ReadinessAnalyzer: Send + Sync {
    /// Produce the coverage rationale and estimate for one request.
    async fn analyze(&self, request: &AnalysisRequest)
        -> Result<ReadinessAnalysis, AnalysisError>;

    /// Short label for logs.
    fn name(&self) -> &'static str;
}

/// Local stand-in for the analysis backend: waits, then applies the
/// deterministic rule set.
#[derive(Debug, Clone)]
pub struct SimulatedAnalyzer {
    latency: Duration,
}

impl SimulatedAnalyzer {
    /// A zero latency is raised to 1 ms so the pending phase always exists.
    pub fn new(latency: Duration) -> Self {
        Self {
            latency: latency.max(Duration::from_millis(1)),
        }
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }
}

impl Default for SimulatedAnalyzer {
    fn default() -> Self {
        Self::new(crate::config::analysis_latency())
    }
}

#[async_trait]
impl ReadinessAnalyzer for SimulatedAnalyzer {
    async fn analyze(
        &self,
        request: &AnalysisRequest,
    ) -> Result<ReadinessAnalysis, AnalysisError> {
        tokio::time::sleep(self.latency).await;
        Ok(rule_based_analysis(request))
    }

    fn name(&self) -> &'static str {
        "simulated"
    }
}

/// The deterministic analysis for a request.
pub fn rule_based_analysis(request: &AnalysisRequest) -> ReadinessAnalysis {
    let AnalysisRequest {
        policy,
        hospital_name,
        procedure,
        tier,
        status,
    } = request;

    match status {
        CoverageStatus::Cashless => ReadinessAnalysis {
            is_covered: true,
            reason: format!(
                "{policy} is an in-network cashless partner at {hospital_name} for \
                 {procedure}. The TPA desk bills your insurer directly."
            ),
            estimated_out_of_pocket: format_inr(pricing::CASHLESS_COPAY),
            confidence_score: 0.95,
        },
        CoverageStatus::Reimbursement => ReadinessAnalysis {
            is_covered: true,
            reason: format!(
                "{hospital_name} is out-of-network for {policy}. Pay for {procedure} \
                 upfront and file a reimbursement claim with your insurer."
            ),
            estimated_out_of_pocket: format_inr(pricing::reimbursement_upfront(
                procedure, *tier,
            )),
            confidence_score: 0.88,
        },
        CoverageStatus::Unavailable => ReadinessAnalysis {
            is_covered: false,
            reason: format!(
                "{hospital_name} does not offer the specialty this case needs, so {policy} \
                 cannot cover treatment here. Treatment would be fully self-paid."
            ),
            estimated_out_of_pocket: format_inr(pricing::tier_cost(procedure, *tier)),
            confidence_score: 0.92,
        },
    }
}
