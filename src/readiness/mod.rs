//! Pre-authorization readiness: analysis, coordination and summary.

pub mod analyzer;
pub mod coordinator;
pub mod pricing;
pub mod remote;
pub mod summary;
pub mod types;

pub use analyzer::{rule_based_analysis, ReadinessAnalyzer, SimulatedAnalyzer};
pub use coordinator::{AnalysisPhase, AnalysisSnapshot, ReadinessCoordinator, SelectionKey};
pub use remote::RemoteReadinessAnalyzer;
pub use summary::{ChecklistItem, ReadinessSummary};
pub use types::{AnalysisError, AnalysisRequest, ReadinessAnalysis};
