//! Request-keyed readiness analyses.
//!
//! At most one analysis is live. Starting a new one aborts the previous
//! task, and a completion whose request id is no longer active is
//! dropped, so the last request always wins.

use std::sync::{Arc, Mutex};

use serde::Serialize;
use tokio::sync::watch;
use tokio::task::AbortHandle;
use uuid::Uuid;

use super::analyzer::ReadinessAnalyzer;
use super::types::{AnalysisRequest, ReadinessAnalysis};

/// What the analysis was requested for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionKey {
    pub policy: String,
    pub hospital_id: String,
    pub specialty: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AnalysisPhase {
    Idle,
    Pending,
    Ready { analysis: ReadinessAnalysis },
    Failed { message: String },
}

impl AnalysisPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Ready { .. } | Self::Failed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisSnapshot {
    pub request_id: Option<Uuid>,
    pub key: Option<SelectionKey>,
    #[serde(flatten)]
    pub phase: AnalysisPhase,
}

impl AnalysisSnapshot {
    fn idle() -> Self {
        Self {
            request_id: None,
            key: None,
            phase: AnalysisPhase::Idle,
        }
    }
}

struct Shared {
    tx: watch::Sender<AnalysisSnapshot>,
    task: Mutex<Option<AbortHandle>>,
}

impl Shared {
    /// Publish a result only if `request_id` is still the active request.
    fn complete(&self, request_id: Uuid, phase: AnalysisPhase) -> bool {
        self.tx.send_if_modified(|snapshot| {
            if snapshot.request_id != Some(request_id) {
                tracing::debug!(%request_id, "Discarding stale analysis result");
                return false;
            }
            snapshot.phase = phase;
            true
        })
    }
}

pub struct ReadinessCoordinator {
    analyzer: Arc<dyn ReadinessAnalyzer>,
    shared: Arc<Shared>,
}

impl ReadinessCoordinator {
    pub fn new(analyzer: Arc<dyn ReadinessAnalyzer>) -> Self {
        let (tx, _rx) = watch::channel(AnalysisSnapshot::idle());
        Self {
            analyzer,
            shared: Arc::new(Shared {
                tx,
                task: Mutex::new(None),
            }),
        }
    }

    pub fn analyzer_name(&self) -> &'static str {
        self.analyzer.name()
    }

    /// Start an analysis, superseding any in-flight one.
    ///
    /// Must be called from within a tokio runtime.
    pub fn request(&self, key: SelectionKey, request: AnalysisRequest) -> Uuid {
        let request_id = Uuid::new_v4();

        // Lock spans abort + publish + spawn so two concurrent callers
        // cannot interleave and leave an orphaned task registered.
        let mut task = match self.shared.task.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(previous) = task.take() {
            previous.abort();
        }

        tracing::info!(
            %request_id,
            hospital = %key.hospital_id,
            analyzer = self.analyzer.name(),
            "Readiness analysis requested"
        );
        self.shared.tx.send_replace(AnalysisSnapshot {
            request_id: Some(request_id),
            key: Some(key),
            phase: AnalysisPhase::Pending,
        });

        let analyzer = Arc::clone(&self.analyzer);
        let shared = Arc::clone(&self.shared);
        let handle = tokio::spawn(async move {
            let phase = match analyzer.analyze(&request).await {
                Ok(analysis) => AnalysisPhase::Ready { analysis },
                Err(e) => {
                    tracing::warn!(%request_id, error = %e, "Readiness analysis failed");
                    AnalysisPhase::Failed {
                        message: e.to_string(),
                    }
                }
            };
            shared.complete(request_id, phase);
        });
        *task = Some(handle.abort_handle());

        request_id
    }

    /// Abort any in-flight analysis and return to idle.
    pub fn cancel(&self) {
        let mut task = match self.shared.task.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(previous) = task.take() {
            previous.abort();
        }
        self.shared.tx.send_replace(AnalysisSnapshot::idle());
    }

    pub fn snapshot(&self) -> AnalysisSnapshot {
        self.shared.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AnalysisSnapshot> {
        self.shared.tx.subscribe()
    }

    /// Wait until `request_id` reaches a terminal phase or is superseded,
    /// then return the snapshot at that moment.
    pub async fn wait_settled(&self, request_id: Uuid) -> AnalysisSnapshot {
        let mut rx = self.subscribe();
        let settled = rx
            .wait_for(|s| s.request_id != Some(request_id) || s.phase.is_terminal())
            .await
            .map(|snapshot| snapshot.clone());
        match settled {
            Ok(snapshot) => snapshot,
            Err(_) => self.snapshot(),
        }
    }
}
