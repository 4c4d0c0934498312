//! Transport-agnostic application state.
//!
//! `CoreState` is the single source of truth shared (via `Arc`) with the
//! local API. Selection updates replace the `SelectionState` snapshot
//! wholesale; the ranked view is recomputed only when policy or
//! specialty change.

use std::sync::{Arc, RwLock};

use serde::Serialize;
use uuid::Uuid;

use crate::config;
use crate::coverage::{self, CoverageSummary};
use crate::directory::{DirectoryError, HospitalDirectory};
use crate::map::{self, MapView};
use crate::models::{ClassifiedHospital, Theme};
use crate::readiness::{
    AnalysisError, AnalysisRequest, AnalysisSnapshot, ReadinessAnalyzer, ReadinessCoordinator,
    ReadinessSummary, RemoteReadinessAnalyzer, SelectionKey, SimulatedAnalyzer,
};
use crate::state::SelectionState;
use crate::theme::PreferenceStore;

// ═══════════════════════════════════════════════════════════
// Views handed to transports
// ═══════════════════════════════════════════════════════════

/// Ranked hospitals for one (policy, specialty) pair.
#[derive(Debug, Clone)]
struct RankedView {
    policy: String,
    specialty: String,
    hospitals: Arc<[ClassifiedHospital]>,
}

impl RankedView {
    fn compute(directory: &HospitalDirectory, selection: &SelectionState) -> Self {
        let hospitals =
            coverage::classify_and_rank(directory.records(), &selection.policy, &selection.specialty);
        tracing::debug!(
            policy = %selection.policy,
            specialty = %selection.specialty,
            hospitals = hospitals.len(),
            "Ranked hospital directory"
        );
        Self {
            policy: selection.policy.clone(),
            specialty: selection.specialty.clone(),
            hospitals: hospitals.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HospitalListing {
    pub policy: String,
    pub specialty: String,
    pub summary: CoverageSummary,
    pub hospitals: Vec<ClassifiedHospital>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReadinessView {
    #[serde(flatten)]
    pub analysis: AnalysisSnapshot,
    pub summary: Option<ReadinessSummary>,
}

// ═══════════════════════════════════════════════════════════
// CoreState
// ═══════════════════════════════════════════════════════════

pub struct CoreState {
    directory: HospitalDirectory,
    selection: RwLock<SelectionState>,
    ranked: RwLock<RankedView>,
    theme: RwLock<Theme>,
    preferences: PreferenceStore,
    readiness: ReadinessCoordinator,
    /// Summary for the open selection; its pre-auth id must not change
    /// while the selection stays open.
    summary: RwLock<Option<ReadinessSummary>>,
}

impl CoreState {
    pub fn new(
        directory: HospitalDirectory,
        preferences: PreferenceStore,
        analyzer: Arc<dyn ReadinessAnalyzer>,
    ) -> Self {
        let selection = SelectionState::default();
        let ranked = RankedView::compute(&directory, &selection);
        let theme = preferences.read_theme();

        Self {
            directory,
            selection: RwLock::new(selection),
            ranked: RwLock::new(ranked),
            theme: RwLock::new(theme),
            preferences,
            readiness: ReadinessCoordinator::new(analyzer),
            summary: RwLock::new(None),
        }
    }

    /// Build from environment configuration: directory file or bundled
    /// dataset, on-disk preferences, remote or simulated analyzer.
    pub fn from_env() -> Result<Self, CoreError> {
        let directory = HospitalDirectory::load(config::directory_path().as_deref())?;

        let analyzer: Arc<dyn ReadinessAnalyzer> = match config::analyzer_url() {
            Some(url) => {
                tracing::info!(%url, "Using remote readiness analyzer");
                Arc::new(RemoteReadinessAnalyzer::new(url)?)
            }
            None => Arc::new(SimulatedAnalyzer::new(config::analysis_latency())),
        };

        Ok(Self::new(directory, PreferenceStore::default_disk(), analyzer))
    }

    pub fn directory(&self) -> &HospitalDirectory {
        &self.directory
    }

    // ── Selection ───────────────────────────────────────────

    /// Current selection snapshot.
    pub fn selection(&self) -> Result<SelectionState, CoreError> {
        Ok(self
            .selection
            .read()
            .map_err(|_| CoreError::LockPoisoned)?
            .clone())
    }

    /// Replace the selection with `update(current)`, re-rank if the
    /// filters changed, and cancel the analysis if the selected hospital
    /// went away.
    fn replace_selection(
        &self,
        update: impl FnOnce(&SelectionState) -> SelectionState,
    ) -> Result<SelectionState, CoreError> {
        let mut selection = self.selection.write().map_err(|_| CoreError::LockPoisoned)?;
        let next = update(&selection);

        if selection.ranking_differs(&next) {
            let view = RankedView::compute(&self.directory, &next);
            *self.ranked.write().map_err(|_| CoreError::LockPoisoned)? = view;
        }
        if selection.selected_hospital.is_some() && next.selected_hospital.is_none() {
            self.close_readiness()?;
        }

        *selection = next.clone();
        Ok(next)
    }

    pub fn set_policy(&self, policy: &str) -> Result<SelectionState, CoreError> {
        tracing::info!(%policy, "Policy changed");
        self.replace_selection(|s| s.with_policy(policy))
    }

    pub fn set_specialty(&self, specialty: &str) -> Result<SelectionState, CoreError> {
        tracing::info!(%specialty, "Specialty changed");
        self.replace_selection(|s| s.with_specialty(specialty))
    }

    pub fn set_hovered(&self, hospital_id: Option<String>) -> Result<SelectionState, CoreError> {
        self.replace_selection(|s| s.with_hovered(hospital_id))
    }

    /// Select a hospital from the current ranked view and start its
    /// readiness analysis. Must be called within a tokio runtime.
    pub fn select_hospital(&self, hospital_id: &str) -> Result<(SelectionState, Uuid), CoreError> {
        let mut selection = self.selection.write().map_err(|_| CoreError::LockPoisoned)?;

        let hospital = self
            .ranked
            .read()
            .map_err(|_| CoreError::LockPoisoned)?
            .hospitals
            .iter()
            .find(|h| h.id() == hospital_id)
            .cloned()
            .ok_or_else(|| CoreError::UnknownHospital(hospital_id.to_string()))?;

        let summary = ReadinessSummary::build(
            &hospital,
            &selection.policy,
            &selection.specialty,
            chrono::Local::now().date_naive(),
            &mut rand::thread_rng(),
        );
        let key = SelectionKey {
            policy: selection.policy.clone(),
            hospital_id: hospital.id().to_string(),
            specialty: selection.specialty.clone(),
        };
        let request = AnalysisRequest::for_hospital(&selection.policy, &hospital, &selection.specialty);
        // Summary and analysis change together under the summary lock
        let request_id = {
            let mut current = self.summary.write().map_err(|_| CoreError::LockPoisoned)?;
            *current = Some(summary);
            self.readiness.request(key, request)
        };

        let next = selection.with_selected(hospital);
        *selection = next.clone();
        Ok((next, request_id))
    }

    /// The summary surface closed: drop the selection, cancel analysis.
    pub fn close_selection(&self) -> Result<SelectionState, CoreError> {
        let next = self.replace_selection(SelectionState::cleared_selection)?;
        // Covers the case where nothing was selected but an analysis lingered
        self.close_readiness()?;
        Ok(next)
    }

    fn close_readiness(&self) -> Result<(), CoreError> {
        let mut current = self.summary.write().map_err(|_| CoreError::LockPoisoned)?;
        self.readiness.cancel();
        *current = None;
        Ok(())
    }

    // ── Derived views ───────────────────────────────────────

    pub fn ranked(&self) -> Result<Arc<[ClassifiedHospital]>, CoreError> {
        Ok(Arc::clone(
            &self.ranked.read().map_err(|_| CoreError::LockPoisoned)?.hospitals,
        ))
    }

    pub fn listing(&self) -> Result<HospitalListing, CoreError> {
        let view = self.ranked.read().map_err(|_| CoreError::LockPoisoned)?.clone();
        Ok(HospitalListing {
            summary: CoverageSummary::from_ranked(&view.hospitals),
            policy: view.policy,
            specialty: view.specialty,
            hospitals: view.hospitals.to_vec(),
        })
    }

    pub fn map_view(&self) -> Result<MapView, CoreError> {
        let selection = self.selection()?;
        let ranked = self.ranked()?;
        Ok(map::map_view(
            &ranked,
            selection.selected_hospital.as_ref(),
            selection.hovered_hospital_id.as_deref(),
        ))
    }

    // ── Readiness ───────────────────────────────────────────

    pub fn readiness(&self) -> Result<ReadinessView, CoreError> {
        let summary = self.summary.read().map_err(|_| CoreError::LockPoisoned)?;
        Ok(ReadinessView {
            analysis: self.readiness.snapshot(),
            summary: summary.clone(),
        })
    }

    pub async fn wait_for_analysis(&self, request_id: Uuid) -> AnalysisSnapshot {
        self.readiness.wait_settled(request_id).await
    }

    pub fn analyzer_name(&self) -> &'static str {
        self.readiness.analyzer_name()
    }

    // ── Theme ───────────────────────────────────────────────

    pub fn theme(&self) -> Theme {
        self.theme.read().map(|t| *t).unwrap_or_default()
    }

    /// Flip the theme and persist it. A failed write is logged; the
    /// in-memory theme still changes.
    pub fn toggle_theme(&self) -> Result<Theme, CoreError> {
        let mut theme = self.theme.write().map_err(|_| CoreError::LockPoisoned)?;
        let next = theme.toggled();
        if let Err(e) = self.preferences.write_theme(next) {
            tracing::warn!(error = %e, "Failed to persist theme preference");
        }
        *theme = next;
        tracing::info!(theme = next.as_str(), "Theme toggled");
        Ok(next)
    }
}

/// Errors from `CoreState` operations.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Internal lock error")]
    LockPoisoned,
    #[error("Unknown hospital: {0}")]
    UnknownHospital(String),
    #[error("Directory error: {0}")]
    Directory(#[from] DirectoryError),
    #[error("Analyzer setup failed: {0}")]
    Analyzer(#[from] AnalysisError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CoverageStatus;
    use crate::readiness::AnalysisPhase;
    use std::time::Duration;

    fn test_state() -> CoreState {
        CoreState::new(
            HospitalDirectory::bundled().unwrap(),
            PreferenceStore::Memory,
            Arc::new(SimulatedAnalyzer::new(Duration::from_millis(10))),
        )
    }

    #[test]
    fn starts_with_defaults() {
        let state = test_state();
        let selection = state.selection().unwrap();
        assert_eq!(selection.policy, "Not Configured");
        assert_eq!(selection.specialty, "Orthopedics");
        assert_eq!(state.theme(), Theme::Dark);
    }

    #[test]
    fn unconfigured_policy_has_no_cashless_hospitals() {
        let state = test_state();
        let listing = state.listing().unwrap();
        assert_eq!(listing.summary.cashless, 0);
        assert_eq!(listing.summary.total, state.directory().len());
    }

    #[test]
    fn policy_change_reranks() {
        let state = test_state();
        state.set_policy("Star Health").unwrap();
        let listing = state.listing().unwrap();
        assert_eq!(listing.policy, "Star Health");
        assert_eq!(listing.hospitals[0].status, CoverageStatus::Cashless);
        assert!(listing.summary.cashless > 0);

        let statuses: Vec<CoverageStatus> = listing.hospitals.iter().map(|h| h.status).collect();
        let mut sorted = statuses.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(statuses, sorted);
    }

    #[test]
    fn unchanged_filters_reuse_ranking() {
        let state = test_state();
        let before = state.ranked().unwrap();
        state.set_hovered(Some("hyd-001".into())).unwrap();
        let after = state.ranked().unwrap();
        assert!(Arc::ptr_eq(&before, &after));
    }

    #[test]
    fn map_excludes_unmappable_hospitals() {
        let state = test_state();
        let view = state.map_view().unwrap();
        assert_eq!(view.markers.len(), state.directory().len() - 1);
        assert!(view.markers.iter().all(|m| m.id != "hyd-009"));
        assert!(state.ranked().unwrap().iter().any(|h| h.id() == "hyd-009"));
    }

    #[test]
    fn hovered_hospital_focuses_map() {
        let state = test_state();
        state.set_hovered(Some("hyd-003".into())).unwrap();
        let view = state.map_view().unwrap();
        assert!(view.focus.is_some());
        assert!(view.markers.iter().any(|m| m.id == "hyd-003" && m.highlighted));
    }

    #[tokio::test]
    async fn select_unknown_hospital_fails() {
        let state = test_state();
        match state.select_hospital("nope") {
            Err(CoreError::UnknownHospital(id)) => assert_eq!(id, "nope"),
            other => panic!("Expected UnknownHospital, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn select_runs_analysis_with_summary() {
        let state = test_state();
        state.set_policy("Star Health").unwrap();
        let (selection, request_id) = state.select_hospital("hyd-001").unwrap();
        assert_eq!(selection.selected_hospital.as_ref().unwrap().id(), "hyd-001");

        let pending = state.readiness().unwrap();
        assert_eq!(pending.analysis.phase, AnalysisPhase::Pending);
        let summary = pending.summary.unwrap();
        assert_eq!(summary.pass_label, "Admission Pass");
        assert!(summary.pre_auth_id.is_some());

        let settled = state.wait_for_analysis(request_id).await;
        match settled.phase {
            AnalysisPhase::Ready { analysis } => assert!(analysis.is_covered),
            other => panic!("Expected Ready, got: {other:?}"),
        }
        // Pre-auth id stays stable after the analysis resolves
        assert_eq!(
            state.readiness().unwrap().summary.unwrap().pre_auth_id,
            summary.pre_auth_id
        );
    }

    #[tokio::test]
    async fn reselecting_keeps_only_latest_result() {
        let state = test_state();
        state.set_policy("Star Health").unwrap();
        let (_, first) = state.select_hospital("hyd-001").unwrap();
        let (_, second) = state.select_hospital("hyd-009").unwrap();

        let settled = state.wait_for_analysis(second).await;
        assert_ne!(settled.request_id, Some(first));
        assert_eq!(settled.key.unwrap().hospital_id, "hyd-009");
        assert_eq!(
            state.readiness().unwrap().summary.unwrap().hospital_id,
            "hyd-009"
        );
    }

    #[tokio::test]
    async fn closing_selection_cancels_analysis() {
        let state = test_state();
        state.select_hospital("hyd-002").unwrap();
        let selection = state.close_selection().unwrap();
        assert!(selection.selected_hospital.is_none());

        let view = state.readiness().unwrap();
        assert_eq!(view.analysis.phase, AnalysisPhase::Idle);
        assert!(view.summary.is_none());
    }

    #[tokio::test]
    async fn filter_change_drops_selection_and_analysis() {
        let state = test_state();
        state.select_hospital("hyd-002").unwrap();
        let selection = state.set_specialty("Cardiology").unwrap();
        assert!(selection.selected_hospital.is_none());
        assert_eq!(state.readiness().unwrap().analysis.phase, AnalysisPhase::Idle);
    }

    #[test]
    fn toggle_theme_persists_to_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.db");
        let state = CoreState::new(
            HospitalDirectory::bundled().unwrap(),
            PreferenceStore::Disk(path.clone()),
            Arc::new(SimulatedAnalyzer::new(Duration::from_millis(10))),
        );
        assert_eq!(state.toggle_theme().unwrap(), Theme::Light);
        assert_eq!(PreferenceStore::Disk(path).read_theme(), Theme::Light);
    }

    #[test]
    fn toggle_survives_unwritable_store() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the database file should be
        let path = dir.path().join("app.db");
        std::fs::create_dir(&path).unwrap();
        let state = CoreState::new(
            HospitalDirectory::bundled().unwrap(),
            PreferenceStore::Disk(path),
            Arc::new(SimulatedAnalyzer::new(Duration::from_millis(10))),
        );
        assert_eq!(state.theme(), Theme::Dark);
        assert_eq!(state.toggle_theme().unwrap(), Theme::Light);
        assert_eq!(state.theme(), Theme::Light);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn readiness_view_never_mixes_hospitals() {
        let state = Arc::new(test_state());
        state.set_policy("Star Health").unwrap();

        let reader = {
            let state = Arc::clone(&state);
            tokio::spawn(async move {
                for _ in 0..500 {
                    let view = state.readiness().unwrap();
                    if let (Some(key), Some(summary)) = (&view.analysis.key, &view.summary) {
                        assert_eq!(key.hospital_id, summary.hospital_id);
                    }
                    tokio::task::yield_now().await;
                }
            })
        };

        for i in 0..200 {
            let id = if i % 2 == 0 { "hyd-001" } else { "hyd-004" };
            state.select_hospital(id).unwrap();
            tokio::task::yield_now().await;
        }
        reader.await.unwrap();
    }

    #[test]
    fn core_error_display() {
        assert_eq!(CoreError::LockPoisoned.to_string(), "Internal lock error");
        assert_eq!(
            CoreError::UnknownHospital("x".into()).to_string(),
            "Unknown hospital: x"
        );
    }
}
