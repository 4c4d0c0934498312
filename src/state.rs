//! Selection state snapshots.
//!
//! Every update returns a new `SelectionState`; a snapshot handed out
//! earlier never changes underneath its holder.

use serde::Serialize;

use crate::catalog::{DEFAULT_SPECIALTY, UNCONFIGURED_POLICY};
use crate::models::ClassifiedHospital;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionState {
    pub policy: String,
    pub specialty: String,
    pub hovered_hospital_id: Option<String>,
    pub selected_hospital: Option<ClassifiedHospital>,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            policy: UNCONFIGURED_POLICY.to_string(),
            specialty: DEFAULT_SPECIALTY.to_string(),
            hovered_hospital_id: None,
            selected_hospital: None,
        }
    }
}

impl SelectionState {
    /// Changing the policy invalidates the selected hospital's status,
    /// so the selection is dropped.
    pub fn with_policy(&self, policy: impl Into<String>) -> Self {
        let policy = policy.into();
        if policy == self.policy {
            return self.clone();
        }
        Self {
            policy,
            selected_hospital: None,
            ..self.clone()
        }
    }

    pub fn with_specialty(&self, specialty: impl Into<String>) -> Self {
        let specialty = specialty.into();
        if specialty == self.specialty {
            return self.clone();
        }
        Self {
            specialty,
            selected_hospital: None,
            ..self.clone()
        }
    }

    pub fn with_hovered(&self, hovered_hospital_id: Option<String>) -> Self {
        Self {
            hovered_hospital_id,
            ..self.clone()
        }
    }

    pub fn with_selected(&self, hospital: ClassifiedHospital) -> Self {
        Self {
            selected_hospital: Some(hospital),
            ..self.clone()
        }
    }

    /// Summary surface closed.
    pub fn cleared_selection(&self) -> Self {
        Self {
            selected_hospital: None,
            ..self.clone()
        }
    }

    /// Whether `other` needs a fresh classification pass.
    pub fn ranking_differs(&self, other: &SelectionState) -> bool {
        self.policy != other.policy || self.specialty != other.specialty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CoverageStatus, HospitalRecord, HospitalTier};

    fn classified(id: &str) -> ClassifiedHospital {
        ClassifiedHospital {
            hospital: HospitalRecord {
                id: id.into(),
                name: id.into(),
                address: String::new(),
                location: None,
                network_partners: vec![],
                specialties: vec![],
                tier: HospitalTier::Budget,
                tpa_desk_location: String::new(),
                rating: 0.0,
                distance: String::new(),
            },
            status: CoverageStatus::Unavailable,
        }
    }

    #[test]
    fn defaults_to_unconfigured_policy_and_orthopedics() {
        let state = SelectionState::default();
        assert_eq!(state.policy, "Not Configured");
        assert_eq!(state.specialty, "Orthopedics");
        assert!(state.hovered_hospital_id.is_none());
        assert!(state.selected_hospital.is_none());
    }

    #[test]
    fn updates_leave_previous_snapshot_untouched() {
        let before = SelectionState::default();
        let after = before.with_policy("Star Health");
        assert_eq!(before.policy, "Not Configured");
        assert_eq!(after.policy, "Star Health");
    }

    #[test]
    fn policy_change_drops_selection_but_keeps_hover() {
        let state = SelectionState::default()
            .with_hovered(Some("h1".into()))
            .with_selected(classified("h1"));
        let next = state.with_policy("HDFC Ergo");
        assert!(next.selected_hospital.is_none());
        assert_eq!(next.hovered_hospital_id.as_deref(), Some("h1"));
    }

    #[test]
    fn same_specialty_keeps_selection() {
        let state = SelectionState::default().with_selected(classified("h1"));
        let next = state.with_specialty("Orthopedics");
        assert!(next.selected_hospital.is_some());
        assert!(!state.ranking_differs(&next));
    }

    #[test]
    fn specialty_change_requires_reranking() {
        let state = SelectionState::default();
        let next = state.with_specialty("Cardiology");
        assert!(state.ranking_differs(&next));
    }

    #[test]
    fn clearing_selection_keeps_filters() {
        let state = SelectionState::default()
            .with_policy("Niva Bupa")
            .with_selected(classified("h2"));
        let cleared = state.cleared_selection();
        assert!(cleared.selected_hospital.is_none());
        assert_eq!(cleared.policy, "Niva Bupa");
    }
}
