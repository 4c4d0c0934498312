use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog;
use crate::models::{ClassifiedHospital, CoverageStatus, HospitalTier};

/// Input of one readiness analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub policy: String,
    pub hospital_name: String,
    /// Representative procedure, derived from the specialty by the caller.
    pub procedure: String,
    pub tier: HospitalTier,
    pub status: CoverageStatus,
}

impl AnalysisRequest {
    pub fn for_hospital(policy: &str, hospital: &ClassifiedHospital, specialty: &str) -> Self {
        Self {
            policy: policy.to_string(),
            hospital_name: hospital.hospital.name.clone(),
            procedure: catalog::procedure_for(specialty).to_string(),
            tier: hospital.hospital.tier,
            status: hospital.status,
        }
    }
}

/// Coverage rationale and cost estimate for one hospital.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessAnalysis {
    pub is_covered: bool,
    pub reason: String,
    /// Formatted INR amount, e.g. `₹1,05,000`.
    pub estimated_out_of_pocket: String,
    /// Decorative; always within [0, 1].
    pub confidence_score: f32,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// The backend could not produce a result.
    #[error("Analysis unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HospitalRecord;

    #[test]
    fn request_derives_procedure_from_specialty() {
        let hospital = ClassifiedHospital {
            hospital: HospitalRecord {
                id: "h1".into(),
                name: "Apollo".into(),
                address: String::new(),
                location: None,
                network_partners: vec![],
                specialties: vec!["Neurology".into()],
                tier: HospitalTier::Premium,
                tpa_desk_location: String::new(),
                rating: 4.0,
                distance: String::new(),
            },
            status: CoverageStatus::Reimbursement,
        };
        let request = AnalysisRequest::for_hospital("Star Health", &hospital, "Neurology");
        assert_eq!(request.procedure, "MRI Brain Contrast");
        assert_eq!(request.hospital_name, "Apollo");
        assert_eq!(request.tier, HospitalTier::Premium);
        assert_eq!(request.status, CoverageStatus::Reimbursement);
    }

    #[test]
    fn analysis_uses_camel_case_on_the_wire() {
        let analysis = ReadinessAnalysis {
            is_covered: true,
            reason: "ok".into(),
            estimated_out_of_pocket: "₹2,500".into(),
            confidence_score: 0.95,
        };
        let value = serde_json::to_value(&analysis).unwrap();
        assert_eq!(value["isCovered"], true);
        assert_eq!(value["estimatedOutOfPocket"], "₹2,500");
        assert!(value.get("confidenceScore").is_some());
    }
}
