//! Coverage classification and ranking.
//!
//! Pure functions over the hospital directory. A hospital that does not
//! treat the requested specialty is `UNAVAILABLE` whatever its insurer
//! partnerships are; the policy is only consulted once the specialty
//! matches.

use serde::Serialize;

use crate::models::{ClassifiedHospital, CoverageStatus, HospitalRecord};

/// Classify one hospital for a (policy, specialty) pair.
pub fn classify(record: &HospitalRecord, policy: &str, specialty: &str) -> CoverageStatus {
    if !record.offers_specialty(specialty) {
        return CoverageStatus::Unavailable;
    }
    if record.partners_with(policy) {
        CoverageStatus::Cashless
    } else {
        CoverageStatus::Reimbursement
    }
}

/// Classify every hospital and order them CASHLESS, REIMBURSEMENT,
/// UNAVAILABLE. Hospitals with equal status keep their directory order.
pub fn classify_and_rank(
    directory: &[HospitalRecord],
    policy: &str,
    specialty: &str,
) -> Vec<ClassifiedHospital> {
    let mut ranked: Vec<ClassifiedHospital> = directory
        .iter()
        .map(|record| ClassifiedHospital {
            status: classify(record, policy, specialty),
            hospital: record.clone(),
        })
        .collect();

    // sort_by is stable; ties are never reordered.
    ranked.sort_by(|a, b| b.status.cmp(&a.status));
    ranked
}

/// Status counts over a ranked view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CoverageSummary {
    pub cashless: usize,
    pub reimbursement: usize,
    pub unavailable: usize,
    pub total: usize,
}

impl CoverageSummary {
    pub fn from_ranked(ranked: &[ClassifiedHospital]) -> Self {
        ranked.iter().fold(Self::default(), |mut acc, h| {
            match h.status {
                CoverageStatus::Cashless => acc.cashless += 1,
                CoverageStatus::Reimbursement => acc.reimbursement += 1,
                CoverageStatus::Unavailable => acc.unavailable += 1,
            }
            acc.total += 1;
            acc
        })
    }
}
