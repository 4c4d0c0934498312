//! Admission readiness summary shown next to the analysis.
//!
//! Built once per selection so the pre-auth reference stays stable while
//! the summary is open. No packet is generated; `packet_available` only
//! tells the frontend whether the download action is enabled.

use chrono::NaiveDate;
use rand::Rng;
use serde::Serialize;

use crate::catalog;
use crate::models::{ClassifiedHospital, CoverageStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChecklistItem {
    pub label: &'static str,
    pub ready: bool,
}

/// Documents the TPA desk asks for at cashless admission.
pub const TPA_CHECKLIST: [ChecklistItem; 3] = [
    ChecklistItem {
        label: "Government ID (Aadhaar/PAN)",
        ready: true,
    },
    ChecklistItem {
        label: "Original Policy Document",
        ready: true,
    },
    ChecklistItem {
        label: "Past 2 Years Consultation Papers",
        ready: false,
    },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadinessSummary {
    pub hospital_id: String,
    pub hospital_name: String,
    /// First segment of the address.
    pub address_line: String,
    pub policy: String,
    pub specialty: String,
    pub procedure: &'static str,
    pub status: CoverageStatus,
    pub pass_label: &'static str,
    /// `None` renders as N/A.
    pub pre_auth_id: Option<String>,
    pub checklist: Vec<ChecklistItem>,
    pub packet_available: bool,
    pub tpa_desk_location: String,
    pub generated_on: NaiveDate,
}

impl ReadinessSummary {
    pub fn build<R: Rng>(
        hospital: &ClassifiedHospital,
        policy: &str,
        specialty: &str,
        today: NaiveDate,
        rng: &mut R,
    ) -> Self {
        let cashless = hospital.status == CoverageStatus::Cashless;
        let record = &hospital.hospital;

        Self {
            hospital_id: record.id.clone(),
            hospital_name: record.name.clone(),
            address_line: record
                .address
                .split(',')
                .next()
                .unwrap_or_default()
                .trim()
                .to_string(),
            policy: policy.to_string(),
            specialty: specialty.to_string(),
            procedure: catalog::procedure_for(specialty),
            status: hospital.status,
            pass_label: if cashless {
                "Admission Pass"
            } else {
                "Network Alert"
            },
            pre_auth_id: cashless.then(|| format!("PRE-{}", rng.gen_range(0..1_000_000))),
            checklist: if cashless {
                TPA_CHECKLIST.to_vec()
            } else {
                Vec::new()
            },
            packet_available: cashless,
            tpa_desk_location: record.tpa_desk_location.clone(),
            generated_on: today,
        }
    }
}
