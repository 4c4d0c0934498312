//! Fixed option lists and the specialty → representative procedure table.

use serde::Serialize;

/// Policy value before the user has configured an insurer.
pub const UNCONFIGURED_POLICY: &str = "Not Configured";

/// Specialty selected at startup.
pub const DEFAULT_SPECIALTY: &str = "Orthopedics";

/// Procedure label for specialties missing from the table.
pub const DEFAULT_PROCEDURE: &str = "General Consultation";

pub const INSURERS: [&str; 4] = ["Star Health", "HDFC Ergo", "ICICI Lombard", "Niva Bupa"];

const PROCEDURES: [(&str, &str); 4] = [
    ("Orthopedics", "Total Knee Arthroplasty"),
    ("Cardiology", "Coronary Angiography"),
    ("Neurology", "MRI Brain Contrast"),
    ("Gastroenterology", "Endoscopy"),
];

/// Specialties offered in the selector, in display order.
pub fn specialties() -> impl Iterator<Item = &'static str> {
    PROCEDURES.iter().map(|(specialty, _)| *specialty)
}

/// Representative procedure for a specialty.
pub fn procedure_for(specialty: &str) -> &'static str {
    PROCEDURES
        .iter()
        .find(|(s, _)| *s == specialty)
        .map(|(_, procedure)| *procedure)
        .unwrap_or(DEFAULT_PROCEDURE)
}

#[derive(Debug, Clone, Serialize)]
pub struct SpecialtyOption {
    pub specialty: &'static str,
    pub procedure: &'static str,
}

/// Everything the selectors need, in one payload.
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    pub insurers: Vec<&'static str>,
    pub specialties: Vec<SpecialtyOption>,
    pub unconfigured_policy: &'static str,
    pub default_specialty: &'static str,
}

impl Catalog {
    pub fn load() -> Self {
        Self {
            insurers: INSURERS.to_vec(),
            specialties: PROCEDURES
                .iter()
                .map(|&(specialty, procedure)| SpecialtyOption {
                    specialty,
                    procedure,
                })
                .collect(),
            unconfigured_policy: UNCONFIGURED_POLICY,
            default_specialty: DEFAULT_SPECIALTY,
        }
    }
}
