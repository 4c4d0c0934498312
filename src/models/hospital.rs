use serde::{Deserialize, Deserializer, Serialize};

use super::enums::{CoverageStatus, HospitalTier};

/// Latitude/longitude pair. Values may be non-finite when the source
/// data is broken; see [`Coordinates::is_finite`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    #[serde(default = "missing_coordinate", deserialize_with = "lenient_coordinate")]
    pub lat: f64,
    #[serde(default = "missing_coordinate", deserialize_with = "lenient_coordinate")]
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

fn missing_coordinate() -> f64 {
    f64::NAN
}

/// Accepts a number, a numeric string (`"17.4"`, `"NaN"`), or null.
/// Anything unparsable becomes NaN so the record stays listable.
fn lenient_coordinate<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        serde_json::Value::String(s) => s.trim().parse::<f64>().unwrap_or(f64::NAN),
        _ => f64::NAN,
    })
}

/// Any non-object location (string, number, array, null) reads as absent.
fn lenient_location<'de, D>(deserializer: D) -> Result<Option<Coordinates>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if !value.is_object() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value).ok())
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// One entry of the hospital directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HospitalRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default, deserialize_with = "lenient_location")]
    pub location: Option<Coordinates>,
    /// Insurers billed directly (cashless).
    #[serde(default, deserialize_with = "null_as_empty")]
    pub network_partners: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub specialties: Vec<String>,
    pub tier: HospitalTier,
    #[serde(default)]
    pub tpa_desk_location: String,
    #[serde(default)]
    pub rating: f32,
    /// Pre-formatted, display only.
    #[serde(default)]
    pub distance: String,
}

impl HospitalRecord {
    pub fn offers_specialty(&self, specialty: &str) -> bool {
        self.specialties.iter().any(|s| s == specialty)
    }

    pub fn partners_with(&self, policy: &str) -> bool {
        self.network_partners.iter().any(|p| p == policy)
    }
}

/// A hospital annotated with the coverage status for one
/// (policy, specialty) pair. Rebuilt on every classification pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedHospital {
    #[serde(flatten)]
    pub hospital: HospitalRecord,
    pub status: CoverageStatus,
}

impl ClassifiedHospital {
    pub fn id(&self) -> &str {
        &self.hospital.id
    }
}
