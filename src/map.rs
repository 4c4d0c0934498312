//! Map projection of the ranked hospital list.
//!
//! Hospitals without a usable location stay in the list view but never
//! reach the map renderer; the renderer faults on non-finite coordinates.

use serde::Serialize;

use crate::models::{ClassifiedHospital, Coordinates, CoverageStatus, HospitalRecord};

/// Hyderabad city centre.
pub const DEFAULT_CENTER: Coordinates = Coordinates {
    lat: 17.3850,
    lng: 78.4867,
};
pub const DEFAULT_ZOOM: u8 = 12;
/// Zoom used when the map flies to a focused hospital.
pub const FOCUS_ZOOM: u8 = 14;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub id: String,
    pub name: String,
    pub position: Coordinates,
    pub status: CoverageStatus,
    pub highlighted: bool,
}

/// Map viewport instructions for the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub markers: Vec<MapMarker>,
    pub default_center: Coordinates,
    pub default_zoom: u8,
    /// Where to fly to, if anything is focused.
    pub focus: Option<Coordinates>,
    pub focus_zoom: u8,
}

pub fn has_valid_location(record: &HospitalRecord) -> bool {
    valid_location(record).is_some()
}

fn valid_location(record: &HospitalRecord) -> Option<Coordinates> {
    record.location.filter(Coordinates::is_finite)
}

/// Markers for every mappable hospital, in ranked order.
pub fn map_markers(ranked: &[ClassifiedHospital], hovered_id: Option<&str>) -> Vec<MapMarker> {
    ranked
        .iter()
        .filter_map(|h| {
            let position = valid_location(&h.hospital)?;
            Some(MapMarker {
                id: h.hospital.id.clone(),
                name: h.hospital.name.clone(),
                position,
                status: h.status,
                highlighted: hovered_id == Some(h.hospital.id.as_str()),
            })
        })
        .collect()
}

/// Centre to fly to: the selected hospital, else the hovered one.
/// Unusable coordinates fall through to the next candidate.
pub fn active_center(
    ranked: &[ClassifiedHospital],
    selected: Option<&ClassifiedHospital>,
    hovered_id: Option<&str>,
) -> Option<Coordinates> {
    if let Some(center) = selected.and_then(|h| valid_location(&h.hospital)) {
        return Some(center);
    }
    let hovered_id = hovered_id?;
    ranked
        .iter()
        .find(|h| h.hospital.id == hovered_id)
        .and_then(|h| valid_location(&h.hospital))
}

pub fn map_view(
    ranked: &[ClassifiedHospital],
    selected: Option<&ClassifiedHospital>,
    hovered_id: Option<&str>,
) -> MapView {
    MapView {
        markers: map_markers(ranked, hovered_id),
        default_center: DEFAULT_CENTER,
        default_zoom: DEFAULT_ZOOM,
        focus: active_center(ranked, selected, hovered_id),
        focus_zoom: FOCUS_ZOOM,
    }
}
