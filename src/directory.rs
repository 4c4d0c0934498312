//! Hospital directory provider.
//!
//! The directory is loaded once at startup, either from the bundled
//! Hyderabad dataset or from a JSON file, and never refreshed.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use crate::models::HospitalRecord;

const BUNDLED_DIRECTORY: &str = include_str!("../resources/hospitals.json");

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Cannot read directory file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Malformed directory JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate hospital id: {0}")]
    DuplicateId(String),
}

/// Read-only hospital directory, cheap to clone.
#[derive(Debug, Clone)]
pub struct HospitalDirectory {
    records: Arc<[HospitalRecord]>,
}

impl HospitalDirectory {
    /// Build a directory, rejecting duplicate ids.
    pub fn new(records: Vec<HospitalRecord>) -> Result<Self, DirectoryError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id.as_str()) {
                return Err(DirectoryError::DuplicateId(record.id.clone()));
            }
        }
        Ok(Self {
            records: records.into(),
        })
    }

    pub fn from_json(json: &str) -> Result<Self, DirectoryError> {
        let records: Vec<HospitalRecord> = serde_json::from_str(json)?;
        Self::new(records)
    }

    pub fn load_file(path: &Path) -> Result<Self, DirectoryError> {
        let json = std::fs::read_to_string(path).map_err(|source| DirectoryError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let directory = Self::from_json(&json)?;
        tracing::info!(
            path = %path.display(),
            hospitals = directory.len(),
            "Loaded hospital directory from file"
        );
        Ok(directory)
    }

    /// The dataset shipped with the binary.
    pub fn bundled() -> Result<Self, DirectoryError> {
        Self::from_json(BUNDLED_DIRECTORY)
    }

    /// Load from `path` when given, otherwise the bundled dataset.
    pub fn load(path: Option<&Path>) -> Result<Self, DirectoryError> {
        match path {
            Some(path) => Self::load_file(path),
            None => Self::bundled(),
        }
    }

    pub fn records(&self) -> &[HospitalRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
