//! Persisted session record.
//!
//! The record is a flat JSON object:
//!
//! ```json
//! {
//!   "assignments": { "A1": "S1", "B3": "S7" },
//!   "selectedSampleIds": ["S1", "S2"],
//!   "startWell": "A1"
//! }
//! ```
//!
//! Reading is lenient. Each field is recovered on its own and bad entries
//! inside `assignments` are skipped, so a damaged record loses as little as
//! possible. Unreadable input yields the empty default.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use crate::constants::STORAGE_KEY;
use crate::model::{SampleId, WellId};

/// Session state handed to and received from the storage collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    /// Well to sample assignments
    pub assignments: BTreeMap<WellId, SampleId>,
    /// Selected sample ids
    pub selected_sample_ids: Vec<SampleId>,
    /// Well where full-plate fills start
    pub start_well: WellId,
}

impl PersistedState {
    /// Serialize the record to compact JSON.
    pub fn to_json(&self) -> Result<String, PersistError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Recover a record from JSON, ignoring anything absent or malformed.
    pub fn from_json_lenient(json: &str) -> Self {
        let value: Value = match serde_json::from_str(json) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Failed to parse persisted session, starting empty: {}", e);
                return Self::default();
            }
        };
        let Some(fields) = value.as_object() else {
            log::warn!("Persisted session is not a JSON object, starting empty");
            return Self::default();
        };

        let mut state = Self::default();

        if let Some(assignments) = fields.get("assignments").and_then(Value::as_object) {
            for (well, sample) in assignments {
                match (WellId::parse(well), sample.as_str()) {
                    (Ok(well), Some(sample)) => {
                        state.assignments.insert(well, SampleId::from(sample));
                    }
                    _ => log::warn!("Skipping persisted assignment {} -> {}", well, sample),
                }
            }
        }

        let selected = fields
            .get("selectedSampleIds")
            .or_else(|| fields.get("selectedIds"))
            .and_then(Value::as_array);
        if let Some(selected) = selected {
            state.selected_sample_ids = selected
                .iter()
                .filter_map(Value::as_str)
                .map(SampleId::from)
                .collect();
        }

        match fields.get("startWell").and_then(Value::as_str).map(WellId::parse) {
            Some(Ok(well)) => state.start_well = well,
            Some(Err(e)) => log::warn!("Ignoring persisted start well: {}", e),
            None => {}
        }

        state
    }

    /// Default file name, derived from the storage key.
    pub fn default_filename() -> String {
        format!("{}.json", STORAGE_KEY.replace(':', "-"))
    }

    /// Get the default file path for the persisted session.
    /// Returns None on WASM (no filesystem access).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Option<std::path::PathBuf> {
        dirs::data_dir().map(|dir| dir.join("plate-editor").join(Self::default_filename()))
    }

    /// Load a record from `path`. A missing or unreadable file gives the default.
    pub fn load_from_path(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                let state = Self::from_json_lenient(&json);
                log::info!("📂 Loaded session from {:?}", path);
                state
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No persisted session at {:?}", path);
                Self::default()
            }
            Err(e) => {
                log::warn!("Failed to read persisted session {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Write the record to `path`, creating parent directories as needed.
    pub fn save_to_path(&self, path: &Path) -> Result<(), PersistError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)?;
        log::debug!("💾 Saved session to {:?}", path);
        Ok(())
    }
}

/// Errors that can occur when writing the persisted session.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    /// JSON serialization error
    #[error("Failed to serialize session: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error when writing the record
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
