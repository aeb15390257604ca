use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::modules::editor::application::domain::EditorState;
use crate::modules::editor::application::ports::outgoing::{DraftStore, DraftStoreError};

/// File-backed draft store: one JSON document per profile directory, the
/// local analogue of the browser's keyed storage slot.
#[derive(Debug, Clone)]
pub struct FileDraftStore {
    path: PathBuf,
}

/// Storage key carried over from the original profile slot name.
const DRAFT_FILE_NAME: &str = "codeless-portfolio-draft.json";

impl FileDraftStore {
    pub fn new(profile_dir: impl Into<PathBuf>) -> Self {
        Self {
            path: profile_dir.into().join(DRAFT_FILE_NAME),
        }
    }
}

impl DraftStore for FileDraftStore {
    fn load(&self) -> Result<Option<EditorState>, DraftStoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(DraftStoreError::Storage(err.to_string())),
        };

        let state = serde_json::from_str(&raw)
            .map_err(|err| DraftStoreError::Corrupt(err.to_string()))?;
        Ok(Some(state))
    }

    fn save(&self, state: &EditorState) -> Result<(), DraftStoreError> {
        let raw = serde_json::to_string(state)
            .map_err(|err| DraftStoreError::Storage(err.to_string()))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| DraftStoreError::Storage(err.to_string()))?;
        }
        fs::write(&self.path, raw).map_err(|err| DraftStoreError::Storage(err.to_string()))
    }

    fn clear(&self) -> Result<(), DraftStoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(DraftStoreError::Storage(err.to_string())),
        }
    }
}
