use crate::modules::editor::application::domain::EditorState;

//
// ──────────────────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, thiserror::Error)]
pub enum DraftStoreError {
    /// Stored draft exists but does not parse back into an `EditorState`.
    #[error("Stored draft is corrupt: {0}")]
    Corrupt(String),

    #[error("Draft storage error: {0}")]
    Storage(String),
}

//
// ──────────────────────────────────────────────────────────
// Port (browser-localStorage analogue)
// ──────────────────────────────────────────────────────────
//
// Single-writer, single-reader within one session; two concurrent sessions
// against the same store clobber each other's draft. Known limitation,
// inherited from the storage model this replaces.
//

pub trait DraftStore: Send + Sync {
    /// Read the stored draft. `Ok(None)` when no draft exists.
    fn load(&self) -> Result<Option<EditorState>, DraftStoreError>;

    /// Write the full snapshot. Callers treat failures as best-effort.
    fn save(&self, state: &EditorState) -> Result<(), DraftStoreError>;

    /// Remove the stored draft.
    fn clear(&self) -> Result<(), DraftStoreError>;
}
