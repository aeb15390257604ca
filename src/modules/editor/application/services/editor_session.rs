use std::sync::Arc;

use tracing::debug;

use crate::modules::editor::application::domain::{
    default_editor_state, CanvasElementPatch, CanvasViewport, CustomColorsPatch, EditorMode,
    EditorState, NewCanvasElement, PortfolioDataPatch,
};
use crate::modules::editor::application::ports::outgoing::DraftStore;

//
// ──────────────────────────────────────────────────────────
// Editor session (single source of truth)
// ──────────────────────────────────────────────────────────
//

/// Owns the one live `EditorState` of an editing session.
///
/// Every mutation is a synchronous transformation of the owned state
/// followed by a best-effort write-through of the full snapshot to the
/// draft store. Store failures never surface to the caller; editing must
/// not block on persistence.
///
/// A session seeded from externally supplied data (the public viewing
/// path) carries no store and never persists.
pub struct EditorSession {
    state: EditorState,
    store: Option<Arc<dyn DraftStore>>,
}

impl EditorSession {
    /// Open a session backed by a draft store: resume the stored draft
    /// when present and parseable, otherwise start from a fresh default
    /// blueprint copy. A corrupt draft is logged and replaced, never an
    /// error.
    pub fn open(store: Arc<dyn DraftStore>) -> Self {
        let state = match store.load() {
            Ok(Some(draft)) => draft,
            Ok(None) => default_editor_state(),
            Err(err) => {
                debug!("discarding unreadable draft: {err}");
                default_editor_state()
            }
        };

        Self {
            state,
            store: Some(store),
        }
    }

    /// Read-only session over a published snapshot, taken whole so a
    /// canvas-mode portfolio keeps its elements and theme. The snapshot is
    /// owned (deep copy by construction); nothing is ever persisted from
    /// this session.
    pub fn read_only(snapshot: EditorState) -> Self {
        Self {
            state: snapshot,
            store: None,
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// Deep copy of the current state, for publishing or display.
    pub fn snapshot(&self) -> EditorState {
        self.state.clone()
    }

    pub fn set_mode(&mut self, mode: EditorMode) {
        self.state.mode = mode;
        self.persist();
    }

    pub fn select_template(&mut self, template_id: &str) {
        self.state.selected_template = Some(template_id.to_string());
        self.persist();
    }

    pub fn update_portfolio_data(&mut self, patch: PortfolioDataPatch) {
        self.state.portfolio_data.apply(patch);
        self.persist();
    }

    /// Keyed update of one social link's URL; platform stays fixed.
    pub fn update_social_link_url(&mut self, id: &str, url: String) -> bool {
        let updated = self.state.portfolio_data.update_social_link_url(id, url);
        if updated {
            self.persist();
        }
        updated
    }

    pub fn update_custom_colors(&mut self, patch: CustomColorsPatch) {
        self.state.custom_colors.apply(patch);
        self.persist();
    }

    pub fn update_custom_font(&mut self, font: &str) {
        self.state.custom_font = font.to_string();
        self.persist();
    }

    /// Append a new element under a freshly generated id, unique among all
    /// live elements. Returns the id.
    pub fn add_canvas_element(&mut self, element: NewCanvasElement) -> String {
        let element = element.into_element();
        let id = element.id.clone();
        self.state.canvas_elements.push(element);
        self.persist();
        id
    }

    /// Keyed merge into the element with the given id. Returns false (and
    /// persists nothing) when no element matches.
    pub fn update_canvas_element(&mut self, id: &str, patch: CanvasElementPatch) -> bool {
        match self.state.canvas_elements.iter_mut().find(|e| e.id == id) {
            Some(element) => {
                element.apply(patch);
                self.persist();
                true
            }
            None => false,
        }
    }

    /// Drag an element; the stored position is clamped to the viewport.
    pub fn move_canvas_element(&mut self, id: &str, x: f64, y: f64, viewport: CanvasViewport) -> bool {
        match self.state.canvas_elements.iter_mut().find(|e| e.id == id) {
            Some(element) => {
                element.move_within(x, y, viewport);
                self.persist();
                true
            }
            None => false,
        }
    }

    pub fn remove_canvas_element(&mut self, id: &str) -> bool {
        let before = self.state.canvas_elements.len();
        self.state.canvas_elements.retain(|e| e.id != id);
        let removed = self.state.canvas_elements.len() != before;
        if removed {
            self.persist();
        }
        removed
    }

    /// Discard the live snapshot and the persisted draft, reseeding from a
    /// fresh blueprint copy.
    pub fn reset(&mut self) {
        if let Some(store) = &self.store {
            if let Err(err) = store.clear() {
                debug!("failed to clear draft: {err}");
            }
        }
        self.state = default_editor_state();
        self.persist();
    }

    fn persist(&self) {
        let Some(store) = &self.store else {
            return;
        };
        if let Err(err) = store.save(&self.state) {
            debug!("draft write-through failed: {err}");
        }
    }
}
