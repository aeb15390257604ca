use serde::{Deserialize, Serialize};
use uuid::Uuid;

//
// ──────────────────────────────────────────────────────────
// Free-form canvas primitives
// ──────────────────────────────────────────────────────────
//

/// Margin kept between an element's origin and the viewport edge so a
/// dragged element can always be grabbed again.
pub const MIN_DRAG_MARGIN: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Text,
    Image,
    Card,
    Button,
}

/// Sparse visual attributes. Which ones apply depends on the element kind;
/// the model does not police that, the renderer ignores what it cannot use.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementStyles {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasElement {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ElementKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub content: String,
    pub styles: ElementStyles,
}

/// Element as submitted by the editor, before the session assigns an id.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCanvasElement {
    #[serde(rename = "type")]
    pub kind: ElementKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub content: String,
    #[serde(default)]
    pub styles: ElementStyles,
}

/// Keyed merge for a single element. `styles` replaces the whole record
/// when present, matching the shallow-merge contract at element level.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasElementPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub content: Option<String>,
    pub styles: Option<ElementStyles>,
}

/// Canvas viewport dimensions at drag time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasViewport {
    pub width: f64,
    pub height: f64,
}

impl NewCanvasElement {
    pub fn into_element(self) -> CanvasElement {
        CanvasElement {
            id: Uuid::new_v4().to_string(),
            kind: self.kind,
            x: self.x,
            y: self.y,
            width: self.width.max(0.0),
            height: self.height.max(0.0),
            content: self.content,
            styles: self.styles,
        }
    }
}

impl CanvasElement {
    pub fn apply(&mut self, patch: CanvasElementPatch) {
        if let Some(x) = patch.x {
            self.x = x;
        }
        if let Some(y) = patch.y {
            self.y = y;
        }
        if let Some(width) = patch.width {
            self.width = width.max(0.0);
        }
        if let Some(height) = patch.height {
            self.height = height.max(0.0);
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(styles) = patch.styles {
            self.styles = styles;
        }
    }

    /// Drag-time clamp: the origin stays inside
    /// `[0, viewport - MIN_DRAG_MARGIN]` on both axes.
    pub fn move_within(&mut self, x: f64, y: f64, viewport: CanvasViewport) {
        self.x = clamp_axis(x, viewport.width);
        self.y = clamp_axis(y, viewport.height);
    }
}

fn clamp_axis(target: f64, extent: f64) -> f64 {
    let upper = (extent - MIN_DRAG_MARGIN).max(0.0);
    target.clamp(0.0, upper)
}
