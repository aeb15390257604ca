use serde::{Deserialize, Serialize};

use super::canvas::CanvasElement;
use super::portfolio::PortfolioData;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorMode {
    Template,
    Canvas,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomColors {
    pub primary: String,
    pub secondary: String,
    pub background: String,
    pub text: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomColorsPatch {
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub background: Option<String>,
    pub text: Option<String>,
}

impl CustomColors {
    pub fn apply(&mut self, patch: CustomColorsPatch) {
        if let Some(primary) = patch.primary {
            self.primary = primary;
        }
        if let Some(secondary) = patch.secondary {
            self.secondary = secondary;
        }
        if let Some(background) = patch.background {
            self.background = background;
        }
        if let Some(text) = patch.text {
            self.text = text;
        }
    }
}

/// The editing-session aggregate. Exactly one live value per session,
/// owned by `EditorSession`; everything handed out is a deep copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorState {
    pub mode: EditorMode,
    pub selected_template: Option<String>,
    pub portfolio_data: PortfolioData,
    pub canvas_elements: Vec<CanvasElement>,
    pub custom_colors: CustomColors,
    pub custom_font: String,
}
