mod canvas;
mod editor_state;
mod portfolio;
mod templates;

pub use canvas::{
    CanvasElement, CanvasElementPatch, CanvasViewport, ElementKind, ElementStyles,
    NewCanvasElement, MIN_DRAG_MARGIN,
};
pub use editor_state::{CustomColors, CustomColorsPatch, EditorMode, EditorState};
pub use portfolio::{
    Education, Experience, PortfolioData, PortfolioDataPatch, PortfolioSection, Project,
    SectionKind, SocialLink, SocialPlatform, ONGOING_END_YEAR,
};
pub use templates::{
    default_editor_state, default_portfolio_data, template_catalog, TemplateConfig, TemplateLayout,
};
