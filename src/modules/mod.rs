pub mod auth;
pub mod editor;
pub mod media;
pub mod public_site;
pub mod publish;
