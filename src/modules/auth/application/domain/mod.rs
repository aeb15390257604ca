mod entities;

pub use entities::{AuthSession, SignedInSession, UserId};
