mod complete_sign_in;
mod request_sign_in_link;

pub use complete_sign_in::complete_sign_in_handler;
pub use request_sign_in_link::request_sign_in_link_handler;
