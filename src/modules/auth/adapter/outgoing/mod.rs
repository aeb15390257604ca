mod email_link_auth_redis;
mod smtp_link_mailer;

pub use email_link_auth_redis::EmailLinkAuthRedis;
pub use smtp_link_mailer::{Mailer, SmtpLinkMailer};
