use async_trait::async_trait;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{
    message::header::ContentType, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::modules::auth::application::ports::outgoing::SignInLinkMailer;

/// Transport seam so tests can swap the SMTP client for a fake.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: Message) -> Result<(), String>;
}

#[async_trait]
impl Mailer for AsyncSmtpTransport<Tokio1Executor> {
    async fn send(&self, email: Message) -> Result<(), String> {
        AsyncTransport::send(self, email)
            .await
            .map(|_resp| ())
            .map_err(|e| e.to_string())
    }
}

pub struct SmtpLinkMailer {
    mailer: Box<dyn Mailer>,
    from_email: String,
}

impl SmtpLinkMailer {
    pub fn new_with_mailer(mailer: Box<dyn Mailer>, from_email: &str) -> Self {
        Self {
            mailer,
            from_email: from_email.to_string(),
        }
    }

    pub fn new(
        smtp_server: &str,
        smtp_username: &str,
        smtp_password: &str,
        from_email: &str,
    ) -> Result<Self, String> {
        let creds = Credentials::new(smtp_username.to_string(), smtp_password.to_string());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(smtp_server)
            .map_err(|e| e.to_string())?
            .credentials(creds)
            .build();

        Ok(Self {
            mailer: Box::new(transport),
            from_email: from_email.to_string(),
        })
    }

    // Local/test constructor (Mailpit, MailHog, etc.)
    pub fn new_local(host: &str, port: u16, from_email: &str) -> Self {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
            .port(port)
            .build();

        Self {
            mailer: Box::new(transport),
            from_email: from_email.to_string(),
        }
    }
}

#[async_trait]
impl SignInLinkMailer for SmtpLinkMailer {
    async fn send_link(&self, to: &str, link: &str) -> Result<(), String> {
        let body = format!(
            "<p>Click the link below to sign in and publish your portfolio.</p>\
             <p><a href=\"{link}\">Sign in</a></p>\
             <p>The link is valid once, for 15 minutes.</p>"
        );

        let email = Message::builder()
            .from(self.from_email.parse().map_err(|e| format!("{e:?}"))?)
            .to(to.parse().map_err(|e| format!("{e:?}"))?)
            .subject("Your sign-in link")
            .header(ContentType::TEXT_HTML)
            .body(body)
            .map_err(|e| e.to_string())?;

        self.mailer.send(email).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct RecordingMailer {
        sent: Arc<Mutex<Vec<Message>>>,
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, email: Message) -> Result<(), String> {
            self.sent.lock().unwrap().push(email);
            Ok(())
        }
    }

    #[tokio::test]
    async fn link_email_is_addressed_and_contains_the_link() {
        let recorder = RecordingMailer::default();
        let mailer =
            SmtpLinkMailer::new_with_mailer(Box::new(recorder.clone()), "noreply@example.com");

        mailer
            .send_link("ada@example.com", "https://app.test/auth/complete?token=abc")
            .await
            .unwrap();

        let sent = recorder.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        let body = String::from_utf8_lossy(&sent[0].formatted()).to_string();
        assert!(body.contains("token=3Dabc") || body.contains("token=abc"));
    }

    #[tokio::test]
    async fn bad_recipient_is_an_error() {
        struct NeverMailer;

        #[async_trait]
        impl Mailer for NeverMailer {
            async fn send(&self, _email: Message) -> Result<(), String> {
                panic!("must not be reached");
            }
        }

        let mailer = SmtpLinkMailer::new_with_mailer(Box::new(NeverMailer), "noreply@example.com");
        let result = mailer.send_link("not-an-address", "https://app.test").await;

        assert!(result.is_err());
    }
}
