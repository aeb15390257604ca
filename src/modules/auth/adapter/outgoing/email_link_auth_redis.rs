use std::sync::Arc;

use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Pool};
use email_address::EmailAddress;
use uuid::Uuid;

use crate::modules::auth::application::domain::{AuthSession, SignedInSession, UserId};
use crate::modules::auth::application::ports::outgoing::{
    AuthProvider, AuthProviderError, SignInLinkMailer,
};

/// Redis-backed email-link authentication.
///
/// ## Redis data model
///
/// ```text
/// auth:signin:{link_token}  -> email        TTL = LINK_TTL_SECS
/// auth:user:{email}         -> user uuid    no TTL (stable identity)
/// auth:session:{token}      -> json session TTL = SESSION_TTL_SECS
/// ```
///
/// Link tokens are consumed with GETDEL, so a link can be redeemed exactly
/// once. User ids are allocated lazily on first sign-in with SETNX; every
/// later sign-in for the same address resolves the same id. Redis TTL is
/// the only cleanup mechanism.
#[derive(Clone)]
pub struct EmailLinkAuthRedis {
    pool: Arc<Pool>,
    mailer: Arc<dyn SignInLinkMailer>,
    /// Base URL the emailed link points back into.
    app_base_url: String,
}

const LINK_TTL_SECS: u64 = 15 * 60;
const SESSION_TTL_SECS: u64 = 30 * 24 * 60 * 60;

impl EmailLinkAuthRedis {
    pub fn new(pool: Arc<Pool>, mailer: Arc<dyn SignInLinkMailer>, app_base_url: String) -> Self {
        Self {
            pool,
            mailer,
            app_base_url: app_base_url.trim_end_matches('/').to_string(),
        }
    }

    fn link_key(token: &str) -> String {
        format!("auth:signin:{token}")
    }

    fn user_key(email: &str) -> String {
        format!("auth:user:{email}")
    }

    fn session_key(token: &str) -> String {
        format!("auth:session:{token}")
    }

    async fn get_conn(&self) -> Result<deadpool_redis::Connection, AuthProviderError> {
        self.pool
            .get()
            .await
            .map_err(|e| AuthProviderError::Backend(format!("Pool error: {e}")))
    }

    /// Stable user id per email: first writer wins, everyone reads the
    /// winner back.
    async fn user_id_for_email(
        &self,
        conn: &mut deadpool_redis::Connection,
        email: &str,
    ) -> Result<UserId, AuthProviderError> {
        let key = Self::user_key(email);
        let candidate = Uuid::new_v4().to_string();

        let _: bool = conn
            .set_nx(&key, &candidate)
            .await
            .map_err(|e| AuthProviderError::Backend(e.to_string()))?;

        let stored: String = conn
            .get(&key)
            .await
            .map_err(|e| AuthProviderError::Backend(e.to_string()))?;

        let uuid = Uuid::parse_str(&stored)
            .map_err(|e| AuthProviderError::Backend(format!("Corrupt user id: {e}")))?;
        Ok(UserId::from(uuid))
    }
}

#[async_trait]
impl AuthProvider for EmailLinkAuthRedis {
    async fn session_for_token(
        &self,
        token: &str,
    ) -> Result<Option<AuthSession>, AuthProviderError> {
        let mut conn = self.get_conn().await?;

        let raw: Option<String> = conn
            .get(Self::session_key(token))
            .await
            .map_err(|e| AuthProviderError::Backend(e.to_string()))?;

        match raw {
            None => Ok(None),
            Some(raw) => {
                let session = serde_json::from_str(&raw)
                    .map_err(|e| AuthProviderError::Backend(format!("Corrupt session: {e}")))?;
                Ok(Some(session))
            }
        }
    }

    async fn request_sign_in_link(&self, email: &str) -> Result<(), AuthProviderError> {
        if !EmailAddress::is_valid(email) {
            return Err(AuthProviderError::InvalidEmail);
        }

        let token = Uuid::new_v4().simple().to_string();
        let mut conn = self.get_conn().await?;

        let _: () = conn
            .set_ex(Self::link_key(&token), email, LINK_TTL_SECS)
            .await
            .map_err(|e| AuthProviderError::Backend(e.to_string()))?;

        let link = format!("{}/auth/complete?token={}", self.app_base_url, token);
        self.mailer
            .send_link(email, &link)
            .await
            .map_err(AuthProviderError::MailDelivery)
    }

    async fn complete_sign_in(
        &self,
        link_token: &str,
    ) -> Result<SignedInSession, AuthProviderError> {
        let mut conn = self.get_conn().await?;

        // Single-use: GETDEL consumes the link atomically.
        let email: Option<String> = deadpool_redis::redis::cmd("GETDEL")
            .arg(Self::link_key(link_token))
            .query_async(&mut conn)
            .await
            .map_err(|e| AuthProviderError::Backend(e.to_string()))?;

        let email = email.ok_or(AuthProviderError::LinkInvalid)?;
        let user_id = self.user_id_for_email(&mut conn, &email).await?;

        let session = AuthSession { user_id, email };
        let token = Uuid::new_v4().simple().to_string();
        let raw = serde_json::to_string(&session)
            .map_err(|e| AuthProviderError::Backend(e.to_string()))?;

        let _: () = conn
            .set_ex(Self::session_key(&token), raw, SESSION_TTL_SECS)
            .await
            .map_err(|e| AuthProviderError::Backend(e.to_string()))?;

        Ok(SignedInSession { token, session })
    }
}
