use actix_web::{post, web, Responder};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::modules::auth::application::ports::outgoing::AuthProviderError;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SignInLinkRequest {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct SignInLinkResponse {
    pub message: &'static str,
}

/// Start the email-link flow. The client keeps the entered address locally
/// so it can auto-complete when the link is followed back into the app.
#[post("/api/auth/sign-in-link")]
pub async fn request_sign_in_link_handler(
    body: web::Json<SignInLinkRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let email = body.email.trim();

    match data.auth.request_sign_in_link(email).await {
        Ok(()) => ApiResponse::success(SignInLinkResponse {
            message: "Check your email: the sign-in link is valid once, for 15 minutes.",
        }),

        Err(AuthProviderError::InvalidEmail) => {
            ApiResponse::bad_request("INVALID_EMAIL", "Enter a valid email address")
        }

        Err(err) => {
            error!("sign-in link request failed: {err}");
            ApiResponse::internal_error()
        }
    }
}
