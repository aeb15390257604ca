use actix_web::{post, web, Responder};
use serde::Deserialize;
use tracing::error;

use crate::modules::auth::adapter::incoming::web::extractors::MaybeAuthenticated;
use crate::modules::editor::application::domain::EditorState;
use crate::modules::publish::application::ports::incoming::use_cases::{
    PublishCommand, PublishCommandError, PublishError,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishRequest {
    pub username: String,
    pub snapshot: EditorState,
}

/// Publish the submitted editor snapshot under a username.
///
/// Auth is deliberately optional at the extractor: a signed-out caller
/// gets a clean 401 from the pipeline itself, with nothing consumed, and
/// simply retries after signing in.
#[post("/api/portfolios/publish")]
pub async fn publish_portfolio_handler(
    auth: MaybeAuthenticated,
    body: web::Json<PublishRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let body = body.into_inner();

    let command = match PublishCommand::new(&body.username, body.snapshot) {
        Ok(command) => command,
        Err(PublishCommandError::EmptyUsername) => {
            return ApiResponse::bad_request("USERNAME_REQUIRED", "Username is required");
        }
        Err(err @ PublishCommandError::UsernameTooLong) => {
            return ApiResponse::bad_request("USERNAME_TOO_LONG", &err.to_string());
        }
    };

    match data.publish_portfolio.execute(auth.0, command).await {
        Ok(receipt) => ApiResponse::success(receipt),

        Err(PublishError::AuthRequired) => {
            ApiResponse::unauthorized("AUTH_REQUIRED", "Sign in to publish your portfolio")
        }

        Err(PublishError::QuotaExceeded) => ApiResponse::forbidden(
            "DEPLOY_LIMIT_REACHED",
            "Daily deployment limit reached. Try again tomorrow.",
        ),

        Err(PublishError::UsernameTaken) => ApiResponse::conflict(
            "USERNAME_TAKEN",
            "This username is already taken by another user",
        ),

        Err(err @ (PublishError::QuotaNotRecorded | PublishError::StorageFailure(_))) => {
            error!("publish failed: {err}");
            ApiResponse::internal_error()
        }
    }
}
