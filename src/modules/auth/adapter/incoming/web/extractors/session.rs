use std::future::Future;
use std::pin::Pin;

use actix_web::{dev::Payload, web, Error as ActixError, FromRequest, HttpRequest, HttpResponse};
use tracing::error;

use crate::modules::auth::application::domain::AuthSession;
use crate::shared::api::ApiResponse;
use crate::AppState;

fn create_api_error(response: HttpResponse) -> ActixError {
    actix_web::error::InternalError::from_response("", response).into()
}

fn extract_bearer_token(req: &HttpRequest) -> Option<String> {
    let header = req.headers().get("Authorization")?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// Authenticated caller. Rejects the request when the Authorization header
/// is missing or the session token does not resolve.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub AuthSession);

impl FromRequest for CurrentUser {
    type Error = ActixError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let state = req
                .app_data::<web::Data<AppState>>()
                .ok_or_else(|| create_api_error(ApiResponse::internal_error()))?;

            let token = extract_bearer_token(&req).ok_or_else(|| {
                create_api_error(ApiResponse::unauthorized(
                    "MISSING_AUTH_HEADER",
                    "Missing or invalid authorization header",
                ))
            })?;

            match state.auth.session_for_token(&token).await {
                Ok(Some(session)) => Ok(CurrentUser(session)),
                Ok(None) => Err(create_api_error(ApiResponse::unauthorized(
                    "INVALID_SESSION",
                    "Session is invalid or expired",
                ))),
                Err(err) => {
                    error!("session lookup failed: {err}");
                    Err(create_api_error(ApiResponse::internal_error()))
                }
            }
        })
    }
}

/// Optional caller identity for routes that branch on auth state instead
/// of requiring it (the publish pipeline's AwaitingAuth path). Extraction
/// itself never fails; an unreadable or unresolvable token is `None`.
#[derive(Debug, Clone)]
pub struct MaybeAuthenticated(pub Option<AuthSession>);

impl FromRequest for MaybeAuthenticated {
    type Error = ActixError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let Some(state) = req.app_data::<web::Data<AppState>>() else {
                return Ok(MaybeAuthenticated(None));
            };
            let Some(token) = extract_bearer_token(&req) else {
                return Ok(MaybeAuthenticated(None));
            };

            match state.auth.session_for_token(&token).await {
                Ok(session) => Ok(MaybeAuthenticated(session)),
                Err(err) => {
                    // Fail-closed: a broken auth backend reads as signed out.
                    error!("session lookup failed: {err}");
                    Ok(MaybeAuthenticated(None))
                }
            }
        })
    }
}
