use actix_web::{post, web, Responder};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::modules::auth::application::domain::UserId;
use crate::modules::auth::application::ports::outgoing::AuthProviderError;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CompleteSignInRequest {
    pub token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteSignInResponse {
    pub session_token: String,
    pub user_id: UserId,
    pub email: String,
}

/// Redeem a sign-in link for a session token. Completing sign-in never
/// resumes an earlier publish attempt; the user re-invokes publish.
#[post("/api/auth/complete")]
pub async fn complete_sign_in_handler(
    body: web::Json<CompleteSignInRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.auth.complete_sign_in(body.token.trim()).await {
        Ok(signed_in) => ApiResponse::success(CompleteSignInResponse {
            session_token: signed_in.token,
            user_id: signed_in.session.user_id,
            email: signed_in.session.email,
        }),

        Err(AuthProviderError::LinkInvalid) => ApiResponse::unauthorized(
            "LINK_INVALID",
            "This sign-in link has expired or was already used",
        ),

        Err(err) => {
            error!("sign-in completion failed: {err}");
            ApiResponse::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::json;
    use uuid::Uuid;

    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::fakes::StaticAuthProvider;

    #[actix_web::test]
    async fn redeeming_a_valid_link_returns_a_session() {
        let user_id = Uuid::new_v4();
        let provider = StaticAuthProvider::redeemable(user_id, "ada@example.com", "tok-123");

        let app_state = TestAppStateBuilder::default().with_auth(provider).build();
        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .service(complete_sign_in_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/auth/complete")
            .set_json(json!({"token": "whatever"}))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["sessionToken"], "tok-123");
        assert_eq!(body["data"]["email"], "ada@example.com");
        assert_eq!(body["data"]["userId"], user_id.to_string());
    }

    #[actix_web::test]
    async fn spent_link_is_unauthorized() {
        let app_state = TestAppStateBuilder::default()
            .with_auth(StaticAuthProvider::signed_out())
            .build();
        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .service(complete_sign_in_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/auth/complete")
            .set_json(json!({"token": "spent"}))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "LINK_INVALID");
    }
}
