use actix_web::{post, web, HttpRequest, Responder};
use serde::Serialize;
use tracing::error;

use crate::modules::auth::adapter::incoming::web::extractors::CurrentUser;
use crate::modules::media::application::domain::{validate_photo_upload, UploadPolicyError};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct UploadPhotoResponse {
    pub url: String,
}

/// Accept a raw image body and return its public URL. The caller drops
/// the URL into `PortfolioData.photo` or an image element; nothing else
/// references the object.
#[post("/api/media/photo")]
pub async fn upload_photo_handler(
    user: CurrentUser,
    req: HttpRequest,
    body: web::Bytes,
    data: web::Data<AppState>,
) -> impl Responder {
    let content_type = req
        .headers()
        .get("Content-Type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if let Err(err) = validate_photo_upload(&content_type, body.len()) {
        let code = match err {
            UploadPolicyError::UnsupportedContentType(_) => "UNSUPPORTED_CONTENT_TYPE",
            UploadPolicyError::TooLarge => "PHOTO_TOO_LARGE",
            UploadPolicyError::Empty => "EMPTY_BODY",
        };
        return ApiResponse::bad_request(code, &err.to_string());
    }

    match data
        .image_store
        .upload(user.0.user_id, "photo", &content_type, body.to_vec())
        .await
    {
        Ok(url) => ApiResponse::success(UploadPhotoResponse { url }),
        Err(err) => {
            error!("photo upload failed: {err}");
            ApiResponse::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};
    use uuid::Uuid;

    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::fakes::{StaticAuthProvider, StubImageStore};

    async fn call(
        store: StubImageStore,
        content_type: &str,
        body: Vec<u8>,
    ) -> actix_web::dev::ServiceResponse {
        let app_state = TestAppStateBuilder::default()
            .with_auth(StaticAuthProvider::signed_in(
                Uuid::new_v4(),
                "ada@example.com",
            ))
            .with_image_store(store)
            .build();
        let app = test::init_service(
            App::new().app_data(app_state).service(upload_photo_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/media/photo")
            .insert_header(("Authorization", "Bearer session-token"))
            .insert_header(("Content-Type", content_type))
            .set_payload(body)
            .to_request();

        test::call_service(&app, req).await
    }

    #[actix_web::test]
    async fn uploading_a_photo_returns_its_public_url() {
        let store = StubImageStore::ok("https://cdn.test/u/photo.png");

        let resp = call(store, "image/png", vec![1, 2, 3]).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["url"], "https://cdn.test/u/photo.png");
    }

    #[actix_web::test]
    async fn non_image_bodies_are_rejected_without_an_upload() {
        let store = StubImageStore::ok("https://cdn.test/u/photo.png");

        let resp = call(store.clone(), "text/html", b"<html>".to_vec()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "UNSUPPORTED_CONTENT_TYPE");
        assert_eq!(store.calls(), 0);
    }

    #[actix_web::test]
    async fn empty_bodies_are_rejected() {
        let resp = call(StubImageStore::ok("unused"), "image/png", vec![]).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "EMPTY_BODY");
    }

    #[actix_web::test]
    async fn storage_failures_are_internal_errors() {
        let resp = call(StubImageStore::failing(), "image/png", vec![1]).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
