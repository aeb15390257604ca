use actix_web::{get, web, Responder};
use tracing::error;

use crate::modules::public_site::application::ports::incoming::use_cases::ResolveError;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Public, unauthenticated read of a published portfolio.
#[get("/api/public/portfolios/{username}")]
pub async fn get_public_portfolio_handler(
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> impl Responder {
    let username = path.into_inner();

    match data.resolve_public_portfolio.execute(&username).await {
        Ok(view) => ApiResponse::success(view),

        Err(ResolveError::NotFound) => ApiResponse::not_found(
            "PORTFOLIO_NOT_FOUND",
            "No published portfolio under that username",
        ),

        Err(err) => {
            error!("public lookup for '{username}' failed: {err}");
            ApiResponse::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};
    use chrono::Utc;

    use crate::modules::editor::application::domain::default_editor_state;
    use crate::modules::public_site::application::ports::incoming::use_cases::PublicPortfolioView;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::fakes::StubResolvePublicPortfolio;

    async fn call(resolve: StubResolvePublicPortfolio, path: &str) -> actix_web::dev::ServiceResponse {
        let app_state = TestAppStateBuilder::default().with_resolve(resolve).build();
        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .service(get_public_portfolio_handler),
        )
        .await;

        let req = test::TestRequest::get().uri(path).to_request();
        test::call_service(&app, req).await
    }

    #[actix_web::test]
    async fn serves_a_published_portfolio() {
        let view = PublicPortfolioView {
            username: "ada".to_string(),
            snapshot: default_editor_state(),
            updated_at: Utc::now(),
        };

        let resp = call(
            StubResolvePublicPortfolio::ok(view),
            "/api/public/portfolios/ada",
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["username"], "ada");
        assert_eq!(body["data"]["snapshot"]["mode"], "template");
    }

    #[actix_web::test]
    async fn unknown_username_is_not_found() {
        let resp = call(
            StubResolvePublicPortfolio::err(ResolveError::NotFound),
            "/api/public/portfolios/nobody",
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "PORTFOLIO_NOT_FOUND");
    }

    #[actix_web::test]
    async fn backend_failure_is_an_internal_error() {
        let resp = call(
            StubResolvePublicPortfolio::err(ResolveError::RepositoryError("down".into())),
            "/api/public/portfolios/ada",
        )
        .await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
