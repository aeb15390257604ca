use actix_web::{get, web, Responder};
use serde::Serialize;

use crate::modules::auth::adapter::incoming::web::extractors::CurrentUser;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemainingDeploysResponse {
    pub remaining: u32,
    pub can_deploy_today: bool,
}

/// Today's leftover deployment allowance for the signed-in user. Reads 0
/// when the quota backend is unreachable; the UI disables the button
/// rather than inviting a doomed publish.
#[get("/api/deployments/remaining")]
pub async fn remaining_deploys_handler(
    user: CurrentUser,
    data: web::Data<AppState>,
) -> impl Responder {
    let remaining = data.remaining_deploys.execute(user.0.user_id).await;

    ApiResponse::success(RemainingDeploysResponse {
        remaining,
        can_deploy_today: remaining > 0,
    })
}
