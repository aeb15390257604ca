pub mod health;
pub mod modules;
pub mod shared;

#[cfg(test)]
mod tests;

use std::env;
use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, App, HttpServer};
use deadpool_redis::{Config, Runtime};
use sea_orm::{ConnectOptions, Database};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::modules::auth::adapter::outgoing::{EmailLinkAuthRedis, SmtpLinkMailer};
use crate::modules::auth::application::ports::outgoing::AuthProvider;
use crate::modules::media::adapter::outgoing::GcsImageStore;
use crate::modules::media::application::ports::outgoing::ImageStore;
use crate::modules::public_site::application::ports::incoming::use_cases::ResolvePublicPortfolioUseCase;
use crate::modules::public_site::application::services::PublicSiteService;
use crate::modules::publish::adapter::outgoing::{PortfolioRepositoryPostgres, QuotaStoreRedis};
use crate::modules::publish::application::ports::incoming::use_cases::{
    PublishPortfolioUseCase, RemainingDeploysUseCase,
};
use crate::modules::publish::application::services::{
    daily_limit_from, DeploymentQuota, PublishService,
};

#[derive(Clone)]
pub struct AppState {
    pub publish_portfolio: Arc<dyn PublishPortfolioUseCase>,
    pub remaining_deploys: Arc<dyn RemainingDeploysUseCase>,
    pub resolve_public_portfolio: Arc<dyn ResolvePublicPortfolioUseCase>,
    pub auth: Arc<dyn AuthProvider>,
    pub image_store: Arc<dyn ImageStore>,
}

#[actix_web::main]
async fn start() -> std::io::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting application...");

    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("install rustls ring provider");

    // Environment variable loading
    let rust_env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());

    // Try .env.{environment} first, then fall back to .env
    let env_file = format!(".env.{}", rust_env);
    if dotenvy::from_filename(&env_file).is_err() {
        dotenvy::dotenv().ok();
    }

    let db_url = env::var("DATABASE_URL").expect("DATABASE_URL is not set in .env file");
    let host = env::var("HOST").expect("HOST is not set in .env file");
    let port = env::var("PORT").expect("PORT is not set in .env file");
    let redis_url = env::var("REDIS_URL").expect("REDIS_URL is not set in .env file");

    // Where published portfolios are served from, e.g. https://folio.example
    let public_base_url =
        env::var("PUBLIC_BASE_URL").expect("PUBLIC_BASE_URL is not set in .env file");
    // Where sign-in links point back to, e.g. https://app.folio.example
    let app_base_url = env::var("APP_BASE_URL").expect("APP_BASE_URL is not set in .env file");

    // SMTP SETUPS
    let from_email = env::var("EMAIL_FROM").expect("EMAIL_FROM not set");
    let link_mailer = if rust_env == "test" {
        // Local Mailpit
        let smtp_host = env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".to_string());
        let smtp_port: u16 = env::var("SMTP_PORT")
            .unwrap_or_else(|_| "1025".to_string())
            .parse()
            .expect("Invalid SMTP_PORT");

        SmtpLinkMailer::new_local(&smtp_host, smtp_port, &from_email)
    } else {
        // Production SMTP
        let smtp_server = env::var("SMTP_SERVER").expect("SMTP_SERVER not set");
        let smtp_user = env::var("SMTP_USERNAME").expect("SMTP_USERNAME not set");
        let smtp_pass = env::var("SMTP_PASSWORD").expect("SMTP_PASSWORD not set");

        SmtpLinkMailer::new(&smtp_server, &smtp_user, &smtp_pass, &from_email)
            .expect("Failed to build SMTP transport")
    };

    let server_url = format!("{host}:{port}");
    println!("Server run on: {}", server_url);

    // Database connection
    let mut opt = ConnectOptions::new(db_url);
    opt.max_connections(50)
        .min_connections(10)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(false);

    let conn = Database::connect(opt)
        .await
        .expect("Failed to connect to database");

    let db_arc = Arc::new(conn);

    // Redis connection
    let redis_pool = Config::from_url(&redis_url)
        .create_pool(Some(Runtime::Tokio1))
        .expect("Failed to create Redis pool");

    let redis_arc = Arc::new(redis_pool);

    // Adapters and services
    let auth_provider = EmailLinkAuthRedis::new(
        Arc::clone(&redis_arc),
        Arc::new(link_mailer),
        app_base_url,
    );

    let daily_deploy_limit = daily_limit_from(env::var("DAILY_DEPLOY_LIMIT").ok());

    let quota = DeploymentQuota::new(
        QuotaStoreRedis::new(Arc::clone(&redis_arc)),
        daily_deploy_limit,
    );
    let portfolio_repo = PortfolioRepositoryPostgres::new(Arc::clone(&db_arc));

    let publish_service =
        PublishService::new(quota.clone(), portfolio_repo.clone(), public_base_url);
    let resolve_service = PublicSiteService::new(portfolio_repo);

    let state = AppState {
        publish_portfolio: Arc::new(publish_service),
        remaining_deploys: Arc::new(quota),
        resolve_public_portfolio: Arc::new(resolve_service),
        auth: Arc::new(auth_provider),
        image_store: Arc::new(GcsImageStore::new()),
    };

    let db_for_server = Arc::clone(&db_arc);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(Arc::clone(&db_for_server)))
            .app_data(web::Data::new(Arc::clone(&redis_arc)))
            .app_data(crate::shared::api::custom_json_config())
            .configure(init_routes)
    })
    .bind(server_url)?
    .run()
    .await
}

fn init_routes(cfg: &mut web::ServiceConfig) {
    // Health
    cfg.service(crate::health::health);
    cfg.service(crate::health::readiness);
    // Auth
    cfg.service(crate::modules::auth::adapter::incoming::web::routes::request_sign_in_link_handler);
    cfg.service(crate::modules::auth::adapter::incoming::web::routes::complete_sign_in_handler);
    // Publish
    cfg.service(crate::modules::publish::adapter::incoming::web::routes::publish_portfolio_handler);
    cfg.service(crate::modules::publish::adapter::incoming::web::routes::remaining_deploys_handler);
    // Public site
    cfg.service(
        crate::modules::public_site::adapter::incoming::web::routes::get_public_portfolio_handler,
    );
    // Media
    cfg.service(crate::modules::media::adapter::incoming::web::routes::upload_photo_handler);
}

fn main() {
    if let Err(e) = start() {
        eprintln!("Error starting app: {e}");
    }
}
