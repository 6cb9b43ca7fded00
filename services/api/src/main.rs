use std::time::Duration;

use axum::http::HeaderValue;
use sea_orm::Database;
use tracing::info;

use mentpat_api::config::ApiConfig;
use mentpat_api::infra::mail::SmtpMailer;
use mentpat_api::infra::media::CloudinaryMediaStore;
use mentpat_api::infra::sweeper::spawn_otp_sweeper;
use mentpat_api::router::{HttpOptions, build_router};
use mentpat_api::state::{AppState, DbBackend};
use mentpat_auth_types::token::TokenKeys;
use mentpat_core::config::Config;
use mentpat_core::tracing::init_tracing;

const OTP_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() {
    init_tracing();

    let config = ApiConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let mailer = SmtpMailer::new(&config).expect("invalid mail configuration");
    let media = CloudinaryMediaStore::new(&config);
    let cors_origin: HeaderValue = config.cors_origin.parse().expect("invalid CORS_ORIGIN");

    let state = AppState {
        backend: DbBackend { db, mailer, media },
        keys: TokenKeys {
            access_secret: config.access_token_secret.clone(),
            refresh_secret: config.refresh_token_secret.clone(),
            access_ttl: config.access_token_expiry,
            refresh_ttl: config.refresh_token_expiry,
        },
    };

    spawn_otp_sweeper(state.otp_repo(), OTP_SWEEP_INTERVAL);

    let router = build_router(
        state,
        HttpOptions {
            cors_origin,
            static_dir: config.static_dir.into(),
        },
    );
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("api listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
