use std::path::PathBuf;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{
        HeaderValue, Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    routing::{get, patch, post},
};
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, services::ServeDir};

use mentpat_core::error::panic_response;
use mentpat_core::health::healthz;
use mentpat_core::middleware::{propagate_request_id_layer, request_id_layer, trace_layer};

use crate::handlers::{
    auth::{
        change_password, check_username, login, logout, refresh_token, register, send_otp,
        update_avatar,
    },
    health::readyz,
    user::{get_user, update_account_details},
};
use crate::state::{AppState, Backend};

/// JSON request bodies.
pub const JSON_BODY_LIMIT: usize = 100 * 1024;
/// Multipart uploads (register, avatar).
pub const MULTIPART_BODY_LIMIT: usize = 5 * 1024 * 1024;

/// HTTP surface settings that are not part of the handler state.
pub struct HttpOptions {
    /// Sole origin allowed to send credentialed cross-origin requests.
    pub cors_origin: HeaderValue,
    /// Directory served for unmatched paths.
    pub static_dir: PathBuf,
}

fn auth_routes<B: Backend>() -> Router<AppState<B>> {
    Router::new()
        .route("/send-otp", post(send_otp::<B>))
        .route(
            "/register",
            post(register::<B>).layer(DefaultBodyLimit::max(MULTIPART_BODY_LIMIT)),
        )
        .route("/check-username", get(check_username::<B>))
        .route("/login", post(login::<B>))
        .route("/logout", post(logout::<B>))
        .route("/refresh-token", post(refresh_token::<B>))
        .route("/change-password", post(change_password::<B>))
        .route(
            "/avatar",
            patch(update_avatar::<B>).layer(DefaultBodyLimit::max(MULTIPART_BODY_LIMIT)),
        )
}

fn user_routes<B: Backend>() -> Router<AppState<B>> {
    Router::new()
        .route("/getUser", get(get_user::<B>))
        .route("/update-account-details", patch(update_account_details::<B>))
}

pub fn build_router<B: Backend>(state: AppState<B>, options: HttpOptions) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(options.cors_origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION]);

    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz::<B>))
        // API
        .nest("/api/v1/auth", auth_routes::<B>())
        .nest("/api/v1/users", user_routes::<B>())
        .fallback_service(ServeDir::new(options.static_dir))
        .layer(DefaultBodyLimit::max(JSON_BODY_LIMIT))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors)
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(propagate_request_id_layer())
                .layer(trace_layer()),
        )
        .with_state(state)
}
