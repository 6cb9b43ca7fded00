use axum::{extract::State, http::StatusCode};

use crate::state::{AppState, Backend};

/// Ready once the backing storage answers.
pub async fn readyz<B: Backend>(State(state): State<AppState<B>>) -> StatusCode {
    match state.backend.ready().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
