use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// JSON body shared by every failed response.
///
/// ```json
/// { "statusCode": 404, "kind": "USER_NOT_FOUND", "message": "user not found", "success": false }
/// ```
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody<'a> {
    pub status_code: u16,
    pub kind: &'a str,
    pub message: &'a str,
    pub success: bool,
}

/// Render an error envelope with the given status.
pub fn error_response(status: StatusCode, kind: &str, message: &str) -> Response {
    let body = ErrorBody {
        status_code: status.as_u16(),
        kind,
        message,
        success: false,
    };
    (status, axum::Json(body)).into_response()
}

/// Response for a handler that panicked. Wired into `CatchPanicLayer`.
pub fn panic_response(_panic: Box<dyn std::any::Any + Send + 'static>) -> Response {
    tracing::error!(kind = "INTERNAL", "handler panicked");
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL",
        "internal error",
    )
}
