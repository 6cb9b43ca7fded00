//! Helpers for inspecting axum responses in tests.

use axum::body::to_bytes;
use axum::response::Response;
use http::header::SET_COOKIE;

/// Consume a response and parse its body as JSON.
pub async fn json_body(resp: Response) -> serde_json::Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read response body");
    serde_json::from_slice(&bytes).expect("response body is JSON")
}

/// All `Set-Cookie` header values on a response.
pub fn set_cookies(resp: &Response) -> Vec<String> {
    resp.headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok().map(str::to_owned))
        .collect()
}
