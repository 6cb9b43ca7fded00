use axum::{
    Router,
    body::Body,
    http::{HeaderValue, Method, Request, StatusCode, header},
};
use tower::ServiceExt as _;

use mentpat_api::domain::repository::Mailer;
use mentpat_api::infra::mail::SmtpMailer;
use mentpat_api::router::{HttpOptions, build_router};
use mentpat_api::state::AppState;
use mentpat_domain::user::Role;
use mentpat_testing::auth::test_keys;
use mentpat_testing::response::{json_body, set_cookies};

use crate::helpers::{MockBackend, TEST_PASSWORD, test_user};

fn router<M: Mailer + Clone + 'static>(backend: MockBackend<M>) -> Router {
    build_router(
        AppState {
            backend,
            keys: test_keys(),
        },
        HttpOptions {
            cors_origin: HeaderValue::from_static("https://app.mentpat.test"),
            static_dir: "does-not-exist".into(),
        },
    )
}

fn json_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap()
}

fn cookie_named<'a>(cookies: &'a [String], name: &str) -> &'a str {
    cookies
        .iter()
        .find(|c| c.starts_with(&format!("{name}=")))
        .unwrap_or_else(|| panic!("no {name} cookie in {cookies:?}"))
}

/// `name=value` pairs of every Set-Cookie, joined into a Cookie header.
fn cookie_header(cookies: &[String]) -> String {
    cookies
        .iter()
        .filter_map(|c| c.split(';').next())
        .collect::<Vec<_>>()
        .join("; ")
}

async fn login(app: &Router) -> Vec<String> {
    let resp = app
        .clone()
        .oneshot(json_request(
            "/api/v1/auth/login",
            &format!(r#"{{"username":"ada","password":"{TEST_PASSWORD}"}}"#),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    set_cookies(&resp)
}

// ── Login ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_set_cross_site_token_cookies_on_login() {
    let backend = MockBackend::new(vec![test_user("ada", Role::Mentee)]);
    let app = router(backend.clone());

    let resp = app
        .clone()
        .oneshot(json_request(
            "/api/v1/auth/login",
            &format!(r#"{{"email":"ada@example.com","password":"{TEST_PASSWORD}"}}"#),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let cookies = set_cookies(&resp);
    assert_eq!(cookies.len(), 2, "got {cookies:?}");
    for name in ["accessToken", "refreshToken"] {
        let cookie = cookie_named(&cookies, name);
        assert!(cookie.contains("SameSite=None"), "got {cookie}");
        assert!(cookie.contains("HttpOnly"), "got {cookie}");
        assert!(cookie.contains("Secure"), "got {cookie}");
        assert!(cookie.contains("Path=/"), "got {cookie}");
        assert!(!cookie.contains("Max-Age"), "got {cookie}");
    }

    let body = json_body(resp).await;
    let refresh = cookie_named(&cookies, "refreshToken");
    let refresh_value = body["data"]["refreshToken"].as_str().unwrap();
    assert!(refresh.starts_with(&format!("refreshToken={refresh_value};")));
}

#[tokio::test]
async fn should_not_set_cookies_on_wrong_password() {
    let app = router(MockBackend::new(vec![test_user("ada", Role::Mentee)]));

    let resp = app
        .oneshot(json_request(
            "/api/v1/auth/login",
            r#"{"username":"ada","password":"wrong"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(set_cookies(&resp).is_empty());
    assert_eq!(json_body(resp).await["kind"], "INVALID_CREDENTIALS");
}

// ── Refresh ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_rotate_cookies_without_same_site_on_refresh() {
    let user = test_user("ada", Role::Mentee);
    let backend = MockBackend::new(vec![user.clone()]);
    let app = router(backend.clone());
    let issued = login(&app).await;

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/v1/auth/refresh-token")
                .header(header::COOKIE, cookie_header(&issued))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let cookies = set_cookies(&resp);
    assert_eq!(cookies.len(), 2, "got {cookies:?}");
    for name in ["accessToken", "refreshToken"] {
        let cookie = cookie_named(&cookies, name);
        assert!(!cookie.contains("SameSite"), "got {cookie}");
        assert!(cookie.contains("HttpOnly"), "got {cookie}");
        assert!(cookie.contains("Secure"), "got {cookie}");
        assert!(cookie.contains("Path=/"), "got {cookie}");
    }

    let stored = backend.users.get(user.id).unwrap().refresh_token.unwrap();
    assert!(cookie_named(&cookies, "refreshToken").starts_with(&format!("refreshToken={stored};")));
    assert_ne!(cookie_named(&cookies, "refreshToken"), cookie_named(&issued, "refreshToken"));
}

// ── Logout ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_expire_both_cookies_on_logout() {
    let user = test_user("ada", Role::Mentee);
    let backend = MockBackend::new(vec![user.clone()]);
    let app = router(backend.clone());
    let issued = login(&app).await;

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/v1/auth/logout")
                .header(header::COOKIE, cookie_header(&issued))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let cookies = set_cookies(&resp);
    assert_eq!(cookies.len(), 2, "got {cookies:?}");
    for name in ["accessToken", "refreshToken"] {
        let cookie = cookie_named(&cookies, name);
        assert!(cookie.starts_with(&format!("{name}=;")), "got {cookie}");
        assert!(cookie.contains("Max-Age=0"), "got {cookie}");
        assert!(cookie.contains("Path=/"), "got {cookie}");
    }
    assert!(backend.users.get(user.id).unwrap().refresh_token.is_none());
}

// ── Send OTP ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_fail_send_otp_when_smtp_is_not_configured() {
    let backend = MockBackend::with_mailer(vec![], SmtpMailer::disabled());
    let app = router(backend.clone());

    let resp = app
        .oneshot(json_request(
            "/api/v1/auth/send-otp",
            r#"{"email":"new@example.com"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(resp).await["kind"], "MAIL_DELIVERY_FAILED");
    assert!(backend.otps.handle().lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_store_otp_once_mail_is_sent() {
    let backend = MockBackend::new(vec![]);
    let app = router(backend.clone());

    let resp = app
        .oneshot(json_request(
            "/api/v1/auth/send-otp",
            r#"{"email":"New@Example.com"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let sent = backend.mailer.handle().lock().unwrap().clone();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "new@example.com");
    let stored = backend.otps.handle().lock().unwrap().clone();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].code, sent[0].1);
}
