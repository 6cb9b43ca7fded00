use mentpat_api::error::ApiServiceError;
use mentpat_api::usecase::token::{
    LoginInput, LoginUseCase, LogoutUseCase, RefreshTokenUseCase,
};
use mentpat_auth_types::token::{validate_access_token, validate_refresh_token};
use mentpat_domain::user::Role;
use mentpat_testing::auth::test_keys;

use crate::helpers::{MockUserRepo, TEST_PASSWORD, test_user};

fn by_username(username: &str, password: &str) -> LoginInput {
    LoginInput {
        username: Some(username.to_owned()),
        email: None,
        password: Some(password.to_owned()),
    }
}

fn login(users: &MockUserRepo) -> LoginUseCase<MockUserRepo> {
    LoginUseCase {
        users: users.clone(),
        keys: test_keys(),
    }
}

fn refresh(users: &MockUserRepo) -> RefreshTokenUseCase<MockUserRepo> {
    RefreshTokenUseCase {
        users: users.clone(),
        keys: test_keys(),
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_login_by_username_and_persist_refresh_token() {
    let user = test_user("ada", Role::Mentor);
    let users = MockUserRepo::new(vec![user.clone()]);

    let out = login(&users)
        .execute(by_username("ADA", TEST_PASSWORD))
        .await
        .unwrap();

    assert_eq!(out.user.id, user.id);
    let claims = validate_access_token(&out.tokens.access_token, &test_keys()).unwrap();
    assert_eq!(claims.sub, user.id);
    assert_eq!(claims.username, "ada");
    assert_eq!(claims.email, "ada@example.com");
    assert_eq!(claims.full_name, "Test User");
    assert_eq!(claims.role, Role::Mentor);

    let refresh_claims = validate_refresh_token(&out.tokens.refresh_token, &test_keys()).unwrap();
    assert_eq!(refresh_claims.sub, user.id);
    assert_eq!(
        users.get(user.id).unwrap().refresh_token.as_deref(),
        Some(out.tokens.refresh_token.as_str())
    );
}

#[tokio::test]
async fn should_login_by_email() {
    let user = test_user("ada", Role::Mentee);
    let users = MockUserRepo::new(vec![user.clone()]);

    let out = login(&users)
        .execute(LoginInput {
            username: None,
            email: Some("Ada@Example.com".into()),
            password: Some(TEST_PASSWORD.into()),
        })
        .await
        .unwrap();

    assert_eq!(out.user.id, user.id);
}

#[tokio::test]
async fn should_require_exactly_one_identifier() {
    let users = MockUserRepo::new(vec![test_user("ada", Role::Mentee)]);

    let both = LoginInput {
        username: Some("ada".into()),
        email: Some("ada@example.com".into()),
        password: Some(TEST_PASSWORD.into()),
    };
    let result = login(&users).execute(both).await;
    assert!(
        matches!(result, Err(ApiServiceError::MissingCredentials)),
        "expected MissingCredentials, got {result:?}"
    );

    let neither = LoginInput {
        username: None,
        email: Some("  ".into()),
        password: Some(TEST_PASSWORD.into()),
    };
    let result = login(&users).execute(neither).await;
    assert!(
        matches!(result, Err(ApiServiceError::MissingCredentials)),
        "expected MissingCredentials, got {result:?}"
    );
}

#[tokio::test]
async fn should_require_password() {
    let users = MockUserRepo::new(vec![test_user("ada", Role::Mentee)]);

    let result = login(&users)
        .execute(LoginInput {
            username: Some("ada".into()),
            email: None,
            password: None,
        })
        .await;
    assert!(
        matches!(result, Err(ApiServiceError::MissingPassword)),
        "expected MissingPassword, got {result:?}"
    );
}

#[tokio::test]
async fn should_return_not_found_for_unknown_user() {
    let result = login(&MockUserRepo::empty())
        .execute(by_username("ghost", TEST_PASSWORD))
        .await;
    assert!(
        matches!(result, Err(ApiServiceError::UserNotFound)),
        "expected UserNotFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_wrong_password_without_issuing_tokens() {
    let user = test_user("ada", Role::Mentee);
    let users = MockUserRepo::new(vec![user.clone()]);

    let result = login(&users).execute(by_username("ada", "wrong")).await;
    assert!(
        matches!(result, Err(ApiServiceError::InvalidCredentials)),
        "expected InvalidCredentials, got {result:?}"
    );
    assert!(users.get(user.id).unwrap().refresh_token.is_none());
}

#[tokio::test]
async fn should_invalidate_previous_session_on_second_login() {
    let users = MockUserRepo::new(vec![test_user("ada", Role::Mentee)]);

    let first = login(&users)
        .execute(by_username("ada", TEST_PASSWORD))
        .await
        .unwrap();
    let second = login(&users)
        .execute(by_username("ada", TEST_PASSWORD))
        .await
        .unwrap();
    assert_ne!(first.tokens.refresh_token, second.tokens.refresh_token);

    let result = refresh(&users)
        .execute(Some(&first.tokens.refresh_token))
        .await;
    assert!(
        matches!(result, Err(ApiServiceError::InvalidRefreshToken)),
        "expected InvalidRefreshToken, got {result:?}"
    );
    refresh(&users)
        .execute(Some(&second.tokens.refresh_token))
        .await
        .unwrap();
}

// ── RefreshToken ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_rotate_refresh_token_once() {
    let user = test_user("ada", Role::Mentee);
    let users = MockUserRepo::new(vec![user.clone()]);
    let session = login(&users)
        .execute(by_username("ada", TEST_PASSWORD))
        .await
        .unwrap();

    let rotated = refresh(&users)
        .execute(Some(&session.tokens.refresh_token))
        .await
        .unwrap();
    assert_ne!(rotated.refresh_token, session.tokens.refresh_token);
    assert_eq!(
        users.get(user.id).unwrap().refresh_token.as_deref(),
        Some(rotated.refresh_token.as_str())
    );
    validate_access_token(&rotated.access_token, &test_keys()).unwrap();

    let replay = refresh(&users)
        .execute(Some(&session.tokens.refresh_token))
        .await;
    assert!(
        matches!(replay, Err(ApiServiceError::InvalidRefreshToken)),
        "expected InvalidRefreshToken, got {replay:?}"
    );
}

#[tokio::test]
async fn should_require_refresh_token() {
    let users = MockUserRepo::empty();

    let result = refresh(&users).execute(None).await;
    assert!(
        matches!(result, Err(ApiServiceError::MissingRefreshToken)),
        "expected MissingRefreshToken, got {result:?}"
    );
    let result = refresh(&users).execute(Some("")).await;
    assert!(
        matches!(result, Err(ApiServiceError::MissingRefreshToken)),
        "expected MissingRefreshToken, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_malformed_refresh_token() {
    let result = refresh(&MockUserRepo::empty())
        .execute(Some("not-a-jwt"))
        .await;
    assert!(
        matches!(result, Err(ApiServiceError::InvalidRefreshToken)),
        "expected InvalidRefreshToken, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_access_token_presented_as_refresh_token() {
    let users = MockUserRepo::new(vec![test_user("ada", Role::Mentee)]);
    let session = login(&users)
        .execute(by_username("ada", TEST_PASSWORD))
        .await
        .unwrap();

    let result = refresh(&users)
        .execute(Some(&session.tokens.access_token))
        .await;
    assert!(
        matches!(result, Err(ApiServiceError::InvalidRefreshToken)),
        "expected InvalidRefreshToken, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_refresh_for_deleted_user() {
    let users = MockUserRepo::new(vec![test_user("ada", Role::Mentee)]);
    let session = login(&users)
        .execute(by_username("ada", TEST_PASSWORD))
        .await
        .unwrap();
    users.handle().lock().unwrap().clear();

    let result = refresh(&users)
        .execute(Some(&session.tokens.refresh_token))
        .await;
    assert!(
        matches!(result, Err(ApiServiceError::InvalidRefreshToken)),
        "expected InvalidRefreshToken, got {result:?}"
    );
}

// ── Logout ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_revoke_refresh_token_on_logout() {
    let user = test_user("ada", Role::Mentee);
    let users = MockUserRepo::new(vec![user.clone()]);
    let session = login(&users)
        .execute(by_username("ada", TEST_PASSWORD))
        .await
        .unwrap();

    LogoutUseCase {
        users: users.clone(),
    }
    .execute(user.id)
    .await
    .unwrap();
    assert!(users.get(user.id).unwrap().refresh_token.is_none());

    let result = refresh(&users)
        .execute(Some(&session.tokens.refresh_token))
        .await;
    assert!(
        matches!(result, Err(ApiServiceError::InvalidRefreshToken)),
        "expected InvalidRefreshToken, got {result:?}"
    );
}
