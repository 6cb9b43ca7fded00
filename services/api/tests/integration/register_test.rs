use bytes::Bytes;

use mentpat_api::domain::types::UploadedFile;
use mentpat_api::error::ApiServiceError;
use mentpat_api::usecase::register::{CheckUsernameUseCase, RegisterInput, RegisterUseCase};
use mentpat_domain::user::Role;

use crate::helpers::{
    MockMediaStore, MockOtpRepo, MockUserRepo, active_otp, expired_otp, png, test_user,
};

const CODE: &str = "482913";

fn form(role: &str) -> RegisterInput {
    RegisterInput {
        full_name: Some("Ada Lovelace".into()),
        username: Some("Ada".into()),
        email: Some("a@example.com".into()),
        password: Some("s3cret pass".into()),
        role: Some(role.into()),
        college: Some("Analytical".into()),
        otp: Some(CODE.into()),
        avatar: None,
    }
}

fn usecase(
    users: MockUserRepo,
    otps: MockOtpRepo,
    media: MockMediaStore,
) -> RegisterUseCase<MockUserRepo, MockOtpRepo, MockMediaStore> {
    RegisterUseCase { users, otps, media }
}

#[tokio::test]
async fn should_register_user_and_consume_otp() {
    let users = MockUserRepo::empty();
    let stored_users = users.handle();
    let otps = MockOtpRepo::new(vec![
        active_otp("a@example.com", CODE),
        active_otp("a@example.com", "000111"),
        active_otp("b@example.com", "222333"),
    ]);
    let stored_otps = otps.handle();

    let user = usecase(users, otps, MockMediaStore::returning("https://cdn/x.png"))
        .execute(form("MENTEE"))
        .await
        .unwrap();

    assert_eq!(user.username, "ada");
    assert_eq!(user.email, "a@example.com");
    assert_eq!(user.role, Role::Mentee);
    assert!(user.mentee_details.is_some());
    assert!(user.mentor_details.is_none());
    assert!(user.avatar.is_none());
    assert!(user.refresh_token.is_none());
    assert_ne!(user.password_hash, "s3cret pass");
    assert!(bcrypt::verify("s3cret pass", &user.password_hash).unwrap());

    assert_eq!(stored_users.lock().unwrap().len(), 1);
    let remaining = stored_otps.lock().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].email, "b@example.com");
}

#[tokio::test]
async fn should_initialize_mentor_block_without_type() {
    let user = usecase(
        MockUserRepo::empty(),
        MockOtpRepo::new(vec![active_otp("a@example.com", CODE)]),
        MockMediaStore::without_url(),
    )
    .execute(form("MENTOR"))
    .await
    .unwrap();

    let details = user.mentor_details.expect("mentor block");
    assert_eq!(details.mentor_type, None);
    assert!(user.mentee_details.is_none());
}

#[tokio::test]
async fn should_store_uploaded_avatar_url() {
    let input = RegisterInput {
        avatar: Some(png()),
        ..form("ADMIN")
    };
    let user = usecase(
        MockUserRepo::empty(),
        MockOtpRepo::new(vec![active_otp("a@example.com", CODE)]),
        MockMediaStore::returning("https://cdn/ada.png"),
    )
    .execute(input)
    .await
    .unwrap();

    assert_eq!(user.avatar.as_deref(), Some("https://cdn/ada.png"));
    assert!(user.admin_details.is_some_and(|d| d.permissions.is_empty()));
}

#[tokio::test]
async fn should_reject_avatar_upload_without_url() {
    let users = MockUserRepo::empty();
    let stored = users.handle();
    let input = RegisterInput {
        avatar: Some(png()),
        ..form("MENTEE")
    };

    let result = usecase(
        users,
        MockOtpRepo::new(vec![active_otp("a@example.com", CODE)]),
        MockMediaStore::without_url(),
    )
    .execute(input)
    .await;

    assert!(
        matches!(result, Err(ApiServiceError::AvatarUploadFailed)),
        "expected AvatarUploadFailed, got {result:?}"
    );
    assert!(stored.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_skip_upload_for_empty_avatar_part() {
    let media = MockMediaStore::returning("https://cdn/ada.png");
    let uploads = media.uploads.clone();
    let input = RegisterInput {
        avatar: Some(UploadedFile {
            bytes: Bytes::new(),
            ..png()
        }),
        ..form("MENTEE")
    };

    let user = usecase(
        MockUserRepo::empty(),
        MockOtpRepo::new(vec![active_otp("a@example.com", CODE)]),
        media,
    )
    .execute(input)
    .await
    .unwrap();

    assert!(user.avatar.is_none());
    assert!(uploads.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_mismatched_otp() {
    let users = MockUserRepo::empty();
    let stored = users.handle();
    let otps = MockOtpRepo::new(vec![active_otp("a@example.com", "999999")]);
    let stored_otps = otps.handle();

    let result = usecase(users, otps, MockMediaStore::without_url())
        .execute(form("MENTEE"))
        .await;

    assert!(
        matches!(result, Err(ApiServiceError::InvalidOtp)),
        "expected InvalidOtp, got {result:?}"
    );
    assert!(stored.lock().unwrap().is_empty());
    assert_eq!(stored_otps.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_reject_otp_issued_to_another_email() {
    let result = usecase(
        MockUserRepo::empty(),
        MockOtpRepo::new(vec![active_otp("b@example.com", CODE)]),
        MockMediaStore::without_url(),
    )
    .execute(form("MENTEE"))
    .await;

    assert!(
        matches!(result, Err(ApiServiceError::InvalidOtp)),
        "expected InvalidOtp, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_expired_otp() {
    let result = usecase(
        MockUserRepo::empty(),
        MockOtpRepo::new(vec![expired_otp("a@example.com", CODE)]),
        MockMediaStore::without_url(),
    )
    .execute(form("MENTEE"))
    .await;

    assert!(
        matches!(result, Err(ApiServiceError::InvalidOtp)),
        "expected InvalidOtp, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_missing_field_before_touching_otps() {
    let otps = MockOtpRepo::new(vec![active_otp("a@example.com", CODE)]);
    let stored = otps.handle();
    let input = RegisterInput {
        otp: None,
        ..form("MENTEE")
    };

    let result = usecase(MockUserRepo::empty(), otps, MockMediaStore::without_url())
        .execute(input)
        .await;

    assert!(
        matches!(result, Err(ApiServiceError::MissingFields)),
        "expected MissingFields, got {result:?}"
    );
    assert_eq!(stored.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_reject_unknown_role() {
    let result = usecase(
        MockUserRepo::empty(),
        MockOtpRepo::new(vec![active_otp("a@example.com", CODE)]),
        MockMediaStore::without_url(),
    )
    .execute(form("mentor"))
    .await;

    assert!(
        matches!(result, Err(ApiServiceError::InvalidRole)),
        "expected InvalidRole, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_duplicate_username_case_insensitively() {
    let existing = test_user("ada", Role::Mentor);
    let input = RegisterInput {
        username: Some("ADA".into()),
        email: Some("other@example.com".into()),
        ..form("MENTEE")
    };

    let result = usecase(
        MockUserRepo::new(vec![existing]),
        MockOtpRepo::new(vec![active_otp("other@example.com", CODE)]),
        MockMediaStore::without_url(),
    )
    .execute(input)
    .await;

    assert!(
        matches!(result, Err(ApiServiceError::UserAlreadyExists)),
        "expected UserAlreadyExists, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_second_registration_with_same_email() {
    let users = MockUserRepo::empty();
    let otps = MockOtpRepo::new(vec![active_otp("a@example.com", CODE)]);
    usecase(users.clone(), otps.clone(), MockMediaStore::without_url())
        .execute(form("MENTEE"))
        .await
        .unwrap();

    otps.handle()
        .lock()
        .unwrap()
        .push(active_otp("a@example.com", "135790"));
    let input = RegisterInput {
        username: Some("someone-else".into()),
        email: Some("A@EXAMPLE.COM".into()),
        otp: Some("135790".into()),
        ..form("MENTEE")
    };
    let result = usecase(users.clone(), otps, MockMediaStore::without_url())
        .execute(input)
        .await;

    assert!(
        matches!(result, Err(ApiServiceError::UserAlreadyExists)),
        "expected UserAlreadyExists, got {result:?}"
    );
    assert_eq!(users.handle().lock().unwrap().len(), 1);
}

// ── CheckUsername ────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_report_username_availability() {
    let usecase = CheckUsernameUseCase {
        users: MockUserRepo::new(vec![test_user("ada", Role::Mentee)]),
    };

    assert!(!usecase.execute(Some(" ADA ".into())).await.unwrap());
    assert!(usecase.execute(Some("grace".into())).await.unwrap());
}

#[tokio::test]
async fn should_reject_blank_username_check() {
    let usecase = CheckUsernameUseCase {
        users: MockUserRepo::empty(),
    };

    let result = usecase.execute(Some("  ".into())).await;
    assert!(
        matches!(result, Err(ApiServiceError::MissingUsername)),
        "expected MissingUsername, got {result:?}"
    );
}
