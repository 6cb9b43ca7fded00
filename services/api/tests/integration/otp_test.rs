use chrono::Utc;

use mentpat_api::domain::types::{OTP_LEN, OTP_TTL_SECS};
use mentpat_api::error::ApiServiceError;
use mentpat_api::usecase::otp::{SendOtpInput, SendOtpUseCase};
use mentpat_domain::user::Role;

use crate::helpers::{MockMailer, MockOtpRepo, MockUserRepo, test_user};

fn input(email: &str) -> SendOtpInput {
    SendOtpInput {
        email: Some(email.to_owned()),
    }
}

#[tokio::test]
async fn should_mail_and_store_otp_for_new_email() {
    let otps = MockOtpRepo::empty();
    let stored = otps.handle();
    let mailer = MockMailer::default();
    let sent = mailer.handle();
    let usecase = SendOtpUseCase {
        users: MockUserRepo::empty(),
        otps,
        mailer,
    };

    usecase.execute(input(" A@Example.com ")).await.unwrap();

    let sent = sent.lock().unwrap();
    let stored = stored.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(stored.len(), 1);
    let otp = &stored[0];
    assert_eq!(otp.email, "a@example.com");
    assert_eq!(sent[0], (otp.email.clone(), otp.code.clone()));
    assert_eq!(otp.code.len(), OTP_LEN);
    assert!(otp.code.chars().all(|c| c.is_ascii_digit()));
    assert_eq!((otp.expires_at - otp.created_at).num_seconds(), OTP_TTL_SECS);
    assert!(otp.is_active(Utc::now()));
}

#[tokio::test]
async fn should_reject_missing_email() {
    let usecase = SendOtpUseCase {
        users: MockUserRepo::empty(),
        otps: MockOtpRepo::empty(),
        mailer: MockMailer::default(),
    };

    let result = usecase.execute(SendOtpInput { email: None }).await;
    assert!(
        matches!(result, Err(ApiServiceError::MissingEmail)),
        "expected MissingEmail, got {result:?}"
    );

    let result = usecase.execute(input("   ")).await;
    assert!(
        matches!(result, Err(ApiServiceError::MissingEmail)),
        "expected MissingEmail, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_email_already_registered() {
    let user = test_user("ada", Role::Mentee);
    let mailer = MockMailer::default();
    let sent = mailer.handle();
    let usecase = SendOtpUseCase {
        users: MockUserRepo::new(vec![user]),
        otps: MockOtpRepo::empty(),
        mailer,
    };

    let result = usecase.execute(input("ADA@example.com")).await;
    assert!(
        matches!(result, Err(ApiServiceError::UserAlreadyExists)),
        "expected UserAlreadyExists, got {result:?}"
    );
    assert!(sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_not_store_otp_when_mail_fails() {
    let otps = MockOtpRepo::empty();
    let stored = otps.handle();
    let usecase = SendOtpUseCase {
        users: MockUserRepo::empty(),
        otps,
        mailer: MockMailer::failing(),
    };

    let result = usecase.execute(input("a@example.com")).await;
    assert!(
        matches!(result, Err(ApiServiceError::MailDeliveryFailed)),
        "expected MailDeliveryFailed, got {result:?}"
    );
    assert!(stored.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_give_up_when_every_code_collides() {
    let mailer = MockMailer::default();
    let sent = mailer.handle();
    let usecase = SendOtpUseCase {
        users: MockUserRepo::empty(),
        otps: MockOtpRepo::saturated(),
        mailer,
    };

    let result = usecase.execute(input("a@example.com")).await;
    assert!(
        matches!(result, Err(ApiServiceError::Internal(_))),
        "expected Internal, got {result:?}"
    );
    assert!(sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_issue_distinct_codes_for_different_emails() {
    let otps = MockOtpRepo::empty();
    let stored = otps.handle();
    let usecase = SendOtpUseCase {
        users: MockUserRepo::empty(),
        otps,
        mailer: MockMailer::default(),
    };

    for i in 0..25 {
        usecase.execute(input(&format!("u{i}@example.com"))).await.unwrap();
    }

    let stored = stored.lock().unwrap();
    let mut codes: Vec<_> = stored.iter().map(|o| o.code.clone()).collect();
    codes.sort();
    codes.dedup();
    assert_eq!(codes.len(), 25);
}
