use bytes::Bytes;

use mentpat_api::domain::types::UploadedFile;
use mentpat_api::error::ApiServiceError;
use mentpat_api::usecase::avatar::UpdateAvatarUseCase;
use mentpat_domain::id::UserId;
use mentpat_domain::user::Role;
use uuid::Uuid;

use crate::helpers::{MockMediaStore, MockUserRepo, png, test_user};

#[tokio::test]
async fn should_persist_uploaded_avatar_url() {
    let user = test_user("ada", Role::Mentee);
    let users = MockUserRepo::new(vec![user.clone()]);
    let media = MockMediaStore::returning("https://cdn/ada.png");
    let uploads = media.uploads.clone();

    let updated = UpdateAvatarUseCase {
        users: users.clone(),
        media,
    }
    .execute(user.id, Some(png()))
    .await
    .unwrap();

    assert_eq!(updated.avatar.as_deref(), Some("https://cdn/ada.png"));
    assert_eq!(
        users.get(user.id).unwrap().avatar.as_deref(),
        Some("https://cdn/ada.png")
    );
    let uploads = uploads.lock().unwrap();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].content_type.as_deref(), Some("image/png"));
}

#[tokio::test]
async fn should_reject_missing_or_empty_file() {
    let user = test_user("ada", Role::Mentee);
    let usecase = UpdateAvatarUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
        media: MockMediaStore::returning("https://cdn/ada.png"),
    };

    let result = usecase.execute(user.id, None).await;
    assert!(
        matches!(result, Err(ApiServiceError::MissingAvatar)),
        "expected MissingAvatar, got {result:?}"
    );

    let empty = UploadedFile {
        file_name: Some("a.png".into()),
        content_type: None,
        bytes: Bytes::new(),
    };
    let result = usecase.execute(user.id, Some(empty)).await;
    assert!(
        matches!(result, Err(ApiServiceError::MissingAvatar)),
        "expected MissingAvatar, got {result:?}"
    );
}

#[tokio::test]
async fn should_fail_when_store_returns_no_url() {
    let user = test_user("ada", Role::Mentee);
    let users = MockUserRepo::new(vec![user.clone()]);

    let result = UpdateAvatarUseCase {
        users: users.clone(),
        media: MockMediaStore::without_url(),
    }
    .execute(user.id, Some(png()))
    .await;

    assert!(
        matches!(result, Err(ApiServiceError::AvatarUploadFailed)),
        "expected AvatarUploadFailed, got {result:?}"
    );
    assert!(users.get(user.id).unwrap().avatar.is_none());
}

#[tokio::test]
async fn should_return_not_found_for_unknown_user() {
    let result = UpdateAvatarUseCase {
        users: MockUserRepo::empty(),
        media: MockMediaStore::returning("https://cdn/x.png"),
    }
    .execute(UserId(Uuid::now_v7()), Some(png()))
    .await;

    assert!(
        matches!(result, Err(ApiServiceError::UserNotFound)),
        "expected UserNotFound, got {result:?}"
    );
}
