use forkful_cookbook::error::CookbookServiceError;
use forkful_cookbook::usecase::subscription::SubscribeUseCase;
use forkful_cookbook::usecase::user::{
    ClearAvatarUseCase, CreateUserInput, CreateUserUseCase, GetUserUseCase, SetAvatarUseCase,
};

use super::helpers::{MemoryStore, MockImages, PNG_DATA_URI, seeded_store};

fn create_uc(store: &MemoryStore) -> CreateUserUseCase<MemoryStore> {
    CreateUserUseCase {
        users: store.clone(),
    }
}

fn get_uc(store: &MemoryStore) -> GetUserUseCase<MemoryStore, MemoryStore> {
    GetUserUseCase {
        users: store.clone(),
        subs: store.clone(),
    }
}

fn valid_input(email: &str, username: &str) -> CreateUserInput {
    CreateUserInput {
        email: email.to_owned(),
        username: username.to_owned(),
        first_name: "Carol".to_owned(),
        last_name: "Jones".to_owned(),
    }
}

#[tokio::test]
async fn should_create_user_with_fresh_id() {
    let store = seeded_store();
    let user = create_uc(&store)
        .execute(valid_input("carol@example.org", "carol"))
        .await
        .unwrap();
    assert_eq!(user.id, 3);
    assert_eq!(user.username, "carol");
    assert!(user.avatar.is_none());
}

#[tokio::test]
async fn should_reject_invalid_email() {
    let store = seeded_store();
    let result = create_uc(&store)
        .execute(valid_input("not-an-email", "carol"))
        .await;
    assert!(matches!(result, Err(CookbookServiceError::Validation(_))));
}

#[tokio::test]
async fn should_reject_username_with_forbidden_characters() {
    let store = seeded_store();
    let result = create_uc(&store)
        .execute(valid_input("carol@example.org", "carol jones"))
        .await;
    assert!(matches!(result, Err(CookbookServiceError::Validation(_))));
}

#[tokio::test]
async fn should_reject_taken_email() {
    let store = seeded_store();
    let result = create_uc(&store)
        .execute(valid_input("alice@example.org", "carol"))
        .await;
    assert!(matches!(result, Err(CookbookServiceError::EmailTaken)));
}

#[tokio::test]
async fn should_reject_taken_username() {
    let store = seeded_store();
    let result = create_uc(&store)
        .execute(valid_input("carol@example.org", "alice"))
        .await;
    assert!(matches!(result, Err(CookbookServiceError::UsernameTaken)));
}

#[tokio::test]
async fn should_report_is_subscribed_relative_to_viewer() {
    let store = seeded_store();
    let subscribe = SubscribeUseCase {
        subs: store.clone(),
        users: store.clone(),
        recipes: store.clone(),
    };
    subscribe.execute(1, 2, None).await.unwrap();

    let (_, is_subscribed) = get_uc(&store).execute(Some(1), 2).await.unwrap();
    assert!(is_subscribed);

    // The reverse edge does not exist.
    let (_, is_subscribed) = get_uc(&store).execute(Some(2), 1).await.unwrap();
    assert!(!is_subscribed);

    // Anonymous viewers and self-views are never "subscribed".
    let (_, is_subscribed) = get_uc(&store).execute(None, 2).await.unwrap();
    assert!(!is_subscribed);
    let (_, is_subscribed) = get_uc(&store).execute(Some(2), 2).await.unwrap();
    assert!(!is_subscribed);
}

#[tokio::test]
async fn should_fail_get_for_unknown_user() {
    let store = seeded_store();
    let result = get_uc(&store).execute(None, 99).await;
    assert!(matches!(result, Err(CookbookServiceError::UserNotFound)));
}

#[tokio::test]
async fn should_set_and_clear_avatar() {
    let store = seeded_store();
    let images = MockImages::default();
    let set = SetAvatarUseCase {
        users: store.clone(),
        images: images.clone(),
    };

    let reference = set.execute(1, PNG_DATA_URI).await.unwrap();
    assert!(reference.starts_with("users/images/"));
    assert_eq!(images.stored.lock().unwrap().len(), 1);

    let (user, _) = get_uc(&store).execute(None, 1).await.unwrap();
    assert_eq!(user.avatar.as_deref(), Some(reference.as_str()));

    let clear = ClearAvatarUseCase {
        users: store.clone(),
    };
    clear.execute(1).await.unwrap();
    let (user, _) = get_uc(&store).execute(None, 1).await.unwrap();
    assert!(user.avatar.is_none());
}

#[tokio::test]
async fn should_reject_malformed_avatar_payload() {
    let store = seeded_store();
    let set = SetAvatarUseCase {
        users: store.clone(),
        images: MockImages::default(),
    };
    let result = set.execute(1, "data:image/png;base64,@@@@").await;
    assert!(matches!(result, Err(CookbookServiceError::Validation(_))));
}
