//! Posting, reading and deleting messages.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{create_user, test_pool};
use warbler::{error::AppError, likes, messages::service};

#[tokio::test]
async fn post_returns_persisted_message() {
    let pool = test_pool().await;
    let alice = create_user(&pool, "alice").await;

    let before = chrono::Utc::now();
    let message = service::post_message(&pool, alice.id, "Hello, world")
        .await
        .unwrap();

    assert_eq!(message.text, "Hello, world");
    assert_eq!(message.user_id, alice.id);
    assert!(message.timestamp >= before);

    let stored = service::find_message(&pool, message.id).await.unwrap();
    assert_eq!(stored.text, message.text);
    assert_eq!(stored.timestamp, message.timestamp);
}

#[tokio::test]
async fn post_enforces_text_length() {
    let pool = test_pool().await;
    let alice = create_user(&pool, "alice").await;

    let empty = service::post_message(&pool, alice.id, "").await;
    assert!(matches!(empty, Err(AppError::Validation(_))));

    let blank = service::post_message(&pool, alice.id, "   \n\t").await;
    assert!(matches!(blank, Err(AppError::Validation(_))));

    let too_long = service::post_message(&pool, alice.id, &"a".repeat(141)).await;
    assert!(matches!(too_long, Err(AppError::Validation(_))));

    // the limit counts characters, not bytes
    let exactly = service::post_message(&pool, alice.id, &"é".repeat(140)).await;
    assert!(exactly.is_ok());
}

#[tokio::test]
async fn post_trims_surrounding_whitespace() {
    let pool = test_pool().await;
    let alice = create_user(&pool, "alice").await;

    let message = service::post_message(&pool, alice.id, "  padded  ")
        .await
        .unwrap();
    assert_eq!(message.text, "padded");

    // padding does not count towards the limit
    let padded = format!("  {}  ", "a".repeat(140));
    assert!(service::post_message(&pool, alice.id, &padded).await.is_ok());
}

#[tokio::test]
async fn post_as_unknown_user_is_not_found() {
    let pool = test_pool().await;

    let result = service::post_message(&pool, 12345, "ghost").await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn only_owner_can_delete() {
    let pool = test_pool().await;
    let alice = create_user(&pool, "alice").await;
    let bob = create_user(&pool, "bob").await;
    let message = service::post_message(&pool, alice.id, "mine").await.unwrap();

    let result = service::delete_message(&pool, bob.id, message.id).await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));
    assert!(service::find_message(&pool, message.id).await.is_ok());

    service::delete_message(&pool, alice.id, message.id)
        .await
        .unwrap();
    assert!(matches!(
        service::find_message(&pool, message.id).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn deleting_missing_message_is_not_found() {
    let pool = test_pool().await;
    let alice = create_user(&pool, "alice").await;

    let result = service::delete_message(&pool, alice.id, 77).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn deleting_message_removes_its_likes() {
    let pool = test_pool().await;
    let alice = create_user(&pool, "alice").await;
    let bob = create_user(&pool, "bob").await;
    let carol = create_user(&pool, "carol").await;
    let message = service::post_message(&pool, alice.id, "like me").await.unwrap();

    likes::service::like(&pool, bob.id, message.id).await.unwrap();
    likes::service::like(&pool, carol.id, message.id).await.unwrap();

    service::delete_message(&pool, alice.id, message.id)
        .await
        .unwrap();

    let remaining = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM likes WHERE message_id = $1")
        .bind(message.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}

#[tokio::test]
async fn get_message_includes_author_and_viewer_like() {
    let pool = test_pool().await;
    let alice = create_user(&pool, "alice").await;
    let bob = create_user(&pool, "bob").await;
    let message = service::post_message(&pool, alice.id, "hi").await.unwrap();
    likes::service::like(&pool, bob.id, message.id).await.unwrap();

    let as_bob = service::get_message(&pool, bob.id, message.id).await.unwrap();
    assert_eq!(as_bob.author.id, alice.id);
    assert_eq!(as_bob.author.username, "alice");
    assert_eq!(as_bob.likes_count, 1);
    assert!(as_bob.liked);

    let as_alice = service::get_message(&pool, alice.id, message.id)
        .await
        .unwrap();
    assert!(!as_alice.liked);
}

#[tokio::test]
async fn user_messages_are_newest_first() {
    let pool = test_pool().await;
    let alice = create_user(&pool, "alice").await;

    let first = service::post_message(&pool, alice.id, "first").await.unwrap();
    let second = service::post_message(&pool, alice.id, "second").await.unwrap();

    let ids: Vec<i64> = service::user_messages(&pool, alice.id, alice.id)
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.id)
        .collect();
    assert_eq!(ids, vec![second.id, first.id]);
}
