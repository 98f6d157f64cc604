//! Racing writers against a database shared by several connections.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::future::Future;

use common::{create_user, FileDb, PASSWORD};
use sqlx::SqlitePool;
use tokio::task::JoinSet;
use warbler::{
    auth::{self, RegisterUser},
    error::{AppError, AppResult},
    follows, likes, messages, users,
};

const RACERS: usize = 8;
const ROUNDS: usize = 5;

/// Runs `op` on `RACERS` tasks at once and collects every outcome.
async fn race<F, Fut>(pool: &SqlitePool, op: F) -> Vec<AppResult<()>>
where
    F: Fn(SqlitePool) -> Fut,
    Fut: Future<Output = AppResult<()>> + Send + 'static,
{
    let mut set = JoinSet::new();
    for _ in 0..RACERS {
        set.spawn(op(pool.clone()));
    }

    let mut results = Vec::with_capacity(RACERS);
    while let Some(result) = set.join_next().await {
        results.push(result.expect("Racing task panicked"));
    }
    results
}

/// Exactly one call succeeded and every other one failed as `expected` says.
fn assert_one_winner(results: &[AppResult<()>], expected: fn(&AppError) -> bool) {
    let ok = results.iter().filter(|r| r.is_ok()).count();
    let rejected = results
        .iter()
        .filter(|r| matches!(r, Err(e) if expected(e)))
        .count();

    assert_eq!(ok, 1, "{results:?}");
    assert_eq!(rejected, RACERS - 1, "{results:?}");
}

fn is_duplicate(err: &AppError) -> bool {
    matches!(err, AppError::Duplicate(_))
}

fn is_not_found(err: &AppError) -> bool {
    matches!(err, AppError::NotFound(_))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_follows_create_one_edge() {
    let db = FileDb::new("follow", RACERS as u32).await;
    let a = create_user(&db.pool, "a").await.id;
    let b = create_user(&db.pool, "b").await.id;

    for _ in 0..ROUNDS {
        let results = race(&db.pool, move |pool| async move {
            follows::service::follow(&pool, a, b).await.map(|_| ())
        })
        .await;

        assert_one_winner(&results, is_duplicate);
        assert_eq!(follows::service::followers_count(&db.pool, b).await.unwrap(), 1);

        follows::service::unfollow(&db.pool, a, b).await.unwrap();
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_likes_create_one_like() {
    let db = FileDb::new("like", RACERS as u32).await;
    let author = create_user(&db.pool, "author").await.id;
    let fan = create_user(&db.pool, "fan").await.id;
    let message = messages::service::post_message(&db.pool, author, "popular")
        .await
        .unwrap()
        .id;

    for _ in 0..ROUNDS {
        let results = race(&db.pool, move |pool| async move {
            likes::service::like(&pool, fan, message).await.map(|_| ())
        })
        .await;

        assert_one_winner(&results, is_duplicate);
        assert_eq!(likes::service::likes_count(&db.pool, message).await.unwrap(), 1);

        likes::service::unlike(&db.pool, fan, message).await.unwrap();
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_signups_claim_one_username() {
    let db = FileDb::new("signup", RACERS as u32).await;

    let results = race(&db.pool, move |pool| async move {
        auth::service::signup(
            &pool,
            RegisterUser {
                username: "alice".to_string(),
                email: "alice@example.com".to_string(),
                password: PASSWORD.to_string(),
                image_url: None,
            },
        )
        .await
        .map(|_| ())
    })
    .await;

    assert_one_winner(&results, is_duplicate);
    assert_eq!(users::service::list_users(&db.pool, None).await.unwrap().len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_deletes_remove_once() {
    let db = FileDb::new("delete", RACERS as u32).await;
    let author = create_user(&db.pool, "author").await.id;
    let fan = create_user(&db.pool, "fan").await.id;

    let message = messages::service::post_message(&db.pool, author, "short lived")
        .await
        .unwrap()
        .id;
    likes::service::like(&db.pool, fan, message).await.unwrap();

    let results = race(&db.pool, move |pool| async move {
        messages::service::delete_message(&pool, author, message).await
    })
    .await;

    assert_one_winner(&results, is_not_found);
    assert_eq!(likes::service::likes_count(&db.pool, message).await.unwrap(), 0);

    let results = race(&db.pool, move |pool| async move {
        users::service::delete_user(&pool, fan).await
    })
    .await;

    assert_one_winner(&results, is_not_found);
    assert!(users::service::get_user(&db.pool, fan).await.is_err());
}
