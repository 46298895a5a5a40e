//! Store tests against a real PostgreSQL database.
//!
//! Run with `cargo test -- --ignored` and `DATABASE_URL` pointing at a
//! scratch database; migrations are applied on connect.

use dotenv::dotenv;
use pretty_assertions::assert_eq;
use sqlx::PgPool;
use tasklist::models::{Task, UserId};
use tasklist::store::{CredentialStore, PgCredentialStore, PgTaskStore, StoreError, TaskStore};

async fn connect() -> PgPool {
    dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");
    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test DB");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

// Usernames are unique per run so tests can share one database.
fn unique(prefix: &str) -> String {
    let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
    format!("{}_{}", prefix, nanos)
}

async fn cleanup_user(pool: &PgPool, user_id: UserId) {
    let _ = sqlx::query("DELETE FROM tasks WHERE user_id = $1")
        .bind(user_id)
        .execute(pool)
        .await;
    let _ = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(pool)
        .await;
}

async fn count_users(pool: &PgPool, username: &str) -> i64 {
    let (count,) = sqlx::query_as::<_, (i64,)>("SELECT COUNT(*) FROM users WHERE username = $1")
        .bind(username)
        .fetch_one(pool)
        .await
        .unwrap();
    count
}

#[ignore = "needs DATABASE_URL"]
#[actix_rt::test]
async fn test_duplicate_username_is_a_conflict() {
    let pool = connect().await;
    let store = PgCredentialStore::new(pool.clone());
    let username = unique("pg_dup");

    let user_id = store.create(&username, "hash-1").await.unwrap();
    let err = store.create(&username, "hash-2").await.unwrap_err();
    assert!(matches!(err, StoreError::Conflict(_)), "got {:?}", err);
    assert_eq!(count_users(&pool, &username).await, 1);

    let found = store.find_by_username(&username).await.unwrap();
    assert_eq!(found.id, user_id);
    assert_eq!(found.password_hash, "hash-1");

    let missing = store.find_by_username(&unique("pg_nobody")).await;
    assert!(matches!(missing, Err(StoreError::NotFound)));

    cleanup_user(&pool, user_id).await;
}

#[ignore = "needs DATABASE_URL"]
#[actix_rt::test]
async fn test_tasks_are_owner_scoped_and_ordered() {
    let pool = connect().await;
    let users = PgCredentialStore::new(pool.clone());
    let tasks = PgTaskStore::new(pool.clone());

    let alice = users.create(&unique("pg_alice"), "hash").await.unwrap();
    let bob = users.create(&unique("pg_bob"), "hash").await.unwrap();

    let a1 = tasks.create("a1", alice).await.unwrap();
    let b1 = tasks.create("b1", bob).await.unwrap();
    let a2 = tasks.create("a2", alice).await.unwrap();

    assert_eq!(
        tasks.list_by_owner(alice).await.unwrap(),
        vec![Task::new(a1, "a1", alice), Task::new(a2, "a2", alice)]
    );

    // Bob cannot touch Alice's task.
    tasks.mark_done(a1, bob).await.unwrap();
    tasks.delete(a2, bob).await.unwrap();
    assert_eq!(
        tasks.list_by_owner(alice).await.unwrap(),
        vec![Task::new(a1, "a1", alice), Task::new(a2, "a2", alice)]
    );
    assert_eq!(
        tasks.list_by_owner(bob).await.unwrap(),
        vec![Task::new(b1, "b1", bob)]
    );

    cleanup_user(&pool, alice).await;
    cleanup_user(&pool, bob).await;
}

#[ignore = "needs DATABASE_URL"]
#[actix_rt::test]
async fn test_done_and_delete_are_idempotent() {
    let pool = connect().await;
    let users = PgCredentialStore::new(pool.clone());
    let tasks = PgTaskStore::new(pool.clone());

    let owner = users.create(&unique("pg_idem"), "hash").await.unwrap();
    let done = tasks.create("done twice", owner).await.unwrap();
    let gone = tasks.create("deleted twice", owner).await.unwrap();

    tasks.mark_done(done, owner).await.unwrap();
    tasks.mark_done(done, owner).await.unwrap();
    tasks.delete(gone, owner).await.unwrap();
    tasks.delete(gone, owner).await.unwrap();

    let remaining = tasks.list_by_owner(owner).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, done);
    assert!(remaining[0].done);

    tasks.ping().await.unwrap();
    cleanup_user(&pool, owner).await;
}
