//! Ownership-scoped todo queries.
//!
//! Every statement here carries the owner's id in its WHERE clause (or sets
//! it on insert), so a caller can never touch another user's rows no matter
//! what todo id they supply. A non-matching update or delete simply affects
//! zero rows; that is indistinguishable from success on purpose.

use sqlx::SqlitePool;

use super::Todo;

pub async fn list_for_date(
    pool: &SqlitePool,
    user_id: i64,
    date: &str,
) -> Result<Vec<Todo>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM todos WHERE date = ? AND user_id = ?")
        .bind(date)
        .bind(user_id)
        .fetch_all(pool)
        .await
}

pub async fn create(
    pool: &SqlitePool,
    user_id: i64,
    text: &str,
    date: &str,
) -> Result<Todo, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO todos (text, date, completed, user_id) VALUES (?, ?, 0, ?) RETURNING *",
    )
    .bind(text)
    .bind(date)
    .bind(user_id)
    .fetch_one(pool)
    .await
}

pub async fn set_completed(
    pool: &SqlitePool,
    user_id: i64,
    id: i64,
    completed: bool,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE todos SET completed = ? WHERE id = ? AND user_id = ?")
        .bind(completed)
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn set_text(
    pool: &SqlitePool,
    user_id: i64,
    id: i64,
    text: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE todos SET text = ? WHERE id = ? AND user_id = ?")
        .bind(text)
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn delete(pool: &SqlitePool, user_id: i64, id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM todos WHERE id = ? AND user_id = ?")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{test_pool, users};

    async fn two_users(pool: &SqlitePool) -> (i64, i64) {
        let alice = users::create(pool, "alice", "hash-a").await.unwrap();
        let bob = users::create(pool, "bob", "hash-b").await.unwrap();
        (alice.id, bob.id)
    }

    #[tokio::test]
    async fn test_create_and_list_scoped_to_owner() {
        let pool = test_pool().await;
        let (alice, bob) = two_users(&pool).await;

        let todo = create(&pool, alice, "buy milk", "2024-06-01").await.unwrap();
        assert_eq!(todo.text, "buy milk");
        assert_eq!(todo.date, "2024-06-01");
        assert!(!todo.completed);
        assert_eq!(todo.user_id, alice);

        let mine = list_for_date(&pool, alice, "2024-06-01").await.unwrap();
        assert_eq!(mine.len(), 1);

        // Same date, different owner: nothing visible
        let theirs = list_for_date(&pool, bob, "2024-06-01").await.unwrap();
        assert!(theirs.is_empty());

        // Same owner, different date: nothing visible
        let other_day = list_for_date(&pool, alice, "2024-06-02").await.unwrap();
        assert!(other_day.is_empty());
    }

    #[tokio::test]
    async fn test_updates_require_matching_owner() {
        let pool = test_pool().await;
        let (alice, bob) = two_users(&pool).await;
        let todo = create(&pool, alice, "buy milk", "2024-06-01").await.unwrap();

        // Bob supplies Alice's todo id: silent no-op
        set_completed(&pool, bob, todo.id, true).await.unwrap();
        set_text(&pool, bob, todo.id, "hijacked").await.unwrap();

        let mine = list_for_date(&pool, alice, "2024-06-01").await.unwrap();
        assert_eq!(mine[0].text, "buy milk");
        assert!(!mine[0].completed);

        // The owner's own updates apply
        set_completed(&pool, alice, todo.id, true).await.unwrap();
        set_text(&pool, alice, todo.id, "buy oat milk").await.unwrap();

        let mine = list_for_date(&pool, alice, "2024-06-01").await.unwrap();
        assert_eq!(mine[0].text, "buy oat milk");
        assert!(mine[0].completed);
    }

    #[tokio::test]
    async fn test_delete_requires_matching_owner() {
        let pool = test_pool().await;
        let (alice, bob) = two_users(&pool).await;
        let todo = create(&pool, alice, "buy milk", "2024-06-01").await.unwrap();

        delete(&pool, bob, todo.id).await.unwrap();
        let mine = list_for_date(&pool, alice, "2024-06-01").await.unwrap();
        assert_eq!(mine.len(), 1, "cross-user delete must not remove the row");

        delete(&pool, alice, todo.id).await.unwrap();
        let mine = list_for_date(&pool, alice, "2024-06-01").await.unwrap();
        assert!(mine.is_empty());
    }
}
