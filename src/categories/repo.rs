use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub created_at: OffsetDateTime,
}

impl Category {
    pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<Category>> {
        let rows = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, user_id, name, created_at
            FROM categories
            WHERE user_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn create(db: &PgPool, user_id: Uuid, name: &str) -> anyhow::Result<Category> {
        let row = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (user_id, name)
            VALUES ($1, $2)
            RETURNING id, user_id, name, created_at
            "#,
        )
        .bind(user_id)
        .bind(name)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    /// Owner-scoped rename. `None` when the row does not exist or belongs to
    /// someone else; callers cannot tell which.
    pub async fn update(
        db: &PgPool,
        user_id: Uuid,
        id: Uuid,
        name: &str,
    ) -> anyhow::Result<Option<Category>> {
        let row = sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET name = $3
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, name, created_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(name)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    pub async fn delete(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM categories
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repo::User;

    async fn make_user(db: &PgPool, username: &str) -> User {
        User::create(db, username, None, "irrelevant-hash")
            .await
            .expect("create user")
    }

    #[sqlx::test]
    async fn lists_only_own_categories(db: PgPool) {
        let alice = make_user(&db, "alice").await;
        let bob = make_user(&db, "bob").await;
        Category::create(&db, alice.id, "Food").await.unwrap();
        Category::create(&db, bob.id, "Travel").await.unwrap();

        let mine = Category::list_by_user(&db, alice.id).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].name, "Food");
        assert_eq!(mine[0].user_id, alice.id);
    }

    #[sqlx::test]
    async fn update_and_delete_cannot_touch_another_users_row(db: PgPool) {
        let alice = make_user(&db, "alice").await;
        let bob = make_user(&db, "bob").await;
        let food = Category::create(&db, alice.id, "Food").await.unwrap();

        assert!(Category::update(&db, bob.id, food.id, "Hijacked")
            .await
            .unwrap()
            .is_none());
        assert!(!Category::delete(&db, bob.id, food.id).await.unwrap());

        // The row is intact and still Alice's.
        let mine = Category::list_by_user(&db, alice.id).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].name, "Food");

        // The owner can still mutate it.
        let renamed = Category::update(&db, alice.id, food.id, "Groceries")
            .await
            .unwrap()
            .expect("owner update");
        assert_eq!(renamed.name, "Groceries");
        assert!(Category::delete(&db, alice.id, food.id).await.unwrap());
    }
}
