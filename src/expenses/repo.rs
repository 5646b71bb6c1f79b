use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Expense {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category_id: Uuid,
    pub item: String,
    pub quantity: i32,
    pub price: f64,
    pub created_at: OffsetDateTime,
}

impl Expense {
    pub async fn list_by_category(
        db: &PgPool,
        user_id: Uuid,
        category_id: Uuid,
    ) -> anyhow::Result<Vec<Expense>> {
        let rows = sqlx::query_as::<_, Expense>(
            r#"
            SELECT id, user_id, category_id, item, quantity, price, created_at
            FROM expenses
            WHERE user_id = $1 AND category_id = $2
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .bind(category_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    /// Insert only if the target category belongs to the caller; `None`
    /// means the category does not exist for this user.
    pub async fn create(
        db: &PgPool,
        user_id: Uuid,
        category_id: Uuid,
        item: &str,
        quantity: i32,
        price: f64,
    ) -> anyhow::Result<Option<Expense>> {
        let row = sqlx::query_as::<_, Expense>(
            r#"
            INSERT INTO expenses (user_id, category_id, item, quantity, price)
            SELECT $1, $2, $3, $4, $5
            WHERE EXISTS (
                SELECT 1 FROM categories WHERE id = $2 AND user_id = $1
            )
            RETURNING id, user_id, category_id, item, quantity, price, created_at
            "#,
        )
        .bind(user_id)
        .bind(category_id)
        .bind(item)
        .bind(quantity)
        .bind(price)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    pub async fn update(
        db: &PgPool,
        user_id: Uuid,
        id: Uuid,
        item: &str,
        quantity: i32,
        price: f64,
    ) -> anyhow::Result<Option<Expense>> {
        let row = sqlx::query_as::<_, Expense>(
            r#"
            UPDATE expenses
            SET item = $3, quantity = $4, price = $5
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, category_id, item, quantity, price, created_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(item)
        .bind(quantity)
        .bind(price)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    pub async fn delete(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM expenses
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
    use crate::categories::repo::Category;

    async fn user_with_category(db: &PgPool, username: &str) -> (User, Category) {
        let user = User::create(db, username, None, "irrelevant-hash")
            .await
            .expect("create user");
        let category = Category::create(db, user.id, "Food").await.expect("create category");
        (user, category)
    }

    #[sqlx::test]
    async fn create_rejects_another_users_category(db: PgPool) {
        let (alice, food) = user_with_category(&db, "alice").await;
        let (bob, _) = user_with_category(&db, "bob").await;

        let stolen = Expense::create(&db, bob.id, food.id, "Milk", 1, 2.5)
            .await
            .unwrap();
        assert!(stolen.is_none());

        let own = Expense::create(&db, alice.id, food.id, "Milk", 1, 2.5)
            .await
            .unwrap()
            .expect("owner insert");
        assert_eq!(own.user_id, alice.id);
        assert_eq!(own.category_id, food.id);
    }

    #[sqlx::test]
    async fn listing_and_mutation_are_owner_scoped(db: PgPool) {
        let (alice, food) = user_with_category(&db, "alice").await;
        let (bob, _) = user_with_category(&db, "bob").await;
        let milk = Expense::create(&db, alice.id, food.id, "Milk", 2, 1.5)
            .await
            .unwrap()
            .unwrap();

        // Bob cannot see, rewrite or remove Alice's line.
        assert!(Expense::list_by_category(&db, bob.id, food.id)
            .await
            .unwrap()
            .is_empty());
        assert!(Expense::update(&db, bob.id, milk.id, "Beer", 6, 9.0)
            .await
            .unwrap()
            .is_none());
        assert!(!Expense::delete(&db, bob.id, milk.id).await.unwrap());

        let mine = Expense::list_by_category(&db, alice.id, food.id).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].item, "Milk");
        assert_eq!(mine[0].quantity, 2);

        assert!(Expense::delete(&db, alice.id, milk.id).await.unwrap());
    }
}
