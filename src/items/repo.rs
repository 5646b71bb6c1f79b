use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GroceryItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub item_name: String,
    pub quantity: i32,
    pub price: f64,
    pub created_at: OffsetDateTime,
}

impl GroceryItem {
    pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<GroceryItem>> {
        let rows = sqlx::query_as::<_, GroceryItem>(
            r#"
            SELECT id, user_id, item_name, quantity, price, created_at
            FROM grocery_items
            WHERE user_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn create(
        db: &PgPool,
        user_id: Uuid,
        item_name: &str,
        quantity: i32,
        price: f64,
    ) -> anyhow::Result<GroceryItem> {
        let row = sqlx::query_as::<_, GroceryItem>(
            r#"
            INSERT INTO grocery_items (user_id, item_name, quantity, price)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, item_name, quantity, price, created_at
            "#,
        )
        .bind(user_id)
        .bind(item_name)
        .bind(quantity)
        .bind(price)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    pub async fn update(
        db: &PgPool,
        user_id: Uuid,
        id: Uuid,
        item_name: &str,
        quantity: i32,
        price: f64,
    ) -> anyhow::Result<Option<GroceryItem>> {
        let row = sqlx::query_as::<_, GroceryItem>(
            r#"
            UPDATE grocery_items
            SET item_name = $3, quantity = $4, price = $5
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, item_name, quantity, price, created_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(item_name)
        .bind(quantity)
        .bind(price)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    pub async fn delete(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM grocery_items
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
