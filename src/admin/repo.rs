use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// One expense line with its owner's username, for the cross-user view.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AdminExpense {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub category_id: Uuid,
    pub item: String,
    pub quantity: i32,
    pub price: f64,
    pub created_at: OffsetDateTime,
}

/// The one deliberately unscoped query in the system; callers must have
/// passed the admin gate before reaching it.
pub async fn list_all_expenses(db: &PgPool) -> anyhow::Result<Vec<AdminExpense>> {
    let rows = sqlx::query_as::<_, AdminExpense>(
        r#"
        SELECT e.id, e.user_id, u.username, e.category_id, e.item, e.quantity,
               e.price, e.created_at
        FROM expenses e
        JOIN users u ON u.id = e.user_id
        ORDER BY u.username ASC, e.created_at DESC
        "#,
    )
    .fetch_all(db)
    .await?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repo::User;
    use crate::categories::repo::Category;
    use crate::expenses::repo::Expense;

    #[sqlx::test]
    async fn aggregate_spans_all_users(db: PgPool) {
        for (name, item) in [("alice", "Milk"), ("bob", "Bread")] {
            let user = User::create(&db, name, None, "irrelevant-hash")
                .await
                .unwrap();
            let category = Category::create(&db, user.id, "Food").await.unwrap();
            Expense::create(&db, user.id, category.id, item, 1, 1.0)
                .await
                .unwrap()
                .unwrap();
        }

        let rows = list_all_expenses(&db).await.unwrap();
        assert_eq!(rows.len(), 2);
        let usernames: Vec<&str> = rows.iter().map(|r| r.username.as_str()).collect();
        assert!(usernames.contains(&"alice"));
        assert!(usernames.contains(&"bob"));
    }
}
