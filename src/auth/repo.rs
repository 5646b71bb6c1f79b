use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::config::IdentityField;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Option<String>,
    pub created_at: OffsetDateTime,
}

impl User {
    /// Look up a user by the configured login identity.
    pub async fn find_by_identity(
        db: &PgPool,
        field: IdentityField,
        value: &str,
    ) -> anyhow::Result<Option<User>> {
        let sql = match field {
            IdentityField::Username => {
                r#"
                SELECT id, username, email, password_hash, role, created_at
                FROM users
                WHERE username = $1
                "#
            }
            IdentityField::Email => {
                r#"
                SELECT id, username, email, password_hash, role, created_at
                FROM users
                WHERE email = $1
                "#
            }
        };
        let user = sqlx::query_as::<_, User>(sql)
            .bind(value)
            .fetch_optional(db)
            .await?;
        Ok(user)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, role, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Create a new user with hashed password. A duplicate username or email
    /// surfaces as a unique-violation database error.
    pub async fn create(
        db: &PgPool,
        username: &str,
        email: Option<&str>,
        password_hash: &str,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, password_hash, role, created_at
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .fetch_one(db)
        .await
    }
}
