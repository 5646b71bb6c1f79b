use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Per-user notification preference; at most one row per user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReportSettings {
    pub user_id: Uuid,
    pub enabled: bool,
    pub frequency: String,
    pub email: String,
    pub updated_at: OffsetDateTime,
}

impl ReportSettings {
    pub async fn find_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Option<ReportSettings>> {
        let row = sqlx::query_as::<_, ReportSettings>(
            r#"
            SELECT user_id, enabled, frequency, email, updated_at
            FROM report_settings
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    /// Idempotent write; the latest call wins.
    pub async fn upsert(
        db: &PgPool,
        user_id: Uuid,
        enabled: bool,
        frequency: &str,
        email: &str,
    ) -> anyhow::Result<ReportSettings> {
        let row = sqlx::query_as::<_, ReportSettings>(
            r#"
            INSERT INTO report_settings (user_id, enabled, frequency, email)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id) DO UPDATE
            SET enabled = EXCLUDED.enabled,
                frequency = EXCLUDED.frequency,
                email = EXCLUDED.email,
                updated_at = now()
            RETURNING user_id, enabled, frequency, email, updated_at
            "#,
        )
        .bind(user_id)
        .bind(enabled)
        .bind(frequency)
        .bind(email)
        .fetch_one(db)
        .await?;
        Ok(row)
    }
}
