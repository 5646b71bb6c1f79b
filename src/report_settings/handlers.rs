use axum::{extract::State, Json};
use tracing::instrument;

use crate::{
    auth::{extractors::AuthUser, handlers::is_valid_email},
    error::ApiError,
    report_settings::{dto::ReportSettingsRequest, repo::ReportSettings},
    state::AppState,
};

#[instrument(skip(state, identity))]
pub async fn get_settings(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
) -> Result<Json<Option<ReportSettings>>, ApiError> {
    let row = ReportSettings::find_by_user(&state.db, identity.user_id).await?;
    Ok(Json(row))
}

#[instrument(skip(state, identity, payload))]
pub async fn upsert_settings(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Json(payload): Json<ReportSettingsRequest>,
) -> Result<Json<ReportSettings>, ApiError> {
    let missing = || ApiError::Validation("All fields are required".into());
    let enabled = payload.enabled.ok_or_else(missing)?;
    let frequency = payload
        .frequency
        .map(|f| f.trim().to_lowercase())
        .filter(|f| !f.is_empty())
        .ok_or_else(missing)?;
    let email = payload
        .email
        .map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty())
        .ok_or_else(missing)?;
    if !is_valid_email(&email) {
        return Err(ApiError::Validation("Invalid email".into()));
    }

    let row =
        ReportSettings::upsert(&state.db, identity.user_id, enabled, &frequency, &email).await?;
    Ok(Json(row))
}
