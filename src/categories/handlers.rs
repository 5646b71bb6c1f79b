use axum::{
    extract::{Path, State},
    Json,
};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    auth::extractors::AuthUser,
    categories::{dto::CategoryRequest, repo::Category},
    error::{ApiError, Message},
    state::AppState,
};

fn category_name(payload: CategoryRequest) -> Result<String, ApiError> {
    match payload.name.map(|n| n.trim().to_string()) {
        Some(n) if !n.is_empty() => Ok(n),
        _ => Err(ApiError::Validation("Category name is required".into())),
    }
}

#[instrument(skip(state, identity))]
pub async fn list_categories(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
) -> Result<Json<Vec<Category>>, ApiError> {
    let rows = Category::list_by_user(&state.db, identity.user_id).await?;
    Ok(Json(rows))
}

#[instrument(skip(state, identity, payload))]
pub async fn create_category(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Json(payload): Json<CategoryRequest>,
) -> Result<Json<Category>, ApiError> {
    let name = category_name(payload)?;
    let row = Category::create(&state.db, identity.user_id, &name).await?;
    Ok(Json(row))
}

#[instrument(skip(state, identity, payload))]
pub async fn update_category(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<CategoryRequest>,
) -> Result<Json<Category>, ApiError> {
    let name = category_name(payload)?;
    Category::update(&state.db, identity.user_id, id, &name)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("Category"))
}

#[instrument(skip(state, identity))]
pub async fn delete_category(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Message>, ApiError> {
    if !Category::delete(&state.db, identity.user_id, id).await? {
        return Err(ApiError::NotFound("Category"));
    }
    Ok(Json(Message::new("Category deleted successfully")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_name_is_trimmed_and_required() {
        let ok = category_name(CategoryRequest {
            name: Some("  Food ".into()),
        })
        .unwrap();
        assert_eq!(ok, "Food");

        assert!(category_name(CategoryRequest { name: None }).is_err());
        assert!(category_name(CategoryRequest {
            name: Some("  ".into())
        })
        .is_err());
    }
}
