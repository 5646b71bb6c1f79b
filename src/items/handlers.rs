use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    auth::extractors::AuthUser,
    error::{ApiError, Message},
    items::{dto::ItemRequest, repo::GroceryItem},
    state::AppState,
};

fn item_fields(payload: ItemRequest) -> Result<(String, i32, f64), ApiError> {
    let missing = || ApiError::Validation("All fields are required".into());
    let name = payload
        .item_name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .ok_or_else(missing)?;
    let quantity = payload.quantity.ok_or_else(missing)?;
    let price = payload.price.ok_or_else(missing)?;
    if quantity <= 0 || price < 0.0 {
        return Err(ApiError::Validation(
            "Quantity and price must be positive".into(),
        ));
    }
    Ok((name, quantity, price))
}

#[instrument(skip(state, identity))]
pub async fn list_items(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
) -> Result<Json<Vec<GroceryItem>>, ApiError> {
    let rows = GroceryItem::list_by_user(&state.db, identity.user_id).await?;
    Ok(Json(rows))
}

#[instrument(skip(state, identity, payload))]
pub async fn create_item(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Json(payload): Json<ItemRequest>,
) -> Result<(StatusCode, Json<GroceryItem>), ApiError> {
    let (name, quantity, price) = item_fields(payload)?;
    let row = GroceryItem::create(&state.db, identity.user_id, &name, quantity, price).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

#[instrument(skip(state, identity, payload))]
pub async fn update_item(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ItemRequest>,
) -> Result<Json<GroceryItem>, ApiError> {
    let (name, quantity, price) = item_fields(payload)?;
    GroceryItem::update(&state.db, identity.user_id, id, &name, quantity, price)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("Item"))
}

#[instrument(skip(state, identity))]
pub async fn delete_item(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Message>, ApiError> {
    if !GroceryItem::delete(&state.db, identity.user_id, id).await? {
        return Err(ApiError::NotFound("Item"));
    }
    Ok(Json(Message::new("Item deleted successfully")))
}
