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
    expenses::{
        dto::{CreateExpenseRequest, UpdateExpenseRequest},
        repo::Expense,
    },
    state::AppState,
};

fn all_fields_required() -> ApiError {
    ApiError::Validation("All fields are required".into())
}

fn line_fields(
    item: Option<String>,
    quantity: Option<i32>,
    price: Option<f64>,
) -> Result<(String, i32, f64), ApiError> {
    let item = item
        .map(|i| i.trim().to_string())
        .filter(|i| !i.is_empty())
        .ok_or_else(all_fields_required)?;
    let quantity = quantity.ok_or_else(all_fields_required)?;
    let price = price.ok_or_else(all_fields_required)?;
    if quantity <= 0 || price < 0.0 {
        return Err(ApiError::Validation(
            "Quantity and price must be positive".into(),
        ));
    }
    Ok((item, quantity, price))
}

#[instrument(skip(state, identity))]
pub async fn list_expenses(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(category_id): Path<Uuid>,
) -> Result<Json<Vec<Expense>>, ApiError> {
    let rows = Expense::list_by_category(&state.db, identity.user_id, category_id).await?;
    Ok(Json(rows))
}

#[instrument(skip(state, identity, payload))]
pub async fn create_expense(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Json(payload): Json<CreateExpenseRequest>,
) -> Result<(StatusCode, Json<Expense>), ApiError> {
    let category_id = payload.category_id.ok_or_else(all_fields_required)?;
    let (item, quantity, price) = line_fields(payload.item, payload.quantity, payload.price)?;

    let row = Expense::create(&state.db, identity.user_id, category_id, &item, quantity, price)
        .await?
        .ok_or(ApiError::NotFound("Category"))?;
    Ok((StatusCode::CREATED, Json(row)))
}

#[instrument(skip(state, identity, payload))]
pub async fn update_expense(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateExpenseRequest>,
) -> Result<Json<Expense>, ApiError> {
    let (item, quantity, price) = line_fields(payload.item, payload.quantity, payload.price)?;
    Expense::update(&state.db, identity.user_id, id, &item, quantity, price)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("Expense"))
}

#[instrument(skip(state, identity))]
pub async fn delete_expense(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Message>, ApiError> {
    if !Expense::delete(&state.db, identity.user_id, id).await? {
        return Err(ApiError::NotFound("Expense"));
    }
    Ok(Json(Message::new("Expense deleted successfully")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_fields_require_everything() {
        assert!(line_fields(None, Some(1), Some(1.0)).is_err());
        assert!(line_fields(Some("x".into()), None, Some(1.0)).is_err());
        assert!(line_fields(Some("x".into()), Some(1), None).is_err());
    }

    #[test]
    fn line_fields_reject_nonpositive_quantity() {
        assert!(line_fields(Some("x".into()), Some(0), Some(1.0)).is_err());
        assert!(line_fields(Some("x".into()), Some(-2), Some(1.0)).is_err());
        assert!(line_fields(Some("x".into()), Some(1), Some(-0.5)).is_err());
    }

    #[test]
    fn line_fields_pass_through_valid_input() {
        let (item, quantity, price) =
            line_fields(Some(" Milk ".into()), Some(2), Some(3.49)).unwrap();
        assert_eq!(item, "Milk");
        assert_eq!(quantity, 2);
        assert_eq!(price, 3.49);
    }
}
